/*!
 * # tangocho - a vocabulary notebook for language learners
 *
 * A Rust library for processing the files that language-learning browser
 * extensions export.
 *
 * ## Features
 *
 * - Parse word exports from Language Reactor (JSON) and Migaku (CSV)
 * - Reconcile overlapping exports into one deduplicated word set
 * - Remember the reconciled set between runs in a JSON cache
 * - Convert subtitle cue sheets into timed SRT files
 * - Aggregate per-kanji usage statistics and build Anki search queries
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `vocabulary`: Word export processing:
 *   - `vocabulary::language_reactor`: Language Reactor JSON export parsing
 *   - `vocabulary::migaku`: Migaku CSV export parsing
 *   - `vocabulary::reconciler`: Last-write-wins merge of word records
 *   - `vocabulary::cache`: Persistent word cache
 *   - `vocabulary::importer`: Discovery and import orchestration
 * - `subtitles`: Cue sheet handling:
 *   - `subtitles::sheet`: Cue sheet CSV parsing
 *   - `subtitles::timing`: Timestamp parsing and end-time synthesis
 *   - `subtitles::srt`: SRT rendering
 * - `kanji`: Kanji usage aggregation
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod vocabulary;
pub mod subtitles;
pub mod kanji;
pub mod app_controller;
pub mod language_utils;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use vocabulary::{LearningStage, Word, WordCache, WordSet};
pub use subtitles::{CueSheet, SubtitleCue, SubtitleSegment};
pub use language_utils::{language_codes_match, normalize_to_part2t, get_language_name};
pub use errors::AppError;
