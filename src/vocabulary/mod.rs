/*!
 * Vocabulary import and reconciliation.
 *
 * This module turns vendor word exports into one canonical word set.
 * It is split into several submodules:
 *
 * - `models`: Canonical word record, learning stages and the keyed set
 * - `language_reactor`: Language Reactor JSON export parsing
 * - `migaku`: Migaku CSV export parsing
 * - `reconciler`: Last-write-wins merge across all sources
 * - `cache`: JSON snapshot of the reconciled set between runs
 * - `importer`: The discover-parse-merge-persist pipeline
 */

// Re-export main types for easier usage
pub use self::cache::WordCache;
pub use self::models::{LearningStage, Word, WordSet};

// Submodules
pub mod cache;
pub mod importer;
pub mod language_reactor;
pub mod migaku;
pub mod models;
pub mod reconciler;
