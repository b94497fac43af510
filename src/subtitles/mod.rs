/*!
 * Subtitle sheet conversion.
 *
 * Converts cue sheets (subtitle tables with start times only) into SRT
 * files with synthesized end times. It is split into several submodules:
 *
 * - `sheet`: CSV cue sheet reading
 * - `timing`: Timestamp parsing and end-time synthesis
 * - `srt`: SRT text rendering and output naming
 */

// Re-export main types for easier usage
pub use self::sheet::CueSheet;
pub use self::timing::{SubtitleCue, SubtitleSegment};

// Submodules
pub mod sheet;
pub mod srt;
pub mod timing;
