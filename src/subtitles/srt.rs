/*!
 * SRT rendering.
 *
 * Turns synthesized segments plus one text track into SRT. Cue indices
 * are only consumed by cues that actually render, so files stay densely
 * numbered from 1 regardless of suppressed rows.
 */

use std::path::{Path, PathBuf};

use crate::subtitles::timing::SubtitleSegment;

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Render one text track against the shared segments.
///
/// `segments` and `texts` are aligned by cue index. Rows without a
/// segment or with blank text are dropped without consuming an index.
/// Rendered blocks are separated by blank lines and the output ends
/// with exactly one newline.
pub fn render(segments: &[Option<SubtitleSegment>], texts: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut counter = 1;

    for (segment, raw_text) in segments.iter().zip(texts) {
        let Some(segment) = segment else {
            continue;
        };
        let text = raw_text.trim();
        if text.is_empty() {
            continue;
        }

        lines.push(counter.to_string());
        lines.push(format!(
            "{} --> {}",
            format_timestamp(segment.start_ms),
            format_timestamp(segment.end_ms)
        ));
        lines.extend(text.lines().map(str::to_string));
        lines.push(String::new());
        counter += 1;
    }

    lines.join("\n")
}

/// Build the output path for one track of a converted sheet.
///
/// The sheet id is the last `_`-separated token of the file stem, so
/// `lln_excel_subs_823471.csv` becomes `823471_primary.srt`.
pub fn output_path(sheet_path: &Path, track: &str, target_dir: &Path) -> PathBuf {
    let stem = sheet_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let sheet_id = stem.rsplit('_').next().unwrap_or(&stem);

    target_dir.join(format!("{}_{}.srt", sheet_id, track))
}
