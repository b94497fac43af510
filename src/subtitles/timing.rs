/*!
 * Subtitle timing synthesis.
 *
 * Cue sheets carry start timestamps only. This module estimates end
 * timestamps from text length with a reading-speed heuristic, capped so
 * a cue never overlaps the next timed cue.
 */

use anyhow::Result;

use crate::app_config::TimingConfig;
use crate::errors::AppError;

/// One row of a cue sheet: an optional start time plus the subtitle
/// text and its optional machine translation
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    /// Start time in milliseconds; None when the sheet row had no time
    pub start_ms: Option<u64>,
    /// Original subtitle text
    pub primary_text: String,
    /// Machine translation, when the sheet has that column
    pub secondary_text: Option<String>,
}

impl SubtitleCue {
    /// The text whose length drives the duration estimate: the primary
    /// text, or the translation when the primary is blank
    pub fn resolved_text(&self) -> &str {
        let primary = self.primary_text.trim();
        if !primary.is_empty() {
            return primary;
        }
        self.secondary_text.as_deref().map(str::trim).unwrap_or("")
    }
}

/// A synthesized display interval shared by all text tracks of a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtitleSegment {
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Parse a cue sheet timestamp into milliseconds.
///
/// Accepts `<number>s` (fractional seconds), `MM:SS` and `HH:MM:SS`
/// (fractional seconds allowed in the last component). Blank values
/// mean the row has no timestamp and parse to None; anything else
/// malformed is a format error.
pub fn parse_time(value: &str) -> Result<Option<u64>> {
    let time_str = value.trim();
    if time_str.is_empty() {
        return Ok(None);
    }

    if let Some(seconds_str) = time_str.strip_suffix('s') {
        let seconds = parse_seconds(seconds_str, time_str)?;
        return Ok(Some((seconds * 1000.0) as u64));
    }

    let parts: Vec<&str> = time_str.split(':').collect();
    match parts.as_slice() {
        [minutes_str, seconds_str] => {
            let minutes = parse_int_component(minutes_str, time_str)?;
            let seconds = parse_seconds(seconds_str, time_str)?;
            Ok(Some((((minutes * 60) as f64 + seconds) * 1000.0) as u64))
        }
        [hours_str, minutes_str, seconds_str] => {
            let hours = parse_int_component(hours_str, time_str)?;
            let minutes = parse_int_component(minutes_str, time_str)?;
            let seconds = parse_seconds(seconds_str, time_str)?;
            Ok(Some(
                (((hours * 3600 + minutes * 60) as f64 + seconds) * 1000.0) as u64,
            ))
        }
        _ => Err(invalid_time(time_str)),
    }
}

fn parse_int_component(component: &str, time_str: &str) -> Result<u64> {
    component.trim().parse::<u64>().map_err(|_| invalid_time(time_str))
}

fn parse_seconds(component: &str, time_str: &str) -> Result<f64> {
    let seconds: f64 = component.trim().parse().map_err(|_| invalid_time(time_str))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid_time(time_str));
    }
    Ok(seconds)
}

fn invalid_time(time_str: &str) -> anyhow::Error {
    AppError::format(format!("Invalid time format: {}", time_str)).into()
}

/// Estimate an end timestamp using a reading-speed heuristic.
///
/// The proposed duration grows with readable character count and is
/// clamped to the configured bounds. When the next timed cue exists the
/// end is capped at `next_start - gap`; if even the start does not fit
/// under that cap, the cue collapses to zero length.
pub fn estimate_end(
    start_ms: u64,
    text: &str,
    next_start_ms: Option<u64>,
    timing: &TimingConfig,
) -> u64 {
    let readable_chars = readable_char_count(text) as u64;
    let duration_ms = timing
        .base_duration_ms
        .saturating_add(readable_chars.saturating_mul(timing.ms_per_char))
        .min(timing.max_duration_ms)
        .max(timing.min_duration_ms);

    let proposed_end = start_ms.saturating_add(duration_ms);
    let Some(next_start_ms) = next_start_ms else {
        return proposed_end;
    };

    let latest_allowed = next_start_ms.saturating_sub(timing.gap_ms).max(start_ms);
    if latest_allowed <= start_ms {
        return start_ms;
    }
    proposed_end.min(latest_allowed)
}

fn readable_char_count(text: &str) -> usize {
    text.replace('\n', " ").trim().chars().count()
}

/// For each row, the start time of the nearest later row that has one
pub fn compute_next_starts(times_ms: &[Option<u64>]) -> Vec<Option<u64>> {
    let mut next_starts = vec![None; times_ms.len()];
    let mut next_start = None;
    for index in (0..times_ms.len()).rev() {
        next_starts[index] = next_start;
        if times_ms[index].is_some() {
            next_start = times_ms[index];
        }
    }
    next_starts
}

/// Compute one shared segment per cue, aligned by index with the input.
/// Cues without a start time get None and are skipped at render time.
pub fn build_segments(cues: &[SubtitleCue], timing: &TimingConfig) -> Vec<Option<SubtitleSegment>> {
    let times_ms: Vec<Option<u64>> = cues.iter().map(|cue| cue.start_ms).collect();
    let next_starts = compute_next_starts(&times_ms);

    cues.iter()
        .zip(next_starts)
        .map(|(cue, next_start_ms)| {
            let start_ms = cue.start_ms?;
            let end_ms = estimate_end(start_ms, cue.resolved_text(), next_start_ms, timing);
            Some(SubtitleSegment { start_ms, end_ms })
        })
        .collect()
}
