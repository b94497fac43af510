/*!
 * Tests for subtitle timing synthesis
 */

use tangocho::app_config::TimingConfig;
use tangocho::subtitles::timing::{build_segments, estimate_end};
use tangocho::subtitles::SubtitleCue;

fn cue(start_ms: Option<u64>, primary: &str, secondary: Option<&str>) -> SubtitleCue {
    SubtitleCue {
        start_ms,
        primary_text: primary.to_string(),
        secondary_text: secondary.map(str::to_string),
    }
}

/// Test that empty text gets the minimum duration
#[test]
fn test_estimate_end_withEmptyText_shouldUseMinDuration() {
    let timing = TimingConfig::default();

    let end = estimate_end(10_000, "", None, &timing);

    // base 400ms clamps up to the 1000ms floor
    assert_eq!(end, 10_000 + timing.min_duration_ms);
}

/// Test that duration grows with readable characters
#[test]
fn test_estimate_end_withLongerText_shouldGrowDuration() {
    let timing = TimingConfig::default();

    // 10 chars: 400 + 10 * 80 = 1200ms
    let end = estimate_end(0, "HelloWorld", None, &timing);

    assert_eq!(end, 1_200);
}

/// Test that internal newlines count as single spaces
#[test]
fn test_estimate_end_withNewlines_shouldCollapseThem() {
    let timing = TimingConfig::default();

    let multi_line = estimate_end(0, " Hello\nWorld ", None, &timing);
    let one_line = estimate_end(0, "Hello World", None, &timing);

    assert_eq!(multi_line, one_line);
}

/// Test the maximum duration cap
#[test]
fn test_estimate_end_withHugeText_shouldClampToMaxDuration() {
    let timing = TimingConfig {
        max_duration_ms: 5_000,
        ..TimingConfig::default()
    };
    let text = "あ".repeat(1_000);

    let end = estimate_end(1_000, &text, None, &timing);

    assert_eq!(end, 6_000);
}

/// Test that the last timed cue is not capped by any neighbor
#[test]
fn test_estimate_end_withNoNextStart_shouldReturnProposedEnd() {
    let timing = TimingConfig::default();
    let text = "あ".repeat(100);

    // 400 + 100 * 80 = 8400ms, nothing to cap it
    let end = estimate_end(0, &text, None, &timing);

    assert_eq!(end, 8_400);
}

/// Test capping at the next cue minus the gap
#[test]
fn test_estimate_end_withCloseNextStart_shouldCapBeforeIt() {
    let timing = TimingConfig::default();
    let text = "あ".repeat(100);

    let end = estimate_end(0, &text, Some(2_000), &timing);

    assert_eq!(end, 2_000 - timing.gap_ms);
}

/// Test the collapse edge case when the next cue leaves no room
#[test]
fn test_estimate_end_withNextStartTooSoon_shouldCollapseToZeroLength() {
    let timing = TimingConfig::default();

    // next_start - gap <= start, so the cue collapses
    assert_eq!(estimate_end(1_000, "text", Some(1_003), &timing), 1_000);
    assert_eq!(estimate_end(1_000, "text", Some(1_000), &timing), 1_000);
    // next cue even starts earlier than this one
    assert_eq!(estimate_end(1_000, "text", Some(500), &timing), 1_000);
}

/// Test that build_segments aligns output with input by index
#[test]
fn test_build_segments_withUntimedCues_shouldAlignByIndex() {
    let timing = TimingConfig::default();
    let cues = vec![
        cue(Some(0), "first", None),
        cue(None, "untimed", None),
        cue(Some(10_000), "third", None),
    ];

    let segments = build_segments(&cues, &timing);

    assert_eq!(segments.len(), 3);
    assert!(segments[0].is_some());
    assert!(segments[1].is_none());
    assert!(segments[2].is_some());
}

/// An earlier segment never runs past the next timed
/// cue minus the gap, unless collapsed to zero length
#[test]
fn test_build_segments_withAdjacentTimedCues_shouldNeverOverlap() {
    let timing = TimingConfig::default();
    let cues = vec![
        cue(Some(0), "こんにちは、世界。長めの字幕テキストです。", None),
        cue(Some(800), "short", None),
        cue(Some(803), "crowded", None),
        cue(Some(20_000), "plenty of room here", None),
        cue(Some(21_000), "last", None),
    ];

    let segments = build_segments(&cues, &timing);

    let timed: Vec<_> = segments.iter().flatten().collect();
    for pair in timed.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        assert!(
            current.end_ms <= next.start_ms - timing.gap_ms || current.end_ms == current.start_ms,
            "segment {:?} overlaps into {:?}",
            current,
            next
        );
        assert!(current.end_ms >= current.start_ms);
    }
}

/// Test that a next-cue lookup skips untimed rows in between
#[test]
fn test_build_segments_withUntimedRowBetween_shouldCapAgainstNextTimedCue() {
    let timing = TimingConfig::default();
    let cues = vec![
        cue(Some(0), &"あ".repeat(200), None),
        cue(None, "no timing", None),
        cue(Some(1_500), "next timed", None),
    ];

    let segments = build_segments(&cues, &timing);

    assert_eq!(segments[0].unwrap().end_ms, 1_500 - timing.gap_ms);
}

/// Test that a blank primary falls back to the translation for the
/// duration estimate
#[test]
fn test_build_segments_withBlankPrimary_shouldEstimateFromSecondary() {
    let timing = TimingConfig::default();
    let text = "あ".repeat(50);
    let cues = vec![cue(Some(0), "  ", Some(&text))];

    let segments = build_segments(&cues, &timing);

    // 400 + 50 * 80 = 4400ms from the secondary text
    assert_eq!(segments[0].unwrap().end_ms, 4_400);
}

/// Test synthesizing nothing
#[test]
fn test_build_segments_withNoCues_shouldReturnEmpty() {
    assert!(build_segments(&[], &TimingConfig::default()).is_empty());
}
