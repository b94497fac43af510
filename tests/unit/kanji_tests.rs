/*!
 * Tests for kanji aggregation and the Anki query builder
 */

use std::collections::BTreeSet;
use tangocho::kanji::{self, KanjiStat};
use tangocho::vocabulary::LearningStage;
use crate::common::word;

fn stat(character: char, known: &[&str], learning: &[&str]) -> KanjiStat {
    KanjiStat {
        character,
        known_words: known.iter().map(|s| s.to_string()).collect(),
        learning_words: learning.iter().map(|s| s.to_string()).collect(),
    }
}

/// Test Han character extraction
#[test]
fn test_find_kanji_chars_withMixedText_shouldReturnOnlyHan() {
    let chars = kanji::find_kanji_chars("日本語のテキスト abc 123");

    assert_eq!(chars, BTreeSet::from(['日', '本', '語']));
}

/// Test that repeated characters collapse to one entry
#[test]
fn test_find_kanji_chars_withRepeatedChar_shouldDeduplicate() {
    let chars = kanji::find_kanji_chars("人人人");

    assert_eq!(chars.len(), 1);
}

/// Test aggregation by stage across words
#[test]
fn test_collect_stats_withWordsOfBothStages_shouldSplitByStage() {
    let words = vec![
        word("日本", "ja", LearningStage::Known, 1_000),
        word("本日", "ja", LearningStage::Known, 2_000),
        word("本当", "ja", LearningStage::Learning, 3_000),
    ];

    let stats = kanji::collect_stats(words.iter(), "ja");

    let hon = stats.iter().find(|stat| stat.character == '本').unwrap();
    assert_eq!(hon.known_words, BTreeSet::from(["日本".to_string(), "本日".to_string()]));
    assert_eq!(hon.learning_words, BTreeSet::from(["本当".to_string()]));

    let nichi = stats.iter().find(|stat| stat.character == '日').unwrap();
    assert_eq!(nichi.known_words.len(), 2);
    assert!(nichi.learning_words.is_empty());
}

/// Test the language filter, including the 2- vs 3-letter code forms
#[test]
fn test_collect_stats_withOtherLanguages_shouldIgnoreThem() {
    let words = vec![
        word("日本", "ja", LearningStage::Known, 1_000),
        // Chinese uses Han characters but is not the kanji language
        word("你好", "zh", LearningStage::Known, 2_000),
        word("日本語", "jpn", LearningStage::Known, 3_000),
    ];

    let stats = kanji::collect_stats(words.iter(), "ja");

    assert!(stats.iter().any(|stat| stat.character == '語'));
    assert!(!stats.iter().any(|stat| stat.character == '你'));
}

/// Test words without kanji contribute nothing
#[test]
fn test_collect_stats_withKanaOnlyWord_shouldContributeNothing() {
    let words = vec![word("ひらがな", "ja", LearningStage::Known, 1_000)];

    let stats = kanji::collect_stats(words.iter(), "ja");

    assert!(stats.is_empty());
}

/// Test the descending sort with the character tiebreak
#[test]
fn test_sorted_desc_withTies_shouldBreakByCharAscending() {
    let stats = vec![
        stat('二', &["a"], &["b", "c"]),
        stat('三', &["a", "b", "c"], &[]),
        stat('一', &["a"], &["b", "c"]),
        stat('四', &["a"], &[]),
    ];

    let sorted = kanji::sorted_desc(stats);

    let order: Vec<char> = sorted.iter().map(|stat| stat.character).collect();
    assert_eq!(order, vec!['三', '一', '二', '四']);
}

/// The Anki query covers a prefix of the ranking and
/// stops at the first entry below the cutoff
#[test]
fn test_build_anki_query_withThreshold_shouldShortCircuitAtFirstMiss() {
    let stats = vec![
        stat('一', &["a", "b", "c", "d", "e"], &["f"]),
        stat('二', &["a", "b", "c", "d", "e"], &[]),
        // Below the cutoff; nothing after this may appear
        stat('三', &["a", "b", "c"], &["d", "e"]),
        stat('四', &["a", "b", "c", "d", "e", "f"], &["g"]),
    ];

    let query = kanji::build_anki_query(&stats, (5, 0), "deck:kanji", "kanji");

    assert_eq!(query, "deck:kanji (kanji:一 OR kanji:二)");
}

/// Test the query over an empty prefix
#[test]
fn test_build_anki_query_withNothingAboveThreshold_shouldSuggestLowering() {
    let stats = vec![stat('一', &["a"], &[])];

    let query = kanji::build_anki_query(&stats, (5, 5), "deck:kanji", "kanji");

    assert!(query.contains("anki_min_counts"));
}

/// Test the TSV report layout
#[test]
fn test_render_tsv_withStats_shouldRenderHeaderAndRows() {
    let stats = vec![stat('本', &["日本", "本日"], &["本当"])];

    let tsv = kanji::render_tsv(&stats);

    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(
        lines[0],
        "Kanji\tKnown Words Count\tLearning Words Count\tKnown Words\tLearning Words"
    );
    assert_eq!(lines[1], "本\t2\t1\t日本、本日\t本当");
}

/// Test the TSV report with no stats at all
#[test]
fn test_render_tsv_withNoStats_shouldRenderHeaderOnly() {
    let tsv = kanji::render_tsv(&[]);

    assert_eq!(tsv.lines().count(), 1);
}
