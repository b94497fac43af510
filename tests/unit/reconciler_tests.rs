/*!
 * Tests for word reconciliation across sources and snapshots
 */

use tangocho::vocabulary::{reconciler, LearningStage};
use crate::common::word;

/// Test that overlapping snapshots of the same source collapse to the
/// newest record per word
#[test]
fn test_merge_withOverlappingSnapshots_shouldKeepNewestPerKey() {
    let words = reconciler::merge(vec![
        // First export snapshot
        word("犬", "ja", LearningStage::Learning, 1_000),
        word("猫", "ja", LearningStage::Learning, 1_000),
        // Second snapshot, exported later, 犬 progressed
        word("犬", "ja", LearningStage::Known, 5_000),
        word("猫", "ja", LearningStage::Learning, 1_000),
    ]);

    assert_eq!(words.len(), 2);
    assert_eq!(words.get("ja:犬").unwrap().learning_stage, LearningStage::Known);
    assert_eq!(words.get("ja:猫").unwrap().learning_stage, LearningStage::Learning);
}

/// Test that records from different vendors reconcile through the
/// shared key derivation
#[test]
fn test_merge_withTwoVendors_shouldCollapseSameWord() {
    let words = reconciler::merge(vec![
        word("犬", "ja", LearningStage::Learning, 1_000),
        word("犬", "ja", LearningStage::Known, 2_000),
        word("Hund", "de", LearningStage::Known, 3_000),
    ]);

    assert_eq!(words.len(), 2);
    assert_eq!(words.get("ja:犬").unwrap().learning_stage, LearningStage::Known);
    assert!(words.get("de:Hund").is_some());
}

/// Test that the same text in different languages stays two entries
#[test]
fn test_merge_withSameTextDifferentLanguage_shouldKeepBoth() {
    let words = reconciler::merge(vec![
        word("sake", "ja", LearningStage::Known, 1_000),
        word("sake", "en", LearningStage::Learning, 2_000),
    ]);

    assert_eq!(words.len(), 2);
}

/// KNOWN at t=100 then SKIPPED at t=200 excludes the
/// word; the reversed order includes it
#[test]
fn test_merge_withLastWriteWins_shouldHonorChronology() {
    let suppressed = reconciler::merge(vec![
        word("w1", "ja", LearningStage::Known, 100),
        word("w1", "ja", LearningStage::Skipped, 200),
    ]);
    assert!(suppressed.is_empty());

    let included = reconciler::merge(vec![
        word("w1", "ja", LearningStage::Skipped, 100),
        word("w1", "ja", LearningStage::Known, 200),
    ]);
    assert_eq!(included.len(), 1);
    assert_eq!(included.get("ja:w1").unwrap().learning_stage, LearningStage::Known);
}

/// Test that a Skipped record only suppresses its own key
#[test]
fn test_merge_withSkippedRecord_shouldNotAffectOtherKeys() {
    let words = reconciler::merge(vec![
        word("犬", "ja", LearningStage::Skipped, 2_000),
        word("猫", "ja", LearningStage::Known, 1_000),
    ]);

    assert_eq!(words.len(), 1);
    assert!(words.get("ja:猫").is_some());
}

/// Test that merging a merged result again changes nothing
#[test]
fn test_merge_withOwnOutput_shouldBeIdempotent() {
    let first = reconciler::merge(vec![
        word("犬", "ja", LearningStage::Learning, 1_000),
        word("犬", "ja", LearningStage::Known, 2_000),
        word("猫", "ja", LearningStage::Skipped, 3_000),
        word("鳥", "ja", LearningStage::Learning, 4_000),
    ]);

    let second = reconciler::merge(first.clone().into_sorted_vec());

    assert_eq!(first, second);
}

/// Test merging nothing
#[test]
fn test_merge_withNoRecords_shouldReturnEmptySet() {
    let words = reconciler::merge(Vec::new());
    assert!(words.is_empty());
}
