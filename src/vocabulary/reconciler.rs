/*!
 * Word reconciliation.
 *
 * Collapses records from every source (cache, Migaku, Language Reactor)
 * into one set with a single record per word key, where the newest
 * record wins and a newest-is-Skipped record suppresses the word.
 */

use crate::vocabulary::models::{Word, WordSet};

/// Merge records from all sources into the canonical word set.
///
/// Records are sorted by `modified_at` ascending with a stable sort, so
/// equal timestamps keep their input order and later sources win ties.
/// Walking oldest to newest, each record replaces the entry under its
/// key; only Learning and Known records stay in the set, so a Skipped
/// record removes the word entirely.
pub fn merge(records: impl IntoIterator<Item = Word>) -> WordSet {
    let mut combined: Vec<Word> = records.into_iter().collect();
    combined.sort_by_key(|word| word.modified_at);

    let mut words = WordSet::new();
    for word in combined {
        words.remove(&word.key);
        if word.learning_stage.is_active() {
            words.insert(word);
        }
    }
    words
}
