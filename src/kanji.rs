/*!
 * Kanji frequency aggregation.
 *
 * Walks the reconciled word set, indexes every Han character by the
 * words it appears in, and renders either a TSV report or an Anki
 * search query for the best-covered characters.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use crate::language_utils;
use crate::vocabulary::models::{LearningStage, Word};

static HAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{Han}").expect("Invalid Han regex")
});

/// One kanji with the words it appears in, split by learning stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanjiStat {
    pub character: char,
    pub known_words: BTreeSet<String>,
    pub learning_words: BTreeSet<String>,
}

impl KanjiStat {
    fn new(character: char) -> Self {
        Self {
            character,
            known_words: BTreeSet::new(),
            learning_words: BTreeSet::new(),
        }
    }

    /// Sort rank: known coverage first, learning coverage second
    fn counts(&self) -> (usize, usize) {
        (self.known_words.len(), self.learning_words.len())
    }
}

/// Distinct Han characters in a text
pub fn find_kanji_chars(text: &str) -> BTreeSet<char> {
    HAN_REGEX
        .find_iter(text)
        .filter_map(|found| found.as_str().chars().next())
        .collect()
}

/// Index kanji usage over the words of one language.
///
/// Only words labeled with `kanji_language` contribute. The reconciled
/// set never holds Skipped words, so only Known and Learning matter.
pub fn collect_stats<'a>(
    words: impl IntoIterator<Item = &'a Word>,
    kanji_language: &str,
) -> Vec<KanjiStat> {
    let mut by_char: BTreeMap<char, KanjiStat> = BTreeMap::new();

    for word in words {
        if !language_utils::language_codes_match(&word.language, kanji_language) {
            continue;
        }
        for character in find_kanji_chars(&word.word) {
            let stat = by_char
                .entry(character)
                .or_insert_with(|| KanjiStat::new(character));
            match word.learning_stage {
                LearningStage::Known => {
                    stat.known_words.insert(word.word.clone());
                }
                LearningStage::Learning => {
                    stat.learning_words.insert(word.word.clone());
                }
                LearningStage::Skipped => {}
            }
        }
    }

    by_char.into_values().collect()
}

/// Sort kanji by descending known and learning counts, character as
/// the ascending tiebreak
pub fn sorted_desc(mut stats: Vec<KanjiStat>) -> Vec<KanjiStat> {
    stats.sort_by_key(|stat| {
        let (known, learning) = stat.counts();
        (Reverse(known), Reverse(learning), stat.character)
    });
    stats
}

/// Render the TSV report, header row first
pub fn render_tsv(stats_sorted_desc: &[KanjiStat]) -> String {
    let mut rows = vec![[
        "Kanji",
        "Known Words Count",
        "Learning Words Count",
        "Known Words",
        "Learning Words",
    ]
    .join("\t")];

    for stat in stats_sorted_desc {
        rows.push(format!(
            "{}\t{}\t{}\t{}\t{}",
            stat.character,
            stat.known_words.len(),
            stat.learning_words.len(),
            join_words(&stat.known_words),
            join_words(&stat.learning_words),
        ));
    }

    rows.join("\n")
}

fn join_words(words: &BTreeSet<String>) -> String {
    words.iter().map(String::as_str).collect::<Vec<_>>().join("、")
}

/// Build an Anki search query for the top kanji.
///
/// The sorted list is cut off at the first kanji below `min_counts`
/// (lexicographic on the count pair), not filtered, so the query always
/// covers a prefix of the ranking.
pub fn build_anki_query(
    stats_sorted_desc: &[KanjiStat],
    min_counts: (usize, usize),
    anki_filters: &str,
    anki_kanji_field: &str,
) -> String {
    let clauses: Vec<String> = stats_sorted_desc
        .iter()
        .take_while(|stat| stat.counts() >= min_counts)
        .map(|stat| format!("{}:{}", anki_kanji_field, stat.character))
        .collect();

    if clauses.is_empty() {
        return "Kanji not found. Try lowering anki_min_counts".to_string();
    }
    format!("{} ({})", anki_filters, clauses.join(" OR "))
}
