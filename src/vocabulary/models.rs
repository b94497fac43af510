/*!
 * Vocabulary data model.
 *
 * These structures are the canonical shape of a tracked word, shared by
 * the vendor parsers, the reconciler and the on-disk cache.
 */

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::errors::AppError;

/// Learning stage of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LearningStage {
    /// Word is being studied
    Learning,
    /// Word is mastered
    Known,
    /// Word is excluded from tracking
    Skipped,
}

impl LearningStage {
    /// Stages that keep a word in the reconciled set. A Skipped record
    /// removes the word instead.
    pub fn is_active(&self) -> bool {
        matches!(self, LearningStage::Learning | LearningStage::Known)
    }
}

impl fmt::Display for LearningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningStage::Learning => write!(f, "LEARNING"),
            LearningStage::Known => write!(f, "KNOWN"),
            LearningStage::Skipped => write!(f, "SKIPPED"),
        }
    }
}

impl std::str::FromStr for LearningStage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LEARNING" => Ok(LearningStage::Learning),
            "KNOWN" => Ok(LearningStage::Known),
            "SKIPPED" => Ok(LearningStage::Skipped),
            _ => Err(anyhow::anyhow!("Invalid learning stage: {}", s)),
        }
    }
}

/// One tracked word. Vendor parsers normalize their records into this
/// shape, and the reconciled set holds the same shape after merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Identity of the word, derived as `{language}:{text}` so records
    /// for the same word from different vendors collapse to one entry
    pub key: String,
    /// The word text itself
    pub word: String,
    /// ISO language code as labeled by the vendor
    pub language: String,
    /// Current learning stage
    pub learning_stage: LearningStage,
    /// When the record was last touched, from the vendor's timestamp
    pub modified_at: DateTime<Utc>,
}

impl Word {
    /// Derive the identity key shared by all sources
    pub fn identity_key(language: &str, text: &str) -> String {
        format!("{}:{}", language, text)
    }

    /// Build a canonical record from vendor fields. `modified_ms` is a
    /// Unix epoch timestamp in milliseconds.
    pub fn from_export(
        text: &str,
        language: &str,
        learning_stage: LearningStage,
        modified_ms: i64,
    ) -> Result<Self> {
        let text = text.trim();
        let language = language.trim();
        if text.is_empty() {
            return Err(AppError::format("Word record has empty text").into());
        }
        if language.is_empty() {
            return Err(AppError::format(format!("Word \"{}\" has empty language code", text)).into());
        }
        let modified_at = DateTime::from_timestamp_millis(modified_ms).ok_or_else(|| {
            AppError::format(format!(
                "Word \"{}\" has an out-of-range timestamp: {}",
                text, modified_ms
            ))
        })?;

        Ok(Self {
            key: Self::identity_key(language, text),
            word: text.to_string(),
            language: language.to_string(),
            learning_stage,
            modified_at,
        })
    }
}

/// The reconciled word set, keyed by `Word::key`. Insertion replaces any
/// previous record with the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordSet {
    words: HashMap<String, Word>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Insert a word, returning the record it replaced if any
    pub fn insert(&mut self, word: Word) -> Option<Word> {
        self.words.insert(word.key.clone(), word)
    }

    /// Remove a word by key, returning it if present
    pub fn remove(&mut self, key: &str) -> Option<Word> {
        self.words.remove(key)
    }

    /// Look up a word by key
    pub fn get(&self, key: &str) -> Option<&Word> {
        self.words.get(key)
    }

    /// Iterate over the words in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    /// Distinct language codes present in the set
    pub fn languages(&self) -> BTreeSet<String> {
        self.words.values().map(|word| word.language.clone()).collect()
    }

    /// Words sorted by key, for deterministic output
    pub fn to_sorted_vec(&self) -> Vec<&Word> {
        let mut words: Vec<&Word> = self.words.values().collect();
        words.sort_by(|a, b| a.key.cmp(&b.key));
        words
    }

    /// Consume the set into a key-sorted vector
    pub fn into_sorted_vec(self) -> Vec<Word> {
        let mut words: Vec<Word> = self.words.into_values().collect();
        words.sort_by(|a, b| a.key.cmp(&b.key));
        words
    }
}

impl FromIterator<Word> for WordSet {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        let mut set = WordSet::new();
        for word in iter {
            set.insert(word);
        }
        set
    }
}
