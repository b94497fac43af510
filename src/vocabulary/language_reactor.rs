/*!
 * Language Reactor export parsing.
 *
 * Language Reactor exports are JSON arrays of saved items
 * (`lln_json_items_*.json`). Items are tagged with an `itemType` of
 * either WORD or PHRASE; only words feed the vocabulary set.
 */

use anyhow::Result;
use log::warn;
use serde::Deserialize;
use std::path::Path;

use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::vocabulary::models::{LearningStage, Word};

/// One saved item, discriminated by the vendor's `itemType` tag.
/// Fields the vocabulary set never looks at are left unparsed, so
/// schema churn in the export only matters where it can break us.
#[derive(Debug, Deserialize)]
#[serde(tag = "itemType")]
enum SavedItem {
    #[serde(rename = "WORD")]
    Word(SavedWord),
    #[serde(rename = "PHRASE")]
    Phrase,
    #[serde(other)]
    Unknown,
}

/// The word-item subset of the Language Reactor schema
#[derive(Debug, Deserialize)]
struct SavedWord {
    #[serde(rename = "langCode_G")]
    lang_code_g: String,
    #[serde(rename = "learningStage")]
    learning_stage: LearningStage,
    word: WordForm,
    #[serde(rename = "timeModified_ms")]
    time_modified_ms: i64,
}

/// Word text plus transliterations we do not use
#[derive(Debug, Deserialize)]
struct WordForm {
    text: String,
}

impl SavedWord {
    fn into_word(self) -> Result<Word> {
        Word::from_export(
            &self.word.text,
            &self.lang_code_g,
            self.learning_stage,
            self.time_modified_ms,
        )
    }
}

/// Parse one Language Reactor export file into vocabulary records.
///
/// A file that is not a JSON array fails as a whole; individual items
/// that cannot be parsed are logged and skipped, as are phrases.
pub fn parse_export(path: &Path) -> Result<Vec<Word>> {
    let content = FileManager::read_to_string(path)?;
    let items: Vec<serde_json::Value> = serde_json::from_str(&content).map_err(|err| {
        AppError::format(format!(
            "Not a Language Reactor export: \"{}\" ({})",
            path.display(),
            err
        ))
    })?;

    let mut words = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<SavedItem>(item) {
            Ok(SavedItem::Word(saved_word)) => match saved_word.into_word() {
                Ok(word) => words.push(word),
                Err(err) => warn!("Skipping item {} in \"{}\": {}", index, path.display(), err),
            },
            // Phrases carry sentence context, not vocabulary
            Ok(SavedItem::Phrase) => {}
            Ok(SavedItem::Unknown) => {
                warn!("Skipping item {} in \"{}\": unknown item type", index, path.display());
            }
            Err(err) => {
                warn!("Skipping item {} in \"{}\": {}", index, path.display(), err);
            }
        }
    }

    Ok(words)
}
