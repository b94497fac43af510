/*!
 * Migaku export parsing.
 *
 * Migaku exports are CSV files (`migaku_words_*.csv`) with one row per
 * tracked word. Migaku's five-state `knownStatus` collapses onto the
 * three canonical learning stages.
 */

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::path::Path;

use crate::errors::AppError;
use crate::vocabulary::models::{LearningStage, Word};

const REQUIRED_COLUMNS: [&str; 4] = ["dictForm", "language", "knownStatus", "mod"];

/// The row subset of the Migaku CSV schema that matters here
#[derive(Debug, Deserialize)]
struct MigakuRow {
    #[serde(rename = "dictForm")]
    dict_form: String,
    language: String,
    #[serde(rename = "knownStatus")]
    known_status: String,
    #[serde(rename = "mod")]
    modified_ms: i64,
}

impl MigakuRow {
    fn learning_stage(&self) -> Result<LearningStage> {
        match self.known_status.trim() {
            "KNOWN" => Ok(LearningStage::Known),
            "TRACKED" | "LEARNING" => Ok(LearningStage::Learning),
            "UNKNOWN" | "IGNORED" => Ok(LearningStage::Skipped),
            other => {
                Err(AppError::format(format!("Unknown Migaku status: \"{}\"", other)).into())
            }
        }
    }

    fn into_word(self) -> Result<Word> {
        let learning_stage = self.learning_stage()?;
        Word::from_export(&self.dict_form, &self.language, learning_stage, self.modified_ms)
    }
}

/// Parse one Migaku export file into vocabulary records.
///
/// Missing required columns fail the whole file; rows that cannot be
/// parsed are logged and skipped.
pub fn parse_export(path: &Path) -> Result<Vec<Word>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open Migaku export: {}", path.display()))?;

    let headers = reader
        .headers()
        .map_err(|err| {
            AppError::format(format!(
                "Not a Migaku export: \"{}\" ({})",
                path.display(),
                err
            ))
        })?
        .clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::format(format!(
            "Migaku export \"{}\" is missing columns: {}",
            path.display(),
            missing.join(", ")
        ))
        .into());
    }

    let mut words = Vec::new();
    for (index, row) in reader.deserialize::<MigakuRow>().enumerate() {
        match row {
            Ok(migaku_row) => match migaku_row.into_word() {
                Ok(word) => words.push(word),
                Err(err) => warn!("Skipping row {} in \"{}\": {}", index, path.display(), err),
            },
            Err(err) => warn!("Skipping row {} in \"{}\": {}", index, path.display(), err),
        }
    }

    Ok(words)
}
