/*!
 * Common test utilities for the tangocho test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use serde_json::json;
use tempfile::TempDir;

use tangocho::app_config::Config;
use tangocho::vocabulary::{LearningStage, Word, WordCache};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a word record the way the vendor parsers would
pub fn word(text: &str, language: &str, stage: LearningStage, modified_ms: i64) -> Word {
    Word::from_export(text, language, stage, modified_ms).unwrap()
}

/// Renders a Language Reactor export with one WORD item per
/// (text, language, stage, modified_ms) tuple
pub fn lr_export(items: &[(&str, &str, &str, i64)]) -> String {
    let array: Vec<serde_json::Value> = items
        .iter()
        .map(|(text, language, stage, modified_ms)| {
            json!({
                "itemType": "WORD",
                "langCode_G": language,
                "learningStage": stage,
                "word": { "text": text },
                "timeModified_ms": modified_ms,
            })
        })
        .collect();
    serde_json::to_string(&array).unwrap()
}

/// Renders a Migaku export with one row per
/// (dictForm, language, knownStatus, mod) tuple
pub fn migaku_export(rows: &[(&str, &str, &str, i64)]) -> String {
    let mut lines = vec!["dictForm,language,knownStatus,mod".to_string()];
    for (text, language, status, modified_ms) in rows {
        lines.push(format!("{},{},{},{}", text, language, status, modified_ms));
    }
    lines.join("\n")
}

/// Renders a cue sheet with one row per (time, subtitle, translation)
/// tuple. The translation column is only present when requested.
pub fn cue_sheet(rows: &[(&str, &str, &str)], with_translations: bool) -> String {
    let mut lines = Vec::new();
    if with_translations {
        lines.push("Time,Subtitle,Machine Translation".to_string());
        for (time, subtitle, translation) in rows {
            lines.push(format!("{},{},{}", time, subtitle, translation));
        }
    } else {
        lines.push("Time,Subtitle".to_string());
        for (time, subtitle, _) in rows {
            lines.push(format!("{},{}", time, subtitle));
        }
    }
    lines.join("\n")
}

/// A config with every path pointed at the given temp directory and
/// file removal switched off, so tests opt into it explicitly
pub fn test_config(dir: &Path) -> Config {
    let srt_dir = dir.join("srt");
    fs::create_dir_all(&srt_dir).unwrap();

    let mut config = Config::default();
    config.exported_files_dir = dir.to_path_buf();
    config.srt_target_dir = Some(srt_dir);
    config.remove_processed_files = false;
    config
}

/// A cache handle inside the given temp directory
pub fn test_cache(dir: &Path) -> WordCache {
    WordCache::new(dir.join("cache").join("words.json"))
}
