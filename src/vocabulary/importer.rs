/*!
 * Word import pipeline.
 *
 * Discovers vendor export files, parses them, merges them with the
 * cached word set and persists the result. When no export files are
 * present the cache alone is the source of truth.
 */

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::vocabulary::cache::WordCache;
use crate::vocabulary::models::{Word, WordSet};
use crate::vocabulary::{language_reactor, migaku, reconciler};

/// Import words from every available source.
///
/// Fresh Migaku and Language Reactor exports are merged on top of the
/// cached set, the cache is overwritten with the result, and consumed
/// export files are removed when the config says so. Without any export
/// files the cache is returned as-is; without a cache either, this is
/// a not-found error naming everything that was looked for.
pub fn import_words(config: &Config, cache: &WordCache) -> Result<WordSet> {
    let lr_files =
        FileManager::find_matching_files(&config.exported_files_dir, &config.lr_files_glob)?;
    let migaku_files =
        FileManager::find_matching_files(&config.exported_files_dir, &config.migaku_files_glob)?;

    if lr_files.is_empty() && migaku_files.is_empty() {
        let files_not_found = format!(
            "Neither Language Reactor files \"{}\" nor Migaku files \"{}\" are found in directory: \"{}\"",
            config.lr_files_glob,
            config.migaku_files_glob,
            config.exported_files_dir.display()
        );

        if !cache.exists() {
            return Err(AppError::not_found(format!(
                "{}\n  Cache also not found: \"{}\"",
                files_not_found,
                cache.path().display()
            ))
            .into());
        }
        info!("{}. Using cache.", files_not_found);

        return cache.read();
    }

    // Cached records go first so fresh exports win timestamp ties
    let mut records: Vec<Word> = cache.read()?.into_sorted_vec();
    parse_exports(&migaku_files, &lr_files, &mut records)?;

    let words = reconciler::merge(records);
    cache.write(&words)?;

    if config.remove_processed_files {
        FileManager::remove_files(&lr_files)?;
        FileManager::remove_files(&migaku_files)?;
    }

    Ok(words)
}

fn parse_exports(
    migaku_files: &[PathBuf],
    lr_files: &[PathBuf],
    records: &mut Vec<Word>,
) -> Result<()> {
    let total_files = (migaku_files.len() + lr_files.len()) as u64;
    let progress_bar = ProgressBar::new(total_files);
    let template_result = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(template_result.progress_chars("█▓▒░"));
    progress_bar.set_message("Importing exports");

    for migaku_file in migaku_files {
        records.extend(migaku::parse_export(migaku_file)?);
        progress_bar.inc(1);
    }
    for lr_file in lr_files {
        records.extend(language_reactor::parse_export(lr_file)?);
        progress_bar.inc(1);
    }

    progress_bar.finish_and_clear();
    Ok(())
}
