use anyhow::Result;
use log::{info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::kanji;
use crate::language_utils;
use crate::subtitles::{sheet, srt, timing};
use crate::vocabulary::cache::WordCache;
use crate::vocabulary::importer;
use crate::vocabulary::models::WordSet;

// @module: Application controller wiring commands to the pipelines

/// Main application controller for the export-processing commands
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Word cache handle
    cache: WordCache,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let cache = WordCache::open_default()?;
        Ok(Self { config, cache })
    }

    /// Create a controller with an explicit cache location, for tests
    /// and external consumers
    pub fn with_config_and_cache(config: Config, cache: WordCache) -> Self {
        Self { config, cache }
    }

    /// Run the words command: reconcile all sources and print the word
    /// list for the configured language and stage filter
    pub fn run_words(&self) -> Result<()> {
        let words = importer::import_words(&self.config, &self.cache)?;
        let listing = self.word_listing(&words)?;
        println!("{}", listing.join("\n"));
        Ok(())
    }

    /// Select and sort the word texts matching the configured filters
    pub fn word_listing(&self, words: &WordSet) -> Result<Vec<String>> {
        let language = self.config.language.trim();
        let known_languages = words.languages();
        let language_is_known = known_languages
            .iter()
            .any(|code| language_utils::language_codes_match(code, language));
        if language.is_empty() || !language_is_known {
            let options: Vec<&str> = known_languages.iter().map(String::as_str).collect();
            return Err(AppError::config(format!(
                "language must be one of ({}), not this: \"{}\"",
                options.join(", "),
                language
            ))
            .into());
        }

        if let Ok(language_name) = language_utils::get_language_name(language) {
            info!("Exporting {} words.", language_name);
        }

        let stage_filter = self.config.stage_filter()?;
        let mut listing: Vec<String> = words
            .iter()
            .filter(|word| language_utils::language_codes_match(&word.language, language))
            .filter(|word| stage_filter.is_none_or(|stage| word.learning_stage == stage))
            .map(|word| word.word.clone())
            .collect();
        listing.sort();
        Ok(listing)
    }

    /// Run the kanji command: reconcile all sources, aggregate kanji
    /// usage and print either the TSV report or an Anki search query
    pub fn run_kanji(&self, anki: bool) -> Result<()> {
        let words = importer::import_words(&self.config, &self.cache)?;
        let stats = kanji::sorted_desc(kanji::collect_stats(words.iter(), &self.config.kanji_language));

        let output = if anki {
            kanji::build_anki_query(
                &stats,
                self.config.min_counts()?,
                &self.config.anki_filters,
                &self.config.anki_kanji_field,
            )
        } else {
            kanji::render_tsv(&stats)
        };
        println!("{}", output);
        Ok(())
    }

    /// Run the srt command: convert every discovered cue sheet into
    /// per-track SRT files
    pub fn run_srt(&self) -> Result<()> {
        let sheet_files = FileManager::find_matching_files(
            &self.config.exported_files_dir,
            &self.config.subtitle_files_glob,
        )?;
        if sheet_files.is_empty() {
            warn!(
                "No cue sheets \"{}\" found in directory: \"{}\"",
                self.config.subtitle_files_glob,
                self.config.exported_files_dir.display()
            );
            return Ok(());
        }

        for sheet_file in &sheet_files {
            self.convert_sheet(sheet_file)?;
        }

        if self.config.remove_processed_files {
            FileManager::remove_files(&sheet_files)?;
        }
        Ok(())
    }

    /// Convert one cue sheet. The whole sheet is parsed and timed
    /// before anything is written, so a bad sheet leaves no output.
    fn convert_sheet(&self, sheet_file: &Path) -> Result<()> {
        let cue_sheet = sheet::read_cue_sheet(sheet_file)?;
        let segments = timing::build_segments(&cue_sheet.cues, &self.config.timing);

        let target_dir = self.config.srt_output_dir();
        FileManager::ensure_dir(&target_dir)?;

        let primary_texts: Vec<String> = cue_sheet
            .cues
            .iter()
            .map(|cue| cue.primary_text.clone())
            .collect();
        let primary_path = srt::output_path(sheet_file, "primary", &target_dir);
        FileManager::write_to_file(&primary_path, &srt::render(&segments, &primary_texts))?;
        info!("Added \"{}\".", primary_path.display());

        if cue_sheet.has_translations {
            let secondary_texts: Vec<String> = cue_sheet
                .cues
                .iter()
                .map(|cue| cue.secondary_text.clone().unwrap_or_default())
                .collect();
            let secondary_path = srt::output_path(sheet_file, "secondary", &target_dir);
            FileManager::write_to_file(
                &secondary_path,
                &srt::render(&segments, &secondary_texts),
            )?;
            info!("Added \"{}\".", secondary_path.display());
        }

        Ok(())
    }

    /// Run the cache clear command
    pub fn run_cache_clear(&self) -> Result<()> {
        self.cache.clear()
    }
}
