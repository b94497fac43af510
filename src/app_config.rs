use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::AppError;
use crate::language_utils;
use crate::vocabulary::models::LearningStage;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and overriding configuration settings.
/// Application name, used for cache and config locations
pub const APP_NAME: &str = "tangocho";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory scanned for vendor export files and cue sheets
    #[serde(default = "default_exported_files_dir")]
    pub exported_files_dir: PathBuf,

    /// Glob for Language Reactor JSON exports
    #[serde(default = "default_lr_files_glob")]
    pub lr_files_glob: String,

    /// Glob for Migaku CSV exports
    #[serde(default = "default_migaku_files_glob")]
    pub migaku_files_glob: String,

    /// Glob for subtitle cue sheets
    #[serde(default = "default_subtitle_files_glob")]
    pub subtitle_files_glob: String,

    /// Where generated SRT files land; defaults to exported_files_dir
    #[serde(default)]
    pub srt_target_dir: Option<PathBuf>,

    /// Remove consumed export files after successful processing
    #[serde(default = "default_true")]
    pub remove_processed_files: bool,

    /// Language filter for the words command (empty means unset)
    #[serde(default)]
    pub language: String,

    /// Stage filter for the words command (empty means all stages)
    #[serde(default)]
    pub stage: String,

    /// Language whose words feed the kanji report
    #[serde(default = "default_kanji_language")]
    pub kanji_language: String,

    /// Anki query cutoff as "min_known,min_learning"
    #[serde(default = "default_anki_min_counts")]
    pub anki_min_counts: String,

    /// Prefix filters prepended to the Anki query
    #[serde(default = "default_anki_filters")]
    pub anki_filters: String,

    /// Anki note field holding the kanji character
    #[serde(default = "default_anki_kanji_field")]
    pub anki_kanji_field: String,

    /// Subtitle timing heuristic knobs
    #[serde(default)]
    pub timing: TimingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Knobs for the subtitle end-time heuristic
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// Fixed duration floor added before per-character time
    #[serde(default = "default_base_duration_ms")]
    pub base_duration_ms: u64,

    /// Reading time per character of readable text
    #[serde(default = "default_ms_per_char")]
    pub ms_per_char: u64,

    /// Shortest duration a proposed cue may get
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Longest duration a proposed cue may get
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,

    /// Silence enforced before the next timed cue
    #[serde(default = "default_gap_ms")]
    pub gap_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            base_duration_ms: default_base_duration_ms(),
            ms_per_char: default_ms_per_char(),
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
            gap_ms: default_gap_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Map to the log crate's filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(AppError::config(format!("Invalid log level: {}", s)).into()),
        }
    }
}

fn default_exported_files_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("Downloads"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_lr_files_glob() -> String {
    "lln_json_items_*.json".to_string()
}

fn default_migaku_files_glob() -> String {
    "migaku_words_*.csv".to_string()
}

fn default_subtitle_files_glob() -> String {
    "lln_excel_subs_*.csv".to_string()
}

fn default_kanji_language() -> String {
    "ja".to_string()
}

fn default_anki_min_counts() -> String {
    "0,0".to_string()
}

fn default_anki_filters() -> String {
    "deck:漢字 is:suspended".to_string()
}

fn default_anki_kanji_field() -> String {
    "kanji".to_string()
}

fn default_base_duration_ms() -> u64 {
    400
}

fn default_ms_per_char() -> u64 {
    80
}

fn default_min_duration_ms() -> u64 {
    1000
}

fn default_max_duration_ms() -> u64 {
    // Effectively uncapped
    387_420_489
}

fn default_gap_ms() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and parseable values
    pub fn validate(&self) -> Result<()> {
        Self::parse_min_counts(&self.anki_min_counts)?;
        self.stage_filter()?;

        if !self.exported_files_dir.is_dir() {
            return Err(AppError::config(format!(
                "Directory not found: {}",
                self.exported_files_dir.display()
            ))
            .into());
        }
        if let Some(srt_target_dir) = &self.srt_target_dir {
            if !srt_target_dir.is_dir() {
                return Err(AppError::config(format!(
                    "Directory not found: {}",
                    srt_target_dir.display()
                ))
                .into());
            }
        }

        if !self.language.trim().is_empty() {
            language_utils::validate_language_code(&self.language)
                .map_err(|err| AppError::config(err.to_string()))?;
        }
        language_utils::validate_language_code(&self.kanji_language)
            .map_err(|err| AppError::config(err.to_string()))?;

        if self.timing.min_duration_ms > self.timing.max_duration_ms {
            return Err(AppError::config(format!(
                "min_duration_ms ({}) cannot exceed max_duration_ms ({})",
                self.timing.min_duration_ms, self.timing.max_duration_ms
            ))
            .into());
        }

        Ok(())
    }

    /// Parse an "N,M" pair into (min_known, min_learning)
    pub fn parse_min_counts(value: &str) -> Result<(usize, usize)> {
        let parsed: Option<Vec<usize>> = value
            .split(',')
            .map(|part| part.trim().parse().ok())
            .collect();

        match parsed.as_deref() {
            Some([min_known, min_learning]) => Ok((*min_known, *min_learning)),
            _ => Err(AppError::config(format!(
                "anki_min_counts must be 2 integers separated by a comma, not this: {}",
                value
            ))
            .into()),
        }
    }

    /// The configured Anki cutoff pair
    pub fn min_counts(&self) -> Result<(usize, usize)> {
        Self::parse_min_counts(&self.anki_min_counts)
    }

    /// The configured stage filter; empty means no filtering
    pub fn stage_filter(&self) -> Result<Option<LearningStage>> {
        let stage = self.stage.trim();
        if stage.is_empty() {
            return Ok(None);
        }
        stage.parse::<LearningStage>().map(Some).map_err(|_| {
            AppError::config(format!(
                "stage must be one of LEARNING, KNOWN, SKIPPED, not this: {}",
                stage
            ))
            .into()
        })
    }

    /// Where SRT files are written
    pub fn srt_output_dir(&self) -> PathBuf {
        self.srt_target_dir
            .clone()
            .unwrap_or_else(|| self.exported_files_dir.clone())
    }

    /// Apply `KEY=VALUE` override pairs from the command line
    pub fn apply_overrides(&mut self, pairs: &[String]) -> Result<()> {
        for pair in pairs {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                AppError::config(format!("Override must look like KEY=VALUE, not this: {}", pair))
            })?;
            self.apply_override(key.trim(), value.trim())?;
        }
        Ok(())
    }

    /// Apply one override. Keys match config fields and are
    /// case-insensitive; unknown keys are rejected.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<()> {
        match key.to_lowercase().as_str() {
            "exported_files_dir" => self.exported_files_dir = PathBuf::from(value),
            "lr_files_glob" => self.lr_files_glob = value.to_string(),
            "migaku_files_glob" => self.migaku_files_glob = value.to_string(),
            "subtitle_files_glob" => self.subtitle_files_glob = value.to_string(),
            "srt_target_dir" => self.srt_target_dir = Some(PathBuf::from(value)),
            "remove_processed_files" => {
                self.remove_processed_files = parse_bool_value(key, value)?;
            }
            "language" => self.language = value.to_string(),
            "stage" => self.stage = value.to_string(),
            "kanji_language" => self.kanji_language = value.to_string(),
            "anki_min_counts" => {
                Self::parse_min_counts(value)?;
                self.anki_min_counts = value.to_string();
            }
            "anki_filters" => self.anki_filters = value.to_string(),
            "anki_kanji_field" => self.anki_kanji_field = value.to_string(),
            "base_duration_ms" => self.timing.base_duration_ms = parse_u64_value(key, value)?,
            "ms_per_char" => self.timing.ms_per_char = parse_u64_value(key, value)?,
            "min_duration_ms" => self.timing.min_duration_ms = parse_u64_value(key, value)?,
            "max_duration_ms" => self.timing.max_duration_ms = parse_u64_value(key, value)?,
            "gap_ms" => self.timing.gap_ms = parse_u64_value(key, value)?,
            "log_level" => self.log_level = value.parse()?,
            _ => {
                return Err(AppError::config(format!("Invalid overriding key: {}", key)).into());
            }
        }
        Ok(())
    }
}

fn parse_bool_value(key: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| {
        AppError::config(format!("{} must be true or false, not this: {}", key, value)).into()
    })
}

fn parse_u64_value(key: &str, value: &str) -> Result<u64> {
    value.parse().map_err(|_| {
        AppError::config(format!("{} must be a non-negative integer, not this: {}", key, value))
            .into()
    })
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            exported_files_dir: default_exported_files_dir(),
            lr_files_glob: default_lr_files_glob(),
            migaku_files_glob: default_migaku_files_glob(),
            subtitle_files_glob: default_subtitle_files_glob(),
            srt_target_dir: None,
            remove_processed_files: true,
            language: String::new(),
            stage: String::new(),
            kanji_language: default_kanji_language(),
            anki_min_counts: default_anki_min_counts(),
            anki_filters: default_anki_filters(),
            anki_kanji_field: default_anki_kanji_field(),
            timing: TimingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
