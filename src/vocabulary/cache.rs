/*!
 * On-disk word cache.
 *
 * After every reconciliation the full word set is written to a JSON file
 * under the platform cache directory, so later runs can rebuild state
 * after the vendor export files have been consumed and removed.
 */

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_config::APP_NAME;
use crate::errors::AppError;
use crate::vocabulary::models::{Word, WordSet};

/// Cache filename under the application cache directory
const CACHE_FILENAME: &str = "words.json";

/// Handle to the word cache file
#[derive(Debug, Clone)]
pub struct WordCache {
    cache_path: PathBuf,
}

impl WordCache {
    /// Open the cache at the default platform location
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_cache_path()?))
    }

    /// Open the cache at a specific path
    pub fn new<P: AsRef<Path>>(cache_path: P) -> Self {
        Self {
            cache_path: cache_path.as_ref().to_path_buf(),
        }
    }

    /// Get the default cache file path
    pub fn default_cache_path() -> Result<PathBuf> {
        let base_dir = dirs::cache_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?;

        Ok(base_dir.join(APP_NAME).join(CACHE_FILENAME))
    }

    /// Get the cache file path
    pub fn path(&self) -> &Path {
        &self.cache_path
    }

    pub fn exists(&self) -> bool {
        self.cache_path.is_file()
    }

    /// Read the cached word set. A missing cache reads as empty;
    /// a cache that exists but cannot be parsed is a format error.
    pub fn read(&self) -> Result<WordSet> {
        if !self.exists() {
            return Ok(WordSet::new());
        }

        let content = fs::read_to_string(&self.cache_path)
            .with_context(|| format!("Failed to read cache: {:?}", self.cache_path))?;
        let words: Vec<Word> = serde_json::from_str(&content).map_err(|err| {
            AppError::format(format!(
                "Corrupt word cache \"{}\": {}",
                self.cache_path.display(),
                err
            ))
        })?;

        Ok(words.into_iter().collect())
    }

    /// Overwrite the cache with the given word set
    pub fn write(&self, words: &WordSet) -> Result<()> {
        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create cache directory: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(&words.to_sorted_vec())
            .context("Failed to serialize word cache")?;
        fs::write(&self.cache_path, content)
            .with_context(|| format!("Failed to write cache: {:?}", self.cache_path))?;

        info!("Cached {} words.", words.len());
        Ok(())
    }

    /// Delete the cache file if it exists
    pub fn clear(&self) -> Result<()> {
        if self.exists() {
            fs::remove_file(&self.cache_path)
                .with_context(|| format!("Failed to remove cache: {:?}", self.cache_path))?;
        }
        info!("Cache is cleared.");
        Ok(())
    }
}
