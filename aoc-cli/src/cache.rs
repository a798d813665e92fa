//! On-disk puzzle input cache

use crate::error::CacheError;
use std::fs;
use std::path::PathBuf;

/// Inputs stored as `{dir}/{year}_day{day:02}.txt`
pub struct InputCache {
    dir: PathBuf,
}

impl InputCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn cache_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.cache_path(year, day).is_file()
    }

    /// Cached input, or `None` on a miss
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, CacheError> {
        let path = self.cache_path(year, day);
        if !path.is_file() {
            return Ok(None);
        }
        log::debug!("reading cached input {}", path.display());
        Ok(Some(fs::read_to_string(&path)?))
    }

    /// Store input, creating the cache directory on first use
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            CacheError::DirCreation(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;
        fs::write(self.cache_path(year, day), input)?;
        Ok(())
    }
}
