//! Database configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tagsearch_storage::backends::{RedbConfig, RedbEngine};
use tracing::debug;

use crate::error::{Error, Result};

/// Configuration options for opening a storage engine.
///
/// Either `path` is set, or `in_memory` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file.
    pub path: Option<PathBuf>,
    /// Keep the database in memory instead of on disk.
    pub in_memory: bool,
    /// Maximum size of the database file in bytes.
    pub max_size: Option<u64>,
    /// Cache size in bytes.
    pub cache_size: Option<usize>,
    /// Maximum number of named regions (one per open store).
    pub max_regions: Option<usize>,
}

impl Config {
    /// Create a configuration for a database file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()), ..Self::default() }
    }

    /// Create a configuration for an in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { in_memory: true, ..Self::default() }
    }

    /// Set the maximum database size.
    #[must_use]
    pub const fn max_size(mut self, size: u64) -> Self {
        self.max_size = Some(size);
        self
    }

    /// Set the cache size.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }

    /// Set the maximum number of regions.
    #[must_use]
    pub const fn max_regions(mut self, limit: usize) -> Self {
        self.max_regions = Some(limit);
        self
    }

    /// The storage backend configuration derived from this one.
    #[must_use]
    pub fn redb_config(&self) -> RedbConfig {
        RedbConfig { max_size: self.max_size, cache_size: self.cache_size, max_regions: self.max_regions }
    }

    /// Open the storage engine described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if neither or both of `path` and `in_memory`
    /// are set, and a storage error if the engine cannot be opened.
    pub fn open_engine(&self) -> Result<RedbEngine> {
        let engine = match (&self.path, self.in_memory) {
            (Some(path), false) => RedbEngine::open_with_config(path, self.redb_config())?,
            (None, true) => RedbEngine::in_memory_with_config(self.redb_config())?,
            (Some(_), true) => {
                return Err(Error::Config("both a path and in_memory were given".to_owned()))
            }
            (None, false) => {
                return Err(Error::Config("either a path or in_memory is required".to_owned()))
            }
        };
        debug!(config = ?self, "opened storage engine");
        Ok(engine)
    }
}
