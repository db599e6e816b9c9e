//! Redb storage engine implementation.

use std::io::ErrorKind;
use std::path::Path;

use redb::{Database, ReadableTable, ReadableTableMetadata};
use tracing::{debug, info};

use crate::engine::{StorageEngine, StorageError, StorageResult};

use super::tables::{validate_region_name, REGION_TABLE};
use super::transaction::{internal, RedbTransaction};

/// Configuration options for the Redb storage engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedbConfig {
    /// Maximum size of the database file in bytes.
    ///
    /// Checked when an existing file is opened. If not set, the file grows
    /// as needed.
    pub max_size: Option<u64>,

    /// Cache size in bytes. If not set, uses Redb's default.
    pub cache_size: Option<usize>,

    /// Maximum number of distinct regions. If not set, unlimited.
    pub max_regions: Option<usize>,
}

impl RedbConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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
}

/// A storage engine backed by Redb.
///
/// # Example
///
/// ```no_run
/// use tagsearch_storage::backends::{RedbConfig, RedbEngine};
/// use tagsearch_storage::{StorageEngine, Transaction};
///
/// let config = RedbConfig::new().max_regions(8);
/// let engine = RedbEngine::open_with_config("tags.redb", config)?;
/// engine.open_region("tags")?;
///
/// let mut tx = engine.begin_write()?;
/// tx.put("tags", b"cat.jpg", b"cat")?;
/// tx.commit()?;
/// # Ok::<(), tagsearch_storage::StorageError>(())
/// ```
pub struct RedbEngine {
    db: Database,
    max_regions: Option<usize>,
}

impl RedbEngine {
    /// Open or create a database at the given path with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with_config(path, RedbConfig::default())
    }

    /// Open or create a database at the given path with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or
    /// created, or if an existing file is larger than `config.max_size`.
    pub fn open_with_config(path: impl AsRef<Path>, config: RedbConfig) -> StorageResult<Self> {
        let path = path.as_ref();

        if let Some(max_size) = config.max_size {
            match std::fs::metadata(path) {
                Ok(meta) if meta.len() > max_size => {
                    return Err(StorageError::Open(format!(
                        "{} is {} bytes, exceeding the configured maximum of {max_size}",
                        path.display(),
                        meta.len()
                    )));
                }
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        let mut builder = Database::builder();
        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }
        let db = builder.create(path).map_err(|e| StorageError::Open(e.to_string()))?;

        info!(path = %path.display(), max_regions = ?config.max_regions, "opened redb database");
        Ok(Self { db, max_regions: config.max_regions })
    }

    /// Create an in-memory database for testing.
    ///
    /// The database is lost when the engine is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be created.
    pub fn in_memory() -> StorageResult<Self> {
        Self::in_memory_with_config(RedbConfig::default())
    }

    /// Create an in-memory database with custom configuration.
    ///
    /// `max_size` does not apply to in-memory databases.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be created.
    pub fn in_memory_with_config(config: RedbConfig) -> StorageResult<Self> {
        let mut builder = Database::builder();
        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }
        let db = builder
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| StorageError::Open(e.to_string()))?;

        debug!("created in-memory redb database");
        Ok(Self { db, max_regions: config.max_regions })
    }

    /// The configured maximum number of regions.
    pub const fn max_regions(&self) -> Option<usize> {
        self.max_regions
    }

    /// Names of all registered regions, in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    pub fn regions(&self) -> StorageResult<Vec<String>> {
        let tx = self.db.begin_read().map_err(|e| StorageError::Transaction(e.to_string()))?;
        let table = match tx.open_table(REGION_TABLE) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(internal(e)),
        };

        let mut regions = Vec::new();
        for entry in table.iter().map_err(internal)? {
            let (name, seq) = entry.map_err(internal)?;
            regions.push((seq.value(), name.value().to_owned()));
        }
        regions.sort_unstable();
        Ok(regions.into_iter().map(|(_, name)| name).collect())
    }

    /// Get the underlying Redb database.
    pub const fn inner(&self) -> &Database {
        &self.db
    }
}

impl StorageEngine for RedbEngine {
    type Transaction<'a> = RedbTransaction;

    fn begin_read(&self) -> StorageResult<Self::Transaction<'_>> {
        let tx = self.db.begin_read().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_read(tx))
    }

    fn begin_write(&self) -> StorageResult<Self::Transaction<'_>> {
        let tx = self.db.begin_write().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_write(tx))
    }

    fn open_region(&self, name: &str) -> StorageResult<()> {
        validate_region_name(name)?;

        let tx = self.db.begin_write().map_err(|e| StorageError::Transaction(e.to_string()))?;
        {
            let mut regions = tx.open_table(REGION_TABLE).map_err(internal)?;
            if regions.get(name).map_err(internal)?.is_some() {
                return Ok(());
            }

            let count = regions.len().map_err(internal)?;
            if let Some(limit) = self.max_regions {
                if count >= limit as u64 {
                    return Err(StorageError::RegionLimit { limit });
                }
            }
            regions.insert(name, count).map_err(internal)?;
        }
        tx.commit().map_err(|e| StorageError::Transaction(e.to_string()))?;

        debug!(region = name, "registered region");
        Ok(())
    }

    fn flush(&self) -> StorageResult<()> {
        // Redb makes every commit durable.
        Ok(())
    }
}
