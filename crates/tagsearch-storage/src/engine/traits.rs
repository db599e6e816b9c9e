//! Core storage engine traits.
//!
//! - [`StorageEngine`] - The entry point: transactions and region registration
//! - [`Transaction`] - Reads and writes scoped to one transaction
//! - [`Cursor`] - Ordered iteration over one region
//!
//! Regions partition the key space. The same key may exist in several regions
//! with unrelated values.

use std::sync::Arc;

use super::{StorageError, StorageResult};

/// A key-value pair returned by cursor operations.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// Result type for cursor operations that return a key-value pair.
pub type CursorResult = Result<Option<KeyValue>, StorageError>;

/// An ordered, transactional key-value storage engine.
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use tagsearch_storage::{StorageEngine, StorageResult, Transaction};
///
/// fn copy_value<E: StorageEngine>(engine: &E) -> StorageResult<()> {
///     let mut tx = engine.begin_write()?;
///     if let Some(value) = tx.get("source", b"key")? {
///         tx.put("target", b"key", &value)?;
///     }
///     tx.commit()
/// }
/// ```
pub trait StorageEngine: Send + Sync {
    /// The transaction type for this engine.
    type Transaction<'a>: Transaction
    where
        Self: 'a;

    /// Begin a read-only transaction.
    ///
    /// Read transactions see a consistent snapshot of the database.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the transaction cannot be started.
    fn begin_read(&self) -> StorageResult<Self::Transaction<'_>>;

    /// Begin a read-write transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the transaction cannot be started.
    fn begin_write(&self) -> StorageResult<Self::Transaction<'_>>;

    /// Register a named region, creating it if needed.
    ///
    /// Opening an already registered region is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidRegionName`] for an empty or NUL-containing
    /// name and [`StorageError::RegionLimit`] when a new region would exceed the
    /// configured maximum.
    fn open_region(&self, name: &str) -> StorageResult<()>;

    /// Flush pending writes to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    fn flush(&self) -> StorageResult<()>;
}

/// A transaction over the engine's regions.
///
/// Dropping a write transaction without committing discards its writes.
pub trait Transaction {
    /// The cursor type for iteration.
    type Cursor<'a>: Cursor
    where
        Self: 'a;

    /// Get the value stored under `key` in `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn get(&self, region: &str, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Store `value` under `key` in `region`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadOnly`] on a read-only transaction.
    fn put(&mut self, region: &str, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Remove `key` from `region`.
    ///
    /// Returns `true` if the key existed and `false` if it was absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadOnly`] on a read-only transaction.
    fn delete(&mut self, region: &str, key: &[u8]) -> StorageResult<bool>;

    /// Create an unpositioned cursor over `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor cannot be created.
    fn cursor(&self, region: &str) -> StorageResult<Self::Cursor<'_>>;

    /// Commit the transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the commit fails.
    fn commit(self) -> StorageResult<()>;

    /// Roll back the transaction, discarding its writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    fn rollback(self) -> StorageResult<()>;

    /// Whether this transaction rejects writes.
    fn is_read_only(&self) -> bool;
}

/// A forward cursor over the entries of one region, in ascending key order.
pub trait Cursor {
    /// Position at the first key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn seek(&mut self, key: &[u8]) -> CursorResult;

    /// Position at the first entry of the region.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn seek_first(&mut self) -> CursorResult;

    /// Advance to the next entry.
    ///
    /// An unpositioned cursor moves to the first entry. An exhausted cursor
    /// keeps returning `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn next(&mut self) -> CursorResult;

    /// The entry the cursor is positioned at, if any.
    fn current(&self) -> Option<(&[u8], &[u8])>;
}

// ============================================================================
// Blanket Implementations
// ============================================================================

/// Implement `StorageEngine` for `Arc<E>` so several stores can share one engine.
impl<E: StorageEngine> StorageEngine for Arc<E> {
    type Transaction<'a>
        = E::Transaction<'a>
    where
        Self: 'a;

    fn begin_read(&self) -> StorageResult<Self::Transaction<'_>> {
        (**self).begin_read()
    }

    fn begin_write(&self) -> StorageResult<Self::Transaction<'_>> {
        (**self).begin_write()
    }

    fn open_region(&self, name: &str) -> StorageResult<()> {
        (**self).open_region(name)
    }

    fn flush(&self) -> StorageResult<()> {
        (**self).flush()
    }
}
