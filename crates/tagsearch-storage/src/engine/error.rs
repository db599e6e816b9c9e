//! Storage error types.

use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database could not be opened or created.
    #[error("failed to open database: {0}")]
    Open(String),

    /// A transaction could not be started or committed.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// The backend reported an unexpected failure.
    #[error("internal storage error: {0}")]
    Internal(String),

    /// A write was attempted through a read-only transaction.
    #[error("transaction is read-only")]
    ReadOnly,

    /// Registering another region would exceed the configured maximum.
    #[error("region limit reached: at most {limit} regions")]
    RegionLimit {
        /// The configured maximum number of regions.
        limit: usize,
    },

    /// A region name is empty or contains a NUL byte.
    #[error("invalid region name: {0:?}")]
    InvalidRegionName(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
