//! Error types for the main crate.

use tagsearch_core::CoreError;
use tagsearch_storage::StorageError;
use tagsearch_vector::VectorError;
use thiserror::Error;

/// Errors that can occur when using a typed store.
#[derive(Debug, Error)]
pub enum Error {
    /// Encoding or decoding a key or value failed.
    #[error("conversion error: {0}")]
    Conversion(#[from] CoreError),

    /// The storage engine failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A vector operation failed.
    #[error("vector error: {0}")]
    Vector(#[from] VectorError),

    /// The store was used after it was closed.
    #[error("store '{0}' is closed")]
    Closed(String),

    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;
