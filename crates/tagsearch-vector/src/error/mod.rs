//! Error types for the vector crate.

use tagsearch_core::CoreError;
use thiserror::Error;

/// Errors that can occur in vector operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VectorError {
    /// Two vectors that must share a dimension do not.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// Encoding or decoding a vector failed.
    #[error("conversion error: {0}")]
    Conversion(#[from] CoreError),
}
