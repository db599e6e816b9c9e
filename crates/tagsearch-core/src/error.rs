//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur while converting values to and from bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A converter wrote a different number of bytes than its `size` reported.
    ///
    /// This is a bug in the converter, not a data problem. Callers must not
    /// retry.
    #[error("size mismatch: converter reported {expected} bytes but wrote {actual}")]
    SizeMismatch {
        /// The byte count reported by `size`.
        expected: usize,
        /// The byte count actually written.
        actual: usize,
    },

    /// A write ran past the end of the destination buffer.
    ///
    /// Buffers are sized from `size`, so this is the write-side symptom of a
    /// converter under-reporting its size.
    #[error("buffer overflow: writing {needed} bytes at offset {offset} exceeds capacity {capacity}")]
    BufferOverflow {
        /// Offset the write started at.
        offset: usize,
        /// Number of bytes the write needed.
        needed: usize,
        /// Total capacity of the buffer.
        capacity: usize,
    },

    /// The input ended before a declared length or count was satisfied.
    #[error("truncated input: needed {needed} bytes at offset {offset}, only {available} available")]
    Truncated {
        /// Offset the read started at.
        offset: usize,
        /// Number of bytes the read needed.
        needed: usize,
        /// Number of bytes available from `offset`.
        available: usize,
    },

    /// The bytes could not be interpreted as the target type.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl CoreError {
    /// Returns `true` if this error indicates a converter defect rather than bad input.
    #[must_use]
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. } | Self::BufferOverflow { .. })
    }
}
