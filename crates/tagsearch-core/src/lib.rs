//! `tagsearch` Core
//!
//! This crate provides the binary conversion framework that the rest of
//! `tagsearch` builds on: a contract for measuring, writing and reading typed
//! values in flat byte buffers, plus converters for primitives and sequences.
//!
//! # Overview
//!
//! - **Converter contract**: [`Converter`] describes how one type is encoded
//!   at an offset inside a byte buffer, in either length-prefixed or
//!   without-length form
//! - **Primitive converters**: numbers, booleans, strings and byte strings
//! - **Composite converters**: [`ListConverter`] and [`ArrayConverter`] build
//!   sequence converters out of any element converter
//!
//! # Example
//!
//! ```
//! use tagsearch_core::conversion::{Converter, ListConverter, StringConverter};
//!
//! let converter = ListConverter::new(StringConverter);
//! let tags = vec!["cat".to_owned(), "outdoor".to_owned()];
//!
//! let bytes = converter.encode(&tags, 0).unwrap();
//! assert_eq!(bytes.len(), converter.size_with_length(&tags));
//!
//! let decoded = converter.read(&bytes, 0).unwrap();
//! assert_eq!(decoded, tags);
//! ```
//!
//! # Modules
//!
//! - [`conversion`] - The converter contract and all built-in converters
//! - [`error`] - Error types ([`CoreError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod conversion;
pub mod error;

pub use conversion::{
    ArrayConverter, Converter, ElementMode, ListConverter, LENGTH_PREFIX_SIZE,
};
pub use error::CoreError;
