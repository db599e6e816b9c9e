//! tagsearch storage
//!
//! The storage engine boundary used by the typed store, plus the redb backend.
//!
//! # Overview
//!
//! The engine is an ordered, transactional byte-string key/value store split
//! into named regions. Callers own transactions: they begin them on the engine,
//! pass them to the store, and commit or roll back themselves.
//!
//! # Core Traits
//!
//! - [`StorageEngine`] - Begins transactions and registers regions
//! - [`Transaction`] - Get/put/delete within a region, commit or roll back
//! - [`Cursor`] - Ordered forward iteration over one region
//!
//! # Example
//!
//! ```
//! use tagsearch_storage::backends::RedbEngine;
//! use tagsearch_storage::{StorageEngine, Transaction};
//!
//! let engine = RedbEngine::in_memory().unwrap();
//! engine.open_region("images").unwrap();
//!
//! let mut tx = engine.begin_write().unwrap();
//! tx.put("images", b"cat.jpg", b"\x01\x02").unwrap();
//! tx.commit().unwrap();
//!
//! let tx = engine.begin_read().unwrap();
//! assert_eq!(tx.get("images", b"cat.jpg").unwrap(), Some(vec![1, 2]));
//! ```

#![deny(clippy::unwrap_used)]

pub mod backends;
pub mod engine;

pub use engine::{
    Cursor, CursorResult, KeyValue, StorageEngine, StorageError, StorageResult, Transaction,
};
