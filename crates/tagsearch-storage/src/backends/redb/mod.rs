//! Redb storage backend.
//!
//! All regions live in one physical redb table. Each key is prefixed with its
//! region name and a NUL separator, so a region is a contiguous key range.

mod engine;
mod tables;
mod transaction;

pub use engine::{RedbConfig, RedbEngine};
pub use transaction::{RedbCursor, RedbTransaction};
