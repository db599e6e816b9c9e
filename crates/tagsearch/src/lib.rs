//! tagsearch
//!
//! A typed, binary-encoded key/value layer over an embedded ordered storage
//! engine, with exact brute-force nearest-neighbour search.
//!
//! # Overview
//!
//! - [`TypedPairDatabase`] binds a key converter and a value converter to one
//!   named region of a [`StorageEngine`]. Every operation takes a
//!   caller-owned transaction.
//! - [`BruteNearestNeighbour`] scans a store of vectors and returns the K
//!   entries closest to a query under a [`DistanceMeasure`].
//! - [`with_read`] / [`with_write`] run a closure inside a transaction and
//!   commit or roll back for you.
//!
//! # Example
//!
//! ```
//! use tagsearch::conversion::StringConverter;
//! use tagsearch::{
//!     with_read, with_write, BruteNearestNeighbour, Config, DistanceMetric, FloatVector,
//!     FloatVectorConverter, TypedPairDatabase,
//! };
//!
//! let engine = Config::in_memory().open_engine()?;
//! let db = TypedPairDatabase::open(&engine, "images", StringConverter, FloatVectorConverter::new())?;
//!
//! with_write(&engine, |tx| {
//!     db.put(tx, &"a".to_owned(), &FloatVector::from(vec![0.0, 0.0]))?;
//!     db.put(tx, &"b".to_owned(), &FloatVector::from(vec![1.0, 0.0]))?;
//!     db.put(tx, &"c".to_owned(), &FloatVector::from(vec![3.0, 0.0]))
//! })?;
//!
//! let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);
//! let neighbours = with_read(&engine, |tx| nn.get_neighbours(tx, &[0.0, 0.0], 2))?;
//! let keys: Vec<_> = neighbours.iter().map(|n| n.key.as_str()).collect();
//! assert_eq!(keys, ["a", "b"]);
//! # Ok::<(), tagsearch::Error>(())
//! ```

#![deny(clippy::unwrap_used)]

pub mod config;
pub mod database;
pub mod error;
pub mod query;
pub mod transaction;

pub use config::Config;
pub use database::{Keys, PairDatabaseConfig, Pairs, TypedPairDatabase, Values};
pub use error::{Error, Result};
pub use query::BruteNearestNeighbour;
pub use transaction::{with_read, with_write};

pub use tagsearch_core::conversion;
pub use tagsearch_storage::backends::{RedbConfig, RedbEngine};
pub use tagsearch_storage::{StorageEngine, Transaction};
pub use tagsearch_vector::{
    DistanceMeasure, DistanceMetric, FloatVector, FloatVectorConverter, Neighbour, SearchConfig,
    VectorError,
};
