//! tagsearch vector
//!
//! Float vectors, their binary converter, distance measures and exact
//! k-nearest-neighbour selection.
//!
//! # Example
//!
//! ```
//! use tagsearch_vector::{DistanceMetric, ExactKnn, FloatVector, SearchConfig};
//!
//! let entries = vec![
//!     ("a", FloatVector::from(vec![0.0, 0.0])),
//!     ("b", FloatVector::from(vec![1.0, 0.0])),
//!     ("c", FloatVector::from(vec![3.0, 0.0])),
//! ];
//! let query = [0.0f32, 0.0];
//!
//! let config = SearchConfig::k_nearest(2);
//! let knn = ExactKnn::from_pairs(entries, &query, &DistanceMetric::Euclidean, config).unwrap();
//! let keys: Vec<_> = knn.iter().map(|n| n.key).collect();
//! assert_eq!(keys, ["a", "b"]);
//! ```
//!
//! # Modules
//!
//! - [`types`] - [`FloatVector`] and [`FloatVectorConverter`]
//! - [`distance`] - Distance functions and the [`DistanceMeasure`] trait
//! - [`ops`] - Exact k-NN selection ([`ExactKnn`])
//! - [`error`] - Error types

#![deny(clippy::unwrap_used)]

pub mod distance;
pub mod error;
pub mod ops;
pub mod types;

pub use distance::{DistanceMeasure, DistanceMetric};
pub use error::VectorError;
pub use ops::{ExactKnn, Neighbour, SearchConfig};
pub use types::{FloatVector, FloatVectorConverter};
