//! Nearest-neighbour selection.
//!
//! # Search Modes
//!
//! - **Find K nearest**: return the K closest vectors to the query
//! - **Find within distance**: return all vectors within distance D of the query
//!
//! Both modes can be combined: the K closest vectors that are also within D.

mod exact_knn;

pub use exact_knn::{ExactKnn, Neighbour};

/// Configuration for search operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of results to return.
    pub k: usize,
    /// Maximum distance threshold (only return results at most this far).
    ///
    /// A NaN distance never passes the threshold.
    pub max_distance: Option<f32>,
}

impl SearchConfig {
    /// Create a search configuration for finding the K nearest neighbours.
    #[must_use]
    pub const fn k_nearest(k: usize) -> Self {
        Self { k, max_distance: None }
    }

    /// Create a search configuration for finding all vectors within a distance.
    #[must_use]
    pub const fn within_distance(max_distance: f32) -> Self {
        Self { k: usize::MAX, max_distance: Some(max_distance) }
    }

    /// Set the maximum number of results.
    #[must_use]
    pub const fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the maximum distance threshold.
    #[must_use]
    pub const fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = Some(max_distance);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::k_nearest(10)
    }
}
