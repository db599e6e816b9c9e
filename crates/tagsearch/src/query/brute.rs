//! Brute-force nearest-neighbour search.

use tagsearch_core::conversion::Converter;
use tagsearch_storage::Transaction;
use tagsearch_vector::{DistanceMeasure, ExactKnn, Neighbour, SearchConfig};
use tracing::debug;

use crate::database::TypedPairDatabase;
use crate::error::{Error, Result};

/// Exact nearest-neighbour search by scanning a whole store.
///
/// Every stored value is compared against the query with the configured
/// [`DistanceMeasure`]. Results are nearest first; entries at equal distance
/// keep key order.
pub struct BruteNearestNeighbour<'a, KC, VC, M> {
    db: &'a TypedPairDatabase<KC, VC>,
    measure: M,
}

impl<'a, KC, VC, M> BruteNearestNeighbour<'a, KC, VC, M>
where
    KC: Converter,
    VC: Converter,
    VC::Value: AsRef<[f32]>,
    M: DistanceMeasure,
{
    /// Create a search over `db` using `measure`.
    pub const fn new(db: &'a TypedPairDatabase<KC, VC>, measure: M) -> Self {
        Self { db, measure }
    }

    /// The store being searched.
    #[must_use]
    pub const fn database(&self) -> &'a TypedPairDatabase<KC, VC> {
        self.db
    }

    /// The distance measure.
    #[must_use]
    pub const fn measure(&self) -> &M {
        &self.measure
    }

    /// Find the `k` entries nearest to `query`.
    ///
    /// Returns `min(k, entries)` neighbours sorted by ascending distance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Vector`] if any stored value's dimension differs from
    /// the query's, and [`Error::Closed`], storage or conversion errors from
    /// the scan. No partial results are returned.
    pub fn get_neighbours<T: Transaction>(
        &self,
        tx: &T,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<Neighbour<KC::Value, VC::Value>>> {
        self.search(tx, query, SearchConfig::k_nearest(k))
    }

    /// Find entries nearest to `query` under `config`.
    ///
    /// # Errors
    ///
    /// See [`get_neighbours`](Self::get_neighbours).
    pub fn search<T: Transaction>(
        &self,
        tx: &T,
        query: &[f32],
        config: SearchConfig,
    ) -> Result<Vec<Neighbour<KC::Value, VC::Value>>> {
        let knn = ExactKnn::new::<_, _, Error>(self.db.iter(tx)?, query, &self.measure, config)?;
        debug!(
            store = %self.db.name(),
            k = config.k,
            scanned = knn.scanned(),
            returned = knn.len(),
            "brute-force search complete"
        );
        Ok(knn.into_vec())
    }
}
