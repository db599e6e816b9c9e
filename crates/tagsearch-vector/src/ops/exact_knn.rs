//! Exact K-Nearest Neighbours selection.
//!
//! Scans every candidate once, keeping the best K in a bounded max-heap.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::SearchConfig;
use crate::distance::DistanceMeasure;
use crate::error::VectorError;

/// One search result: the entry and its distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbour<K, V> {
    /// The entry's key.
    pub key: K,
    /// The entry's value.
    pub value: V,
    /// Distance to the query (lower is closer).
    pub distance: f32,
}

/// Exact k-NN selection by brute force.
///
/// Computes the distance from the query to every candidate and keeps the K
/// nearest. Results are sorted by ascending distance; candidates at equal
/// distance keep the order in which they were scanned.
///
/// # Complexity
///
/// O(n * d + n log k) time and O(k) space, where n is the number of
/// candidates and d the dimension.
///
/// # Example
///
/// ```
/// use tagsearch_vector::{DistanceMetric, ExactKnn, SearchConfig};
///
/// let candidates = vec![(1, vec![0.0, 5.0]), (2, vec![1.0, 0.0])];
/// let knn = ExactKnn::from_pairs(
///     candidates,
///     &[0.0, 0.0],
///     &DistanceMetric::Euclidean,
///     SearchConfig::k_nearest(1),
/// )
/// .unwrap();
/// assert_eq!(knn.as_slice()[0].key, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ExactKnn<K, V> {
    /// Sorted results.
    results: Vec<Neighbour<K, V>>,
    /// Number of candidates scanned.
    scanned: usize,
    /// Dimension of the query.
    dim: usize,
}

/// Heap entry ordered by distance, then by scan position.
///
/// The heap's top is the current worst result: the farthest, and among equally
/// far ones the most recently scanned.
struct HeapEntry<K, V> {
    distance: f32,
    seq: usize,
    key: K,
    value: V,
}

impl<K, V> HeapEntry<K, V> {
    fn rank(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance).then(self.seq.cmp(&other.seq))
    }
}

impl<K, V> PartialEq for HeapEntry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.rank(other) == Ordering::Equal
    }
}

impl<K, V> Eq for HeapEntry<K, V> {}

impl<K, V> PartialOrd for HeapEntry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> Ord for HeapEntry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank(other)
    }
}

impl<K, V> ExactKnn<K, V>
where
    V: AsRef<[f32]>,
{
    /// Select the nearest candidates from a fallible stream.
    ///
    /// The scan stops at the first error, whether it comes from the stream
    /// or from a candidate whose dimension differs from the query's. No
    /// partial results are returned.
    ///
    /// # Errors
    ///
    /// Returns the stream's error, or [`VectorError::DimensionMismatch`]
    /// converted into `E`.
    pub fn new<I, M, E>(
        candidates: I,
        query: &[f32],
        measure: &M,
        config: SearchConfig,
    ) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<(K, V), E>>,
        M: DistanceMeasure + ?Sized,
        E: From<VectorError>,
    {
        let k = config.k;
        // Use saturating_add to avoid overflow when k is usize::MAX
        let mut heap: BinaryHeap<HeapEntry<K, V>> =
            BinaryHeap::with_capacity(k.saturating_add(1).min(1024));
        let mut scanned = 0;

        for candidate in candidates {
            let (key, value) = candidate?;
            let distance = measure.measure(query, value.as_ref())?;
            let seq = scanned;
            scanned += 1;

            if let Some(max_dist) = config.max_distance {
                if distance.is_nan() || distance > max_dist {
                    continue;
                }
            }

            if heap.len() < k {
                heap.push(HeapEntry { distance, seq, key, value });
            } else if let Some(mut worst) = heap.peek_mut() {
                // A later candidate at equal distance never displaces an earlier one.
                if distance.total_cmp(&worst.distance) == Ordering::Less {
                    *worst = HeapEntry { distance, seq, key, value };
                }
            }
        }

        let results = heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| Neighbour { key: e.key, value: e.value, distance: e.distance })
            .collect();

        Ok(Self { results, scanned, dim: query.len() })
    }

    /// Select the nearest candidates from an infallible collection.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] if any candidate's dimension
    /// differs from the query's.
    pub fn from_pairs<I, M>(
        candidates: I,
        query: &[f32],
        measure: &M,
        config: SearchConfig,
    ) -> Result<Self, VectorError>
    where
        I: IntoIterator<Item = (K, V)>,
        M: DistanceMeasure + ?Sized,
    {
        Self::new(candidates.into_iter().map(Ok), query, measure, config)
    }

    /// Select the `k` nearest candidates.
    ///
    /// # Errors
    ///
    /// See [`from_pairs`](Self::from_pairs).
    pub fn k_nearest<I, M>(
        candidates: I,
        query: &[f32],
        measure: &M,
        k: usize,
    ) -> Result<Self, VectorError>
    where
        I: IntoIterator<Item = (K, V)>,
        M: DistanceMeasure + ?Sized,
    {
        Self::from_pairs(candidates, query, measure, SearchConfig::k_nearest(k))
    }

    /// Select every candidate within `max_distance` of the query.
    ///
    /// # Errors
    ///
    /// See [`from_pairs`](Self::from_pairs).
    pub fn within_distance<I, M>(
        candidates: I,
        query: &[f32],
        measure: &M,
        max_distance: f32,
    ) -> Result<Self, VectorError>
    where
        I: IntoIterator<Item = (K, V)>,
        M: DistanceMeasure + ?Sized,
    {
        Self::from_pairs(candidates, query, measure, SearchConfig::within_distance(max_distance))
    }
}

impl<K, V> ExactKnn<K, V> {
    /// Get the number of results found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if no results were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of candidates scanned, including those filtered out.
    #[must_use]
    pub const fn scanned(&self) -> usize {
        self.scanned
    }

    /// Dimension of the query vector.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dim
    }

    /// Get all results as a slice, nearest first.
    #[must_use]
    pub fn as_slice(&self) -> &[Neighbour<K, V>] {
        &self.results
    }

    /// Iterate over the results, nearest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Neighbour<K, V>> {
        self.results.iter()
    }

    /// Consume the search, returning its results nearest first.
    #[must_use]
    pub fn into_vec(self) -> Vec<Neighbour<K, V>> {
        self.results
    }
}

impl<K, V> IntoIterator for ExactKnn<K, V> {
    type Item = Neighbour<K, V>;
    type IntoIter = std::vec::IntoIter<Neighbour<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a ExactKnn<K, V> {
    type Item = &'a Neighbour<K, V>;
    type IntoIter = std::slice::Iter<'a, Neighbour<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
