//! Distance functions for vector similarity.
//!
//! Every distance here follows one convention: lower is closer. Similarity
//! scores are inverted before they are exposed as distances.

mod scalar;

pub use scalar::{
    cosine_distance, cosine_similarity, dot_product, euclidean_distance,
    euclidean_distance_squared, l2_norm,
};

use crate::error::VectorError;

/// A function scoring the dissimilarity of two vectors.
///
/// Implementations must return lower values for closer vectors. Any closure
/// `Fn(&[f32], &[f32]) -> f32` is a measure.
///
/// # Example
///
/// ```
/// use tagsearch_vector::DistanceMeasure;
///
/// let manhattan =
///     |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum() };
/// assert_eq!(manhattan.measure(&[0.0, 0.0], &[1.0, 2.0]), Ok(3.0));
/// assert!(manhattan.measure(&[0.0], &[1.0, 2.0]).is_err());
/// ```
pub trait DistanceMeasure {
    /// Distance between two vectors of equal dimension.
    fn distance(&self, a: &[f32], b: &[f32]) -> f32;

    /// Distance between `a` and `b`, checking that their dimensions agree.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::DimensionMismatch`] with `a`'s dimension as the
    /// expected one if the lengths differ.
    fn measure(&self, a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
        if a.len() != b.len() {
            return Err(VectorError::DimensionMismatch { expected: a.len(), actual: b.len() });
        }
        Ok(self.distance(a, b))
    }
}

impl<F> DistanceMeasure for F
where
    F: Fn(&[f32], &[f32]) -> f32,
{
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        self(a, b)
    }
}

/// Built-in distance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DistanceMetric {
    /// Euclidean (L2) distance.
    Euclidean,
    /// Cosine distance (1 - cosine similarity).
    Cosine,
    /// Dot product, negated so that larger products are closer.
    DotProduct,
}

impl DistanceMetric {
    /// Calculate the distance between two vectors using this metric.
    #[inline]
    #[must_use]
    pub fn calculate(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::Euclidean => euclidean_distance(a, b),
            Self::Cosine => cosine_distance(a, b),
            Self::DotProduct => -dot_product(a, b),
        }
    }
}

impl DistanceMeasure for DistanceMetric {
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        self.calculate(a, b)
    }
}
