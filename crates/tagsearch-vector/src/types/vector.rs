//! A dense vector of `f32` components.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// A dense, owned vector of `f32` values.
///
/// The dimension is fixed at construction; components can be updated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatVector {
    pub(crate) data: Vec<f32>,
}

impl FloatVector {
    /// Create a vector from its components.
    #[must_use]
    pub const fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// A vector of `dimension` zeros.
    #[must_use]
    pub fn zeros(dimension: usize) -> Self {
        Self { data: vec![0.0; dimension] }
    }

    /// A vector of `dimension` ones.
    #[must_use]
    pub fn ones(dimension: usize) -> Self {
        Self { data: vec![1.0; dimension] }
    }

    /// Number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// The components as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The components as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the vector, returning its components.
    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }
}

impl From<Vec<f32>> for FloatVector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

impl From<&[f32]> for FloatVector {
    fn from(data: &[f32]) -> Self {
        Self::new(data.to_vec())
    }
}

impl AsRef<[f32]> for FloatVector {
    fn as_ref(&self) -> &[f32] {
        &self.data
    }
}

impl Index<usize> for FloatVector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}

impl IndexMut<usize> for FloatVector {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.data[index]
    }
}

impl fmt::Display for FloatVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("]")
    }
}
