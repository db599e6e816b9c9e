//! Binary converter for [`FloatVector`].

use tagsearch_core::conversion::{Converter, F32Converter, ListConverter};
use tagsearch_core::CoreError;

use super::vector::FloatVector;
use crate::error::VectorError;

/// Converter for [`FloatVector`]: a list of `f32` without per-element headers.
///
/// The logical length is the dimension, and the payload is `4 * dimension`
/// little-endian bytes.
///
/// # Example
///
/// ```
/// use tagsearch_core::conversion::Converter;
/// use tagsearch_vector::{FloatVector, FloatVectorConverter};
///
/// let converter = FloatVectorConverter::new();
/// let vector = FloatVector::ones(3);
/// let bytes = converter.encode(&vector, 0).unwrap();
/// assert_eq!(bytes.len(), 4 + 3 * 4);
/// assert_eq!(converter.read(&bytes, 0).unwrap(), vector);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatVectorConverter {
    inner: ListConverter<F32Converter>,
}

impl FloatVectorConverter {
    /// Create a float vector converter.
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: ListConverter::with_element_length(F32Converter, 1) }
    }

    /// Read a length-prefixed vector and check that it has `dimension` components.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Conversion`] if decoding fails and
    /// [`VectorError::DimensionMismatch`] if the stored dimension differs.
    pub fn read_with_dimension(
        &self,
        buf: &[u8],
        offset: usize,
        dimension: usize,
    ) -> Result<FloatVector, VectorError> {
        let vector = self.read(buf, offset)?;
        if vector.dimension() != dimension {
            return Err(VectorError::DimensionMismatch {
                expected: dimension,
                actual: vector.dimension(),
            });
        }
        Ok(vector)
    }
}

impl Default for FloatVectorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for FloatVectorConverter {
    type Value = FloatVector;

    fn length(&self, value: &FloatVector) -> usize {
        value.dimension()
    }

    fn size(&self, value: &FloatVector) -> usize {
        self.inner.size(&value.data)
    }

    fn write_without_length(
        &self,
        buf: &mut [u8],
        offset: usize,
        value: &FloatVector,
    ) -> Result<usize, CoreError> {
        self.inner.write_without_length(buf, offset, &value.data)
    }

    fn read_without_length_count(
        &self,
        buf: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(FloatVector, usize), CoreError> {
        let (data, read) = self.inner.read_without_length_count(buf, offset, length)?;
        Ok((FloatVector::new(data), read))
    }
}
