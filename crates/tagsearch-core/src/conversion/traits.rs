//! The converter contract.

use std::sync::Arc;

use crate::error::CoreError;

use super::buffer::{read_length, write_length};

/// Width in bytes of the length header written by [`Converter::write`].
///
/// The header is an unsigned 32-bit little-endian integer. This is a
/// persisted-format constant.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// A strategy for encoding one type into a flat byte buffer and back.
///
/// Implementations only need to provide the "without length" primitives plus
/// [`length`](Self::length) and [`size`](Self::size); the length-prefixed forms
/// and the allocating helpers are derived from them.
///
/// # Contract
///
/// - `size(v)` is exactly the number of bytes `write_without_length` writes
///   for `v`, and `size_with_length(v)` is exactly what `write` writes.
/// - Reading back what was written yields an equal value and reports the same
///   number of bytes consumed.
///
/// Converters are expected to be immutable and cheap to share. Wrap one in an
/// [`Arc`] to share a single instance between several stores.
pub trait Converter {
    /// The type this converter encodes.
    type Value;

    /// Logical length of `value`, stored in the length header.
    ///
    /// This is an element count for sequences, a byte count for strings, and
    /// `1` for scalars.
    fn length(&self, value: &Self::Value) -> usize;

    /// Payload size of `value` in bytes, excluding any length header.
    fn size(&self, value: &Self::Value) -> usize;

    /// Total size of `value` when written with a length header.
    fn size_with_length(&self, value: &Self::Value) -> usize {
        LENGTH_PREFIX_SIZE + self.size(value)
    }

    /// Write the payload of `value` at `offset`, returning the bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BufferOverflow`] if the payload does not fit.
    fn write_without_length(
        &self,
        buf: &mut [u8],
        offset: usize,
        value: &Self::Value,
    ) -> Result<usize, CoreError>;

    /// Write a length header followed by the payload of `value` at `offset`.
    ///
    /// Returns the total bytes written so callers can chain writes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BufferOverflow`] if the encoding does not fit, or
    /// [`CoreError::Encoding`] if the length does not fit in the header.
    fn write(&self, buf: &mut [u8], offset: usize, value: &Self::Value) -> Result<usize, CoreError> {
        let header = write_length(buf, offset, self.length(value))?;
        let payload = self.write_without_length(buf, offset + header, value)?;
        Ok(header + payload)
    }

    /// Read a payload of the given logical `length` at `offset`.
    ///
    /// Returns the value together with the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Truncated`] if the buffer ends early, or
    /// [`CoreError::Encoding`] if the bytes are not a valid value.
    fn read_without_length_count(
        &self,
        buf: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(Self::Value, usize), CoreError>;

    /// Read a payload of the given logical `length` at `offset`.
    ///
    /// # Errors
    ///
    /// See [`read_without_length_count`](Self::read_without_length_count).
    fn read_without_length(
        &self,
        buf: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<Self::Value, CoreError> {
        self.read_without_length_count(buf, offset, length).map(|(value, _)| value)
    }

    /// Read a length-prefixed value at `offset`.
    ///
    /// Returns the value together with the number of bytes consumed,
    /// including the header.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Truncated`] if the header or payload is cut off.
    fn read_count(&self, buf: &[u8], offset: usize) -> Result<(Self::Value, usize), CoreError> {
        let length = read_length(buf, offset)?;
        let (value, read) =
            self.read_without_length_count(buf, offset + LENGTH_PREFIX_SIZE, length)?;
        Ok((value, LENGTH_PREFIX_SIZE + read))
    }

    /// Read a length-prefixed value at `offset`.
    ///
    /// # Errors
    ///
    /// See [`read_count`](Self::read_count).
    fn read(&self, buf: &[u8], offset: usize) -> Result<Self::Value, CoreError> {
        self.read_count(buf, offset).map(|(value, _)| value)
    }

    /// Encode `value` with a length header into a new buffer.
    ///
    /// The first `offset` bytes of the buffer are left zeroed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SizeMismatch`] if the converter wrote a different
    /// number of bytes than it reported.
    fn encode(&self, value: &Self::Value, offset: usize) -> Result<Vec<u8>, CoreError> {
        let expected = self.size_with_length(value);
        let mut buf = vec![0u8; offset + expected];
        let written = self.write(&mut buf, offset, value)?;
        check_written(expected, written)?;
        Ok(buf)
    }

    /// Encode the payload of `value` into a new buffer, without a header.
    ///
    /// The first `offset` bytes of the buffer are left zeroed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SizeMismatch`] if the converter wrote a different
    /// number of bytes than it reported.
    fn encode_without_length(
        &self,
        value: &Self::Value,
        offset: usize,
    ) -> Result<Vec<u8>, CoreError> {
        let expected = self.size(value);
        let mut buf = vec![0u8; offset + expected];
        let written = self.write_without_length(&mut buf, offset, value)?;
        check_written(expected, written)?;
        Ok(buf)
    }
}

/// Verify that a write produced exactly the reported number of bytes.
///
/// # Errors
///
/// Returns [`CoreError::SizeMismatch`] if the counts differ.
pub(crate) fn check_written(expected: usize, actual: usize) -> Result<(), CoreError> {
    if expected == actual {
        Ok(())
    } else {
        Err(CoreError::SizeMismatch { expected, actual })
    }
}

// ============================================================================
// Blanket Implementations
// ============================================================================

/// Implement `Converter` for `Arc<C>` so one converter can back many stores.
impl<C: Converter + ?Sized> Converter for Arc<C> {
    type Value = C::Value;

    fn length(&self, value: &Self::Value) -> usize {
        (**self).length(value)
    }

    fn size(&self, value: &Self::Value) -> usize {
        (**self).size(value)
    }

    fn size_with_length(&self, value: &Self::Value) -> usize {
        (**self).size_with_length(value)
    }

    fn write_without_length(
        &self,
        buf: &mut [u8],
        offset: usize,
        value: &Self::Value,
    ) -> Result<usize, CoreError> {
        (**self).write_without_length(buf, offset, value)
    }

    fn write(&self, buf: &mut [u8], offset: usize, value: &Self::Value) -> Result<usize, CoreError> {
        (**self).write(buf, offset, value)
    }

    fn read_without_length_count(
        &self,
        buf: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(Self::Value, usize), CoreError> {
        (**self).read_without_length_count(buf, offset, length)
    }

    fn read_count(&self, buf: &[u8], offset: usize) -> Result<(Self::Value, usize), CoreError> {
        (**self).read_count(buf, offset)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::conversion::buffer::write_slice;
    use crate::conversion::{I32Converter, StringConverter};

    /// A converter whose write result disagrees with its reported size.
    struct LyingConverter;

    impl Converter for LyingConverter {
        type Value = u8;

        fn length(&self, _value: &u8) -> usize {
            1
        }

        fn size(&self, _value: &u8) -> usize {
            1
        }

        fn write_without_length(
            &self,
            buf: &mut [u8],
            offset: usize,
            value: &u8,
        ) -> Result<usize, CoreError> {
            let written = write_slice(buf, offset, &[*value])?;
            Ok(written + 1)
        }

        fn read_without_length_count(
            &self,
            buf: &[u8],
            offset: usize,
            _length: usize,
        ) -> Result<(u8, usize), CoreError> {
            Ok((buf[offset], 1))
        }
    }

    #[test]
    fn encode_reports_size_mismatch() {
        let err = LyingConverter.encode_without_length(&7, 0).unwrap_err();
        assert_eq!(err, CoreError::SizeMismatch { expected: 1, actual: 2 });
        assert!(err.is_defect());
    }

    #[test]
    fn encode_reserves_offset_prefix() {
        let bytes = I32Converter.encode(&-2, 3).unwrap();
        assert_eq!(bytes.len(), 3 + LENGTH_PREFIX_SIZE + 4);
        assert_eq!(&bytes[..3], &[0, 0, 0]);
        assert_eq!(I32Converter.read(&bytes, 3).unwrap(), -2);
    }

    #[test]
    fn read_count_includes_header() {
        let bytes = StringConverter.encode(&"tag".to_owned(), 0).unwrap();
        let (value, read) = StringConverter.read_count(&bytes, 0).unwrap();
        assert_eq!(value, "tag");
        assert_eq!(read, LENGTH_PREFIX_SIZE + 3);
    }

    #[test]
    fn read_truncated_header() {
        let err = StringConverter.read(&[3, 0], 0).unwrap_err();
        assert!(matches!(err, CoreError::Truncated { needed: 4, available: 2, .. }));
    }

    #[test]
    fn arc_converter_delegates() {
        let shared = Arc::new(StringConverter);
        let value = "shared".to_owned();
        let bytes = shared.encode(&value, 0).unwrap();
        assert_eq!(bytes, StringConverter.encode(&value, 0).unwrap());
        assert_eq!(shared.read(&bytes, 0).unwrap(), value);
    }
}
