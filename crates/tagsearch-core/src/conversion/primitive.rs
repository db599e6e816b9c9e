//! Converters for scalar values, strings and byte strings.
//!
//! Numbers are stored little-endian at their natural width. Scalars always
//! report a logical length of `1` and ignore the length they are handed on
//! read, so they work in both encoding regimes.

use crate::error::CoreError;

use super::buffer::{read_array, read_slice, write_slice};
use super::traits::Converter;

/// Define a converter for a fixed-width numeric type.
macro_rules! numeric_converter {
    ($(#[$meta:meta])* $name:ident, $ty:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            /// Encoded width of one value in bytes.
            pub const WIDTH: usize = std::mem::size_of::<$ty>();
        }

        impl Converter for $name {
            type Value = $ty;

            fn length(&self, _value: &$ty) -> usize {
                1
            }

            fn size(&self, _value: &$ty) -> usize {
                Self::WIDTH
            }

            fn write_without_length(
                &self,
                buf: &mut [u8],
                offset: usize,
                value: &$ty,
            ) -> Result<usize, CoreError> {
                write_slice(buf, offset, &value.to_le_bytes())
            }

            fn read_without_length_count(
                &self,
                buf: &[u8],
                offset: usize,
                _length: usize,
            ) -> Result<($ty, usize), CoreError> {
                let bytes = read_array::<{ std::mem::size_of::<$ty>() }>(buf, offset)?;
                Ok((<$ty>::from_le_bytes(bytes), Self::WIDTH))
            }
        }
    };
}

numeric_converter!(
    /// Converter for `i32` values.
    I32Converter,
    i32
);
numeric_converter!(
    /// Converter for `i64` values.
    I64Converter,
    i64
);
numeric_converter!(
    /// Converter for `u32` values.
    U32Converter,
    u32
);
numeric_converter!(
    /// Converter for `u64` values.
    U64Converter,
    u64
);
numeric_converter!(
    /// Converter for `f32` values (IEEE 754, little-endian).
    F32Converter,
    f32
);
numeric_converter!(
    /// Converter for `f64` values (IEEE 754, little-endian).
    F64Converter,
    f64
);

/// Converter for `bool` values, stored as a single `0x00` / `0x01` byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolConverter;

impl Converter for BoolConverter {
    type Value = bool;

    fn length(&self, _value: &bool) -> usize {
        1
    }

    fn size(&self, _value: &bool) -> usize {
        1
    }

    fn write_without_length(
        &self,
        buf: &mut [u8],
        offset: usize,
        value: &bool,
    ) -> Result<usize, CoreError> {
        write_slice(buf, offset, &[u8::from(*value)])
    }

    fn read_without_length_count(
        &self,
        buf: &[u8],
        offset: usize,
        _length: usize,
    ) -> Result<(bool, usize), CoreError> {
        match read_array::<1>(buf, offset)? {
            [0] => Ok((false, 1)),
            [1] => Ok((true, 1)),
            [other] => Err(CoreError::Encoding(format!("invalid bool byte: {other:#x}"))),
        }
    }
}

/// Converter for UTF-8 strings.
///
/// The logical length is the UTF-8 byte count, so a length-prefixed string is
/// `[u32 byte count][bytes]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringConverter;

impl Converter for StringConverter {
    type Value = String;

    fn length(&self, value: &String) -> usize {
        value.len()
    }

    fn size(&self, value: &String) -> usize {
        value.len()
    }

    fn write_without_length(
        &self,
        buf: &mut [u8],
        offset: usize,
        value: &String,
    ) -> Result<usize, CoreError> {
        write_slice(buf, offset, value.as_bytes())
    }

    fn read_without_length_count(
        &self,
        buf: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(String, usize), CoreError> {
        let bytes = read_slice(buf, offset, length)?;
        let s = std::str::from_utf8(bytes)
            .map_err(|e| CoreError::Encoding(format!("invalid UTF-8: {e}")))?;
        Ok((s.to_owned(), length))
    }
}

/// Converter for raw byte strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BytesConverter;

impl Converter for BytesConverter {
    type Value = Vec<u8>;

    fn length(&self, value: &Vec<u8>) -> usize {
        value.len()
    }

    fn size(&self, value: &Vec<u8>) -> usize {
        value.len()
    }

    fn write_without_length(
        &self,
        buf: &mut [u8],
        offset: usize,
        value: &Vec<u8>,
    ) -> Result<usize, CoreError> {
        write_slice(buf, offset, value)
    }

    fn read_without_length_count(
        &self,
        buf: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(Vec<u8>, usize), CoreError> {
        Ok((read_slice(buf, offset, length)?.to_vec(), length))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::conversion::LENGTH_PREFIX_SIZE;

    #[test]
    fn i32_layout() {
        let bytes = I32Converter.encode(&0x0A0B_0C0D, 0).unwrap();
        assert_eq!(bytes, vec![1, 0, 0, 0, 0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn numeric_without_length() {
        for v in [0i64, -1, i64::MIN, i64::MAX] {
            let bytes = I64Converter.encode_without_length(&v, 0).unwrap();
            assert_eq!(bytes.len(), 8);
            assert_eq!(I64Converter.read_without_length(&bytes, 0, 1).unwrap(), v);
        }
    }

    #[test]
    fn float_values() {
        for v in [0.0f32, -1.5, f32::MAX, f32::INFINITY] {
            let bytes = F32Converter.encode(&v, 0).unwrap();
            assert_eq!(F32Converter.read(&bytes, 0).unwrap(), v);
        }
        let bytes = F64Converter.encode(&std::f64::consts::PI, 2).unwrap();
        assert_eq!(F64Converter.read(&bytes, 2).unwrap(), std::f64::consts::PI);
    }

    #[test]
    fn unsigned_values() {
        let bytes = U32Converter.encode_without_length(&u32::MAX, 0).unwrap();
        assert_eq!(bytes, vec![0xFF; 4]);
        let bytes = U64Converter.encode(&42, 0).unwrap();
        assert_eq!(U64Converter.read(&bytes, 0).unwrap(), 42);
    }

    #[test]
    fn truncated_number() {
        let err = I64Converter.read_without_length(&[1, 2, 3], 0, 1).unwrap_err();
        assert!(matches!(err, CoreError::Truncated { needed: 8, available: 3, .. }));
    }

    #[test]
    fn bool_values() {
        for v in [true, false] {
            let bytes = BoolConverter.encode(&v, 0).unwrap();
            assert_eq!(BoolConverter.read(&bytes, 0).unwrap(), v);
        }
        assert!(BoolConverter.read_without_length(&[2], 0, 1).is_err());
    }

    #[test]
    fn string_layout() {
        let value = "héllo".to_owned();
        let bytes = StringConverter.encode(&value, 0).unwrap();
        assert_eq!(bytes.len(), LENGTH_PREFIX_SIZE + value.len());
        assert_eq!(&bytes[..4], &(value.len() as u32).to_le_bytes());
        assert_eq!(StringConverter.read(&bytes, 0).unwrap(), value);
    }

    #[test]
    fn empty_string() {
        let bytes = StringConverter.encode(&String::new(), 0).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert_eq!(StringConverter.read(&bytes, 0).unwrap(), "");
    }

    #[test]
    fn string_invalid_utf8() {
        let bytes = [2, 0, 0, 0, 0xFF, 0xFE];
        let err = StringConverter.read(&bytes, 0).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn string_truncated_payload() {
        let bytes = [10, 0, 0, 0, b'a', b'b'];
        let err = StringConverter.read(&bytes, 0).unwrap_err();
        assert_eq!(err, CoreError::Truncated { offset: 4, needed: 10, available: 2 });
    }

    #[test]
    fn bytes_values() {
        let value = vec![0u8, 1, 2, 255];
        let bytes = BytesConverter.encode(&value, 0).unwrap();
        assert_eq!(BytesConverter.read(&bytes, 0).unwrap(), value);

        let bytes = BytesConverter.encode_without_length(&value, 0).unwrap();
        assert_eq!(bytes, value);
        assert_eq!(BytesConverter.read_without_length(&bytes, 0, 4).unwrap(), value);
    }
}
