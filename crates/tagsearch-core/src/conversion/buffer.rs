//! Bounds-checked helpers for reading and writing at buffer offsets.
//!
//! Converters use these instead of indexing directly so that every
//! out-of-range access turns into a [`CoreError`] rather than a panic.

use crate::error::CoreError;

use super::traits::LENGTH_PREFIX_SIZE;

/// Borrow `len` bytes of `buf` starting at `offset`.
///
/// # Errors
///
/// Returns [`CoreError::Truncated`] if fewer than `len` bytes are available.
pub fn read_slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], CoreError> {
    let available = buf.len().saturating_sub(offset);
    match offset.checked_add(len) {
        Some(end) if end <= buf.len() => Ok(&buf[offset..end]),
        _ => Err(CoreError::Truncated { offset, needed: len, available }),
    }
}

/// Read a fixed-size array of bytes at `offset`.
///
/// # Errors
///
/// Returns [`CoreError::Truncated`] if fewer than `N` bytes are available.
pub fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], CoreError> {
    let mut out = [0u8; N];
    out.copy_from_slice(read_slice(buf, offset, N)?);
    Ok(out)
}

/// Copy `src` into `buf` at `offset`, returning the number of bytes written.
///
/// # Errors
///
/// Returns [`CoreError::BufferOverflow`] if `src` does not fit.
pub fn write_slice(buf: &mut [u8], offset: usize, src: &[u8]) -> Result<usize, CoreError> {
    let capacity = buf.len();
    match offset.checked_add(src.len()) {
        Some(end) if end <= capacity => {
            buf[offset..end].copy_from_slice(src);
            Ok(src.len())
        }
        _ => Err(CoreError::BufferOverflow { offset, needed: src.len(), capacity }),
    }
}

/// Write a length header at `offset`.
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if `length` does not fit in a `u32`, or
/// [`CoreError::BufferOverflow`] if the header does not fit in `buf`.
pub fn write_length(buf: &mut [u8], offset: usize, length: usize) -> Result<usize, CoreError> {
    let header = u32::try_from(length)
        .map_err(|_| CoreError::Encoding(format!("length {length} exceeds u32 header")))?;
    write_slice(buf, offset, &header.to_le_bytes())
}

/// Read a length header at `offset`.
///
/// # Errors
///
/// Returns [`CoreError::Truncated`] if the header is cut off.
pub fn read_length(buf: &[u8], offset: usize) -> Result<usize, CoreError> {
    let header = u32::from_le_bytes(read_array::<LENGTH_PREFIX_SIZE>(buf, offset)?);
    usize::try_from(header)
        .map_err(|_| CoreError::Encoding("length header exceeds platform capacity".to_owned()))
}
