//! Per-thread scratch buffer for encoding keys.
//!
//! Keys are encoded on every operation, so each thread keeps one growable
//! buffer and reuses it. A nested use on the same thread (a callback that
//! encodes another key while the buffer is borrowed) gets a fresh buffer.

use std::cell::RefCell;

use tagsearch_core::conversion::Converter;
use tagsearch_core::CoreError;

use crate::error::Result;

/// Buffers that grew past this are released instead of kept.
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

thread_local! {
    static KEY_BUFFER: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
}

/// Encode `key` with its length header and pass the bytes to `f`.
pub(crate) fn with_encoded_key<C, R>(
    converter: &C,
    key: &C::Value,
    f: impl FnOnce(&[u8]) -> Result<R>,
) -> Result<R>
where
    C: Converter,
{
    KEY_BUFFER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut buf) => {
            let result = encode_into(converter, key, &mut buf).and_then(|len| f(&buf[..len]));
            if buf.capacity() > MAX_RETAINED_CAPACITY {
                *buf = Vec::new();
            }
            result
        }
        Err(_) => {
            let mut buf = Vec::new();
            let len = encode_into(converter, key, &mut buf)?;
            f(&buf[..len])
        }
    })
}

fn encode_into<C: Converter>(converter: &C, key: &C::Value, buf: &mut Vec<u8>) -> Result<usize> {
    let size = converter.size_with_length(key);
    buf.clear();
    buf.resize(size, 0);
    let written = converter.write(buf, 0, key)?;
    if written != size {
        return Err(CoreError::SizeMismatch { expected: size, actual: written }.into());
    }
    Ok(size)
}
