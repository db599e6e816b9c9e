//! Typed value conversion to and from flat byte buffers.
//!
//! Every storable type gets a [`Converter`]: a small, usually stateless value
//! that knows how large an encoded value is, how to write it at an offset, and
//! how to read it back.
//!
//! # Encoding Regimes
//!
//! Each value can be written in two forms:
//!
//! - **Length-prefixed** ([`Converter::write`]): a 4-byte little-endian `u32`
//!   header holding the value's [`length`](Converter::length), followed by the
//!   payload. The value describes itself and can be concatenated with others.
//! - **Without length** ([`Converter::write_without_length`]): the payload
//!   only. The reader must supply the length out of band, for example from a
//!   store configured with a uniform value length or from an outer sequence.
//!
//! The header holds a byte count for strings and byte strings, an element
//! count for sequences, and `1` for scalars.
//!
//! # Layout Stability
//!
//! [`LENGTH_PREFIX_SIZE`] and the little-endian byte order are part of the
//! persisted format. Changing either breaks every existing database.

pub mod buffer;
mod primitive;
mod sequence;
mod traits;


pub use primitive::{
    BoolConverter, BytesConverter, F32Converter, F64Converter, I32Converter, I64Converter,
    StringConverter, U32Converter, U64Converter,
};
pub use sequence::{ArrayConverter, ElementMode, ListConverter};
pub use traits::{Converter, LENGTH_PREFIX_SIZE};
