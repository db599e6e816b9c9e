//! Composite converters for ordered sequences.
//!
//! [`ListConverter`] and [`ArrayConverter`] turn any element [`Converter`]
//! into a converter for a sequence of that element. They only encode the
//! elements: the element count lives in the outer length header written by
//! [`Converter::write`], or is supplied by the caller when the sequence is
//! read without a length.
//!
//! # Element Modes
//!
//! - [`ElementMode::Prefixed`]: each element carries its own length header.
//!   Required when elements vary in length (strings, nested lists).
//! - [`ElementMode::Fixed`]: elements are written without headers and read
//!   back with the configured length. Compact, but every element must share
//!   that length; writing one of another length fails with
//!   [`CoreError::Encoding`].

use crate::error::CoreError;

use super::traits::Converter;

/// Upper bound on up-front allocation when decoding a declared count.
///
/// A corrupt header must not trigger a huge allocation before the reads fail.
const MAX_PREALLOCATED_ELEMENTS: usize = 4096;

/// How individual elements of a sequence are framed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ElementMode {
    /// Every element is written with its own length header.
    #[default]
    Prefixed,
    /// Every element is written without a header and read with this length.
    Fixed(usize),
}

impl ElementMode {
    /// Create a mode from an optional fixed element length.
    #[must_use]
    pub const fn from_length(length: Option<usize>) -> Self {
        match length {
            Some(length) => Self::Fixed(length),
            None => Self::Prefixed,
        }
    }

    /// The fixed element length, if any.
    #[must_use]
    pub const fn fixed_length(&self) -> Option<usize> {
        match self {
            Self::Fixed(length) => Some(*length),
            Self::Prefixed => None,
        }
    }

    fn element_size<C: Converter>(self, converter: &C, element: &C::Value) -> usize {
        match self {
            Self::Prefixed => converter.size_with_length(element),
            Self::Fixed(_) => converter.size(element),
        }
    }

    fn write_elements<'a, C, I>(
        self,
        converter: &C,
        buf: &mut [u8],
        offset: usize,
        elements: I,
    ) -> Result<usize, CoreError>
    where
        C: Converter,
        C::Value: 'a,
        I: IntoIterator<Item = &'a C::Value>,
    {
        let mut written = 0;
        for element in elements {
            let at = offset + written;
            written += match self {
                Self::Prefixed => converter.write(buf, at, element)?,
                Self::Fixed(length) => {
                    let actual = converter.length(element);
                    if actual != length {
                        return Err(CoreError::Encoding(format!(
                            "element length {actual} does not match fixed length {length}"
                        )));
                    }
                    converter.write_without_length(buf, at, element)?
                }
            };
        }
        Ok(written)
    }

    fn read_elements<C: Converter>(
        self,
        converter: &C,
        buf: &[u8],
        offset: usize,
        count: usize,
    ) -> Result<(Vec<C::Value>, usize), CoreError> {
        let mut read = 0;
        let mut elements = Vec::with_capacity(count.min(MAX_PREALLOCATED_ELEMENTS));
        for _ in 0..count {
            let at = offset + read;
            let (element, consumed) = match self {
                Self::Prefixed => converter.read_count(buf, at)?,
                Self::Fixed(length) => converter.read_without_length_count(buf, at, length)?,
            };
            elements.push(element);
            read += consumed;
        }
        Ok((elements, read))
    }
}

/// Converter for `Vec<T>` built from an element converter.
///
/// # Example
///
/// ```
/// use tagsearch_core::conversion::{Converter, I32Converter, ListConverter};
///
/// // Fixed mode: four bytes per element, no per-element headers.
/// let converter = ListConverter::with_element_length(I32Converter, 1);
/// let bytes = converter.encode(&vec![1, 2, 3], 0).unwrap();
/// assert_eq!(bytes.len(), 4 + 3 * 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConverter<C> {
    element: C,
    mode: ElementMode,
}

impl<C: Converter> ListConverter<C> {
    /// Create a list converter whose elements carry their own length headers.
    #[must_use]
    pub const fn new(element: C) -> Self {
        Self { element, mode: ElementMode::Prefixed }
    }

    /// Create a list converter whose elements all share `length`.
    #[must_use]
    pub const fn with_element_length(element: C, length: usize) -> Self {
        Self { element, mode: ElementMode::Fixed(length) }
    }

    /// Create a list converter with an explicit element mode.
    #[must_use]
    pub const fn with_mode(element: C, mode: ElementMode) -> Self {
        Self { element, mode }
    }

    /// The element converter.
    #[must_use]
    pub const fn element(&self) -> &C {
        &self.element
    }

    /// The element framing mode.
    #[must_use]
    pub const fn mode(&self) -> ElementMode {
        self.mode
    }
}

impl<C: Converter> Converter for ListConverter<C> {
    type Value = Vec<C::Value>;

    fn length(&self, value: &Self::Value) -> usize {
        value.len()
    }

    fn size(&self, value: &Self::Value) -> usize {
        value.iter().map(|e| self.mode.element_size(&self.element, e)).sum()
    }

    fn write_without_length(
        &self,
        buf: &mut [u8],
        offset: usize,
        value: &Self::Value,
    ) -> Result<usize, CoreError> {
        self.mode.write_elements(&self.element, buf, offset, value)
    }

    fn read_without_length_count(
        &self,
        buf: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(Self::Value, usize), CoreError> {
        self.mode.read_elements(&self.element, buf, offset, length)
    }
}

/// Converter for boxed slices (`Box<[T]>`) built from an element converter.
///
/// Shares its framing with [`ListConverter`]: the same elements encode to the
/// same bytes under either converter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayConverter<C> {
    element: C,
    mode: ElementMode,
}

impl<C: Converter> ArrayConverter<C> {
    /// Create an array converter whose elements carry their own length headers.
    #[must_use]
    pub const fn new(element: C) -> Self {
        Self { element, mode: ElementMode::Prefixed }
    }

    /// Create an array converter whose elements all share `length`.
    #[must_use]
    pub const fn with_element_length(element: C, length: usize) -> Self {
        Self { element, mode: ElementMode::Fixed(length) }
    }

    /// The element converter.
    #[must_use]
    pub const fn element(&self) -> &C {
        &self.element
    }

    /// The element framing mode.
    #[must_use]
    pub const fn mode(&self) -> ElementMode {
        self.mode
    }
}

impl<C: Converter> Converter for ArrayConverter<C> {
    type Value = Box<[C::Value]>;

    fn length(&self, value: &Self::Value) -> usize {
        value.len()
    }

    fn size(&self, value: &Self::Value) -> usize {
        value.iter().map(|e| self.mode.element_size(&self.element, e)).sum()
    }

    fn write_without_length(
        &self,
        buf: &mut [u8],
        offset: usize,
        value: &Self::Value,
    ) -> Result<usize, CoreError> {
        self.mode.write_elements(&self.element, buf, offset, value.iter())
    }

    fn read_without_length_count(
        &self,
        buf: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(Self::Value, usize), CoreError> {
        let (elements, read) = self.mode.read_elements(&self.element, buf, offset, length)?;
        Ok((elements.into_boxed_slice(), read))
    }
}
