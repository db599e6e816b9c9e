//! Typed pair stores.
//!
//! A [`TypedPairDatabase`] binds one key converter and one value converter to
//! one named region of a storage engine. Keys are always stored with their
//! length header. Values are stored after `value_index` reserved bytes, with
//! or without a length header depending on [`PairDatabaseConfig::value_length`].

mod iter;
mod scratch;
mod typed;

use serde::{Deserialize, Serialize};

pub use iter::{Keys, Pairs, Values};
pub use typed::TypedPairDatabase;

/// Value layout options for a [`TypedPairDatabase`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairDatabaseConfig {
    /// Number of reserved bytes stored before each value.
    ///
    /// Typed puts zero-fill them; typed gets skip them.
    pub value_index: usize,
    /// Fixed logical length of every value.
    ///
    /// When set, values are stored without a length header and read back with
    /// this length.
    pub value_length: Option<usize>,
}

impl PairDatabaseConfig {
    /// Create the default layout: no reserved bytes, length-prefixed values.
    #[must_use]
    pub const fn new() -> Self {
        Self { value_index: 0, value_length: None }
    }

    /// Reserve `index` bytes before each value.
    #[must_use]
    pub const fn with_value_index(mut self, index: usize) -> Self {
        self.value_index = index;
        self
    }

    /// Store values without a length header, reading them back with `length`.
    #[must_use]
    pub const fn with_value_length(mut self, length: usize) -> Self {
        self.value_length = Some(length);
        self
    }
}
