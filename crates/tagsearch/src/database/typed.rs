//! The typed pair store.
//!
//! Keys are encoded into a per-thread scratch buffer; values are encoded into
//! a fresh buffer per put, after the configured reserved prefix.

use std::sync::atomic::{AtomicBool, Ordering};

use tagsearch_core::conversion::Converter;
use tagsearch_core::CoreError;
use tagsearch_storage::{StorageEngine, Transaction};
use tracing::debug;

use super::iter::{Keys, Pairs, RawEntries, Values};
use super::scratch::with_encoded_key;
use super::PairDatabaseConfig;
use crate::error::{Error, Result};

/// A store of typed key/value pairs in one named region.
///
/// The store holds no transaction of its own: every operation takes one from
/// the caller, who decides when to commit. After [`close`](Self::close) every
/// operation fails with [`Error::Closed`].
///
/// # Example
///
/// ```
/// use tagsearch::conversion::{I64Converter, StringConverter};
/// use tagsearch::{RedbEngine, StorageEngine, Transaction, TypedPairDatabase};
///
/// let engine = RedbEngine::in_memory()?;
/// let db = TypedPairDatabase::open(&engine, "counts", StringConverter, I64Converter)?;
///
/// let mut tx = engine.begin_write()?;
/// db.put(&mut tx, &"cat".to_owned(), &3)?;
/// tx.commit()?;
///
/// let tx = engine.begin_read()?;
/// assert_eq!(db.get(&tx, &"cat".to_owned())?, Some(3));
/// assert_eq!(db.get(&tx, &"dog".to_owned())?, None);
/// # Ok::<(), tagsearch::Error>(())
/// ```
#[derive(Debug)]
pub struct TypedPairDatabase<KC, VC> {
    name: String,
    key_converter: KC,
    value_converter: VC,
    config: PairDatabaseConfig,
    closed: AtomicBool,
}

impl<KC, VC> TypedPairDatabase<KC, VC>
where
    KC: Converter,
    VC: Converter,
{
    /// Open the store named `name`, registering its region with the engine.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the name is invalid or the engine's region
    /// limit is reached.
    pub fn open<E: StorageEngine>(
        engine: &E,
        name: impl Into<String>,
        key_converter: KC,
        value_converter: VC,
    ) -> Result<Self> {
        Self::open_with_config(
            engine,
            name,
            key_converter,
            value_converter,
            PairDatabaseConfig::default(),
        )
    }

    /// Open the store named `name` with an explicit value layout.
    ///
    /// # Errors
    ///
    /// See [`open`](Self::open).
    pub fn open_with_config<E: StorageEngine>(
        engine: &E,
        name: impl Into<String>,
        key_converter: KC,
        value_converter: VC,
        config: PairDatabaseConfig,
    ) -> Result<Self> {
        let name = name.into();
        engine.open_region(&name)?;
        debug!(
            store = %name,
            value_index = config.value_index,
            value_length = ?config.value_length,
            "opened store"
        );
        Ok(Self { name, key_converter, value_converter, config, closed: AtomicBool::new(false) })
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after close, a conversion error if either
    /// side fails to encode, or a storage error (e.g. a read-only transaction).
    pub fn put<T: Transaction>(&self, tx: &mut T, key: &KC::Value, value: &VC::Value) -> Result<()> {
        self.ensure_open()?;
        let value = self.encode_value(value)?;
        with_encoded_key(&self.key_converter, key, |key| Ok(tx.put(&self.name, key, &value)?))
    }

    /// Store a `(key, value)` pair.
    ///
    /// # Errors
    ///
    /// See [`put`](Self::put).
    pub fn put_pair<T: Transaction>(
        &self,
        tx: &mut T,
        pair: &(KC::Value, VC::Value),
    ) -> Result<()> {
        self.put(tx, &pair.0, &pair.1)
    }

    /// Get the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after close, or a conversion error if the
    /// stored bytes do not decode.
    pub fn get<T: Transaction>(&self, tx: &T, key: &KC::Value) -> Result<Option<VC::Value>> {
        self.ensure_open()?;
        let bytes = with_encoded_key(&self.key_converter, key, |key| Ok(tx.get(&self.name, key)?))?;
        bytes.map(|bytes| self.decode_value(&bytes)).transpose()
    }

    /// Get the pair stored under `key`, handing the key back with its value.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn get_pair<T: Transaction>(
        &self,
        tx: &T,
        key: KC::Value,
    ) -> Result<Option<(KC::Value, VC::Value)>> {
        Ok(self.get(tx, &key)?.map(|value| (key, value)))
    }

    /// Check whether `key` is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after close, or a storage error.
    pub fn contains<T: Transaction>(&self, tx: &T, key: &KC::Value) -> Result<bool> {
        self.ensure_open()?;
        with_encoded_key(&self.key_converter, key, |key| Ok(tx.get(&self.name, key)?.is_some()))
    }

    /// Remove `key`, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after close, or a storage error.
    pub fn delete<T: Transaction>(&self, tx: &mut T, key: &KC::Value) -> Result<bool> {
        self.ensure_open()?;
        with_encoded_key(&self.key_converter, key, |key| Ok(tx.delete(&self.name, key)?))
    }

    /// Store already encoded bytes.
    ///
    /// `key` must be laid out the way this store encodes keys for typed reads
    /// to find it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after close, or a storage error.
    pub fn put_raw<T: Transaction>(&self, tx: &mut T, key: &[u8], value: &[u8]) -> Result<()> {
        self.ensure_open()?;
        Ok(tx.put(&self.name, key, value)?)
    }

    /// Get the stored bytes under an encoded key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after close, or a storage error.
    pub fn get_raw<T: Transaction>(&self, tx: &T, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.ensure_open()?;
        Ok(tx.get(&self.name, key)?)
    }

    /// Remove an encoded key, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after close, or a storage error.
    pub fn delete_raw<T: Transaction>(&self, tx: &mut T, key: &[u8]) -> Result<bool> {
        self.ensure_open()?;
        Ok(tx.delete(&self.name, key)?)
    }

    /// Iterate over all pairs in key order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after close, or a storage error if the cursor
    /// cannot be created. Errors while stepping surface as items.
    pub fn iter<'t, T: Transaction>(&'t self, tx: &'t T) -> Result<Pairs<'t, T, KC, VC>> {
        Ok(Pairs::new(self.entries(tx)?))
    }

    /// Iterate over all keys in key order.
    ///
    /// # Errors
    ///
    /// See [`iter`](Self::iter).
    pub fn keys<'t, T: Transaction>(&'t self, tx: &'t T) -> Result<Keys<'t, T, KC, VC>> {
        Ok(Keys::new(self.entries(tx)?))
    }

    /// Iterate over all values in key order.
    ///
    /// # Errors
    ///
    /// See [`iter`](Self::iter).
    pub fn values<'t, T: Transaction>(&'t self, tx: &'t T) -> Result<Values<'t, T, KC, VC>> {
        Ok(Values::new(self.entries(tx)?))
    }

    fn entries<'t, T: Transaction>(&'t self, tx: &'t T) -> Result<RawEntries<'t, T, KC, VC>> {
        self.ensure_open()?;
        let cursor = tx.cursor(&self.name)?;
        Ok(RawEntries::new(self, cursor))
    }

    /// Encode a key the way this store writes it.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the key fails to encode.
    pub fn encode_key(&self, key: &KC::Value) -> Result<Vec<u8>> {
        Ok(self.key_converter.encode(key, 0)?)
    }

    /// Encode a value the way this store writes it, reserved bytes included.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the value fails to encode, or if its
    /// length differs from a configured `value_length`.
    pub fn encode_value(&self, value: &VC::Value) -> Result<Vec<u8>> {
        let bytes = match self.config.value_length {
            Some(length) => {
                let actual = self.value_converter.length(value);
                if actual != length {
                    return Err(CoreError::Encoding(format!(
                        "value length {actual} does not match configured length {length}"
                    ))
                    .into());
                }
                self.value_converter.encode_without_length(value, self.config.value_index)?
            }
            None => self.value_converter.encode(value, self.config.value_index)?,
        };
        Ok(bytes)
    }

    /// Decode stored key bytes.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the bytes are not a valid key.
    pub fn decode_key(&self, bytes: &[u8]) -> Result<KC::Value> {
        Ok(self.key_converter.read(bytes, 0)?)
    }

    /// Decode stored value bytes, skipping the reserved prefix.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the bytes are not a valid value.
    pub fn decode_value(&self, bytes: &[u8]) -> Result<VC::Value> {
        let index = self.config.value_index;
        let value = match self.config.value_length {
            Some(length) => self.value_converter.read_without_length(bytes, index, length)?,
            None => self.value_converter.read(bytes, index)?,
        };
        Ok(value)
    }
}

impl<KC, VC> TypedPairDatabase<KC, VC> {
    /// Close the store. Closing twice is a no-op.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(store = %self.name, "closed store");
        }
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// The store's region name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key converter.
    #[must_use]
    pub const fn key_converter(&self) -> &KC {
        &self.key_converter
    }

    /// The value converter.
    #[must_use]
    pub const fn value_converter(&self) -> &VC {
        &self.value_converter
    }

    /// The value layout.
    #[must_use]
    pub const fn config(&self) -> PairDatabaseConfig {
        self.config
    }

    pub(super) fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(Error::Closed(self.name.clone()))
        } else {
            Ok(())
        }
    }
}
