//! Lazy, key-ordered iterators over a store.
//!
//! Each iterator owns a cursor borrowed from the caller's transaction and
//! decodes one entry per step. After the first error, or once the store is
//! closed, an iterator yields that error once and then ends.

use std::iter::FusedIterator;

use tagsearch_core::conversion::Converter;
use tagsearch_storage::{Cursor, KeyValue, Transaction};

use super::typed::TypedPairDatabase;
use crate::error::Result;

/// Raw entries of one store, in key order.
pub(super) struct RawEntries<'t, T, KC, VC>
where
    T: Transaction + 't,
{
    db: &'t TypedPairDatabase<KC, VC>,
    cursor: T::Cursor<'t>,
    done: bool,
}

impl<'t, T, KC, VC> RawEntries<'t, T, KC, VC>
where
    T: Transaction + 't,
{
    pub(super) fn new(db: &'t TypedPairDatabase<KC, VC>, cursor: T::Cursor<'t>) -> Self {
        Self { db, cursor, done: false }
    }

    fn next_entry(&mut self) -> Option<Result<KeyValue>> {
        if self.done {
            return None;
        }
        if let Err(e) = self.db.ensure_open() {
            self.done = true;
            return Some(Err(e));
        }
        match self.cursor.next() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }

    fn next_decoded<R>(
        &mut self,
        decode: impl FnOnce(&TypedPairDatabase<KC, VC>, KeyValue) -> Result<R>,
    ) -> Option<Result<R>> {
        let decoded = match self.next_entry()? {
            Ok(entry) => decode(self.db, entry),
            Err(e) => Err(e),
        };
        if decoded.is_err() {
            self.done = true;
        }
        Some(decoded)
    }
}

macro_rules! store_iterator {
    ($(#[$meta:meta])* $name:ident, $item:ty, $decode:expr) => {
        $(#[$meta])*
        pub struct $name<'t, T, KC, VC>
        where
            T: Transaction + 't,
        {
            entries: RawEntries<'t, T, KC, VC>,
        }

        impl<'t, T, KC, VC> $name<'t, T, KC, VC>
        where
            T: Transaction + 't,
        {
            pub(super) fn new(entries: RawEntries<'t, T, KC, VC>) -> Self {
                Self { entries }
            }
        }

        impl<'t, T, KC, VC> Iterator for $name<'t, T, KC, VC>
        where
            T: Transaction + 't,
            KC: Converter,
            VC: Converter,
        {
            type Item = Result<$item>;

            fn next(&mut self) -> Option<Self::Item> {
                self.entries.next_decoded($decode)
            }
        }

        impl<'t, T, KC, VC> FusedIterator for $name<'t, T, KC, VC>
        where
            T: Transaction + 't,
            KC: Converter,
            VC: Converter,
        {
        }
    };
}

store_iterator!(
    /// Iterator over the `(key, value)` pairs of a store.
    Pairs,
    (KC::Value, VC::Value),
    |db, (key, value)| Ok((db.decode_key(&key)?, db.decode_value(&value)?))
);

store_iterator!(
    /// Iterator over the keys of a store.
    Keys,
    KC::Value,
    |db, (key, _)| db.decode_key(&key)
);

store_iterator!(
    /// Iterator over the values of a store.
    Values,
    VC::Value,
    |db, (_, value)| db.decode_value(&value)
);
