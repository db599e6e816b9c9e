//! Redb transaction and cursor implementation.
//!
//! The cursor streams a region in batches (default 1000 entries), fetching the
//! next batch on demand, so iterating a large region does not load it whole.

use redb::{ReadTransaction, ReadableTable, WriteTransaction};

use crate::engine::{Cursor, CursorResult, KeyValue, StorageError, StorageResult, Transaction};

use super::tables::{
    decode_key, encode_key, region_end_key, region_start_key, successor_key,
    validate_region_name, DATA_TABLE,
};

/// Default batch size for cursor operations.
const DEFAULT_BATCH_SIZE: usize = 1000;

/// Map any redb error into [`StorageError::Internal`].
pub(super) fn internal(e: impl std::fmt::Display) -> StorageError {
    StorageError::Internal(e.to_string())
}

/// A transaction for the Redb storage engine.
///
/// Wraps both read-only and read-write Redb transactions behind the
/// `Transaction` trait.
#[allow(clippy::large_enum_variant)]
pub enum RedbTransaction {
    /// A read-only transaction.
    Read(ReadTransaction),
    /// A read-write transaction.
    Write(WriteTransaction),
}

impl RedbTransaction {
    /// Create a new read-only transaction.
    pub const fn new_read(tx: ReadTransaction) -> Self {
        Self::Read(tx)
    }

    /// Create a new read-write transaction.
    pub const fn new_write(tx: WriteTransaction) -> Self {
        Self::Write(tx)
    }

    /// Fetch up to `batch_size` entries of `region` with physical keys `>= from`.
    fn fetch_batch(
        &self,
        region: &str,
        from: &[u8],
        batch_size: usize,
    ) -> StorageResult<Vec<KeyValue>> {
        let end = region_end_key(region);
        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(table) => scan(&table, region, from, &end, batch_size),
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(Vec::new()),
                Err(e) => Err(internal(e)),
            },
            Self::Write(tx) => {
                let table = tx.open_table(DATA_TABLE).map_err(internal)?;
                scan(&table, region, from, &end, batch_size)
            }
        }
    }
}

fn lookup<T>(table: &T, key: &[u8]) -> StorageResult<Option<Vec<u8>>>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let value = table.get(key).map_err(internal)?;
    Ok(value.map(|v| v.value().to_vec()))
}

fn scan<T>(
    table: &T,
    region: &str,
    from: &[u8],
    end: &[u8],
    batch_size: usize,
) -> StorageResult<Vec<KeyValue>>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let mut entries = Vec::with_capacity(batch_size.min(1024));
    let range = table.range(from..end).map_err(internal)?;
    for result in range {
        if entries.len() >= batch_size {
            break;
        }
        let (k, v) = result.map_err(internal)?;
        if let Some(key) = decode_key(region, k.value()) {
            entries.push((key.to_vec(), v.value().to_vec()));
        }
    }
    Ok(entries)
}

impl Transaction for RedbTransaction {
    type Cursor<'a>
        = RedbCursor<'a>
    where
        Self: 'a;

    fn get(&self, region: &str, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        validate_region_name(region)?;
        let encoded_key = encode_key(region, key);
        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(table) => lookup(&table, &encoded_key),
                // No data table means no data, which is not an error
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
                Err(e) => Err(internal(e)),
            },
            Self::Write(tx) => {
                let table = tx.open_table(DATA_TABLE).map_err(internal)?;
                lookup(&table, &encoded_key)
            }
        }
    }

    fn put(&mut self, region: &str, key: &[u8], value: &[u8]) -> StorageResult<()> {
        match self {
            Self::Read(_) => Err(StorageError::ReadOnly),
            Self::Write(tx) => {
                validate_region_name(region)?;
                let encoded_key = encode_key(region, key);
                let mut table = tx.open_table(DATA_TABLE).map_err(internal)?;
                table.insert(encoded_key.as_slice(), value).map_err(internal)?;
                Ok(())
            }
        }
    }

    fn delete(&mut self, region: &str, key: &[u8]) -> StorageResult<bool> {
        match self {
            Self::Read(_) => Err(StorageError::ReadOnly),
            Self::Write(tx) => {
                validate_region_name(region)?;
                let encoded_key = encode_key(region, key);
                let mut table = tx.open_table(DATA_TABLE).map_err(internal)?;
                let removed = table.remove(encoded_key.as_slice()).map_err(internal)?;
                Ok(removed.is_some())
            }
        }
    }

    fn cursor(&self, region: &str) -> StorageResult<Self::Cursor<'_>> {
        validate_region_name(region)?;
        Ok(RedbCursor::new(self, region.to_owned(), DEFAULT_BATCH_SIZE))
    }

    fn commit(self) -> StorageResult<()> {
        match self {
            Self::Read(_) => Ok(()),
            Self::Write(tx) => tx.commit().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn rollback(self) -> StorageResult<()> {
        match self {
            Self::Read(_) => Ok(()),
            Self::Write(tx) => tx.abort().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self, Self::Read(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Unpositioned,
    At(usize),
    Exhausted,
}

/// A batched streaming cursor over one region.
///
/// Holds at most `batch_size` entries in memory at a time.
pub struct RedbCursor<'a> {
    tx: &'a RedbTransaction,
    region: String,
    batch: Vec<KeyValue>,
    position: Position,
    batch_size: usize,
    /// Whether entries may follow the current batch.
    has_more: bool,
}

impl<'a> RedbCursor<'a> {
    /// Create an unpositioned cursor.
    ///
    /// `batch_size` is clamped to at least one entry.
    pub fn new(tx: &'a RedbTransaction, region: String, batch_size: usize) -> Self {
        Self {
            tx,
            region,
            batch: Vec::new(),
            position: Position::Unpositioned,
            batch_size: batch_size.max(1),
            has_more: true,
        }
    }

    /// Replace the batch with entries starting at physical key `from`.
    fn load_batch(&mut self, from: &[u8]) -> CursorResult {
        self.batch = self.tx.fetch_batch(&self.region, from, self.batch_size)?;
        self.has_more = self.batch.len() >= self.batch_size;
        if self.batch.is_empty() {
            self.position = Position::Exhausted;
        } else {
            self.position = Position::At(0);
        }
        Ok(self.current_owned())
    }

    fn current_owned(&self) -> Option<KeyValue> {
        match self.position {
            Position::At(pos) => self.batch.get(pos).cloned(),
            Position::Unpositioned | Position::Exhausted => None,
        }
    }
}

impl Cursor for RedbCursor<'_> {
    fn seek(&mut self, key: &[u8]) -> CursorResult {
        let from = encode_key(&self.region, key);
        self.load_batch(&from)
    }

    fn seek_first(&mut self) -> CursorResult {
        let from = region_start_key(&self.region);
        self.load_batch(&from)
    }

    fn next(&mut self) -> CursorResult {
        match self.position {
            Position::Unpositioned => self.seek_first(),
            Position::Exhausted => Ok(None),
            Position::At(pos) if pos + 1 < self.batch.len() => {
                self.position = Position::At(pos + 1);
                Ok(self.current_owned())
            }
            Position::At(_) => {
                let last = self.batch.last().map(|(key, _)| encode_key(&self.region, key));
                match last {
                    Some(last) if self.has_more => self.load_batch(&successor_key(&last)),
                    _ => {
                        self.position = Position::Exhausted;
                        Ok(None)
                    }
                }
            }
        }
    }

    fn current(&self) -> Option<(&[u8], &[u8])> {
        match self.position {
            Position::At(pos) => self.batch.get(pos).map(|(k, v)| (k.as_slice(), v.as_slice())),
            Position::Unpositioned | Position::Exhausted => None,
        }
    }
}
