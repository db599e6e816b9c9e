//! Run closures inside a transaction.
//!
//! The store never begins or ends transactions itself. These helpers cover the
//! common case: begin, run, then commit on success or roll back on error.

use tagsearch_storage::{StorageEngine, Transaction};
use tracing::warn;

use crate::error::Result;

/// Run `f` in a read transaction.
///
/// # Errors
///
/// Returns the error from beginning the transaction or from `f`.
pub fn with_read<'e, E, F, R>(engine: &'e E, f: F) -> Result<R>
where
    E: StorageEngine,
    F: FnOnce(&E::Transaction<'e>) -> Result<R>,
{
    let tx = engine.begin_read()?;
    finish(tx, |tx| f(tx))
}

/// Run `f` in a write transaction, committing if it succeeds.
///
/// If `f` fails, the transaction is rolled back and the error returned.
///
/// # Errors
///
/// Returns the error from beginning the transaction, from `f`, or from the
/// commit.
pub fn with_write<'e, E, F, R>(engine: &'e E, f: F) -> Result<R>
where
    E: StorageEngine,
    F: FnOnce(&mut E::Transaction<'e>) -> Result<R>,
{
    let tx = engine.begin_write()?;
    finish(tx, f)
}

fn finish<T, F, R>(mut tx: T, f: F) -> Result<R>
where
    T: Transaction,
    F: FnOnce(&mut T) -> Result<R>,
{
    match f(&mut tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback() {
                warn!(error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}
