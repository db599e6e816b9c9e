//! Compliance tests for storage engine implementations.
//!
//! Any backend can run the suite by implementing [`TestHarness`].

use tagsearch_storage::{Cursor, StorageEngine, StorageResult, Transaction};

/// Creates fresh engines for the compliance suite.
pub trait TestHarness {
    /// The storage engine type being tested.
    type Engine: StorageEngine;

    /// Create a new, empty storage engine.
    fn create_engine() -> StorageResult<Self::Engine>;

    /// Clean up after a test (remove temp files, etc.).
    fn cleanup(_engine: Self::Engine) {}
}

/// Run every compliance test against the engine built by `H`.
///
/// # Example
///
/// ```ignore
/// struct RedbHarness;
///
/// impl TestHarness for RedbHarness {
///     type Engine = RedbEngine;
///
///     fn create_engine() -> StorageResult<Self::Engine> {
///         RedbEngine::in_memory()
///     }
/// }
///
/// #[test]
/// fn test_redb_compliance() {
///     run_test_suite::<RedbHarness>();
/// }
/// ```
pub fn run_test_suite<H: TestHarness>() {
    test_basic_operations::<H>();
    test_absent_key_delete::<H>();
    test_transaction_isolation::<H>();
    test_cursor_operations::<H>();
    test_region_isolation::<H>();
    test_read_only_enforcement::<H>();
    test_region_registration::<H>();
}

/// Get/put/overwrite/delete within one region.
fn test_basic_operations<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("images", b"key1", b"value1").expect("failed to put");
        tx.commit().expect("failed to commit");
    }

    {
        let tx = engine.begin_read().expect("failed to begin read");
        let value = tx.get("images", b"key1").expect("failed to get");
        assert_eq!(value, Some(b"value1".to_vec()));
    }

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("images", b"key1", b"value1_updated").expect("failed to put");
        tx.commit().expect("failed to commit");
    }

    {
        let tx = engine.begin_read().expect("failed to begin read");
        let value = tx.get("images", b"key1").expect("failed to get");
        assert_eq!(value, Some(b"value1_updated".to_vec()));
    }

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        let deleted = tx.delete("images", b"key1").expect("failed to delete");
        assert!(deleted);
        tx.commit().expect("failed to commit");
    }

    {
        let tx = engine.begin_read().expect("failed to begin read");
        let value = tx.get("images", b"key1").expect("failed to get");
        assert_eq!(value, None);
    }

    H::cleanup(engine);
}

/// Deleting an absent key reports `false` instead of failing.
fn test_absent_key_delete<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");

    // Before anything was ever written.
    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        let deleted = tx.delete("images", b"nonexistent").expect("failed to delete");
        assert!(!deleted);
        tx.rollback().expect("failed to rollback");
    }

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("images", b"present", b"v").expect("failed to put");
        let deleted = tx.delete("images", b"nonexistent").expect("failed to delete");
        assert!(!deleted);
        tx.commit().expect("failed to commit");
    }

    H::cleanup(engine);
}

/// A rolled-back write is invisible; a committed one is visible to new readers.
fn test_transaction_isolation<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("images", b"key1", b"initial").expect("failed to put");
        tx.commit().expect("failed to commit");
    }

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("images", b"key1", b"discarded").expect("failed to put");
        tx.rollback().expect("failed to rollback");
    }

    {
        let tx = engine.begin_read().expect("failed to begin read");
        let value = tx.get("images", b"key1").expect("failed to get");
        assert_eq!(value, Some(b"initial".to_vec()));
    }

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("images", b"key1", b"updated").expect("failed to put");
        tx.commit().expect("failed to commit");
    }

    {
        let tx = engine.begin_read().expect("failed to begin read");
        let value = tx.get("images", b"key1").expect("failed to get");
        assert_eq!(value, Some(b"updated".to_vec()));
    }

    H::cleanup(engine);
}

/// Cursor ordering, seeking and exhaustion.
fn test_cursor_operations<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        // Inserted out of order on purpose.
        tx.put("images", b"d", b"4").expect("failed to put");
        tx.put("images", b"a", b"1").expect("failed to put");
        tx.put("images", b"c", b"3").expect("failed to put");
        tx.put("images", b"b", b"2").expect("failed to put");
        tx.put("images", b"e", b"5").expect("failed to put");
        tx.commit().expect("failed to commit");
    }

    {
        let tx = engine.begin_read().expect("failed to begin read");
        let mut cursor = tx.cursor("images").expect("failed to create cursor");
        assert!(cursor.current().is_none());

        let first = cursor.seek_first().expect("failed to seek_first");
        assert_eq!(first, Some((b"a".to_vec(), b"1".to_vec())));

        let second = cursor.next().expect("failed to next");
        assert_eq!(second, Some((b"b".to_vec(), b"2".to_vec())));
        assert_eq!(cursor.current(), Some((b"b".as_slice(), b"2".as_slice())));

        let c = cursor.seek(b"c").expect("failed to seek");
        assert_eq!(c, Some((b"c".to_vec(), b"3".to_vec())));

        let mut rest = Vec::new();
        while let Some((k, _)) = cursor.next().expect("failed to next") {
            rest.push(k);
        }
        assert_eq!(rest, vec![b"d".to_vec(), b"e".to_vec()]);
        assert_eq!(cursor.next().expect("failed to next"), None);
    }

    {
        let tx = engine.begin_read().expect("failed to begin read");
        let mut cursor = tx.cursor("images").expect("failed to create cursor");
        let result = cursor.seek(b"bb").expect("failed to seek");
        assert_eq!(result, Some((b"c".to_vec(), b"3".to_vec())));
    }

    H::cleanup(engine);
}

/// The same key in two regions holds two independent values.
fn test_region_isolation<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("tags", b"key", b"value_a").expect("failed to put");
        tx.put("tags_extra", b"key", b"value_b").expect("failed to put");
        tx.commit().expect("failed to commit");
    }

    {
        let tx = engine.begin_read().expect("failed to begin read");
        assert_eq!(tx.get("tags", b"key").expect("failed to get"), Some(b"value_a".to_vec()));
        assert_eq!(
            tx.get("tags_extra", b"key").expect("failed to get"),
            Some(b"value_b".to_vec())
        );

        let mut cursor = tx.cursor("tags").expect("failed to create cursor");
        let mut count = 0;
        while cursor.next().expect("failed to next").is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }

    H::cleanup(engine);
}

/// Read-only transactions reject writes.
fn test_read_only_enforcement<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");

    {
        let mut tx = engine.begin_read().expect("failed to begin read");
        assert!(tx.is_read_only());
        assert!(tx.put("images", b"k", b"v").is_err());
        assert!(tx.delete("images", b"k").is_err());
    }

    H::cleanup(engine);
}

/// Regions can be registered repeatedly.
fn test_region_registration<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");

    engine.open_region("images").expect("failed to open region");
    engine.open_region("images").expect("failed to reopen region");
    assert!(engine.open_region("").is_err());

    H::cleanup(engine);
}
