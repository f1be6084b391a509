//! Shared test utilities for store unit tests.

use tempfile::tempdir;

use super::{Database, StoreConfig};

/// Creates a temporary test store that lives for the duration of the test
/// process.
///
/// # Panics
///
/// Panics if the temporary directory or store cannot be created. This is
/// acceptable in test code where we want to fail fast.
#[must_use]
pub(crate) fn create_test_store() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = StoreConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}
