//! State store connection management.
//!
//! Opens the SQLite-backed store with PRAGMA settings suited to many
//! short-lived writers: WAL journaling for concurrent readers and a busy
//! timeout so racing transitions queue instead of failing immediately.

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::StoreConfig;

/// A handle to the spot state store.
///
/// Each `Database` owns one SQLite connection. Concurrent request handlers
/// open their own handles against the same file; the store's conditional
/// UPDATE is the only cross-handle serialization point.
///
/// # Examples
///
/// ```no_run
/// use parkade::store::{Database, StoreConfig};
///
/// let config = StoreConfig::new("/tmp/parkade.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    #[allow(dead_code)]
    config: StoreConfig,
}

impl Database {
    /// Opens a store connection with the given configuration.
    ///
    /// Creates the parent directory when auto-creation is enabled, sets WAL
    /// mode and the busy timeout, and verifies (or initializes) the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The store file cannot be opened or created
    /// - PRAGMA settings cannot be applied
    /// - Schema initialization or the version check fails
    pub fn open(config: StoreConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // PRAGMA journal_mode returns a row, so query_row is required
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;

        super::migrations::check_schema_compatibility(&conn)?;

        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
