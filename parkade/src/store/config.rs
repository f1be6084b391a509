//! State store configuration and path resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for opening the state store.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use parkade::store::StoreConfig;
///
/// let config = StoreConfig::new("/tmp/parkade.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the store file.
    pub path: PathBuf,
    /// Busy timeout for lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the store if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the store in read-only mode.
    pub read_only: bool,
}

impl StoreConfig {
    /// Creates a new store configuration with default settings.
    ///
    /// Defaults: 5s busy timeout, auto-create enabled, read-write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    ///
    /// Determines how long a connection waits on a locked store before
    /// failing.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configures the store to be opened read-only.
    ///
    /// Disables auto-creation as a side effect.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.parkade`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".parkade"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "cannot determine home directory".into(),
        })
}

/// Resolves the store path from the environment or defaults.
///
/// Resolution order:
/// 1. `$PARKADE_DATA_DIR/parkade.db` if `PARKADE_DATA_DIR` is set
/// 2. `~/.parkade/parkade.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `PARKADE_DATA_DIR` is not set.
pub fn resolve_store_path() -> Result<PathBuf> {
    if let Ok(data_dir) = std::env::var("PARKADE_DATA_DIR") {
        Ok(PathBuf::from(data_dir).join("parkade.db"))
    } else {
        Ok(default_data_dir()?.join("parkade.db"))
    }
}
