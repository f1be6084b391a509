//! Configuration file discovery and environment overlay.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::schema::Config;

/// File name of the service configuration inside the data directory.
pub(super) const CONFIG_FILE: &str = "config.yaml";

/// Loads a configuration file, returning defaults when it doesn't exist.
///
/// A missing file is not an error (a fresh installation has none); a file
/// that exists but cannot be read or parsed is.
pub(super) fn load_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let raw = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&raw)?)
}

/// Applies environment variable overrides on top of a configuration.
///
/// Recognized variables:
/// - `PARKADE_GEOMETRY_DIR`: geometry directory
/// - `PARKADE_MAX_LOCK_WAIT`: lock wait limit in seconds
pub(super) fn apply_env(mut config: Config) -> Config {
    if let Ok(dir) = env::var("PARKADE_GEOMETRY_DIR") {
        if !dir.is_empty() {
            config.geometry = Some(PathBuf::from(dir));
        }
    }

    if let Ok(raw) = env::var("PARKADE_MAX_LOCK_WAIT") {
        if let Ok(seconds) = raw.parse::<u64>() {
            config.maximum_lock_wait_seconds = Some(seconds);
        }
    }

    config
}
