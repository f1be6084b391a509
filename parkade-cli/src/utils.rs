//! Utility functions for CLI operations.
//!
//! Path resolution, configuration loading, store opening and output
//! formatting shared across commands.

use std::path::PathBuf;
use std::time::Duration;

use parkade::catalog::Catalog;
use parkade::store::{Database, StoreConfig};
use parkade::{Config, ConfigBuilder};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the geometry directory location.
    pub geometry: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic store initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir`, else `~/.parkade`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref dir) = global.data_dir {
        return Ok(dir.clone());
    }

    home::home_dir()
        .map(|h| h.join(".parkade"))
        .ok_or_else(|| CliError::Config("cannot determine home directory".to_string()))
}

/// Load the service configuration from the data directory.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(CliError::from)
}

/// Resolve the store file path: config override, else `<data-dir>/parkade.db`.
pub fn resolve_store_file(global: &GlobalOptions, config: &Config) -> Result<PathBuf, CliError> {
    if let Some(ref path) = config.database {
        return Ok(path.clone());
    }
    Ok(resolve_data_dir(global)?.join("parkade.db"))
}

/// Open the state store.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the store doesn't exist and auto-init is
/// disabled.
pub fn open_store(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let store_path = resolve_store_file(global, config)?;

    if !store_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let mut store_config = StoreConfig::new(store_path);

    if let Some(timeout_seconds) = global.busy_timeout {
        store_config =
            store_config.with_busy_timeout(Duration::from_secs(timeout_seconds.into()));
    } else if let Some(timeout_seconds) = config.maximum_lock_wait_seconds {
        store_config = store_config.with_busy_timeout(Duration::from_secs(timeout_seconds));
    }

    Database::open(store_config).map_err(CliError::from)
}

/// Resolve the geometry directory: `--geometry`, else the configured one.
pub fn resolve_geometry_dir(
    global: &GlobalOptions,
    config: &Config,
) -> Result<PathBuf, CliError> {
    if let Some(ref dir) = global.geometry {
        return Ok(dir.clone());
    }
    if let Some(ref dir) = config.geometry {
        return Ok(dir.clone());
    }
    Err(CliError::Config(
        "geometry directory not configured (pass --geometry or set `geometry` in config.yaml)"
            .to_string(),
    ))
}

/// Load and validate the catalog.
pub fn load_catalog(global: &GlobalOptions, config: &Config) -> Result<Catalog, CliError> {
    let dir = resolve_geometry_dir(global, config)?;
    Catalog::load(&dir).map_err(CliError::from)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global_with_data_dir(dir: &std::path::Path) -> GlobalOptions {
        GlobalOptions {
            verbose: false,
            quiet: false,
            data_dir: Some(dir.to_path_buf()),
            geometry: None,
            busy_timeout: None,
            disable_autoinit: false,
        }
    }

    #[test]
    fn test_resolve_data_dir_prefers_flag() {
        let global = global_with_data_dir(std::path::Path::new("/custom/data"));
        let dir = resolve_data_dir(&global).unwrap();
        assert_eq!(dir, PathBuf::from("/custom/data"));
    }

    #[test]
    fn test_format_timestamp() {
        use std::time::{Duration, UNIX_EPOCH};
        let st = UNIX_EPOCH + Duration::from_secs(1_705_323_045);
        let formatted = format_timestamp(st);
        assert!(formatted.contains("2024-01-15"));
    }

    #[test]
    fn test_disable_autoinit_requires_existing_store() {
        let tmp = tempfile::tempdir().unwrap();
        let mut global = global_with_data_dir(tmp.path());
        global.disable_autoinit = true;

        let config = Config::default();
        let result = open_store(&global, &config);
        assert!(matches!(result, Err(CliError::NoDataDirectory)));
    }
}
