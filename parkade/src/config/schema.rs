//! Service configuration schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Complete service configuration.
///
/// Loaded from `config.yaml` in the data directory, with environment
/// overrides applied on top. Every field is optional; unset fields fall
/// back to built-in defaults at the point of use.
///
/// # Examples
///
/// ```
/// use parkade::config::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     geometry: Some(PathBuf::from("/etc/parkade/geometry")),
///     ..Default::default()
/// };
/// assert!(config.database.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the geometry files (blocks, spots, access points).
    pub geometry: Option<PathBuf>,

    /// Override for the state store file path.
    pub database: Option<PathBuf>,

    /// Maximum time to wait for store lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_from_yaml() {
        let yaml = "geometry: /etc/parkade/geometry\nmaximum_lock_wait_seconds: 10\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.geometry,
            Some(PathBuf::from("/etc/parkade/geometry"))
        );
        assert_eq!(config.maximum_lock_wait_seconds, Some(10));
        assert_eq!(config.database, None);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let yaml = "geometry: /tmp\nfloors: 3\n";
        let result: Result<Config, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
