//! Service configuration.
//!
//! Configuration comes from `config.yaml` in the data directory with
//! environment overrides on top. The builder keeps the precedence explicit:
//! defaults, then file, then environment.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use parkade::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir(Path::new("/var/lib/parkade"))
//!     .build()
//!     .unwrap();
//! ```

mod loader;
mod schema;

pub use schema::Config;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Builds a [`Config`] from the standard sources.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data directory whose `config.yaml` should be loaded.
    ///
    /// Without this, only defaults and the environment apply.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Disables the environment overlay.
    ///
    /// Mainly for tests that need hermetic configuration.
    #[must_use]
    pub const fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be
    /// read or parsed.
    pub fn build(self) -> Result<Config> {
        let mut config = match self.data_dir {
            Some(dir) => loader::load_file(&dir.join(loader::CONFIG_FILE))?,
            None => Config::default(),
        };

        if !self.skip_env {
            config = loader::apply_env(config);
        }

        Ok(config)
    }
}
