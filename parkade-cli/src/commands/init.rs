//! Init command implementation.
//!
//! Creates the data directory and store schema so later commands can run
//! with `--disable-autoinit` in locked-down deployments.

use std::fs;

use clap::Args;
use parkade::Logger;

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, resolve_data_dir, GlobalOptions};

/// Initialize the data directory and store schema.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        fs::create_dir_all(&data_dir)?;

        let config = load_configuration(global)?;

        // Opening the store creates the schema
        let _store = open_store(global, &config)?;

        logger.info(&format!("initialized data directory {}", data_dir.display()));
        if !global.quiet {
            println!("{}", data_dir.display());
        }
        Ok(())
    }
}
