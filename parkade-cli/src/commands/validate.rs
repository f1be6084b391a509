//! Validate command implementation.
//!
//! Loads the geometry files and runs the catalog integrity check without
//! touching the store, so operators can vet a layout before deploying it.

use clap::Args;
use parkade::Logger;

use crate::error::CliError;
use crate::utils::{load_catalog, load_configuration, GlobalOptions};

/// Load and integrity-check the geometry files.
#[derive(Args)]
pub struct ValidateCommand {}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let catalog = load_catalog(global, &config)?;

        logger.debug("geometry files parsed and cross-checked");
        if !global.quiet {
            println!(
                "ok: {} blocks, {} spots, {} parking areas",
                catalog.block_count(),
                catalog.spot_count(),
                catalog.parking_count()
            );
        }
        Ok(())
    }
}
