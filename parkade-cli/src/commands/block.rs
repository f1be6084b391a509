//! Block and unblock command implementations.
//!
//! Administrative withdrawal of spots from allocation. These sit outside
//! the race-protected lifecycle: blocking is an operator decision that
//! overrides whatever the spot was doing.

use clap::Args;
use parkade::{lifecycle, Logger, SpotId};

use crate::error::CliError;
use crate::utils::{load_catalog, load_configuration, open_store, GlobalOptions};

/// Withdraw a spot from allocation.
#[derive(Args)]
pub struct BlockCommand {
    /// Spot to block
    #[arg(long, value_name = "SPOT")]
    pub spot: String,
}

impl BlockCommand {
    /// Execute the block command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let spot =
            SpotId::new(self.spot).map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let catalog = load_catalog(global, &config)?;
        let mut store = open_store(global, &config)?;

        lifecycle::block(&catalog, &mut store, &spot)?;

        if !global.quiet {
            logger.info(&format!("blocked {spot}"));
            println!("ok");
        }
        Ok(())
    }
}

/// Return a blocked spot to service.
#[derive(Args)]
pub struct UnblockCommand {
    /// Spot to unblock
    #[arg(long, value_name = "SPOT")]
    pub spot: String,
}

impl UnblockCommand {
    /// Execute the unblock command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let spot =
            SpotId::new(self.spot).map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let catalog = load_catalog(global, &config)?;
        let mut store = open_store(global, &config)?;

        lifecycle::unblock(&catalog, &mut store, &spot)?;

        if !global.quiet {
            logger.info(&format!("unblocked {spot}"));
            println!("ok");
        }
        Ok(())
    }
}
