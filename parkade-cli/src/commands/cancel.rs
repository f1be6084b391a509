//! Cancel command implementation.
//!
//! Cancels a reservation (or releases an occupied spot for a vehicle
//! leaving early). Cancellation is idempotent: a duplicate or late cancel
//! succeeds quietly.

use clap::Args;
use parkade::{lifecycle, Logger, SpotId};

use crate::error::CliError;
use crate::utils::{load_catalog, load_configuration, open_store, GlobalOptions};

/// Cancel a reservation or release an occupied spot.
#[derive(Args)]
pub struct CancelCommand {
    /// Spot to cancel
    #[arg(long, value_name = "SPOT")]
    pub spot: String,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let spot =
            SpotId::new(self.spot).map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let catalog = load_catalog(global, &config)?;
        let mut store = open_store(global, &config)?;

        lifecycle::cancel(&catalog, &mut store, &spot)?;

        if !global.quiet {
            logger.info(&format!("cancelled {spot}"));
            println!("ok");
        }
        Ok(())
    }
}
