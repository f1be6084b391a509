//! Confirm command implementation.

use clap::Args;
use parkade::{lifecycle, Logger, SpotId};

use crate::error::CliError;
use crate::utils::{load_catalog, load_configuration, open_store, GlobalOptions};

/// Confirm a reservation: the reserved vehicle has arrived on its spot.
#[derive(Args)]
pub struct ConfirmCommand {
    /// Spot to confirm
    #[arg(long, value_name = "SPOT")]
    pub spot: String,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let spot =
            SpotId::new(self.spot).map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let catalog = load_catalog(global, &config)?;
        let mut store = open_store(global, &config)?;

        lifecycle::confirm(&catalog, &mut store, &spot)?;

        if !global.quiet {
            logger.info(&format!("confirmed {spot}"));
            println!("ok");
        }
        Ok(())
    }
}
