//! Weather command implementation.
//!
//! Reads the rain flag, or sets it on behalf of the external weather feed.

use clap::Args;
use parkade::store::SpotStore;
use parkade::Logger;
use serde_json::json;

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};

/// Show or set the weather flag.
#[derive(Args)]
pub struct WeatherCommand {
    /// Set the rain flag instead of reading it
    #[arg(long, value_name = "BOOL")]
    pub set: Option<bool>,

    /// Print the flag as JSON
    #[arg(long)]
    pub json: bool,
}

impl WeatherCommand {
    /// Execute the weather command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut store = open_store(global, &config)?;

        if let Some(raining) = self.set {
            store.set_raining(raining)?;
            logger.info(&format!("weather flag set to raining={raining}"));
        }

        let raining = store.is_raining()?;

        if self.json {
            println!("{}", json!({ "rain": i32::from(raining) }));
        } else {
            println!("{}", if raining { "raining" } else { "dry" });
        }

        Ok(())
    }
}
