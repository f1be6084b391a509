//! List command implementation.
//!
//! Prints the merged catalog + store view of every spot.

use clap::Args;
use parkade::{spot_overview, Logger};

use crate::error::CliError;
use crate::utils::{format_timestamp, load_catalog, load_configuration, open_store, GlobalOptions};

/// List all spots with their live state.
#[derive(Args)]
pub struct ListCommand {
    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let catalog = load_catalog(global, &config)?;
        let mut store = open_store(global, &config)?;

        let views = spot_overview(&catalog, &mut store)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&views).unwrap_or_default());
            return Ok(());
        }

        logger.info(&format!("{} spots in catalog", views.len()));

        println!(
            "{:<10} {:<10} {:<8} {:<10} {:<8} {:<12} {:<19} {}",
            "SPOT", "PARKING", "TYPE", "STATUS", "COVERED", "OCCUPANT", "UPDATED", "POSITION"
        );

        for (id, view) in &views {
            let occupant = view
                .occupant
                .as_ref()
                .map_or("-".to_string(), ToString::to_string);
            let updated = view
                .updated_at
                .map_or("-".to_string(), format_timestamp);

            println!(
                "{:<10} {:<10} {:<8} {:<10} {:<8} {:<12} {:<19} ({}, {})",
                id.to_string(),
                view.parking_id.to_string(),
                view.spot_type.to_string(),
                view.status.to_string(),
                if view.covered { "yes" } else { "no" },
                occupant,
                updated,
                view.x,
                view.y,
            );
        }

        Ok(())
    }
}
