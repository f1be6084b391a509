//! Allocate command implementation.
//!
//! Reserves the best eligible spot for an arriving vehicle: resolves the
//! entry block, applies the requester's type priority and the weather
//! tie-break, and claims the winner atomically.

use clap::Args;
use parkade::{BlockId, Error, Logger, OccupantTag, RequesterClass, SpotAllocator};
use serde_json::json;

use crate::error::CliError;
use crate::utils::{load_catalog, load_configuration, open_store, GlobalOptions};

/// Allocate a spot for an arriving vehicle.
#[derive(Args)]
pub struct AllocateCommand {
    /// Entry block the vehicle is arriving at
    #[arg(long, value_name = "BLOCK")]
    pub block: String,

    /// Requester class: NORMAL, EV or PMR (case-insensitive)
    #[arg(long, value_name = "CLASS")]
    pub class: String,

    /// Occupant tag identifying the vehicle (e.g. its RFID)
    #[arg(long, value_name = "TAG")]
    pub tag: String,

    /// Print the grant as JSON
    #[arg(long)]
    pub json: bool,
}

impl AllocateCommand {
    /// Execute the allocate command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let block = BlockId::new(self.block)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        let occupant = OccupantTag::new(self.tag)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        // Unrecognized classes are rejected, never defaulted to NORMAL
        let class = RequesterClass::parse(&self.class).ok_or(Error::UnknownRequesterClass {
            value: self.class,
        })?;

        let config = load_configuration(global)?;
        let catalog = load_catalog(global, &config)?;
        let mut store = open_store(global, &config)?;

        let allocator = SpotAllocator::new(&catalog);
        let outcome = allocator.allocate(&mut store, &block, class, &occupant)?;

        match outcome.grant() {
            Some(grant) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(grant).unwrap_or_default());
                } else {
                    println!("{}", grant.spot_id);
                    logger.info(&format!(
                        "reserved {} ({}) in {} at {}",
                        grant.spot_id,
                        grant.spot_type,
                        grant.parking_id,
                        grant.position()
                    ));
                }
                Ok(())
            }
            None => {
                if self.json {
                    println!("{}", json!({ "error": "NO_SPOT_AVAILABLE" }));
                }
                Err(CliError::SemanticFailure("NO_SPOT_AVAILABLE".to_string()))
            }
        }
    }
}
