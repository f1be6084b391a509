//! Catalog referential integrity checks.
//!
//! Runs once at construction time. Any failure here is fatal to startup:
//! the engine must never run against a geometry where a block or spot points
//! at a parking area with no access point, since every allocation needs the
//! access point as its distance reference.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{Error, Result};

use super::loader::{ACCESS_POINTS_FILE, BLOCKS_FILE, SPOTS_FILE};
use super::{AccessPoint, Block, Spot};

pub(super) fn validate(
    blocks: &[Block],
    spots: &[Spot],
    access_points: &[AccessPoint],
) -> Result<()> {
    let mut parking_ids = HashSet::new();
    for ap in access_points {
        if !ap.position().is_finite() {
            return Err(integrity(
                ACCESS_POINTS_FILE,
                format!(
                    "access point for {} has non-finite coordinates",
                    ap.parking_id()
                ),
            ));
        }
        if !parking_ids.insert(ap.parking_id()) {
            return Err(integrity(
                ACCESS_POINTS_FILE,
                format!("duplicate access point for parking area {}", ap.parking_id()),
            ));
        }
    }

    let mut block_ids = HashSet::new();
    for block in blocks {
        if !block_ids.insert(block.id()) {
            return Err(integrity(
                BLOCKS_FILE,
                format!("duplicate block id {}", block.id()),
            ));
        }
        if !parking_ids.contains(block.parking_id()) {
            return Err(integrity(
                BLOCKS_FILE,
                format!(
                    "block {} references parking area {} which has no access point",
                    block.id(),
                    block.parking_id()
                ),
            ));
        }
    }

    let mut spot_ids = HashSet::new();
    for spot in spots {
        if !spot_ids.insert(spot.id()) {
            return Err(integrity(
                SPOTS_FILE,
                format!("duplicate spot id {}", spot.id()),
            ));
        }
        if !parking_ids.contains(spot.parking_id()) {
            return Err(integrity(
                SPOTS_FILE,
                format!(
                    "spot {} references parking area {} which has no access point",
                    spot.id(),
                    spot.parking_id()
                ),
            ));
        }
        if !spot.position().is_finite() {
            return Err(integrity(
                SPOTS_FILE,
                format!("spot {} has non-finite coordinates", spot.id()),
            ));
        }
    }

    Ok(())
}

fn integrity(file: &str, reason: String) -> Error {
    Error::Catalog {
        path: PathBuf::from(file),
        reason,
    }
}
