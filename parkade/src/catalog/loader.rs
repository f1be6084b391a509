//! Geometry directory loading.
//!
//! Reads the three geometry files and converts their records into catalog
//! domain types. Parsing failures carry the offending file path so startup
//! errors point at the right document.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::spot::Coordinates;

use super::schema::{AccessPointsFile, BlocksFile, SpotsFile};
use super::{AccessPoint, Block, Spot};

/// File name of the blocks document inside a geometry directory.
pub(super) const BLOCKS_FILE: &str = "blocks.json";
/// File name of the spots document inside a geometry directory.
pub(super) const SPOTS_FILE: &str = "spots.json";
/// File name of the access points document inside a geometry directory.
pub(super) const ACCESS_POINTS_FILE: &str = "access_points.json";

/// Loads the raw geometry from a directory into domain types.
///
/// No cross-file validation happens here; that is the validator's job.
pub(super) fn load_geometry(
    dir: &Path,
) -> Result<(Vec<Block>, Vec<Spot>, Vec<AccessPoint>)> {
    let blocks_file: BlocksFile = read_json(&dir.join(BLOCKS_FILE))?;
    let spots_file: SpotsFile = read_json(&dir.join(SPOTS_FILE))?;
    let access_file: AccessPointsFile = read_json(&dir.join(ACCESS_POINTS_FILE))?;

    let blocks = blocks_file
        .blocks
        .into_iter()
        .map(|b| Block::new(b.id, b.parking_id))
        .collect();

    let spots = spots_file
        .spots
        .into_iter()
        .map(|s| {
            Spot::new(
                s.id,
                s.parking_id,
                Coordinates { x: s.x, y: s.y },
                s.spot_type,
                s.covered,
            )
        })
        .collect();

    let access_points = access_file
        .into_iter()
        .map(|(parking_id, ap)| {
            AccessPoint::new(parking_id, Coordinates { x: ap.x, y: ap.y })
        })
        .collect();

    Ok((blocks, spots, access_points))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|e| Error::Catalog {
        path: path.to_path_buf(),
        reason: format!("cannot read file: {e}"),
    })?;

    serde_json::from_str(&raw).map_err(|e| Error::Catalog {
        path: path.to_path_buf(),
        reason: format!("cannot parse JSON: {e}"),
    })
}
