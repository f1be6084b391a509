//! Geometry file schema definitions.
//!
//! The catalog is loaded from three JSON documents in a geometry directory:
//! `blocks.json`, `spots.json` and `access_points.json`. The formats here
//! match the files shipped with the parking deployment, including the
//! sensor feed's habit of writing the covered flag as `0`/`1`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::spot::{BlockId, ParkingId, SpotId, SpotType};

/// Top-level document of `blocks.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlocksFile {
    /// All entry blocks.
    pub blocks: Vec<BlockRecord>,
}

/// A single block entry in `blocks.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockRecord {
    /// The block identifier.
    pub id: BlockId,
    /// The parking area this block feeds into.
    pub parking_id: ParkingId,
}

/// Top-level document of `spots.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpotsFile {
    /// All physical spots.
    pub spots: Vec<SpotRecord>,
}

/// A single spot entry in `spots.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpotRecord {
    /// The spot identifier.
    pub id: SpotId,
    /// The parking area the spot belongs to.
    pub parking_id: ParkingId,
    /// Horizontal position within the parking area.
    pub x: f64,
    /// Vertical position within the parking area.
    pub y: f64,
    /// The spot's default type.
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    /// Whether the spot is under cover. Accepts `true`/`false` or `1`/`0`.
    #[serde(default, deserialize_with = "deserialize_covered")]
    pub covered: bool,
}

/// A single access point entry in `access_points.json`.
///
/// The file is a map keyed by parking area id:
/// `{ "P1": { "x": 0, "y": 0 }, ... }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessPointRecord {
    /// Horizontal position of the access point.
    pub x: f64,
    /// Vertical position of the access point.
    pub y: f64,
}

/// Top-level document of `access_points.json`, keyed by parking area id.
pub type AccessPointsFile = BTreeMap<ParkingId, AccessPointRecord>;

/// Accepts a boolean or the sensor feed's `0`/`1` integer encoding.
fn deserialize_covered<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(D::Error::custom(format!(
            "covered must be a boolean or 0/1, got {other}"
        ))),
    }
}
