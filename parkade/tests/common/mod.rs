//! Shared helpers for integration tests.

use std::fs;
use std::path::Path;

use parkade::catalog::{AccessPoint, Block, Catalog, Spot};
use parkade::store::{Database, StoreConfig};
use parkade::{BlockId, Coordinates, OccupantTag, ParkingId, SpotId, SpotType};

/// Writes the standard three geometry files into `dir`.
///
/// Layout: block B1 feeds parking area P1 with access point at the origin;
/// S1 NORMAL/uncovered at x=10, S2 EV/covered at x=20, S3 PMR/uncovered at
/// x=5.
#[allow(dead_code)]
pub fn write_sample_geometry(dir: &Path) {
    fs::write(
        dir.join("blocks.json"),
        r#"{"blocks": [{"id": "B1", "parking_id": "P1"}]}"#,
    )
    .unwrap();

    fs::write(
        dir.join("spots.json"),
        r#"{"spots": [
            {"id": "S1", "parking_id": "P1", "x": 10, "y": 0, "type": "NORMAL", "covered": 0},
            {"id": "S2", "parking_id": "P1", "x": 20, "y": 0, "type": "EV", "covered": 1},
            {"id": "S3", "parking_id": "P1", "x": 5, "y": 0, "type": "PMR", "covered": 0}
        ]}"#,
    )
    .unwrap();

    fs::write(dir.join("access_points.json"), r#"{"P1": {"x": 0, "y": 0}}"#).unwrap();
}

/// Builds a catalog with `count` NORMAL spots in one parking area, spaced
/// out along the x axis, fed by block B1.
#[allow(dead_code)]
pub fn catalog_with_normal_spots(count: usize) -> Catalog {
    let p1 = ParkingId::new("P1").unwrap();

    let spots = (1..=count)
        .map(|i| {
            Spot::new(
                SpotId::new(format!("S{i}")).unwrap(),
                p1.clone(),
                Coordinates {
                    x: i as f64 * 10.0,
                    y: 0.0,
                },
                SpotType::Normal,
                false,
            )
        })
        .collect();

    Catalog::from_parts(
        vec![Block::new(BlockId::new("B1").unwrap(), p1.clone())],
        spots,
        vec![AccessPoint::new(p1, Coordinates { x: 0.0, y: 0.0 })],
    )
    .unwrap()
}

/// Opens a store handle on the given path.
#[allow(dead_code)]
pub fn open_store(path: &Path) -> Database {
    Database::open(StoreConfig::new(path)).unwrap()
}

/// Convenience constructor for occupant tags.
#[allow(dead_code)]
pub fn tag(value: &str) -> OccupantTag {
    OccupantTag::new(value).unwrap()
}

/// Convenience constructor for spot ids.
#[allow(dead_code)]
pub fn spot(id: &str) -> SpotId {
    SpotId::new(id).unwrap()
}

/// Convenience constructor for block ids.
#[allow(dead_code)]
pub fn block(id: &str) -> BlockId {
    BlockId::new(id).unwrap()
}
