//! The static spot catalog.
//!
//! The catalog holds the physical layout of the parking system: entry
//! blocks, spots with their coordinates and default attributes, and one
//! access point per parking area. It is loaded once at process start from a
//! geometry directory and never mutated afterwards, so it can be shared
//! across threads without locking.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use parkade::catalog::Catalog;
//!
//! let catalog = Catalog::load(Path::new("/etc/parkade/geometry")).unwrap();
//! println!("{} spots across {} parking areas", catalog.spot_count(), catalog.parking_count());
//! ```

mod loader;
pub mod schema;
mod validator;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::Result;
use crate::spot::{BlockId, Coordinates, ParkingId, SpotId, SpotType};

/// An entry block mapped to a parking area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    parking_id: ParkingId,
}

impl Block {
    /// Creates a new block.
    #[must_use]
    pub const fn new(id: BlockId, parking_id: ParkingId) -> Self {
        Self { id, parking_id }
    }

    /// Returns the block identifier.
    #[must_use]
    pub const fn id(&self) -> &BlockId {
        &self.id
    }

    /// Returns the parking area this block feeds into.
    #[must_use]
    pub const fn parking_id(&self) -> &ParkingId {
        &self.parking_id
    }
}

/// A physical parking spot with its static attributes.
///
/// The type and covered flag here are defaults; the state store may carry
/// per-spot overrides that take precedence at allocation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    id: SpotId,
    parking_id: ParkingId,
    position: Coordinates,
    spot_type: SpotType,
    covered: bool,
}

impl Spot {
    /// Creates a new spot.
    #[must_use]
    pub const fn new(
        id: SpotId,
        parking_id: ParkingId,
        position: Coordinates,
        spot_type: SpotType,
        covered: bool,
    ) -> Self {
        Self {
            id,
            parking_id,
            position,
            spot_type,
            covered,
        }
    }

    /// Returns the spot identifier.
    #[must_use]
    pub const fn id(&self) -> &SpotId {
        &self.id
    }

    /// Returns the parking area the spot belongs to.
    #[must_use]
    pub const fn parking_id(&self) -> &ParkingId {
        &self.parking_id
    }

    /// Returns the spot's position.
    #[must_use]
    pub const fn position(&self) -> Coordinates {
        self.position
    }

    /// Returns the spot's default type.
    #[must_use]
    pub const fn spot_type(&self) -> SpotType {
        self.spot_type
    }

    /// Returns the spot's default covered flag.
    #[must_use]
    pub const fn covered(&self) -> bool {
        self.covered
    }
}

/// The reference coordinate of a parking area.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessPoint {
    parking_id: ParkingId,
    position: Coordinates,
}

impl AccessPoint {
    /// Creates a new access point.
    #[must_use]
    pub const fn new(parking_id: ParkingId, position: Coordinates) -> Self {
        Self {
            parking_id,
            position,
        }
    }

    /// Returns the parking area this access point belongs to.
    #[must_use]
    pub const fn parking_id(&self) -> &ParkingId {
        &self.parking_id
    }

    /// Returns the access point's position.
    #[must_use]
    pub const fn position(&self) -> Coordinates {
        self.position
    }
}

/// The immutable catalog of blocks, spots and access points.
///
/// Construction validates referential integrity: every block and every spot
/// must reference a parking area that has an access point, identifiers must
/// be unique, and coordinates must be finite. A catalog that fails these
/// checks is rejected outright.
#[derive(Debug, Clone)]
pub struct Catalog {
    blocks: HashMap<BlockId, Block>,
    spots: BTreeMap<SpotId, Spot>,
    access_points: HashMap<ParkingId, AccessPoint>,
    spots_by_parking: HashMap<ParkingId, Vec<SpotId>>,
}

impl Catalog {
    /// Loads and validates the catalog from a geometry directory.
    ///
    /// The directory must contain `blocks.json`, `spots.json` and
    /// `access_points.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing or malformed, or if the
    /// integrity check fails. Both are startup-fatal conditions.
    pub fn load(geometry_dir: &Path) -> Result<Self> {
        let (blocks, spots, access_points) = loader::load_geometry(geometry_dir)?;
        Self::from_parts(blocks, spots, access_points)
    }

    /// Builds a catalog from already-constructed parts.
    ///
    /// Useful for tests and for callers that obtain geometry from a source
    /// other than the standard files.
    ///
    /// # Errors
    ///
    /// Returns an error if the integrity check fails.
    pub fn from_parts(
        blocks: Vec<Block>,
        spots: Vec<Spot>,
        access_points: Vec<AccessPoint>,
    ) -> Result<Self> {
        validator::validate(&blocks, &spots, &access_points)?;

        let access_points: HashMap<ParkingId, AccessPoint> = access_points
            .into_iter()
            .map(|ap| (ap.parking_id.clone(), ap))
            .collect();

        let blocks: HashMap<BlockId, Block> = blocks
            .into_iter()
            .map(|b| (b.id.clone(), b))
            .collect();

        let mut spots_by_parking: HashMap<ParkingId, Vec<SpotId>> = HashMap::new();
        let mut spot_map = BTreeMap::new();
        for spot in spots {
            spots_by_parking
                .entry(spot.parking_id.clone())
                .or_default()
                .push(spot.id.clone());
            spot_map.insert(spot.id.clone(), spot);
        }

        Ok(Self {
            blocks,
            spots: spot_map,
            access_points,
            spots_by_parking,
        })
    }

    /// Looks up a block by id.
    #[must_use]
    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Looks up a spot by id.
    #[must_use]
    pub fn spot(&self, id: &SpotId) -> Option<&Spot> {
        self.spots.get(id)
    }

    /// Looks up the access point of a parking area.
    #[must_use]
    pub fn access_point(&self, parking_id: &ParkingId) -> Option<&AccessPoint> {
        self.access_points.get(parking_id)
    }

    /// Iterates over the spots of a parking area.
    ///
    /// Yields nothing for an unknown parking area.
    pub fn spots_in(&self, parking_id: &ParkingId) -> impl Iterator<Item = &Spot> {
        self.spots_by_parking
            .get(parking_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.spots.get(id))
    }

    /// Iterates over all spots in identifier order.
    pub fn spots(&self) -> impl Iterator<Item = &Spot> {
        self.spots.values()
    }

    /// Returns the number of spots in the catalog.
    #[must_use]
    pub fn spot_count(&self) -> usize {
        self.spots.len()
    }

    /// Returns the number of parking areas in the catalog.
    #[must_use]
    pub fn parking_count(&self) -> usize {
        self.access_points.len()
    }

    /// Returns the number of entry blocks in the catalog.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    /// Builds a small two-area catalog used across engine and lifecycle
    /// tests: P1 with an access point at the origin, P2 further out.
    pub(crate) fn sample_catalog() -> Catalog {
        let p1 = ParkingId::new("P1").unwrap();
        let p2 = ParkingId::new("P2").unwrap();

        let blocks = vec![
            Block::new(BlockId::new("B1").unwrap(), p1.clone()),
            Block::new(BlockId::new("B2").unwrap(), p2.clone()),
        ];

        let spots = vec![
            Spot::new(
                SpotId::new("S1").unwrap(),
                p1.clone(),
                Coordinates { x: 10.0, y: 0.0 },
                SpotType::Normal,
                false,
            ),
            Spot::new(
                SpotId::new("S2").unwrap(),
                p1.clone(),
                Coordinates { x: 20.0, y: 0.0 },
                SpotType::Ev,
                true,
            ),
            Spot::new(
                SpotId::new("S3").unwrap(),
                p1.clone(),
                Coordinates { x: 5.0, y: 0.0 },
                SpotType::Pmr,
                false,
            ),
            Spot::new(
                SpotId::new("S4").unwrap(),
                p2.clone(),
                Coordinates { x: 1.0, y: 1.0 },
                SpotType::Normal,
                false,
            ),
        ];

        let access_points = vec![
            AccessPoint::new(p1, Coordinates { x: 0.0, y: 0.0 }),
            AccessPoint::new(p2, Coordinates { x: 0.0, y: 0.0 }),
        ];

        Catalog::from_parts(blocks, spots, access_points).unwrap()
    }
}
