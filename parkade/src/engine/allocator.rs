//! Spot allocation with type priority and weather tie-breaking.
//!
//! The allocator implements the core decision: resolve the block's parking
//! area, walk the requester's type-priority list, and inside each type rank
//! FREE spots by the weather rule before attempting the atomic FREE→RESERVED
//! transition candidate by candidate. Losing a race on one candidate moves
//! on to the next; the remaining ordering is still valid, so the list is
//! never recomputed mid-type.

use log::debug;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::spot::{
    BlockId, Coordinates, OccupantTag, ParkingId, RequesterClass, SpotId, SpotStatus, SpotType,
};
use crate::store::SpotStore;

/// A successful allocation.
///
/// Carries everything the caller needs to direct the vehicle, plus the
/// weather flag the decision was based on (for observability, not
/// correctness).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grant {
    /// The granted spot.
    pub spot_id: SpotId,
    /// The parking area containing the spot.
    pub parking_id: ParkingId,
    /// The effective type of the granted spot.
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    /// Horizontal position of the spot.
    pub x: f64,
    /// Vertical position of the spot.
    pub y: f64,
    /// The spot's resulting status, always RESERVED.
    pub status: SpotStatus,
    /// Whether it was raining when the decision was made.
    pub rain: bool,
}

impl Grant {
    /// Returns the granted spot's position.
    #[must_use]
    pub const fn position(&self) -> Coordinates {
        Coordinates {
            x: self.x,
            y: self.y,
        }
    }
}

/// Result of an allocation attempt.
///
/// Exhaustion is a normal business outcome: every acceptable type was
/// tried and no FREE spot could be claimed, either because none existed or
/// because concurrent requests took them all mid-flight.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationOutcome {
    /// A spot was reserved for the requester.
    Granted(Grant),
    /// No spot of any acceptable type could be reserved.
    Exhausted,
}

impl AllocationOutcome {
    /// Returns the grant, if the allocation succeeded.
    #[must_use]
    pub const fn grant(&self) -> Option<&Grant> {
        match self {
            Self::Granted(grant) => Some(grant),
            Self::Exhausted => None,
        }
    }

    /// Returns `true` if no spot could be reserved.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// A ranked candidate awaiting a reservation attempt.
#[derive(Debug, Clone)]
struct Candidate {
    spot_id: SpotId,
    position: Coordinates,
    covered: bool,
    distance: f64,
}

/// Stateless spot allocator.
///
/// The allocator borrows the immutable [`Catalog`]; all mutable state lives
/// in the store handle passed to each call, so one allocator can serve any
/// number of concurrent requests.
///
/// # Examples
///
/// ```no_run
/// use parkade::engine::SpotAllocator;
/// use parkade::catalog::Catalog;
/// use parkade::store::{Database, StoreConfig};
/// use parkade::{BlockId, OccupantTag, RequesterClass};
/// use std::path::Path;
///
/// let catalog = Catalog::load(Path::new("/etc/parkade/geometry")).unwrap();
/// let mut store = Database::open(StoreConfig::new("/tmp/parkade.db")).unwrap();
///
/// let allocator = SpotAllocator::new(&catalog);
/// let block = BlockId::new("B1").unwrap();
/// let tag = OccupantTag::new("RFID-0042").unwrap();
///
/// let outcome = allocator
///     .allocate(&mut store, &block, RequesterClass::Ev, &tag)
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SpotAllocator<'a> {
    catalog: &'a Catalog,
}

impl<'a> SpotAllocator<'a> {
    /// Creates a new allocator over the given catalog.
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Returns the catalog this allocator reads from.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Allocates the best eligible spot for a requester entering at `block`.
    ///
    /// The weather flag is read once per call so the whole decision works
    /// from one consistent snapshot. Types are tried in the requester's
    /// priority order; within a type, candidates are attempted in tie-break
    /// order until one atomic FREE→RESERVED transition succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The block does not exist in the catalog
    /// - The store fails or returns malformed state
    pub fn allocate<S: SpotStore>(
        &self,
        store: &mut S,
        block: &BlockId,
        class: RequesterClass,
        occupant: &OccupantTag,
    ) -> Result<AllocationOutcome> {
        let block = self
            .catalog
            .block(block)
            .ok_or_else(|| Error::UnknownBlock {
                block: block.to_string(),
            })?;
        let parking_id = block.parking_id();

        let access = self
            .catalog
            .access_point(parking_id)
            .ok_or_else(|| Error::Catalog {
                path: "access_points.json".into(),
                reason: format!("parking area {parking_id} has no access point"),
            })?;

        let raining = store.is_raining()?;

        for wanted in class.priority() {
            let candidates =
                self.candidates(store, parking_id, wanted, access.position(), raining)?;

            if candidates.is_empty() {
                continue;
            }

            for candidate in candidates {
                let won = store.try_transition(
                    &candidate.spot_id,
                    SpotStatus::Free,
                    SpotStatus::Reserved,
                    Some(occupant),
                )?;

                if won {
                    debug!(
                        "granted {} ({wanted}) in {parking_id} to {occupant}",
                        candidate.spot_id
                    );
                    return Ok(AllocationOutcome::Granted(Grant {
                        spot_id: candidate.spot_id,
                        parking_id: parking_id.clone(),
                        spot_type: wanted,
                        x: candidate.position.x,
                        y: candidate.position.y,
                        status: SpotStatus::Reserved,
                        rain: raining,
                    }));
                }

                // Lost the race; the rest of the ordering is still valid
                debug!("lost race for {}, trying next candidate", candidate.spot_id);
            }
        }

        debug!("no spot of any acceptable type in {parking_id} for {class}");
        Ok(AllocationOutcome::Exhausted)
    }

    /// Builds the ordered candidate list for one type.
    ///
    /// When raining, covered spots rank before uncovered ones and distance
    /// breaks ties; when dry, distance alone decides.
    fn candidates<S: SpotStore>(
        &self,
        store: &mut S,
        parking_id: &ParkingId,
        wanted: SpotType,
        access: Coordinates,
        raining: bool,
    ) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();

        for spot in self.catalog.spots_in(parking_id) {
            let state = store.read(spot.id())?;

            if !state.is_free() {
                continue;
            }
            if state.effective_type(spot) != wanted {
                continue;
            }

            candidates.push(Candidate {
                spot_id: spot.id().clone(),
                position: spot.position(),
                covered: state.effective_covered(spot),
                distance: spot.position().distance_to(access),
            });
        }

        if raining {
            candidates.sort_by(|a, b| {
                b.covered
                    .cmp(&a.covered)
                    .then(a.distance.total_cmp(&b.distance))
            });
        } else {
            candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        }

        Ok(candidates)
    }
}
