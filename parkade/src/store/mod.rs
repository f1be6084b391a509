//! The mutable spot state store.
//!
//! The store holds everything that changes at runtime: per-spot status,
//! occupant tags, attribute overrides, sensor telemetry, and the global
//! weather flag. It is a shared resource (many request handlers and
//! external feed processes write to it concurrently), so every lifecycle
//! mutation goes through [`SpotStore::try_transition`], an atomic
//! compare-and-set. A read followed by an unconditional write is never
//! acceptable for status changes: it admits the lost-update race where two
//! requests both observe FREE and both write RESERVED.
//!
//! # Examples
//!
//! ```no_run
//! use parkade::store::{Database, SpotStore, StoreConfig};
//! use parkade::{SpotId, SpotStatus};
//!
//! let mut db = Database::open(StoreConfig::new("/tmp/parkade.db")).unwrap();
//! let spot = SpotId::new("S1").unwrap();
//!
//! let state = db.read(&spot).unwrap();
//! assert_eq!(state.status, SpotStatus::Free);
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;

pub use config::{default_data_dir, resolve_store_path, StoreConfig};
pub use connection::Database;

use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::catalog::Spot;
use crate::error::Result;
use crate::spot::{OccupantTag, SpotId, SpotStatus, SpotType};

/// The live state of a single spot.
///
/// Absent optional fields resolve to documented defaults: a spot with no
/// store row is FREE with no occupant, and its type and covered flag fall
/// back to the catalog's static values.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotState {
    /// The spot's current status.
    pub status: SpotStatus,
    /// The vehicle or session holding the spot, if any.
    pub occupant: Option<OccupantTag>,
    /// Overrides the catalog's static spot type when present.
    pub type_override: Option<SpotType>,
    /// Overrides the catalog's static covered flag when present.
    pub covered_override: Option<bool>,
    /// Battery telemetry from the spot's sensor, in millivolts.
    /// Written by the external feed; opaque to the engine.
    pub battery_mv: Option<i64>,
    /// When the row was last written.
    pub updated_at: Option<SystemTime>,
}

impl Default for SpotState {
    fn default() -> Self {
        Self {
            status: SpotStatus::Free,
            occupant: None,
            type_override: None,
            covered_override: None,
            battery_mv: None,
            updated_at: None,
        }
    }
}

impl SpotState {
    /// Resolves the spot's effective type: the override, or the catalog
    /// default.
    #[must_use]
    pub fn effective_type(&self, spot: &Spot) -> SpotType {
        self.type_override.unwrap_or_else(|| spot.spot_type())
    }

    /// Resolves the spot's effective covered flag: the override, or the
    /// catalog default.
    #[must_use]
    pub fn effective_covered(&self, spot: &Spot) -> bool {
        self.covered_override.unwrap_or_else(|| spot.covered())
    }

    /// Returns `true` if the spot is available for allocation.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.status == SpotStatus::Free
    }
}

/// The store contract the engine and lifecycle operations depend on.
///
/// Implementations must guarantee that [`try_transition`](Self::try_transition)
/// is a true atomic primitive: of N concurrent calls racing on the same
/// spot with the same expected status, at most one succeeds, and a failed
/// call leaves the spot unchanged by its own attempt.
pub trait SpotStore {
    /// Reads the current state of a spot.
    ///
    /// A spot with no stored row is returned in its default state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the stored record
    /// is malformed. Malformed fields are never coerced to defaults.
    fn read(&mut self, spot: &SpotId) -> Result<SpotState>;

    /// Atomically transitions a spot from `expected` to `next`.
    ///
    /// Returns `true` if the transition was applied, `false` if the spot
    /// was not in the expected status (typically because a concurrent
    /// request won the race). Transitioning to FREE clears the occupant;
    /// other transitions keep the current occupant when `occupant` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns an error only on store failures, never on contention.
    fn try_transition(
        &mut self,
        spot: &SpotId,
        expected: SpotStatus,
        next: SpotStatus,
        occupant: Option<&OccupantTag>,
    ) -> Result<bool>;

    /// Unconditionally sets a spot's status and occupant.
    ///
    /// Reserved for administrative operations (blocking and unblocking)
    /// that sit outside the race-protected lifecycle. Regular reserve,
    /// confirm and cancel paths must use
    /// [`try_transition`](Self::try_transition) instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    fn set_status(
        &mut self,
        spot: &SpotId,
        status: SpotStatus,
        occupant: Option<&OccupantTag>,
    ) -> Result<()>;

    /// Reads the global weather flag.
    ///
    /// An unset flag means it is not raining.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the stored flag is
    /// malformed.
    fn is_raining(&mut self) -> Result<bool>;

    /// Reads the state of every spot with a stored row, in id order.
    ///
    /// Spots that have never been touched have no row and resolve to the
    /// default state on the caller's side.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or a stored record is
    /// malformed.
    fn spot_states(&mut self) -> Result<BTreeMap<SpotId, SpotState>>;
}
