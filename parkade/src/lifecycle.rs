//! Reservation lifecycle operations.
//!
//! The state machine over FREE, RESERVED, OCCUPIED and BLOCKED. Reservation
//! itself (FREE→RESERVED) is the allocation engine's job; this module holds
//! the remaining transitions. Every external-facing mutation here uses the
//! store's conditional transition even where a single authoritative caller
//! is expected, because network retries can double-apply any request.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use parkade::catalog::Catalog;
//! use parkade::lifecycle;
//! use parkade::store::{Database, StoreConfig};
//! use parkade::SpotId;
//!
//! let catalog = Catalog::load(Path::new("/etc/parkade/geometry")).unwrap();
//! let mut store = Database::open(StoreConfig::new("/tmp/parkade.db")).unwrap();
//! let spot = SpotId::new("S1").unwrap();
//!
//! // Vehicle arrived on its reserved spot
//! lifecycle::confirm(&catalog, &mut store, &spot).unwrap();
//!
//! // Vehicle left early
//! lifecycle::cancel(&catalog, &mut store, &spot).unwrap();
//! ```

use log::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::spot::{SpotId, SpotStatus};
use crate::store::SpotStore;

fn require_known_spot(catalog: &Catalog, spot: &SpotId) -> Result<()> {
    if catalog.spot(spot).is_none() {
        return Err(Error::UnknownSpot {
            spot: spot.to_string(),
        });
    }
    Ok(())
}

/// Confirms a reservation: RESERVED → OCCUPIED.
///
/// The occupant tag set at reservation time is preserved. Confirming a spot
/// in any other status (already occupied, already cancelled, never
/// reserved, or blocked) is rejected.
///
/// # Errors
///
/// Returns [`Error::UnknownSpot`] if the spot is not in the catalog,
/// [`Error::InvalidStateTransition`] if the spot is not RESERVED, or a
/// store error.
pub fn confirm<S: SpotStore>(catalog: &Catalog, store: &mut S, spot: &SpotId) -> Result<()> {
    require_known_spot(catalog, spot)?;

    if store.try_transition(spot, SpotStatus::Reserved, SpotStatus::Occupied, None)? {
        debug!("confirmed {spot}");
        return Ok(());
    }

    let status = store.read(spot)?.status;
    Err(Error::InvalidStateTransition {
        spot: spot.clone(),
        status,
    })
}

/// Cancels a reservation: RESERVED → FREE, or OCCUPIED → FREE for a
/// vehicle leaving early. The occupant tag is cleared.
///
/// Cancel is idempotent: cancelling an already-FREE spot is a successful
/// no-op, so a late or duplicate cancellation never fails the caller.
/// Cancelling a BLOCKED spot is rejected.
///
/// # Errors
///
/// Returns [`Error::UnknownSpot`] if the spot is not in the catalog,
/// [`Error::InvalidStateTransition`] if the spot is BLOCKED, or a store
/// error.
pub fn cancel<S: SpotStore>(catalog: &Catalog, store: &mut S, spot: &SpotId) -> Result<()> {
    require_known_spot(catalog, spot)?;

    if store.try_transition(spot, SpotStatus::Reserved, SpotStatus::Free, None)? {
        debug!("cancelled reservation on {spot}");
        return Ok(());
    }

    if store.try_transition(spot, SpotStatus::Occupied, SpotStatus::Free, None)? {
        debug!("released occupied {spot}");
        return Ok(());
    }

    let status = store.read(spot)?.status;
    if status == SpotStatus::Free {
        // Already free: idempotent success
        debug!("cancel on already-free {spot} is a no-op");
        return Ok(());
    }

    Err(Error::InvalidStateTransition {
        spot: spot.clone(),
        status,
    })
}

/// Administratively withdraws a spot from allocation: any status → BLOCKED.
///
/// This is the one path that legitimately uses the store's unconditional
/// write: blocking is an operator decision that overrides whatever the spot
/// was doing, and the occupant (if any) is cleared.
///
/// # Errors
///
/// Returns [`Error::UnknownSpot`] if the spot is not in the catalog, or a
/// store error.
pub fn block<S: SpotStore>(catalog: &Catalog, store: &mut S, spot: &SpotId) -> Result<()> {
    require_known_spot(catalog, spot)?;
    store.set_status(spot, SpotStatus::Blocked, None)?;
    debug!("blocked {spot}");
    Ok(())
}

/// Returns a blocked spot to service: BLOCKED → FREE.
///
/// Idempotent like cancel: unblocking an already-FREE spot succeeds.
/// Unblocking a spot that is RESERVED or OCCUPIED is rejected, since those
/// states mean the spot was never blocked to begin with.
///
/// # Errors
///
/// Returns [`Error::UnknownSpot`] if the spot is not in the catalog,
/// [`Error::InvalidStateTransition`] if the spot is RESERVED or OCCUPIED,
/// or a store error.
pub fn unblock<S: SpotStore>(catalog: &Catalog, store: &mut S, spot: &SpotId) -> Result<()> {
    require_known_spot(catalog, spot)?;

    if store.try_transition(spot, SpotStatus::Blocked, SpotStatus::Free, None)? {
        debug!("unblocked {spot}");
        return Ok(());
    }

    let status = store.read(spot)?.status;
    if status == SpotStatus::Free {
        return Ok(());
    }

    Err(Error::InvalidStateTransition {
        spot: spot.clone(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_util::sample_catalog;
    use crate::spot::OccupantTag;
    use crate::store::test_util::create_test_store;

    fn spot(id: &str) -> SpotId {
        SpotId::new(id).unwrap()
    }

    fn reserve<S: SpotStore>(store: &mut S, id: &str) {
        let won = store
            .try_transition(
                &spot(id),
                SpotStatus::Free,
                SpotStatus::Reserved,
                Some(&OccupantTag::new("V1").unwrap()),
            )
            .unwrap();
        assert!(won);
    }

    #[test]
    fn test_confirm_reserved_spot() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        reserve(&mut store, "S1");

        confirm(&catalog, &mut store, &spot("S1")).unwrap();

        let state = store.read(&spot("S1")).unwrap();
        assert_eq!(state.status, SpotStatus::Occupied);
        // Confirm keeps the reserving occupant
        assert_eq!(state.occupant, Some(OccupantTag::new("V1").unwrap()));
    }

    #[test]
    fn test_confirm_free_spot_is_invalid() {
        let catalog = sample_catalog();
        let mut store = create_test_store();

        let err = confirm(&catalog, &mut store, &spot("S1")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStateTransition {
                status: SpotStatus::Free,
                ..
            }
        ));

        // And the status is untouched
        assert_eq!(store.read(&spot("S1")).unwrap().status, SpotStatus::Free);
    }

    #[test]
    fn test_confirm_twice_is_invalid() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        reserve(&mut store, "S1");

        confirm(&catalog, &mut store, &spot("S1")).unwrap();
        let err = confirm(&catalog, &mut store, &spot("S1")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStateTransition {
                status: SpotStatus::Occupied,
                ..
            }
        ));
    }

    #[test]
    fn test_cancel_reserved_spot() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        reserve(&mut store, "S1");

        cancel(&catalog, &mut store, &spot("S1")).unwrap();

        let state = store.read(&spot("S1")).unwrap();
        assert_eq!(state.status, SpotStatus::Free);
        assert_eq!(state.occupant, None);
    }

    #[test]
    fn test_cancel_occupied_spot_for_early_leave() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        reserve(&mut store, "S1");
        confirm(&catalog, &mut store, &spot("S1")).unwrap();

        cancel(&catalog, &mut store, &spot("S1")).unwrap();
        assert_eq!(store.read(&spot("S1")).unwrap().status, SpotStatus::Free);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        reserve(&mut store, "S1");

        cancel(&catalog, &mut store, &spot("S1")).unwrap();
        // Second cancel must also succeed and leave the spot FREE
        cancel(&catalog, &mut store, &spot("S1")).unwrap();
        assert_eq!(store.read(&spot("S1")).unwrap().status, SpotStatus::Free);
    }

    #[test]
    fn test_cancel_never_reserved_spot_is_noop() {
        let catalog = sample_catalog();
        let mut store = create_test_store();

        cancel(&catalog, &mut store, &spot("S1")).unwrap();
        assert_eq!(store.read(&spot("S1")).unwrap().status, SpotStatus::Free);
    }

    #[test]
    fn test_cancel_blocked_spot_is_invalid() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        block(&catalog, &mut store, &spot("S1")).unwrap();

        let err = cancel(&catalog, &mut store, &spot("S1")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStateTransition {
                status: SpotStatus::Blocked,
                ..
            }
        ));
    }

    #[test]
    fn test_confirm_blocked_spot_is_invalid() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        block(&catalog, &mut store, &spot("S1")).unwrap();

        let err = confirm(&catalog, &mut store, &spot("S1")).unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn test_unknown_spot_rejected() {
        let catalog = sample_catalog();
        let mut store = create_test_store();

        for result in [
            confirm(&catalog, &mut store, &spot("S99")),
            cancel(&catalog, &mut store, &spot("S99")),
            block(&catalog, &mut store, &spot("S99")),
            unblock(&catalog, &mut store, &spot("S99")),
        ] {
            assert!(matches!(result.unwrap_err(), Error::UnknownSpot { .. }));
        }
    }

    #[test]
    fn test_block_overrides_reservation() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        reserve(&mut store, "S1");

        block(&catalog, &mut store, &spot("S1")).unwrap();

        let state = store.read(&spot("S1")).unwrap();
        assert_eq!(state.status, SpotStatus::Blocked);
        assert_eq!(state.occupant, None);
    }

    #[test]
    fn test_unblock_returns_spot_to_service() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        block(&catalog, &mut store, &spot("S1")).unwrap();

        unblock(&catalog, &mut store, &spot("S1")).unwrap();
        assert_eq!(store.read(&spot("S1")).unwrap().status, SpotStatus::Free);

        // Unblock is idempotent on a free spot
        unblock(&catalog, &mut store, &spot("S1")).unwrap();
    }

    #[test]
    fn test_unblock_reserved_spot_is_invalid() {
        let catalog = sample_catalog();
        let mut store = create_test_store();
        reserve(&mut store, "S1");

        let err = unblock(&catalog, &mut store, &spot("S1")).unwrap_err();
        assert!(err.is_invalid_transition());
    }
}
