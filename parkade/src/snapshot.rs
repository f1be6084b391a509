//! Read-only spot overview.
//!
//! Merges the static catalog with live store state into a point-in-time
//! view of every spot, for dashboards and the CLI `list` command. The view
//! is advisory: statuses can change the moment it is built, so nothing
//! here feeds back into allocation decisions.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::spot::{OccupantTag, ParkingId, SpotId, SpotStatus, SpotType};
use crate::store::SpotStore;

/// The merged static + live view of one spot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotView {
    /// The parking area the spot belongs to.
    pub parking_id: ParkingId,
    /// The spot's current status.
    pub status: SpotStatus,
    /// The spot's effective type (override or catalog default).
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    /// The spot's effective covered flag.
    pub covered: bool,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// The occupant holding the spot, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupant: Option<OccupantTag>,
    /// Battery telemetry from the spot's sensor, if the feed reported any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_mv: Option<i64>,
    /// When the spot's store row was last written.
    #[serde(skip)]
    pub updated_at: Option<std::time::SystemTime>,
}

/// Builds the overview of every catalog spot, in identifier order.
///
/// Spots without a store row appear in their default state (FREE, catalog
/// attributes). Store rows for spots absent from the catalog are ignored:
/// the catalog is the authority on what exists.
///
/// # Errors
///
/// Returns an error if the store is unreachable or holds malformed state.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use parkade::catalog::Catalog;
/// use parkade::snapshot::spot_overview;
/// use parkade::store::{Database, StoreConfig};
///
/// let catalog = Catalog::load(Path::new("/etc/parkade/geometry")).unwrap();
/// let mut store = Database::open(StoreConfig::new("/tmp/parkade.db")).unwrap();
///
/// for (id, view) in spot_overview(&catalog, &mut store).unwrap() {
///     println!("{id}: {} ({})", view.status, view.spot_type);
/// }
/// ```
pub fn spot_overview<S: SpotStore>(
    catalog: &Catalog,
    store: &mut S,
) -> Result<BTreeMap<SpotId, SpotView>> {
    let states = store.spot_states()?;

    let mut views = BTreeMap::new();
    for spot in catalog.spots() {
        let state = states.get(spot.id()).cloned().unwrap_or_default();

        views.insert(
            spot.id().clone(),
            SpotView {
                parking_id: spot.parking_id().clone(),
                status: state.status,
                spot_type: state.effective_type(spot),
                covered: state.effective_covered(spot),
                x: spot.position().x,
                y: spot.position().y,
                occupant: state.occupant,
                battery_mv: state.battery_mv,
                updated_at: state.updated_at,
            },
        );
    }

    Ok(views)
}
