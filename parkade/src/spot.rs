//! Core identifier and domain types for parking spots.
//!
//! This module provides the strongly-typed identifiers (spots, blocks,
//! parking areas, occupants) and the small enums that drive allocation:
//! spot types, spot statuses, and requester classes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a physical parking spot.
///
/// Spot identifiers are non-empty strings; surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use parkade::SpotId;
///
/// let id = SpotId::new("S1").unwrap();
/// assert_eq!(id.as_str(), "S1");
///
/// // Empty identifiers are rejected
/// assert!(SpotId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(String);

impl SpotId {
    /// Creates a new spot identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidIdError> {
        validated("spot_id", value.into()).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for an entry block.
///
/// A block is a logical entry/exit zone mapped to exactly one parking area.
///
/// # Examples
///
/// ```
/// use parkade::BlockId;
///
/// let id = BlockId::new("B1").unwrap();
/// assert_eq!(id.as_str(), "B1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Creates a new block identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidIdError> {
        validated("block_id", value.into()).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a parking area.
///
/// Each parking area contains spots and exactly one access point used as the
/// distance reference during allocation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParkingId(String);

impl ParkingId {
    /// Creates a new parking area identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidIdError> {
        validated("parking_id", value.into()).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParkingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The tag identifying the vehicle or session holding a spot.
///
/// An occupant tag is attached to a spot for the duration of a reservation
/// (status RESERVED or OCCUPIED) and cleared when the spot returns to FREE.
///
/// # Examples
///
/// ```
/// use parkade::OccupantTag;
///
/// let tag = OccupantTag::new("RFID-0042").unwrap();
/// assert_eq!(tag.as_str(), "RFID-0042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccupantTag(String);

impl OccupantTag {
    /// Creates a new occupant tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is empty after trimming whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidIdError> {
        validated("occupant", value.into()).map(Self)
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OccupantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validated(field: &'static str, value: String) -> Result<String, InvalidIdError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(InvalidIdError { field, value })
    } else {
        Ok(trimmed.to_string())
    }
}

/// Error type for invalid identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdError {
    /// The field the identifier was destined for.
    pub field: &'static str,
    /// The rejected value.
    pub value: String,
}

impl fmt::Display for InvalidIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}: {:?} must be non-empty after trimming whitespace",
            self.field, self.value
        )
    }
}

impl std::error::Error for InvalidIdError {}

/// The physical category of a parking spot.
///
/// A spot's static type comes from the catalog; the state store may carry a
/// per-spot override (e.g. a spot temporarily converted to an EV charger).
///
/// # Examples
///
/// ```
/// use parkade::SpotType;
///
/// assert_eq!(SpotType::parse("ev"), Some(SpotType::Ev));
/// assert_eq!(SpotType::parse("PMR"), Some(SpotType::Pmr));
/// assert_eq!(SpotType::parse("bicycle"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpotType {
    /// A standard spot.
    Normal,
    /// A spot with an electric-vehicle charger.
    Ev,
    /// A spot reserved for reduced-mobility access.
    Pmr,
}

impl SpotType {
    /// Parses a spot type from a string, case-insensitively.
    ///
    /// Returns `None` for unrecognized values; callers decide whether that
    /// is an error (it always is for requester input).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" => Some(Self::Normal),
            "EV" => Some(Self::Ev),
            "PMR" => Some(Self::Pmr),
            _ => None,
        }
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Ev => "EV",
            Self::Pmr => "PMR",
        }
    }
}

impl fmt::Display for SpotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The live status of a parking spot.
///
/// Statuses are persisted as small integer codes in the state store,
/// matching the codes used by the external sensor feed.
///
/// # Examples
///
/// ```
/// use parkade::SpotStatus;
///
/// assert_eq!(SpotStatus::Free.code(), 0);
/// assert_eq!(SpotStatus::from_code(2), Some(SpotStatus::Reserved));
/// assert_eq!(SpotStatus::from_code(9), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpotStatus {
    /// The spot is available for allocation.
    Free,
    /// A vehicle is parked on the spot.
    Occupied,
    /// The spot is held for an incoming vehicle.
    Reserved,
    /// The spot is administratively withdrawn from allocation.
    Blocked,
}

impl SpotStatus {
    /// Returns the integer code stored in the state store.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Free => 0,
            Self::Occupied => 1,
            Self::Reserved => 2,
            Self::Blocked => 3,
        }
    }

    /// Decodes a status from its stored integer code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Free),
            1 => Some(Self::Occupied),
            2 => Some(Self::Reserved),
            3 => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Returns `true` if this status may carry an occupant tag.
    ///
    /// Invariant: an occupant tag is non-empty only while a spot is
    /// RESERVED or OCCUPIED.
    #[must_use]
    pub const fn holds_occupant(self) -> bool {
        matches!(self, Self::Reserved | Self::Occupied)
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Occupied => "OCCUPIED",
            Self::Reserved => "RESERVED",
            Self::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The category of a requesting vehicle, driving type-priority rules.
///
/// Each class accepts spot types in a fixed priority order, expressing
/// graceful degradation: a requester takes a less-ideal type only when no
/// spot of its preferred type is available.
///
/// # Examples
///
/// ```
/// use parkade::{RequesterClass, SpotType};
///
/// let order = RequesterClass::Pmr.priority();
/// assert_eq!(order, [SpotType::Pmr, SpotType::Normal, SpotType::Ev]);
///
/// // Parsing is case-insensitive; unknown classes are not defaulted
/// assert_eq!(RequesterClass::parse("ev"), Some(RequesterClass::Ev));
/// assert_eq!(RequesterClass::parse("motorbike"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequesterClass {
    /// A standard vehicle.
    Normal,
    /// An electric vehicle.
    Ev,
    /// A reduced-mobility vehicle.
    Pmr,
}

impl RequesterClass {
    /// Parses a requester class from a string, case-insensitively.
    ///
    /// Returns `None` for unrecognized values. An unrecognized class is a
    /// validation error, never silently treated as NORMAL.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" => Some(Self::Normal),
            "EV" => Some(Self::Ev),
            "PMR" => Some(Self::Pmr),
            _ => None,
        }
    }

    /// Returns the spot types acceptable to this class, in priority order.
    #[must_use]
    pub const fn priority(self) -> [SpotType; 3] {
        match self {
            Self::Normal => [SpotType::Normal, SpotType::Ev, SpotType::Pmr],
            Self::Ev => [SpotType::Ev, SpotType::Normal, SpotType::Pmr],
            Self::Pmr => [SpotType::Pmr, SpotType::Normal, SpotType::Ev],
        }
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Ev => "EV",
            Self::Pmr => "PMR",
        }
    }
}

impl fmt::Display for RequesterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A 2D coordinate within a parking area's local frame.
///
/// # Examples
///
/// ```
/// use parkade::Coordinates;
///
/// let a = Coordinates { x: 0.0, y: 0.0 };
/// let b = Coordinates { x: 3.0, y: 4.0 };
/// assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Coordinates {
    /// Returns the Euclidean distance to another coordinate.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }

    /// Returns `true` if both components are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_id_trims_whitespace() {
        let id = SpotId::new("  S1  ").unwrap();
        assert_eq!(id.as_str(), "S1");
    }

    #[test]
    fn test_empty_ids_rejected() {
        assert!(SpotId::new("").is_err());
        assert!(BlockId::new("   ").is_err());
        assert!(ParkingId::new("").is_err());
        assert!(OccupantTag::new("\t").is_err());
    }

    #[test]
    fn test_invalid_id_error_names_field() {
        let err = BlockId::new("").unwrap_err();
        assert_eq!(err.field, "block_id");
        assert!(format!("{err}").contains("block_id"));
    }

    #[test]
    fn test_spot_type_parse_case_insensitive() {
        assert_eq!(SpotType::parse("normal"), Some(SpotType::Normal));
        assert_eq!(SpotType::parse("Ev"), Some(SpotType::Ev));
        assert_eq!(SpotType::parse(" pmr "), Some(SpotType::Pmr));
        assert_eq!(SpotType::parse("van"), None);
        assert_eq!(SpotType::parse(""), None);
    }

    #[test]
    fn test_spot_type_display_roundtrip() {
        for ty in [SpotType::Normal, SpotType::Ev, SpotType::Pmr] {
            assert_eq!(SpotType::parse(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn test_status_code_roundtrip() {
        for status in [
            SpotStatus::Free,
            SpotStatus::Occupied,
            SpotStatus::Reserved,
            SpotStatus::Blocked,
        ] {
            assert_eq!(SpotStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(SpotStatus::from_code(-1), None);
        assert_eq!(SpotStatus::from_code(4), None);
    }

    #[test]
    fn test_status_occupant_invariant() {
        assert!(!SpotStatus::Free.holds_occupant());
        assert!(SpotStatus::Occupied.holds_occupant());
        assert!(SpotStatus::Reserved.holds_occupant());
        assert!(!SpotStatus::Blocked.holds_occupant());
    }

    #[test]
    fn test_requester_priority_prefers_own_type() {
        assert_eq!(RequesterClass::Normal.priority()[0], SpotType::Normal);
        assert_eq!(RequesterClass::Ev.priority()[0], SpotType::Ev);
        assert_eq!(RequesterClass::Pmr.priority()[0], SpotType::Pmr);
    }

    #[test]
    fn test_pmr_falls_back_to_normal_before_ev() {
        // The PMR degradation path goes NORMAL before EV.
        assert_eq!(
            RequesterClass::Pmr.priority(),
            [SpotType::Pmr, SpotType::Normal, SpotType::Ev]
        );
    }

    #[test]
    fn test_requester_parse_rejects_unknown() {
        assert_eq!(RequesterClass::parse("NORMAL"), Some(RequesterClass::Normal));
        assert_eq!(RequesterClass::parse("truck"), None);
        assert_eq!(RequesterClass::parse(""), None);
    }

    #[test]
    fn test_distance_is_euclidean() {
        let access = Coordinates { x: 0.0, y: 0.0 };
        let spot = Coordinates { x: 10.0, y: 0.0 };
        assert!((spot.distance_to(access) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coordinates_finite_check() {
        assert!(Coordinates { x: 1.0, y: 2.0 }.is_finite());
        assert!(!Coordinates { x: f64::NAN, y: 0.0 }.is_finite());
        assert!(!Coordinates {
            x: 0.0,
            y: f64::INFINITY
        }
        .is_finite());
    }

    #[test]
    fn test_spot_id_serde_transparent() {
        let id = SpotId::new("S7").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"S7\"");
        let back: SpotId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Every priority list is a permutation of all three spot types.
            #[test]
            fn prop_priority_covers_all_types(class in prop_oneof![
                Just(RequesterClass::Normal),
                Just(RequesterClass::Ev),
                Just(RequesterClass::Pmr),
            ]) {
                let order = class.priority();
                prop_assert!(order.contains(&SpotType::Normal));
                prop_assert!(order.contains(&SpotType::Ev));
                prop_assert!(order.contains(&SpotType::Pmr));
            }
        }

        proptest! {
            // Distance is symmetric and non-negative for finite inputs.
            #[test]
            fn prop_distance_symmetric(
                ax in -1000.0f64..1000.0,
                ay in -1000.0f64..1000.0,
                bx in -1000.0f64..1000.0,
                by in -1000.0f64..1000.0,
            ) {
                let a = Coordinates { x: ax, y: ay };
                let b = Coordinates { x: bx, y: by };
                let d1 = a.distance_to(b);
                let d2 = b.distance_to(a);
                prop_assert!(d1 >= 0.0);
                prop_assert!((d1 - d2).abs() < 1e-9);
            }
        }

        proptest! {
            // Parsing is insensitive to case and surrounding whitespace.
            #[test]
            fn prop_class_parse_case_insensitive(
                class in prop_oneof![Just("normal"), Just("ev"), Just("pmr")],
                upper in any::<bool>(),
            ) {
                let input = if upper {
                    format!("  {}  ", class.to_uppercase())
                } else {
                    format!("  {class}  ")
                };
                prop_assert!(RequesterClass::parse(&input).is_some());
            }
        }
    }
}
