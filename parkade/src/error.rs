//! Error types for the parkade library.
//!
//! This module provides the error hierarchy for catalog loading, state store
//! access, and allocation/lifecycle operations, using `thiserror` for
//! ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::spot::{SpotId, SpotStatus};

/// Result type alias for operations that may fail with a parkade error.
///
/// # Examples
///
/// ```
/// use parkade::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the parkade library.
///
/// Spot-pool exhaustion is deliberately NOT represented here: a request that
/// finds no free spot resolves to the `Exhausted` allocation outcome, a
/// normal business result rather than a fault.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested entry block does not exist in the catalog.
    #[error("unknown block: {block}")]
    UnknownBlock {
        /// The block identifier that failed to resolve.
        block: String,
    },

    /// The requester class could not be recognized.
    ///
    /// Unrecognized classes are rejected rather than silently defaulted
    /// to NORMAL.
    #[error("unknown requester class: {value:?} (expected NORMAL, EV or PMR)")]
    UnknownRequesterClass {
        /// The rejected class value.
        value: String,
    },

    /// The requested spot does not exist in the catalog.
    #[error("unknown spot: {spot}")]
    UnknownSpot {
        /// The spot identifier that failed to resolve.
        spot: String,
    },

    /// A lifecycle operation found the spot in a status that does not
    /// admit the requested transition.
    #[error("invalid state transition for spot {spot}: current status is {status}")]
    InvalidStateTransition {
        /// The spot whose transition was rejected.
        spot: SpotId,
        /// The status the spot was observed in.
        status: SpotStatus,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The spot catalog failed its startup integrity check.
    ///
    /// Catalog errors are fatal at process start; there is no partial
    /// startup with a half-loaded geometry.
    #[error("catalog error in {}: {reason}", path.display())]
    Catalog {
        /// The geometry file or directory involved.
        path: PathBuf,
        /// The reason the catalog was rejected.
        reason: String,
    },

    /// A state store error occurred.
    #[error("state store error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored spot record carried a field the schema does not admit.
    ///
    /// Malformed stored fields are surfaced, never silently coerced to a
    /// default.
    #[error("corrupt state for spot {spot}: {reason}")]
    CorruptState {
        /// The spot whose record is malformed.
        spot: SpotId,
        /// A description of the malformed field.
        reason: String,
    },

    /// A service configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("state store lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported store schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the store.
        found: i32,
    },
}

impl From<crate::spot::InvalidIdError> for Error {
    fn from(err: crate::spot::InvalidIdError) -> Self {
        Self::Validation {
            field: err.field.to_string(),
            message: format!(
                "{:?} must be non-empty after trimming whitespace",
                err.value
            ),
        }
    }
}

impl Error {
    /// Check if the error is a validation failure of caller input.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::Error;
    ///
    /// let err = Error::UnknownBlock { block: "B9".into() };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownBlock { .. }
                | Self::UnknownRequesterClass { .. }
                | Self::UnknownSpot { .. }
                | Self::Validation { .. }
        )
    }

    /// Check if the error is a rejected lifecycle transition.
    #[must_use]
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidStateTransition { .. })
    }
}
