//! State store schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices and statements
//! for the spot state store.

/// Current schema version for the store.
///
/// The version is stored in the metadata table and checked on open to
/// ensure compatibility between the store and the library.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// Besides the schema version, the metadata table carries the global
/// weather flag under the `weather_rain` key.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the spot state table.
///
/// One row per spot that has ever been touched; a spot without a row is in
/// its default state (FREE, no occupant, no overrides). Status codes are
/// the integer encoding of [`SpotStatus`](crate::SpotStatus).
pub const CREATE_SPOT_STATE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS spot_state (
        spot_id TEXT PRIMARY KEY NOT NULL,
        status INTEGER NOT NULL DEFAULT 0,
        occupant TEXT,
        type_override TEXT,
        covered_override INTEGER,
        battery_mv INTEGER,
        updated_at INTEGER
    )";

/// SQL statement to create an index on the status column.
///
/// Speeds up candidate scans, which filter on FREE spots.
pub const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_spot_state_status ON spot_state(status)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to materialize a spot row in its default state.
///
/// A no-op when the row already exists, so racing initializations are
/// harmless.
pub const ENSURE_SPOT_ROW: &str = r"
    INSERT OR IGNORE INTO spot_state (spot_id) VALUES (?)
";

/// SQL statement implementing the conditional status transition.
///
/// This single UPDATE is the serialization point of the whole system: the
/// `status = ?5` predicate makes it a compare-and-set, and SQLite's write
/// serialization guarantees that of N racing calls with the same expected
/// status at most one observes `changes() == 1`.
///
/// A transition to FREE (code 0) always clears the occupant; any other
/// transition keeps the current occupant when none is supplied.
pub const CAS_TRANSITION: &str = r"
    UPDATE spot_state
    SET status = ?1,
        occupant = CASE WHEN ?1 = 0 THEN NULL ELSE COALESCE(?2, occupant) END,
        updated_at = ?3
    WHERE spot_id = ?4 AND status = ?5
";

/// SQL statement for unconditional status writes (administrative only).
pub const SET_STATUS: &str = r"
    UPDATE spot_state
    SET status = ?1, occupant = ?2, updated_at = ?3
    WHERE spot_id = ?4
";

/// SQL statement to read a single spot's state.
pub const SELECT_SPOT_STATE: &str = r"
    SELECT status, occupant, type_override, covered_override, battery_mv, updated_at
    FROM spot_state
    WHERE spot_id = ?
";

/// SQL statement to read all spot states, in identifier order.
pub const SELECT_ALL_SPOT_STATES: &str = r"
    SELECT spot_id, status, occupant, type_override, covered_override, battery_mv, updated_at
    FROM spot_state
    ORDER BY spot_id
";

/// SQL statement to read the weather flag.
pub const SELECT_WEATHER: &str = "SELECT value FROM metadata WHERE key = 'weather_rain'";

/// SQL statement to write the weather flag.
pub const INSERT_WEATHER: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('weather_rain', ?)";

/// SQL statement to update a spot's type/covered overrides.
pub const SET_SPOT_PROFILE: &str = r"
    UPDATE spot_state
    SET type_override = ?1, covered_override = ?2, updated_at = ?3
    WHERE spot_id = ?4
";

/// SQL statement to record battery telemetry for a spot.
pub const SET_BATTERY: &str = r"
    UPDATE spot_state
    SET battery_mv = ?1, updated_at = ?2
    WHERE spot_id = ?3
";
