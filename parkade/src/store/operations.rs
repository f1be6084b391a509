//! SQLite implementation of the store contract.
//!
//! All write paths run inside IMMEDIATE transactions so the write lock is
//! taken up front, and the conditional transition is a single UPDATE whose
//! `changes()` count is the success signal.

// Timestamp casts between i64 (SQLite) and u64 (SystemTime)
#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use log::debug;
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::error::{Error, Result};
use crate::spot::{OccupantTag, SpotId, SpotStatus, SpotType};

use super::connection::Database;
use super::schema::{
    CAS_TRANSITION, ENSURE_SPOT_ROW, INSERT_WEATHER, SELECT_ALL_SPOT_STATES, SELECT_SPOT_STATE,
    SELECT_WEATHER, SET_BATTERY, SET_SPOT_PROFILE, SET_STATUS,
};
use super::{SpotState, SpotStore};

fn now_unix_secs() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

/// Raw row fields captured before semantic validation.
///
/// Malformed fields are surfaced as [`Error::CorruptState`] during
/// conversion, never coerced to defaults.
struct RawState {
    status: i64,
    occupant: Option<String>,
    type_override: Option<String>,
    covered_override: Option<i64>,
    battery_mv: Option<i64>,
    updated_at: Option<i64>,
}

impl RawState {
    /// Captures the state columns starting at `offset` within the row.
    fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            status: row.get(offset)?,
            occupant: row.get(offset + 1)?,
            type_override: row.get(offset + 2)?,
            covered_override: row.get(offset + 3)?,
            battery_mv: row.get(offset + 4)?,
            updated_at: row.get(offset + 5)?,
        })
    }

    fn into_state(self, spot: &SpotId) -> Result<SpotState> {
        let status = SpotStatus::from_code(self.status).ok_or_else(|| Error::CorruptState {
            spot: spot.clone(),
            reason: format!("status code {} is not a known status", self.status),
        })?;

        let occupant = self
            .occupant
            .map(|raw| {
                OccupantTag::new(raw).map_err(|e| Error::CorruptState {
                    spot: spot.clone(),
                    reason: format!("occupant tag is malformed: {e}"),
                })
            })
            .transpose()?;

        let type_override = self
            .type_override
            .map(|raw| {
                SpotType::parse(&raw).ok_or_else(|| Error::CorruptState {
                    spot: spot.clone(),
                    reason: format!("type override {raw:?} is not a known spot type"),
                })
            })
            .transpose()?;

        let covered_override = self
            .covered_override
            .map(|raw| match raw {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(Error::CorruptState {
                    spot: spot.clone(),
                    reason: format!("covered override must be 0 or 1, got {other}"),
                }),
            })
            .transpose()?;

        Ok(SpotState {
            status,
            occupant,
            type_override,
            covered_override,
            battery_mv: self.battery_mv,
            updated_at: self.updated_at.map(unix_secs_to_systemtime),
        })
    }
}

impl SpotStore for Database {
    fn read(&mut self, spot: &SpotId) -> Result<SpotState> {
        let raw = self
            .conn
            .query_row(SELECT_SPOT_STATE, params![spot.as_str()], |row| {
                RawState::from_row(row, 0)
            })
            .optional()?;

        match raw {
            Some(raw) => raw.into_state(spot),
            None => Ok(SpotState::default()),
        }
    }

    fn try_transition(
        &mut self,
        spot: &SpotId,
        expected: SpotStatus,
        next: SpotStatus,
        occupant: Option<&OccupantTag>,
    ) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Materialize the default row so the conditional UPDATE has a row
        // to match against; racing inserts are no-ops.
        tx.execute(ENSURE_SPOT_ROW, params![spot.as_str()])?;

        let changed = tx.execute(
            CAS_TRANSITION,
            params![
                next.code(),
                occupant.map(OccupantTag::as_str),
                now_unix_secs(),
                spot.as_str(),
                expected.code(),
            ],
        )?;

        tx.commit()?;

        debug!(
            "transition {spot}: {expected} -> {next}: {}",
            if changed == 1 { "applied" } else { "lost" }
        );

        Ok(changed == 1)
    }

    fn set_status(
        &mut self,
        spot: &SpotId,
        status: SpotStatus,
        occupant: Option<&OccupantTag>,
    ) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(ENSURE_SPOT_ROW, params![spot.as_str()])?;
        tx.execute(
            SET_STATUS,
            params![
                status.code(),
                occupant.map(OccupantTag::as_str),
                now_unix_secs(),
                spot.as_str(),
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn is_raining(&mut self) -> Result<bool> {
        let value: Option<String> = self
            .conn
            .query_row(SELECT_WEATHER, [], |row| row.get(0))
            .optional()?;

        match value.as_deref() {
            None | Some("0") => Ok(false),
            Some("1") => Ok(true),
            Some(other) => Err(Error::Validation {
                field: "weather_rain".into(),
                message: format!("stored flag must be \"0\" or \"1\", got {other:?}"),
            }),
        }
    }

    fn spot_states(&mut self) -> Result<BTreeMap<SpotId, SpotState>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_SPOT_STATES)?;
        let rows = stmt.query_map([], |row| {
            let raw_id: String = row.get(0)?;
            let raw = RawState::from_row(row, 1)?;
            Ok((raw_id, raw))
        })?;

        let mut states = BTreeMap::new();
        for row in rows {
            let (raw_id, raw) = row?;
            let spot = SpotId::new(raw_id.clone()).map_err(|_| Error::Validation {
                field: "spot_id".into(),
                message: format!("stored spot id {raw_id:?} is empty"),
            })?;
            let state = raw.into_state(&spot)?;
            states.insert(spot, state);
        }

        Ok(states)
    }
}

impl Database {
    /// Writes the global weather flag.
    ///
    /// This is the surface for the external weather feed; the engine only
    /// ever reads the flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub fn set_raining(&mut self, raining: bool) -> Result<()> {
        self.conn
            .execute(INSERT_WEATHER, params![if raining { "1" } else { "0" }])?;
        Ok(())
    }

    /// Sets or clears a spot's type and covered overrides.
    ///
    /// Override writers live outside the allocation path (operations staff
    /// converting a spot, the sensor feed marking temporary covers).
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub fn set_spot_profile(
        &mut self,
        spot: &SpotId,
        type_override: Option<SpotType>,
        covered_override: Option<bool>,
    ) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(ENSURE_SPOT_ROW, params![spot.as_str()])?;
        tx.execute(
            SET_SPOT_PROFILE,
            params![
                type_override.map(SpotType::as_str),
                covered_override.map(i64::from),
                now_unix_secs(),
                spot.as_str(),
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Records battery telemetry for a spot's sensor.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub fn set_battery(&mut self, spot: &SpotId, battery_mv: i64) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(ENSURE_SPOT_ROW, params![spot.as_str()])?;
        tx.execute(
            SET_BATTERY,
            params![battery_mv, now_unix_secs(), spot.as_str()],
        )?;

        tx.commit()?;
        Ok(())
    }
}
