#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # parkade
//!
//! A library for allocating parking spots to arriving vehicles under
//! concurrent demand.
//!
//! Given a fixed physical layout (the [`Catalog`]) and a shared mutable
//! state store (the [`store`] module), the allocation engine picks the
//! best eligible spot for a requester, walking the class's type-priority
//! list and ranking candidates within a type by the weather tie-break,
//! then claims it with an atomic FREE→RESERVED transition. No two
//! concurrent requests are ever granted the same spot.
//!
//! ## Core Types
//!
//! - [`SpotId`], [`BlockId`], [`ParkingId`], [`OccupantTag`]: validated
//!   identifiers
//! - [`SpotType`], [`SpotStatus`], [`RequesterClass`]: the allocation enums
//! - [`Catalog`]: the immutable geometry
//! - [`SpotAllocator`] and [`AllocationOutcome`]: the engine
//! - [`lifecycle`]: confirm, cancel and the administrative block/unblock
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use parkade::{RequesterClass, SpotType};
//!
//! // An EV requester degrades to NORMAL, then PMR
//! assert_eq!(
//!     RequesterClass::Ev.priority(),
//!     [SpotType::Ev, SpotType::Normal, SpotType::Pmr]
//! );
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod snapshot;
pub mod spot;
pub mod store;

// Re-export key types at crate root for convenience
pub use catalog::Catalog;
pub use config::{Config, ConfigBuilder};
pub use engine::{AllocationOutcome, Grant, SpotAllocator};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use snapshot::{spot_overview, SpotView};
pub use spot::{
    BlockId, Coordinates, OccupantTag, ParkingId, RequesterClass, SpotId, SpotStatus, SpotType,
};
pub use store::{Database, SpotState, SpotStore, StoreConfig};
