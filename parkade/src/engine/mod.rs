//! The allocation engine.
//!
//! Given an entry block and a requester class, the engine computes the
//! eligible candidate set, orders it by the priority and tie-break policy,
//! and claims the best spot through the store's atomic conditional
//! transition.

mod allocator;

pub use allocator::{AllocationOutcome, Grant, SpotAllocator};
