//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a store.
//!
//! # Tasks
//! - Expiry Sweeper: Removes expired entries at the configured interval

mod sweeper;

pub use sweeper::{spawn_sweeper, SweeperHandle};
