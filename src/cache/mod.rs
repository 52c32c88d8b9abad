//! Cache Module
//!
//! In-memory entries with absolute deadlines, lazy expiry on read and
//! periodic sweeping.

mod entry;
mod stats;
mod store;
mod table;


// Re-export public types
pub use entry::{CacheEntry, MAX_TTL};
pub use stats::CacheStats;
pub use store::ExpiringStore;
pub use table::EntryTable;
