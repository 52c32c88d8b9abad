//! Expiring Store - a generic in-memory key-value store with TTL expiration
//!
//! Entries carry an absolute deadline. Reads never return an expired value,
//! and a background sweeper reclaims entries nobody reads again.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, ExpiringStore};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
