//! Error types for the expiring store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Errors raised while constructing an [`ExpiringStore`](crate::ExpiringStore).
///
/// Absent or expired keys are not errors; lookups report them as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No tokio runtime available to host the sweeper
    #[error("No tokio runtime available to run the sweeper task")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, StoreError>;
