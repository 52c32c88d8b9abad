//! Cache Entry Module
//!
//! Defines a stored value paired with its absolute expiration deadline.

use std::time::Duration;

use tokio::time::Instant;

/// Upper bound applied to TTLs so deadline arithmetic cannot overflow (~100 years).
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// A single value together with the instant it stops being readable.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute deadline; the entry is expired from this instant on
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// TTLs above [`MAX_TTL`] are clamped.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl.min(MAX_TTL),
        }
    }

    // == Is Expired ==
    /// Checks the entry against a given instant.
    ///
    /// Boundary condition: the entry is expired once `now >= expires_at`, so a
    /// zero TTL is already expired on the next check.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Checks the entry against the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the time left before expiry, zero once expired.
    pub fn ttl_remaining_at(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    /// Returns the time left before expiry as of now.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl_remaining_at(Instant::now())
    }
}
