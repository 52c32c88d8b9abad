//! Cache Statistics Module
//!
//! Tracks lookups and the two expiry paths: lazy (on read) and eager (sweep).

use serde::Serialize;

// == Cache Stats ==
/// Store counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries discarded by a lookup that found them expired
    pub expired_on_read: u64,
    /// Entries discarded by the periodic sweep
    pub swept: u64,
    /// Number of sweep passes run
    pub sweeps: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expired On Read ==
    /// Counts a lazily expired entry; the lookup itself is a miss.
    pub fn record_expired_on_read(&mut self) {
        self.expired_on_read += 1;
        self.misses += 1;
    }

    // == Record Sweep ==
    /// Counts one sweep pass and the entries it removed.
    pub fn record_sweep(&mut self, removed: usize) {
        self.sweeps += 1;
        self.swept += removed as u64;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
