//! Expiring Store Module
//!
//! The public store: an [`EntryTable`] behind one mutex plus the lifecycle of
//! its background sweeper.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::info;

use crate::cache::{CacheStats, EntryTable};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::tasks::{spawn_sweeper, SweeperHandle};

// == Expiring Store ==
/// Thread-safe key-value store where every entry carries an absolute deadline.
///
/// Expiry is two-layered: [`get`](Self::get) never returns a value past its
/// deadline, and a background sweeper reclaims expired entries every
/// `sweep_interval` whether or not they are read again.
///
/// Every operation runs its whole body under one lock, so no caller (nor the
/// sweeper) can observe a value paired with a deadline from another write.
///
/// The sweeper is a tokio task. [`shutdown`](Self::shutdown) stops it; the
/// store stays usable afterwards with lazy expiry only. Dropping the store
/// shuts the sweeper down.
///
/// # Example
/// ```rust,no_run
/// use expiring_store::ExpiringStore;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> expiring_store::Result<()> {
///     let store = ExpiringStore::new()?;
///     store.put("key1", 100, Duration::from_secs(5));
///     assert_eq!(store.get("key1"), Some(100));
///     store.shutdown();
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ExpiringStore<K, V> {
    table: Arc<Mutex<EntryTable<K, V>>>,
    sweeper: Mutex<Option<SweeperHandle>>,
    sweep_interval: Duration,
}

impl<K, V> ExpiringStore<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    // == Constructors ==
    /// Creates a store with the default configuration on the current runtime.
    ///
    /// # Errors
    /// Returns [`StoreError::NoRuntime`] outside a tokio runtime.
    pub fn new() -> Result<Self> {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a store on the current tokio runtime.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidConfig`] for a zero sweep interval and
    /// [`StoreError::NoRuntime`] outside a tokio runtime.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
        Self::with_runtime(config, &runtime)
    }

    /// Creates a store whose sweeper runs on `runtime`.
    ///
    /// Lets plain threads own a store without entering a runtime context.
    pub fn with_runtime(config: StoreConfig, runtime: &Handle) -> Result<Self> {
        config.validate()?;

        let table = Arc::new(Mutex::new(EntryTable::new()));
        let sweeper = spawn_sweeper(table.clone(), config.sweep_interval, runtime);

        Ok(Self {
            table,
            sweeper: Mutex::new(Some(sweeper)),
            sweep_interval: config.sweep_interval,
        })
    }

    // == Put ==
    /// Stores `value` under `key` with deadline now + `ttl`.
    ///
    /// Replaces any existing entry for `key`, deadline included. A zero `ttl`
    /// yields an entry that is already expired on the next read.
    pub fn put(&self, key: K, value: V, ttl: Duration) {
        self.table.lock().insert(key, value, ttl);
    }

    // == Get ==
    /// Returns a copy of the value for `key` if it has not expired.
    ///
    /// An expired entry is removed under the same lock that detected it.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.table.lock().get(key)
    }

    // == Remove ==
    /// Deletes the entry for `key` if present.
    pub fn remove<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.lock().remove(key);
    }

    // == Sweep Now ==
    /// Runs one sweep pass immediately and returns the number removed.
    ///
    /// Works after [`shutdown`](Self::shutdown) as well.
    pub fn sweep_now(&self) -> usize {
        self.table.lock().sweep_expired()
    }

    // == Time To Live ==
    /// Time left before `key` expires; `None` if absent or expired.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.lock().ttl_remaining(key)
    }

    // == Contains Key ==
    /// True if `key` holds a live entry. Does not count as a lookup.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.lock().contains_key(key)
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the store counters.
    pub fn stats(&self) -> CacheStats {
        self.table.lock().stats()
    }
}

impl<K, V> ExpiringStore<K, V> {
    // == Shutdown ==
    /// Stops the background sweeper. Idempotent.
    ///
    /// Returns without waiting for an in-flight sweep; at most one tick that
    /// already fired may still run. Put, get and remove keep working.
    pub fn shutdown(&self) {
        if let Some(sweeper) = self.sweeper.lock().take() {
            sweeper.stop();
            info!("Expiring store sweeper shut down");
        }
    }

    // == Sweeper Status ==
    /// Returns true while the background sweeper task is alive.
    pub fn is_sweeper_running(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|sweeper| !sweeper.is_finished())
    }

    /// Returns the configured interval between sweeps.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }
}

impl<K, V> Drop for ExpiringStore<K, V> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
