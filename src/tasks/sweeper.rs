//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired entries so memory is
//! reclaimed even for keys nobody reads again.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::EntryTable;

// == Sweeper Handle ==
/// Owns the running sweeper task and its stop signal.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the task to stop and aborts it.
    ///
    /// Does not wait for an in-flight sweep; at most one tick that already
    /// fired may still complete.
    pub fn stop(self) {
        // Err only means the task has already exited.
        let _ = self.shutdown_tx.send(true);
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns a task on `runtime` that sweeps `table` every `interval`.
///
/// The first sweep runs one full interval after spawning. Each sweep holds
/// the table lock for a single pass and never across an await.
///
/// # Panics
/// Panics if `interval` is zero; callers validate it through
/// [`StoreConfig::validate`](crate::StoreConfig::validate).
///
/// # Example
/// ```ignore
/// let table = Arc::new(Mutex::new(EntryTable::<String, u32>::new()));
/// let sweeper = spawn_sweeper(table.clone(), Duration::from_secs(1), &Handle::current());
/// // Later, during shutdown:
/// sweeper.stop();
/// ```
pub fn spawn_sweeper<K, V>(
    table: Arc<Mutex<EntryTable<K, V>>>,
    interval: Duration,
    runtime: &Handle,
) -> SweeperHandle
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    assert!(
        !interval.is_zero(),
        "sweep interval must be greater than zero"
    );

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = runtime.spawn(async move {
        info!("Starting expiry sweeper with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the immediate first tick
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = table.lock().sweep_expired();

                    if removed > 0 {
                        info!("Expiry sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Expiry sweep: no expired entries found");
                    }
                }
            }
        }

        info!("Expiry sweeper stopped");
    });

    SweeperHandle { shutdown_tx, task }
}
