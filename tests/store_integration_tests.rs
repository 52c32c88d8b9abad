//! Integration Tests for ExpiringStore
//!
//! Exercises the public API end to end: expiry scenarios, sweeper lifecycle
//! and concurrent access from plain threads.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use expiring_store::{ExpiringStore, StoreConfig};

// == Helper Functions ==

fn create_test_store() -> ExpiringStore<String, u64> {
    ExpiringStore::new().unwrap()
}

fn key(name: &str) -> String {
    name.to_string()
}

// == Basic Operations ==

#[tokio::test]
async fn test_put_then_get_returns_value() {
    let store = create_test_store();

    store.put(key("a"), 1, Duration::from_secs(5));

    assert_eq!(store.get("a"), Some(1));
}

#[tokio::test]
async fn test_zero_ttl_is_immediately_expired() {
    let store = create_test_store();

    store.put(key("a"), 1, Duration::ZERO);

    assert_eq!(store.get("a"), None);
}

#[tokio::test(start_paused = true)]
async fn test_overwrite_replaces_value_and_deadline() {
    let store = create_test_store();

    store.put(key("a"), 1, Duration::from_secs(1));
    store.put(key("a"), 2, Duration::from_secs(10));
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(store.get("a"), Some(2));
    assert_eq!(store.ttl_remaining("a"), Some(Duration::from_secs(7)));
}

#[tokio::test]
async fn test_remove_before_ttl_elapses() {
    let store = create_test_store();

    store.put(key("a"), 1, Duration::from_secs(60));
    store.remove("a");

    assert_eq!(store.get("a"), None);
    assert!(store.is_empty());
}

// == Expiry Scenarios ==

#[tokio::test(start_paused = true)]
async fn test_get_after_ttl_returns_none() {
    let store = create_test_store();

    store.put(key("a"), 1, Duration::from_secs(5));
    assert_eq!(store.get("a"), Some(1));

    tokio::time::sleep(Duration::from_secs(6)).await;

    assert_eq!(store.get("a"), None);
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_reclaims_unread_entry() {
    let store = create_test_store();

    store.put(key("a"), 1, Duration::from_secs(5));
    store.put(key("b"), 2, Duration::from_secs(60));
    assert_eq!(store.len(), 2);

    tokio::time::sleep(Duration::from_millis(6500)).await;

    // No get on "a": only the sweeper could have removed it
    assert_eq!(store.len(), 1);
    let stats = store.stats();
    assert_eq!(stats.swept, 1);
    assert_eq!(stats.expired_on_read, 0);
    assert!(stats.sweeps >= 6);
    assert_eq!(store.get("b"), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_custom_sweep_interval() {
    let config = StoreConfig::new().with_sweep_interval(Duration::from_secs(10));
    let store: ExpiringStore<String, u64> = ExpiringStore::with_config(config).unwrap();

    store.put(key("a"), 1, Duration::from_secs(1));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(store.len(), 1, "No sweep before the first interval");

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(store.len(), 0);
}

// == Shutdown ==

#[tokio::test(start_paused = true)]
async fn test_shutdown_keeps_lazy_expiry() {
    let store = create_test_store();

    store.put(key("a"), 1, Duration::from_secs(5));
    store.shutdown();
    assert!(!store.is_sweeper_running());

    assert_eq!(store.get("a"), Some(1));

    tokio::time::sleep(Duration::from_secs(6)).await;

    assert_eq!(store.len(), 1, "Sweeper no longer runs");
    assert_eq!(store.get("a"), None);
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_is_idempotent() {
    let store = create_test_store();

    store.shutdown();
    store.shutdown();

    store.put(key("a"), 1, Duration::from_secs(5));
    assert_eq!(store.get("a"), Some(1));
}

// == Concurrency ==

#[test]
fn test_parallel_writers_and_readers() {
    const WRITERS: u64 = 8;
    const READERS: u64 = 8;
    const KEYS_PER_WRITER: u64 = 500;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();
    let config = StoreConfig::new().with_sweep_interval(Duration::from_millis(1));
    let store: Arc<ExpiringStore<String, (u64, u64)>> =
        Arc::new(ExpiringStore::with_runtime(config, runtime.handle()).unwrap());

    let writers: Vec<_> = (0..WRITERS)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..KEYS_PER_WRITER {
                    // Every third entry expires at once so the sweeper has work
                    let ttl = if i % 3 == 0 {
                        Duration::ZERO
                    } else {
                        Duration::from_secs(60)
                    };
                    store.put(format!("w{}-{}", w, i), (w, i), ttl);
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..READERS)
        .map(|r| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..KEYS_PER_WRITER {
                    let w = (r + i) % WRITERS;
                    if let Some(value) = store.get(format!("w{}-{}", w, i).as_str()) {
                        // Value must belong to the key it was read from
                        assert_eq!(value, (w, i));
                        assert_ne!(i % 3, 0, "Expired entry was returned");
                    }
                    if i % 50 == 0 {
                        store.remove(format!("w{}-{}", w, i + 1).as_str());
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    store.sweep_now();
    for w in 0..WRITERS {
        for i in 0..KEYS_PER_WRITER {
            let value = store.get(format!("w{}-{}", w, i).as_str());
            if i % 3 == 0 {
                assert_eq!(value, None);
            } else if let Some(value) = value {
                assert_eq!(value, (w, i));
            }
        }
    }

    store.shutdown();
}

#[test]
fn test_refresh_races_sweeper() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let config = StoreConfig::new().with_sweep_interval(Duration::from_millis(1));
    let store: Arc<ExpiringStore<String, u64>> =
        Arc::new(ExpiringStore::with_runtime(config, runtime.handle()).unwrap());

    let refresher = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..2_000u64 {
                // Leave an expired entry for the sweeper to find
                store.put("hot".to_string(), i, Duration::ZERO);
                if i % 20 == 0 {
                    thread::sleep(Duration::from_millis(2));
                } else {
                    thread::yield_now();
                }

                // The long-lived refresh must win over any racing sweep
                store.put("hot".to_string(), i, Duration::from_secs(60));
                assert_eq!(store.get("hot"), Some(i));
            }
        })
    };

    refresher.join().unwrap();
    assert_eq!(store.get("hot"), Some(1_999));

    store.put("hot".to_string(), 2_000, Duration::ZERO);
    thread::sleep(Duration::from_millis(50));

    assert!(store.is_empty(), "Sweeper reclaims the final expired entry");
    assert!(store.stats().swept > 0);
    store.shutdown();
}
