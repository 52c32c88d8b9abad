//! Expiring Store demo
//!
//! Stores a value with a five second TTL, reads it back, waits past the
//! deadline and shows that it is gone.

use std::time::Duration;

use expiring_store::{ExpiringStore, StoreConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_TTL: Duration = Duration::from_secs(5);
const DEMO_WAIT: Duration = Duration::from_secs(6);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expiring_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StoreConfig::from_env();
    info!("Configuration loaded: sweep_interval={:?}", config.sweep_interval);

    let store: ExpiringStore<String, i32> = ExpiringStore::with_config(config)?;

    store.put("key1".to_string(), 100, DEMO_TTL);
    println!("{:?}", store.get("key1"));

    tokio::time::sleep(DEMO_WAIT).await;
    println!("{:?}", store.get("key1"));

    store.shutdown();
    println!("{}", serde_json::to_string_pretty(&store.stats())?);

    Ok(())
}
