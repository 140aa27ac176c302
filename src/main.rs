//! MindMentor API Server
//!
//! Run with: cargo run --bin mindmentor
//!
//! Configuration is read from the first of `$MINDMENTOR_CONFIG`,
//! `~/.config/mindmentor/config.toml`, `/etc/mindmentor/config.toml` and
//! `./config.toml`, with `MINDMENTOR_*` environment overrides on top.
//! `RUST_LOG` overrides the configured log level.

use mindmentor::api::{serve, AppState};
use mindmentor::config::Config;
use mindmentor::storage::Store;
use std::sync::Arc;
use std::time::Duration;

/// How often idle rate-limit entries are dropped
const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Starting MindMentor API server v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = config.data_dir();
    tracing::info!("Data directory: {:?}", data_dir);

    let store = Arc::new(Store::open(&data_dir)?);
    tracing::info!("Store opened: {}", store.stats()?);

    let state = AppState::new(store, config);

    let limiter = Arc::clone(&state.limiter);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            ticker.tick().await;
            limiter.prune();
        }
    });

    serve(state).await?;

    tracing::info!("MindMentor shutdown complete");
    Ok(())
}
