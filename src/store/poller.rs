//! Background content refresh.
//!
//! # Responsibilities
//! - Periodically re-fetch the full content snapshot
//! - Exit cleanly on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::store::store::LocationStore;

/// Periodic refresh task for the location store.
pub struct Poller {
    store: Arc<LocationStore>,
    interval: Duration,
}

impl Poller {
    pub fn new(store: Arc<LocationStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Content poller starting"
        );

        let mut ticker = time::interval(self.interval);
        // the initial refresh already ran at startup
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.store.refresh().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Content poller received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
