//! Pasture server binary.
//!
//! Startup order: configuration → tracing → seasonal data → CMS client →
//! initial content snapshot → background poller → HTTP server. Any
//! configuration problem is fatal here; nothing else is.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pasture::cms::CmsClient;
use pasture::config::{self, CloudflareConfig};
use pasture::http::HttpServer;
use pasture::lifecycle::{wait_for_signal, Shutdown};
use pasture::seasons::SeasonalIndex;
use pasture::store::{LocationStore, Poller};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pasture=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match config::load() {
        Ok(config) => Arc::new(config),
        Err(error) => {
            tracing::error!(%error, "Configuration invalid");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        mode = ?config.mode,
        refresh_interval_secs = config.refresh_interval.as_secs(),
        cms_space = %config.cms.space_id,
        "Configuration loaded"
    );

    let seasons = Arc::new(SeasonalIndex::from_embedded()?);

    let client = CmsClient::new(config.cms.clone());
    let store = Arc::new(LocationStore::new(client));

    // populate the snapshot before accepting traffic
    store.refresh().await;
    tracing::info!(
        locations = store.snapshot().len(),
        "Initial content snapshot loaded"
    );

    if config.mode.is_release() {
        if let Some(cloudflare) = &config.cloudflare {
            purge_cloudflare(cloudflare).await;
        }
    }

    let shutdown = Shutdown::new();

    let poller = Poller::new(store.clone(), config.refresh_interval);
    tokio::spawn(poller.run(shutdown.subscribe()));

    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        shutdown.trigger();
    });

    let listener = TcpListener::bind(config.bind_address()).await?;
    let server = HttpServer::new(config.clone(), store, seasons);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Best-effort full CDN purge at Release startup so stale HTML never
/// outlives a deploy.
async fn purge_cloudflare(config: &CloudflareConfig) {
    tracing::info!("Purging CDN cache");

    let client = reqwest::Client::new();
    let result = client
        .post(&config.cache_url)
        .bearer_auth(&config.token)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(r#"{"purge_everything":true}"#)
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => {
            tracing::info!("CDN cache purged");
        }
        Ok(response) => {
            tracing::warn!(status = %response.status(), "CDN purge rejected");
        }
        Err(error) => {
            tracing::warn!(%error, "CDN purge request failed");
        }
    }
}
