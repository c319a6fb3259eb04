use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use subway_server::cache::{CacheConfig, CachedFeedClient};
use subway_server::feed::{FeedClient, FeedConfig};
use subway_server::stations::load_stations;
use subway_server::web::{AppState, create_router};

/// Default station reference file, relative to the working directory.
const DEFAULT_STATIONS_CSV: &str = "data/stations.csv";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("subway_server=info,warn")),
        )
        .init();

    // The MTA no longer requires a key for the subway feeds, so this is
    // optional; set it if you have one.
    let mut feed_config = FeedConfig::new();
    match std::env::var("MTA_API_KEY") {
        Ok(key) if !key.is_empty() => feed_config = feed_config.with_api_key(key),
        _ => warn!("MTA_API_KEY not set; fetching feeds without an API key"),
    }

    let feed_client = FeedClient::new(feed_config).expect("failed to create feed client");
    let cached_feeds = CachedFeedClient::new(feed_client, &CacheConfig::default());

    // Station reference data is required; fail fast without it.
    let stations_path =
        std::env::var("STATIONS_CSV").unwrap_or_else(|_| DEFAULT_STATIONS_CSV.to_string());
    let stations = load_stations(&stations_path)
        .unwrap_or_else(|e| panic!("failed to load stations from {stations_path}: {e}"));
    info!(count = stations.len(), path = %stations_path, "loaded station reference");

    let state = AppState::new(cached_feeds, stations);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .expect("BIND must be a socket address");

    info!(%addr, "subway arrivals server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
