use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod aggregator;
mod cache;
mod config;
mod dashboard;
mod error;
mod football_data;

use aggregator::MatchAggregator;
use cache::CacheStore;
use config::Config;
use dashboard::AppState;
use football_data::FootballDataClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let client = FootballDataClient::new(
        &config.api_url,
        &config.api_token,
        config.api_delay(),
        config.matches_delay(),
        config.http_timeout(),
    )?;
    info!(
        "Upstream {} (delays: {}s per league, {}s before matches)",
        config.api_url, config.api_delay_secs, config.matches_delay_secs
    );

    let cache = CacheStore::new(&config.cache_file, config.cache_ttl());
    info!(
        "Snapshot cache: {} (ttl {}s)",
        cache.path().display(),
        config.cache_ttl_secs
    );

    let aggregator = MatchAggregator::new(
        Arc::new(client),
        cache,
        config.lookback_days,
        config.failure_policy,
    );

    let app = dashboard::router(AppState {
        aggregator: Arc::new(aggregator),
    });
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("News page on http://{}/news", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
