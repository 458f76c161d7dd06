use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use matchday_engine::api::{self, AppState};
use matchday_engine::config::Config;
use matchday_engine::feed::FeedClient;
use matchday_engine::service::{spawn_refresher, MatchService};
use matchday_engine::{Classifier, PriorityList, RosterRegistry};

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

    let registry = match &config.roster_file {
        Some(path) => RosterRegistry::from_json_file(path)?,
        None => RosterRegistry::season_2025_26(),
    };
    info!(
        "Roster season {}: {} domestic leagues, {} continental cups",
        registry.season,
        registry.domestic.len(),
        registry.continental.len()
    );

    let feed = FeedClient::new(
        &config.feed_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    info!("Feed: {}", config.feed_url);

    let service = Arc::new(MatchService::new(
        Arc::new(feed),
        Classifier::new(Arc::new(registry)),
        PriorityList::default(),
    ));

    spawn_refresher(service.clone(), Duration::from_secs(config.refresh_secs));

    let app = api::router(AppState { service });
    let addr: SocketAddr = config.api_addr.parse()?;
    info!("API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run API server (blocks until shutdown)
    axum::serve(listener, app).await?;

    Ok(())
}
