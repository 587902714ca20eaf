use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracklist::{
    app_state::AppState, cache::TtlCache, config::Config, fetcher::HttpFetcher,
    scrape::CatalogService, server, telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    telemetry::init(config.log_format());

    let fetcher = HttpFetcher::new(config.fetch_connect_timeout(), config.fetch_timeout())?;
    let cache = TtlCache::new(config.cache_ttl());
    let _sweeper = cache.spawn_sweeper(config.cache_sweep_interval());

    let catalog = CatalogService::new(
        Arc::new(fetcher),
        cache,
        config.upstream_base_url().clone(),
    );
    let app = server::router(AppState::new(catalog, config.homepage_url()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(
        addr = config.bind_addr(),
        upstream = %config.upstream_base_url(),
        "starting HTTP server"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
