//! Average Service Binary - Sliding-Window Number Aggregator
//!
//! Serves `GET /numbers/:numberid`, fetching from the matching upstream
//! generator and reporting the window before and after the merge.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin average_service
//! ```
//!
//! ## Environment Variables
//!
//! - PORT - Listening port (default: 9876)
//! - WINDOW_SIZE - Window capacity (default: 10)
//! - AUTH_TOKEN - Bearer token for upstream calls (optional)
//! - FETCH_TIMEOUT_MS - Upstream timeout in milliseconds (default: 500)
//! - NUMBERS_API_BASE_URL - Base URL for the default source endpoints
//! - NUMBERS_URL_{PRIME,FIBONACCI,EVEN,RANDOM} - Per-source endpoint override
//! - NUMBERS_LABEL_{PRIME,FIBONACCI,EVEN,RANDOM} - Per-source identifier override
//! - RUST_LOG - Logging level (optional, default: info)

use numwindow::{api, AverageService, HttpNumberFetcher, ServiceConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ServiceConfig::from_env()?;

    log::info!("🚀 Starting Average Service");
    log::info!("   Port: {}", config.port);
    log::info!("   Window size: {}", config.window_size);
    log::info!("   Fetch timeout: {}ms", config.fetch_timeout.as_millis());
    log::info!(
        "   Auth token: {}",
        if config.auth_token.is_some() { "set" } else { "not set" }
    );
    for source in config.registry.sources() {
        log::info!("   Source {:>3} ({}): {}", source.label, source.kind.as_str(), source.url);
    }

    let fetcher = HttpNumberFetcher::new(config.fetch_timeout, config.auth_token.clone())?;
    let service = Arc::new(AverageService::new(
        config.window_size,
        config.registry.clone(),
        Arc::new(fetcher),
        config.fetch_timeout,
    ));

    let app = api::create_router(service);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    log::info!("✅ Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Average Service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
