//! Allowlist Registration Server - Entry point.

use allowlist_server::{
    api::{create_router_with_cors, AppState},
    config::{Config, LogConfig, LogFormat},
    registry::Store,
};
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log);

    info!("Starting Allowlist Registration Server");

    // Initialize storage
    let store = if config.store.persist {
        info!("Using submissions journal at {:?}", config.store.path);
        Store::journal(config.store.path.clone())
    } else {
        warn!("Persistence disabled, using in-memory storage (data will be lost on restart)");
        Store::memory()
    };

    // Replay existing submissions; an unreadable journal is fatal
    let registry = store
        .load()
        .await
        .context("Failed to load submissions journal")?;
    info!("Loaded registry with {} records", registry.count());

    let state = AppState::new(registry, store);

    let cors = if config.cors.allow_any_origin {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };
    let app = create_router_with_cors(state, cors);

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

fn init_logging(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
