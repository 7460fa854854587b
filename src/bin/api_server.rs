// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over a prepared recipe catalog
// Usage: cargo run --features api --bin api_server

use recipe_scorer_rust::{create_router, AppState, EngineConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "recipe_scorer_rust=info,tower_http=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let catalog_path = std::env::var("CATALOG_PATH").ok().map(PathBuf::from);

    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => EngineConfig::load(&PathBuf::from(path))?,
        Err(_) => EngineConfig::default(),
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!("  CATALOG_PATH: {:?}", catalog_path);
    tracing::info!("  PORT: {}", port);
    tracing::info!("  Provider enabled: {}", config.explanation.provider_enabled);

    // Initialize application state (prepares the catalog once)
    let state = AppState::new(config, catalog_path.as_deref());
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
