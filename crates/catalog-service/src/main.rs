//! TMP Catalog Service
//!
//! REST API for browsing TMP models, parameters and firmware availability

use anyhow::{Context, Result};
use std::sync::Arc;
use tmp_catalog_service::{config::Config, create_router, AppState, Storage};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tmp_catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Starting TMP Catalog Service");
    info!("Database URL: {}", config.database_url);

    let storage = Storage::connect(&config.database_url)
        .await
        .context("Failed to initialize storage")?;

    let state = AppState::new(Arc::new(storage));
    let app = create_router(state);

    let addr = config.api_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("TMP Catalog Service running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
