//! TMP Catalog Service
//!
//! Read API over the TMP hardware model catalog: models, their configurable
//! parameters and which models each firmware version supports.
//!
//! ## Endpoints
//!
//! - `GET /tmp/models` - List all models
//! - `GET /tmp/models/{modelKey}` - Get a model with provenance
//! - `GET /tmp/models/{modelKey}/parameters` - List a model's parameters
//! - `GET /tmp/firmware/{version}/models` - List models available for a firmware version
//! - `GET /health` - Health check

pub mod catalog;
pub mod config;
pub mod handlers;
pub mod models;
pub mod storage;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use catalog::CatalogReader;
pub use handlers::AppState;
pub use models::{CatalogCounts, FirmwareModel, Model, ModelSummary, Parameter};
pub use storage::Storage;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/tmp/models", get(handlers::list_models_handler))
        .route("/tmp/models/{model_key}", get(handlers::get_model_handler))
        .route(
            "/tmp/models/{model_key}/parameters",
            get(handlers::list_model_parameters_handler),
        )
        .route(
            "/tmp/firmware/{version}/models",
            get(handlers::list_firmware_models_handler),
        )
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
