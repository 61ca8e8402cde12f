//! API request handlers for the TMP catalog

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    catalog::CatalogReader,
    models::{FirmwareModel, Model, ModelSummary, Parameter},
};

/// Shared application state
pub struct AppState {
    pub catalog: Arc<dyn CatalogReader>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self { catalog }
    }
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!("Catalog query failed: {:#}", err);
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

/// Success envelope
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    fn json(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

/// Trim a path segment, rejecting blank values before any query runs
fn required_param(name: &str, raw: &str) -> Result<String, ApiError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ApiError::bad_request(format!("{} is required", name)));
    }
    Ok(value.to_string())
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "tmp-catalog-service"
    }))
}

/// List every model
pub async fn list_models_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<ModelSummary>>>, ApiError> {
    info!("Listing all models");

    let models = state.catalog.list_models().await?;
    Ok(DataResponse::json(models))
}

/// Get a model by key
pub async fn get_model_handler(
    State(state): State<Arc<AppState>>,
    Path(model_key): Path<String>,
) -> Result<Json<DataResponse<Model>>, ApiError> {
    let model_key = required_param("modelKey", &model_key)?;
    info!("Getting model: {}", model_key);

    match state.catalog.get_model_by_key(&model_key).await? {
        Some(model) => Ok(DataResponse::json(model)),
        None => Err(ApiError::not_found("Model not found")),
    }
}

/// List the parameters of a model
pub async fn list_model_parameters_handler(
    State(state): State<Arc<AppState>>,
    Path(model_key): Path<String>,
) -> Result<Json<DataResponse<Vec<Parameter>>>, ApiError> {
    let model_key = required_param("modelKey", &model_key)?;
    info!("Listing parameters for model: {}", model_key);

    let parameters = state.catalog.list_parameters_for_model(&model_key).await?;
    Ok(DataResponse::json(parameters))
}

/// List models available under a firmware version
pub async fn list_firmware_models_handler(
    State(state): State<Arc<AppState>>,
    Path(version): Path<String>,
) -> Result<Json<DataResponse<Vec<FirmwareModel>>>, ApiError> {
    let version = required_param("version", &version)?;
    info!("Listing models for firmware: {}", version);

    let models = state.catalog.list_models_for_firmware(&version).await?;
    Ok(DataResponse::json(models))
}
