//! Integration tests for the TMP catalog routes

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tmp_catalog_service::{
    create_router, AppState, CatalogReader, FirmwareModel, Model, ModelSummary, Parameter, Storage,
};
use tmp_common::{AvailabilityRecord, ModelCategory, ModelRecord, ParameterDataType, ParameterRecord};
use tower::ServiceExt; // for `oneshot`

/// Catalog stand-in that only counts how often it is queried
#[derive(Default)]
struct CountingCatalog {
    calls: AtomicUsize,
}

#[async_trait]
impl CatalogReader for CountingCatalog {
    async fn list_models(&self) -> Result<Vec<ModelSummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn get_model_by_key(&self, _model_key: &str) -> Result<Option<Model>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }

    async fn list_parameters_for_model(&self, _model_key: &str) -> Result<Vec<Parameter>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn list_models_for_firmware(&self, _version: &str) -> Result<Vec<FirmwareModel>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

/// Catalog whose store is unreachable
struct FailingCatalog;

#[async_trait]
impl CatalogReader for FailingCatalog {
    async fn list_models(&self) -> Result<Vec<ModelSummary>> {
        anyhow::bail!("database is locked")
    }

    async fn get_model_by_key(&self, _model_key: &str) -> Result<Option<Model>> {
        anyhow::bail!("database is locked")
    }

    async fn list_parameters_for_model(&self, _model_key: &str) -> Result<Vec<Parameter>> {
        anyhow::bail!("database is locked")
    }

    async fn list_models_for_firmware(&self, _version: &str) -> Result<Vec<FirmwareModel>> {
        anyhow::bail!("database is locked")
    }
}

async fn seeded_storage() -> Storage {
    let storage = Storage::in_memory().await.unwrap();

    let m1 = storage
        .upsert_model(&ModelRecord {
            model_key: "M1".to_string(),
            display_name: "Thermostat".to_string(),
            category: ModelCategory::Controller,
            description: Some("Wall unit".to_string()),
            source_type: None,
            source_url: Some("https://example.com/m1".to_string()),
            confidence: Some(0.8),
            last_verified_at: None,
        })
        .await
        .unwrap();
    storage
        .upsert_model(&ModelRecord {
            model_key: "M2".to_string(),
            display_name: "Humidity Sensor".to_string(),
            category: ModelCategory::Sensor,
            description: None,
            source_type: None,
            source_url: None,
            confidence: None,
            last_verified_at: None,
        })
        .await
        .unwrap();

    storage
        .upsert_parameter(
            m1,
            &ParameterRecord {
                model_key: "M1".to_string(),
                param_key: "SETPOINT".to_string(),
                name: "Setpoint".to_string(),
                data_type: ParameterDataType::Number,
                unit: Some("C".to_string()),
                min_value: Some(5.0),
                max_value: Some(30.0),
                step: Some(0.5),
                enum_options: None,
                default_value: Some(serde_json::json!(21)),
                source_type: None,
                source_url: None,
                confidence: None,
                last_verified_at: None,
            },
        )
        .await
        .unwrap();

    let fw = storage.upsert_firmware_version("1.2.0").await.unwrap();
    storage
        .upsert_availability(
            fw,
            m1,
            None,
            &AvailabilityRecord {
                firmware_version: "1.2.0".to_string(),
                model_key: "M1".to_string(),
                param_key: None,
                is_available: true,
                notes: None,
            },
        )
        .await
        .unwrap();

    storage
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}

async fn seeded_app() -> axum::Router {
    let storage = seeded_storage().await;
    create_router(AppState::new(Arc::new(storage)))
}

#[tokio::test]
async fn test_health_check() {
    let (status, json) = get(seeded_app().await, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "tmp-catalog-service");
}

#[tokio::test]
async fn test_list_models() {
    let (status, json) = get(seeded_app().await, "/tmp/models").await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["displayName"], "Humidity Sensor");
    assert_eq!(data[0]["category"], "SENSOR");
    assert!(data[0]["description"].is_null());
    assert_eq!(data[1]["modelKey"], "M1");
    assert_eq!(data[1]["description"], "Wall unit");
    assert!(data[1]["updatedAt"].is_string());
}

#[tokio::test]
async fn test_get_model_by_key() {
    let (status, json) = get(seeded_app().await, "/tmp/models/M1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["modelKey"], "M1");
    assert_eq!(json["data"]["sourceUrl"], "https://example.com/m1");
    assert_eq!(json["data"]["confidence"], 0.8);
    assert!(json["data"]["sourceType"].is_null());
}

#[tokio::test]
async fn test_get_model_trims_key() {
    let (status, json) = get(seeded_app().await, "/tmp/models/%20M1%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["modelKey"], "M1");
}

#[tokio::test]
async fn test_get_model_not_found() {
    let (status, json) = get(seeded_app().await, "/tmp/models/m1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Model not found");
}

#[tokio::test]
async fn test_list_model_parameters() {
    let (status, json) = get(seeded_app().await, "/tmp/models/M1/parameters").await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["paramKey"], "SETPOINT");
    assert_eq!(data[0]["dataType"], "NUMBER");
    assert_eq!(data[0]["minValue"], 5.0);
    assert_eq!(data[0]["maxValue"], 30.0);
    assert_eq!(data[0]["defaultValue"], 21);
    assert!(data[0]["enumOptions"].is_null());
}

#[tokio::test]
async fn test_parameters_of_unknown_model_is_empty() {
    let (status, json) = get(seeded_app().await, "/tmp/models/NOPE/parameters").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_list_firmware_models() {
    let (status, json) = get(seeded_app().await, "/tmp/firmware/1.2.0/models").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        serde_json::json!([
            { "modelKey": "M1", "displayName": "Thermostat", "category": "CONTROLLER" }
        ])
    );
}

#[tokio::test]
async fn test_unknown_firmware_is_empty_list() {
    let (status, json) = get(seeded_app().await, "/tmp/firmware/9.9.9/models").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_blank_params_rejected_without_query() {
    let catalog = Arc::new(CountingCatalog::default());
    let app = create_router(AppState::new(catalog.clone()));

    let cases = [
        ("/tmp/models/%20", "modelKey is required"),
        ("/tmp/models/%20%09/parameters", "modelKey is required"),
        ("/tmp/firmware/%20%20/models", "version is required"),
    ];

    for (uri, message) in cases {
        let (status, json) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["error"], message);
    }

    assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let app = create_router(AppState::new(Arc::new(FailingCatalog)));

    let (status, json) = get(app, "/tmp/models").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("database is locked"));
}
