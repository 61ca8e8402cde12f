//! Read projections returned by the catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use tmp_common::{ModelCategory, ParameterDataType, SourceType};

/// Model as listed by `GET /tmp/models`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub model_key: String,
    pub display_name: String,
    pub category: ModelCategory,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Single model with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub model_key: String,
    pub display_name: String,
    pub category: ModelCategory,
    pub description: Option<String>,
    pub source_type: Option<SourceType>,
    pub source_url: Option<String>,
    /// Confidence score of the source, usually within 0..=1
    pub confidence: Option<f64>,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Configurable parameter of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub param_key: String,
    pub name: String,
    pub data_type: ParameterDataType,
    pub unit: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub step: Option<f64>,
    pub enum_options: Option<Json<Value>>,
    /// Numeric, string or enumerated depending on `data_type`
    pub default_value: Option<Json<Value>>,
    pub updated_at: DateTime<Utc>,
}

/// Model available under a firmware version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareModel {
    pub model_key: String,
    pub display_name: String,
    pub category: ModelCategory,
}

/// Row counts per catalog table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogCounts {
    pub models: i64,
    pub parameters: i64,
    pub firmware_versions: i64,
    pub availability: i64,
}
