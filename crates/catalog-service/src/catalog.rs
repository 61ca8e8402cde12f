//! Catalog access seam between the HTTP layer and the store

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{FirmwareModel, Model, ModelSummary, Parameter};

/// Read operations over the TMP catalog
///
/// Every call re-queries the store. A missing row is a normal outcome
/// (`None` or an empty list), never an error.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// All models ordered by display name
    async fn list_models(&self) -> Result<Vec<ModelSummary>>;

    /// Model with exactly this key (case-sensitive)
    async fn get_model_by_key(&self, model_key: &str) -> Result<Option<Model>>;

    /// Parameters of a model ordered by name; empty for unknown models
    async fn list_parameters_for_model(&self, model_key: &str) -> Result<Vec<Parameter>>;

    /// Models with a model-level, available entry for `version`
    async fn list_models_for_firmware(&self, version: &str) -> Result<Vec<FirmwareModel>>;
}
