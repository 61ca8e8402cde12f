//! Batch tools for the TMP catalog templates
//!
//! - `tmp-catalog-validate` checks the model and parameter templates
//! - `tmp-catalog-import` upserts all three templates into the store
//!
//! Both read `TEMPLATES_DIR` (default `data/templates`) and exit non-zero on
//! the first failure.

pub mod config;
pub mod importer;
pub mod validator;

pub use config::ToolsConfig;
pub use importer::{import_catalog, ImportSummary};
pub use validator::{validate_rows, validate_templates, ValidationSummary};

use anyhow::{Context, Result};
use tmp_catalog_service::Storage;
use tracing::info;

/// Initialize logging for a batch tool
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();
}

/// Body of `tmp-catalog-validate`
pub fn run_validate(config: &ToolsConfig) -> Result<ValidationSummary> {
    let summary = validate_templates(&config.templates())?;

    info!(
        "Checked {} models and {} parameters",
        summary.models, summary.parameters
    );
    info!("TMP catalog templates validated");

    Ok(summary)
}

/// Body of `tmp-catalog-import`
pub async fn run_import(config: &ToolsConfig) -> Result<ImportSummary> {
    info!("Importing templates from {}", config.templates_dir.display());

    let storage = Storage::connect(&config.database_url)
        .await
        .context("Failed to initialize storage")?;

    let summary = import_catalog(&storage, &config.templates()).await?;
    let counts = storage.counts().await?;

    info!(
        "Applied {} models, {} parameters, {} availability rows",
        summary.models, summary.parameters, summary.availability
    );
    info!(
        "Catalog now holds {} models, {} parameters, {} firmware versions, {} availability rows",
        counts.models, counts.parameters, counts.firmware_versions, counts.availability
    );
    info!("TMP catalog import complete");

    Ok(summary)
}
