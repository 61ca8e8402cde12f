//! CSV import into the catalog store
//!
//! Applies models, then parameters, then availability. Every row is an
//! upsert on its natural key, so re-running with the same templates leaves
//! the store unchanged. The first unresolved reference or unparseable cell
//! aborts the run; rows written before it stay written.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tmp_catalog_service::{config::TemplatePaths, Storage};
use tmp_common::{read_template, AvailabilityRecord, ModelRecord, ParameterRecord, TemplateRow};
use tracing::{debug, info};

/// Rows applied by an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub models: usize,
    pub parameters: usize,
    pub availability: usize,
}

fn load(path: &Path) -> Result<Vec<TemplateRow>> {
    let rows = read_template(path)?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn row_context(path: &Path, row: &TemplateRow) -> String {
    format!("{} line {}", path.display(), row.line())
}

/// Import all three templates into `storage`
pub async fn import_catalog(storage: &Storage, paths: &TemplatePaths) -> Result<ImportSummary> {
    let model_rows = load(&paths.models)?;
    let parameter_rows = load(&paths.parameters)?;
    let availability_rows = load(&paths.availability)?;

    let mut summary = ImportSummary::default();

    for row in &model_rows {
        let model = ModelRecord::from_row(row).with_context(|| row_context(&paths.models, row))?;
        storage.upsert_model(&model).await?;
        summary.models += 1;
    }
    info!("Imported {} models", summary.models);

    for row in &parameter_rows {
        let param =
            ParameterRecord::from_row(row).with_context(|| row_context(&paths.parameters, row))?;

        let model_id = storage
            .find_model_id(&param.model_key)
            .await?
            .ok_or_else(|| anyhow!("unknown modelKey in parameters: {}", param.model_key))?;

        storage.upsert_parameter(model_id, &param).await?;
        summary.parameters += 1;
    }
    info!("Imported {} parameters", summary.parameters);

    for row in &availability_rows {
        let record = AvailabilityRecord::from_row(row)
            .with_context(|| row_context(&paths.availability, row))?;

        let model_id = storage
            .find_model_id(&record.model_key)
            .await?
            .ok_or_else(|| anyhow!("unknown modelKey in availability: {}", record.model_key))?;

        let firmware_id = storage
            .upsert_firmware_version(&record.firmware_version)
            .await?;

        let parameter_id = match &record.param_key {
            Some(param_key) => Some(
                storage
                    .find_parameter_id(model_id, param_key)
                    .await?
                    .ok_or_else(|| {
                        anyhow!(
                            "unknown paramKey in availability: {}:{}",
                            record.model_key,
                            param_key
                        )
                    })?,
            ),
            None => None,
        };

        storage
            .upsert_availability(firmware_id, model_id, parameter_id, &record)
            .await?;
        summary.availability += 1;
    }
    info!("Imported {} availability rows", summary.availability);

    Ok(summary)
}
