//! Pre-flight checks over the model and parameter templates
//!
//! Runs without a database. The first violation aborts the check.

use std::collections::HashSet;
use tmp_common::records::parse_number;
use tmp_common::{read_template, Error, ParameterDataType, Result, TemplateRow};
use tracing::debug;

use tmp_catalog_service::config::TemplatePaths;

/// Rows seen by a successful validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSummary {
    pub models: usize,
    pub parameters: usize,
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::Validation(message()))
    }
}

/// A finite number, or `None` when the cell does not parse as one
fn finite(column: &str, value: &str) -> Option<f64> {
    parse_number(column, value).ok()
}

/// Validate already-parsed template rows
pub fn validate_rows(model_rows: &[TemplateRow], parameter_rows: &[TemplateRow]) -> Result<ValidationSummary> {
    let mut model_keys = HashSet::new();
    for row in model_rows {
        let model_key = row.get("modelKey");
        ensure(!model_key.is_empty(), || "modelKey is required".to_string())?;
        ensure(model_keys.insert(model_key), || {
            format!("duplicate modelKey: {}", model_key)
        })?;
    }

    let mut composite_keys = HashSet::new();
    for row in parameter_rows {
        let model_key = row.get("modelKey");
        let param_key = row.get("paramKey");

        ensure(model_keys.contains(model_key), || {
            format!("unknown modelKey in parameters: {}", model_key)
        })?;
        ensure(!param_key.is_empty(), || {
            format!("paramKey missing for model: {}", model_key)
        })?;

        let composite = format!("{}:{}", model_key, param_key);
        ensure(!composite_keys.contains(&composite), || {
            format!("duplicate param key: {}", composite)
        })?;

        if row.get("dataType") == ParameterDataType::Number.as_str() {
            let (min, max) = (row.get("minValue"), row.get("maxValue"));
            ensure(!min.is_empty() && !max.is_empty(), || {
                format!("missing min/max for numeric param {}", composite)
            })?;

            let (min, max) = match (finite("minValue", min), finite("maxValue", max)) {
                (Some(min), Some(max)) => (min, max),
                _ => {
                    return Err(Error::Validation(format!(
                        "invalid min/max number for {}",
                        composite
                    )))
                }
            };
            ensure(min <= max, || format!("minValue > maxValue for {}", composite))?;
        }

        debug!("Parameter {} ok", composite);
        composite_keys.insert(composite);
    }

    Ok(ValidationSummary {
        models: model_rows.len(),
        parameters: parameter_rows.len(),
    })
}

/// Read the model and parameter templates and validate them
pub fn validate_templates(paths: &TemplatePaths) -> Result<ValidationSummary> {
    let model_rows = read_template(&paths.models)?;
    let parameter_rows = read_template(&paths.parameters)?;

    validate_rows(&model_rows, &parameter_rows)
}
