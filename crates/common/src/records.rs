//! Typed catalog records built from template rows
//!
//! Optional cells are parsed only when non-empty. An empty cell is always
//! `None`, never a parsed zero or an empty JSON value.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::{Error, ModelCategory, ParameterDataType, Result, SourceType, TemplateRow};

/// Model row as written by the importer
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    pub model_key: String,
    pub display_name: String,
    pub category: ModelCategory,
    pub description: Option<String>,
    pub source_type: Option<SourceType>,
    pub source_url: Option<String>,
    pub confidence: Option<f64>,
    pub last_verified_at: Option<DateTime<Utc>>,
}

/// Parameter row as written by the importer
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    pub model_key: String,
    pub param_key: String,
    pub name: String,
    pub data_type: ParameterDataType,
    pub unit: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub step: Option<f64>,
    pub enum_options: Option<Value>,
    pub default_value: Option<Value>,
    pub source_type: Option<SourceType>,
    pub source_url: Option<String>,
    pub confidence: Option<f64>,
    pub last_verified_at: Option<DateTime<Utc>>,
}

/// Availability row as written by the importer
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityRecord {
    pub firmware_version: String,
    pub model_key: String,
    /// `None` means the row applies to the whole model
    pub param_key: Option<String>,
    pub is_available: bool,
    pub notes: Option<String>,
}

impl ModelRecord {
    pub fn from_row(row: &TemplateRow) -> Result<Self> {
        Ok(Self {
            model_key: row.get("modelKey").to_string(),
            display_name: row.get("displayName").to_string(),
            category: row.get("category").parse()?,
            description: optional_text(row, "description"),
            source_type: row.optional("sourceType").map(str::parse).transpose()?,
            source_url: optional_text(row, "sourceUrl"),
            confidence: optional_number(row, "confidence")?,
            last_verified_at: optional_timestamp(row, "lastVerifiedAt")?,
        })
    }
}

impl ParameterRecord {
    pub fn from_row(row: &TemplateRow) -> Result<Self> {
        Ok(Self {
            model_key: row.get("modelKey").to_string(),
            param_key: row.get("paramKey").to_string(),
            name: row.get("name").to_string(),
            data_type: row.get("dataType").parse()?,
            unit: optional_text(row, "unit"),
            min_value: optional_number(row, "minValue")?,
            max_value: optional_number(row, "maxValue")?,
            step: optional_number(row, "step")?,
            enum_options: optional_json(row, "enumOptions")?,
            default_value: optional_json(row, "defaultValue")?,
            source_type: row.optional("sourceType").map(str::parse).transpose()?,
            source_url: optional_text(row, "sourceUrl"),
            confidence: optional_number(row, "confidence")?,
            last_verified_at: optional_timestamp(row, "lastVerifiedAt")?,
        })
    }

    /// `modelKey:paramKey`, the form used in diagnostics
    pub fn composite_key(&self) -> String {
        format!("{}:{}", self.model_key, self.param_key)
    }
}

impl AvailabilityRecord {
    pub fn from_row(row: &TemplateRow) -> Result<Self> {
        Ok(Self {
            firmware_version: row.get("firmwareVersion").to_string(),
            model_key: row.get("modelKey").to_string(),
            param_key: optional_text(row, "paramKey"),
            is_available: row.get("isAvailable") != "false",
            notes: optional_text(row, "notes"),
        })
    }
}

fn optional_text(row: &TemplateRow, column: &str) -> Option<String> {
    row.optional(column).map(str::to_string)
}

/// Parse a numeric cell, tolerating surrounding whitespace
///
/// `NaN` and infinities parse as `f64` but are rejected: the store cannot
/// keep them and JSON cannot carry them.
pub fn parse_number(column: &str, value: &str) -> Result<f64> {
    let number = value
        .trim()
        .parse::<f64>()
        .map_err(|e| Error::invalid_value(column, value, e))?;

    if !number.is_finite() {
        return Err(Error::invalid_value(column, value, "not a finite number"));
    }
    Ok(number)
}

fn optional_number(row: &TemplateRow, column: &str) -> Result<Option<f64>> {
    row.optional(column)
        .map(|value| parse_number(column, value))
        .transpose()
}

fn optional_json(row: &TemplateRow, column: &str) -> Result<Option<Value>> {
    row.optional(column)
        .map(|value| serde_json::from_str(value).map_err(|e| Error::invalid_value(column, value, e)))
        .transpose()
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC)
pub fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|e| Error::invalid_value(column, value, e))
}

fn optional_timestamp(row: &TemplateRow, column: &str) -> Result<Option<DateTime<Utc>>> {
    row.optional(column)
        .map(|value| parse_timestamp(column, value))
        .transpose()
}
