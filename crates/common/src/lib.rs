//! Shared types for the TMP catalog
//!
//! Domain enums, the flat CSV template reader and the typed records the
//! importer hands to storage.

pub mod catalog;
pub mod error;
pub mod records;
pub mod template;

pub use catalog::{ModelCategory, ParameterDataType, SourceType};
pub use error::{Error, Result};
pub use records::{AvailabilityRecord, ModelRecord, ParameterRecord};
pub use template::{read_template, TemplateRow};

/// File names of the catalog templates inside the templates directory
pub const MODELS_TEMPLATE: &str = "tmp_models.csv";
pub const PARAMETERS_TEMPLATE: &str = "tmp_parameters.csv";
pub const AVAILABILITY_TEMPLATE: &str = "tmp_availability.csv";
