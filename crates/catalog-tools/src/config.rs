//! Configuration for the batch tools
//!
//! Reads only what the tools use, so server settings such as `API_PORT`
//! cannot break a template check or an import.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tmp_catalog_service::config::TemplatePaths;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/tmp_catalog.db?mode=rwc";
const DEFAULT_TEMPLATES_DIR: &str = "data/templates";

/// Tool configuration
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// SQLite connection URL, used by the importer only
    pub database_url: String,

    /// Directory holding the catalog CSV templates
    pub templates_dir: PathBuf,
}

impl ToolsConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = ToolsConfig {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            templates_dir: lookup("TEMPLATES_DIR")
                .unwrap_or_else(|| DEFAULT_TEMPLATES_DIR.to_string())
                .into(),
        };

        if config.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }

        Ok(config)
    }

    pub fn templates(&self) -> TemplatePaths {
        TemplatePaths::in_dir(&self.templates_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ToolsConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(
            config.templates().models,
            PathBuf::from("data/templates/tmp_models.csv")
        );
    }

    #[test]
    fn test_server_settings_are_ignored() {
        let config = ToolsConfig::from_lookup(lookup(&[
            ("API_PORT", "abc"),
            ("API_HOST", ""),
            ("TEMPLATES_DIR", "/srv/templates"),
        ]))
        .unwrap();

        assert_eq!(config.templates_dir, PathBuf::from("/srv/templates"));
    }

    #[test]
    fn test_empty_database_url_rejected() {
        let result = ToolsConfig::from_lookup(lookup(&[("DATABASE_URL", " ")]));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("DATABASE_URL must not be empty"));
    }
}
