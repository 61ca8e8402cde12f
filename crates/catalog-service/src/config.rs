//! Configuration management for the TMP catalog
//!
//! Loads configuration from environment variables with sensible defaults.
//! Used by the API server; the batch tools share only `TemplatePaths`.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tmp_common::{AVAILABILITY_TEMPLATE, MODELS_TEMPLATE, PARAMETERS_TEMPLATE};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,

    /// API server host
    pub api_host: String,

    /// API server port
    pub api_port: u16,

    /// Directory holding the catalog CSV templates
    pub templates_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/tmp_catalog.db?mode=rwc".to_string()),

            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8084".to_string())
                .parse()
                .context("Invalid API_PORT")?,

            templates_dir: env::var("TEMPLATES_DIR")
                .unwrap_or_else(|_| "data/templates".to_string())
                .into(),
        };

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api_port == 0 {
            anyhow::bail!("API_PORT must be greater than 0");
        }

        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn templates(&self) -> TemplatePaths {
        TemplatePaths::in_dir(&self.templates_dir)
    }
}

/// Locations of the three catalog templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    pub models: PathBuf,
    pub parameters: PathBuf,
    pub availability: PathBuf,
}

impl TemplatePaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            models: dir.join(MODELS_TEMPLATE),
            parameters: dir.join(PARAMETERS_TEMPLATE),
            availability: dir.join(AVAILABILITY_TEMPLATE),
        }
    }
}
