//! SQLite storage for the TMP catalog

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use tmp_common::{AvailabilityRecord, ModelRecord, ParameterRecord};
use tracing::{debug, info};

use crate::catalog::CatalogReader;
use crate::models::{CatalogCounts, FirmwareModel, Model, ModelSummary, Parameter};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS tmp_models (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        model_key TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT,
        source_type TEXT,
        source_url TEXT,
        confidence REAL,
        last_verified_at TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS tmp_model_parameters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        model_id INTEGER NOT NULL REFERENCES tmp_models(id) ON DELETE CASCADE,
        param_key TEXT NOT NULL,
        name TEXT NOT NULL,
        data_type TEXT NOT NULL,
        unit TEXT,
        min_value REAL,
        max_value REAL,
        step REAL,
        enum_options TEXT,
        default_value TEXT,
        source_type TEXT,
        source_url TEXT,
        confidence REAL,
        last_verified_at TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE (model_id, param_key)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS tmp_firmware_versions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        version TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS tmp_model_availability (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        firmware_version_id INTEGER NOT NULL REFERENCES tmp_firmware_versions(id) ON DELETE CASCADE,
        model_id INTEGER NOT NULL REFERENCES tmp_models(id) ON DELETE CASCADE,
        parameter_id INTEGER REFERENCES tmp_model_parameters(id) ON DELETE CASCADE,
        is_available BOOLEAN NOT NULL DEFAULT 1,
        notes TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    // UNIQUE treats NULLs as distinct, so model-level rows get their own index
    r#"CREATE UNIQUE INDEX IF NOT EXISTS tmp_model_availability_param_key
        ON tmp_model_availability (firmware_version_id, model_id, parameter_id)
        WHERE parameter_id IS NOT NULL"#,
    r#"CREATE UNIQUE INDEX IF NOT EXISTS tmp_model_availability_model_key
        ON tmp_model_availability (firmware_version_id, model_id)
        WHERE parameter_id IS NULL"#,
    r#"CREATE INDEX IF NOT EXISTS tmp_models_display_name
        ON tmp_models (display_name)"#,
];

/// Storage backend for catalog rows
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open a pool against `database_url` and make sure the tables exist
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        let storage = Self { pool };
        storage.ensure_schema().await?;

        info!("Connected to database at {}", database_url);
        Ok(storage)
    }

    /// Private in-memory database
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("Invalid in-memory database URL")?
            .foreign_keys(true);

        // Every connection to :memory: is a separate database, so pin one
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        let storage = Self { pool };
        storage.ensure_schema().await?;
        Ok(storage)
    }

    async fn ensure_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(*statement)
                .execute(&self.pool)
                .await
                .context("Failed to create catalog schema")?;
        }
        Ok(())
    }

    /// Look up a model's row id by key
    pub async fn find_model_id(&self, model_key: &str) -> Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM tmp_models WHERE model_key = ?")
            .bind(model_key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    /// Insert or update a model keyed on `model_key`, returning its row id
    pub async fn upsert_model(&self, model: &ModelRecord) -> Result<i64> {
        let now = Utc::now();

        if let Some(id) = self.find_model_id(&model.model_key).await? {
            sqlx::query(
                "UPDATE tmp_models SET display_name = ?, category = ?, description = ?, \
                 source_type = ?, source_url = ?, confidence = ?, last_verified_at = ?, \
                 updated_at = ? WHERE id = ?",
            )
            .bind(&model.display_name)
            .bind(model.category)
            .bind(&model.description)
            .bind(model.source_type)
            .bind(&model.source_url)
            .bind(model.confidence)
            .bind(model.last_verified_at)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to update model {}", model.model_key))?;

            debug!("Updated model: {}", model.model_key);
            return Ok(id);
        }

        let result = sqlx::query(
            "INSERT INTO tmp_models (model_key, display_name, category, description, \
             source_type, source_url, confidence, last_verified_at, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&model.model_key)
        .bind(&model.display_name)
        .bind(model.category)
        .bind(&model.description)
        .bind(model.source_type)
        .bind(&model.source_url)
        .bind(model.confidence)
        .bind(model.last_verified_at)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert model {}", model.model_key))?;

        debug!("Inserted model: {}", model.model_key);
        Ok(result.last_insert_rowid())
    }

    /// Look up a parameter's row id within a model
    pub async fn find_parameter_id(&self, model_id: i64, param_key: &str) -> Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM tmp_model_parameters WHERE model_id = ? AND param_key = ?",
        )
        .bind(model_id)
        .bind(param_key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    /// Insert or update a parameter keyed on (model, `param_key`)
    pub async fn upsert_parameter(&self, model_id: i64, param: &ParameterRecord) -> Result<i64> {
        let now = Utc::now();
        let enum_options = param.enum_options.clone().map(Json);
        let default_value = param.default_value.clone().map(Json);

        if let Some(id) = self.find_parameter_id(model_id, &param.param_key).await? {
            sqlx::query(
                "UPDATE tmp_model_parameters SET name = ?, data_type = ?, unit = ?, \
                 min_value = ?, max_value = ?, step = ?, enum_options = ?, default_value = ?, \
                 source_type = ?, source_url = ?, confidence = ?, last_verified_at = ?, \
                 updated_at = ? WHERE id = ?",
            )
            .bind(&param.name)
            .bind(param.data_type)
            .bind(&param.unit)
            .bind(param.min_value)
            .bind(param.max_value)
            .bind(param.step)
            .bind(enum_options)
            .bind(default_value)
            .bind(param.source_type)
            .bind(&param.source_url)
            .bind(param.confidence)
            .bind(param.last_verified_at)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to update parameter {}", param.composite_key()))?;

            debug!("Updated parameter: {}", param.composite_key());
            return Ok(id);
        }

        let result = sqlx::query(
            "INSERT INTO tmp_model_parameters (model_id, param_key, name, data_type, unit, \
             min_value, max_value, step, enum_options, default_value, source_type, source_url, \
             confidence, last_verified_at, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(model_id)
        .bind(&param.param_key)
        .bind(&param.name)
        .bind(param.data_type)
        .bind(&param.unit)
        .bind(param.min_value)
        .bind(param.max_value)
        .bind(param.step)
        .bind(enum_options)
        .bind(default_value)
        .bind(param.source_type)
        .bind(&param.source_url)
        .bind(param.confidence)
        .bind(param.last_verified_at)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert parameter {}", param.composite_key()))?;

        debug!("Inserted parameter: {}", param.composite_key());
        Ok(result.last_insert_rowid())
    }

    /// Return the id of a firmware version, creating it on first use
    pub async fn upsert_firmware_version(&self, version: &str) -> Result<i64> {
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM tmp_firmware_versions WHERE version = ?",
        )
        .bind(version)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let result = sqlx::query("INSERT INTO tmp_firmware_versions (version, created_at) VALUES (?, ?)")
            .bind(version)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to insert firmware version {}", version))?;

        info!("Created firmware version: {}", version);
        Ok(result.last_insert_rowid())
    }

    /// Insert or update an availability link keyed on
    /// (firmware version, model, parameter), where a missing parameter
    /// matches only other model-level rows
    pub async fn upsert_availability(
        &self,
        firmware_version_id: i64,
        model_id: i64,
        parameter_id: Option<i64>,
        record: &AvailabilityRecord,
    ) -> Result<i64> {
        let now = Utc::now();

        // `IS` compares NULL equal to NULL
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM tmp_model_availability \
             WHERE firmware_version_id = ? AND model_id = ? AND parameter_id IS ?",
        )
        .bind(firmware_version_id)
        .bind(model_id)
        .bind(parameter_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(id) = existing {
            sqlx::query(
                "UPDATE tmp_model_availability SET is_available = ?, notes = ?, updated_at = ? \
                 WHERE id = ?",
            )
            .bind(record.is_available)
            .bind(&record.notes)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update availability")?;

            return Ok(id);
        }

        let result = sqlx::query(
            "INSERT INTO tmp_model_availability (firmware_version_id, model_id, parameter_id, \
             is_available, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(firmware_version_id)
        .bind(model_id)
        .bind(parameter_id)
        .bind(record.is_available)
        .bind(&record.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to insert availability")?;

        Ok(result.last_insert_rowid())
    }

    /// Row count of every catalog table
    pub async fn counts(&self) -> Result<CatalogCounts> {
        let (models, parameters, firmware_versions, availability) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                "SELECT \
                 (SELECT COUNT(*) FROM tmp_models), \
                 (SELECT COUNT(*) FROM tmp_model_parameters), \
                 (SELECT COUNT(*) FROM tmp_firmware_versions), \
                 (SELECT COUNT(*) FROM tmp_model_availability)",
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(CatalogCounts {
            models,
            parameters,
            firmware_versions,
            availability,
        })
    }
}

#[async_trait]
impl CatalogReader for Storage {
    async fn list_models(&self) -> Result<Vec<ModelSummary>> {
        let models = sqlx::query_as::<_, ModelSummary>(
            "SELECT model_key, display_name, category, description, updated_at \
             FROM tmp_models ORDER BY display_name ASC, model_key ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list models")?;
        Ok(models)
    }

    async fn get_model_by_key(&self, model_key: &str) -> Result<Option<Model>> {
        let model = sqlx::query_as::<_, Model>(
            "SELECT model_key, display_name, category, description, source_type, source_url, \
             confidence, last_verified_at, updated_at \
             FROM tmp_models WHERE model_key = ?",
        )
        .bind(model_key)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to load model {}", model_key))?;
        Ok(model)
    }

    async fn list_parameters_for_model(&self, model_key: &str) -> Result<Vec<Parameter>> {
        let parameters = sqlx::query_as::<_, Parameter>(
            "SELECT p.param_key, p.name, p.data_type, p.unit, p.min_value, p.max_value, p.step, \
             p.enum_options, p.default_value, p.updated_at \
             FROM tmp_model_parameters p \
             JOIN tmp_models m ON m.id = p.model_id \
             WHERE m.model_key = ? \
             ORDER BY p.name ASC, p.param_key ASC",
        )
        .bind(model_key)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to list parameters for {}", model_key))?;
        Ok(parameters)
    }

    async fn list_models_for_firmware(&self, version: &str) -> Result<Vec<FirmwareModel>> {
        let models = sqlx::query_as::<_, FirmwareModel>(
            "SELECT DISTINCT m.model_key, m.display_name, m.category \
             FROM tmp_model_availability a \
             JOIN tmp_firmware_versions f ON f.id = a.firmware_version_id \
             JOIN tmp_models m ON m.id = a.model_id \
             WHERE f.version = ? AND a.parameter_id IS NULL AND a.is_available = 1 \
             ORDER BY m.display_name ASC, m.model_key ASC",
        )
        .bind(version)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to list models for firmware {}", version))?;
        Ok(models)
    }
}
