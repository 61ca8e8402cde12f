//! Validate the TMP catalog templates without touching the database

use anyhow::{Context, Result};
use tmp_catalog_tools::{init_tracing, run_validate, ToolsConfig};
use tracing::error;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = ToolsConfig::from_env().context("Failed to load configuration")?;
    run_validate(&config)?;
    Ok(())
}
