//! Import the TMP catalog templates into the database

use anyhow::{Context, Result};
use tmp_catalog_tools::{init_tracing, run_import, ToolsConfig};
use tracing::error;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = ToolsConfig::from_env().context("Failed to load configuration")?;
    run_import(&config).await?;
    Ok(())
}
