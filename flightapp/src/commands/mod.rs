// flightapp/src/commands/mod.rs

pub mod query;
pub mod report;

use std::path::Path;

use anyhow::Context;
use flightapp_core::infrastructure::config::load_dbconn_config;
use flightapp_core::{Engine, FlightError, FlightQueries};

/// Config load + connection open. Both failures are fatal for every command.
pub async fn connect(config_path: &Path, engine: Engine) -> Result<FlightQueries, FlightError> {
    let config = load_dbconn_config(config_path)?;
    let queries = FlightQueries::open(&config, engine).await?;
    Ok(queries)
}

/// Closes the session on the normal path.
pub async fn close(queries: FlightQueries) -> anyhow::Result<()> {
    queries
        .close()
        .await
        .context("Failed to close the database connection")
}
