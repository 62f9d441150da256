// flightapp-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Connection properties not found at '{0}'")]
    #[diagnostic(
        code(flightapp::infra::config_missing),
        help("Create a dbconn.properties file in the working directory, or pass --config.")
    )]
    ConfigNotFound(String),

    #[error("File System Error: {0}")]
    #[diagnostic(
        code(flightapp::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Missing required property '{0}'")]
    #[diagnostic(
        code(flightapp::infra::config_key),
        help("dbconn.properties must define flightapp.server_url, flightapp.database_name, flightapp.username and flightapp.password.")
    )]
    MissingKey(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConnectionError {
    #[error("Could not connect to {target}: {source}")]
    #[diagnostic(
        code(flightapp::infra::database::sqlserver),
        help("Check the server address, database name and credentials in dbconn.properties.")
    )]
    SqlServer {
        target: String,
        #[source]
        source: tiberius::error::Error,
    },

    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(flightapp::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("Network Error: {0}")]
    #[diagnostic(
        code(flightapp::infra::network),
        help("Is the server reachable on port 1433?")
    )]
    Io(#[from] std::io::Error),

    #[error("Session setting not supported by {engine}: {setting}")]
    #[diagnostic(code(flightapp::infra::session))]
    UnsupportedSetting { engine: String, setting: String },
}
