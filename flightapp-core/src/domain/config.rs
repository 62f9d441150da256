// flightapp-core/src/domain/config.rs

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed SQL Server port used in the connection target.
pub const SQLSERVER_PORT: u16 = 1433;

/// Backend used to run the flight queries.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    #[value(name = "sqlserver", alias = "mssql")]
    SqlServer,
    #[value(name = "duckdb")]
    DuckDB,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SqlServer => "sqlserver",
            Self::DuckDB => "duckdb",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four `flightapp.*` properties. Loaded once, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConnConfig {
    pub server_url: String,
    pub database_name: String,
    pub username: String,
    pub password: String,
    /// Skip server certificate validation. Off unless
    /// `flightapp.trust_server_certificate=true` is set.
    pub trust_server_certificate: bool,
}

impl DbConnConfig {
    /// JDBC-style SQL Server target, as understood by `tiberius::Config::from_jdbc_string`.
    pub fn jdbc_url(&self) -> String {
        format!(
            "jdbc:sqlserver://{}:{};databaseName={};user={};password={}{}",
            self.server_url,
            SQLSERVER_PORT,
            self.database_name,
            self.username,
            self.password,
            self.trust_suffix()
        )
    }

    /// Same as [`jdbc_url`](Self::jdbc_url) with the password masked, for logs and errors.
    pub fn redacted_url(&self) -> String {
        format!(
            "jdbc:sqlserver://{}:{};databaseName={};user={};password=****{}",
            self.server_url,
            SQLSERVER_PORT,
            self.database_name,
            self.username,
            self.trust_suffix()
        )
    }

    fn trust_suffix(&self) -> &'static str {
        if self.trust_server_certificate {
            ";trustServerCertificate=true"
        } else {
            ""
        }
    }
}

// Never print the password.
impl fmt::Debug for DbConnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConnConfig")
            .field("server_url", &self.server_url)
            .field("database_name", &self.database_name)
            .field("username", &self.username)
            .field("password", &"****")
            .field("trust_server_certificate", &self.trust_server_certificate)
            .finish()
    }
}
