// flightapp-core/src/error.rs

use crate::domain::error::QueryError;
use crate::infrastructure::error::{ConfigError, ConnectionError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum FlightError {
    // --- STARTUP (fatal) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Connection(#[from] ConnectionError),

    // --- QUERIES ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Query(#[from] QueryError),
}
