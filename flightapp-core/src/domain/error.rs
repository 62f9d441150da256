// flightapp-core/src/domain/error.rs

use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// What went wrong while running a query, independent of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// The engine rejected or failed to run the statement.
    Execution,
    /// The result did not have the expected shape (e.g. no row for a scalar).
    Shape,
    /// A column was missing or held a value of the wrong type.
    Decode,
    /// The connection was already closed.
    Closed,
}

impl QueryErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Execution => "execution",
            Self::Shape => "shape",
            Self::Decode => "decode",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
#[error("{message}")]
#[diagnostic(
    code(flightapp::domain::query),
    help("Check that the Flights, Weekdays and Carriers tables exist and are readable.")
)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub message: String,
}

impl QueryError {
    pub fn new(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::Execution, message)
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::Shape, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::Decode, message)
    }

    pub fn closed() -> Self {
        Self::new(QueryErrorKind::Closed, "The connection is closed.")
    }
}
