// flightapp-core/src/ports/connector.rs

// What the query runners need from a database session, without knowing which
// engine is behind it.

use async_trait::async_trait;
use std::fmt;
use std::ops::ControlFlow;

use crate::domain::error::QueryError;
use crate::domain::session::SessionSettings;
use crate::error::FlightError;

/// A single cell, decoded into a backend-neutral form.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One result row: column names in select order, with their values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[(String, Value)] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Column lookup by label. Case-insensitive, like SQL identifiers.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(col, _)| col.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn get_i64(&self, name: &str) -> Result<i64, QueryError> {
        match self.require(name)? {
            Value::Integer(i) => Ok(*i),
            Value::Real(r) if r.fract() == 0.0 => Ok(*r as i64),
            other => Err(QueryError::decode(format!(
                "Column '{}' is not an integer: {:?}",
                name, other
            ))),
        }
    }

    pub fn get_string(&self, name: &str) -> Result<String, QueryError> {
        match self.require(name)? {
            Value::Null => Err(QueryError::decode(format!("Column '{}' is NULL", name))),
            value => Ok(value.to_string()),
        }
    }

    /// Like [`get_string`](Self::get_string), with SQL NULL as `None`.
    pub fn get_opt_string(&self, name: &str) -> Result<Option<String>, QueryError> {
        match self.require(name)? {
            Value::Null => Ok(None),
            value => Ok(Some(value.to_string())),
        }
    }

    fn require(&self, name: &str) -> Result<&Value, QueryError> {
        self.get(name).ok_or_else(|| {
            QueryError::decode(format!("The column name {} is not valid.", name))
        })
    }
}

/// Called once per row, in result order. `Break` stops reading; the
/// remaining rows are discarded by the connector.
pub type RowVisitor<'a> = dyn FnMut(Row) -> Result<ControlFlow<()>, QueryError> + Send + 'a;

#[async_trait]
pub trait Connector: Send + Sync {
    /// Runs a statement and discards any result.
    async fn execute(&self, query: &str) -> Result<(), QueryError>;

    /// Streams the rows of `query` into `visit`. Returns how many rows were visited.
    async fn for_each_row(&self, query: &str, visit: &mut RowVisitor<'_>)
    -> Result<usize, QueryError>;

    /// Settings applied when the session was opened.
    fn session(&self) -> SessionSettings;

    /// Releases the session. Later calls fail with a `Closed` query error.
    async fn close(&self) -> Result<(), FlightError>;

    fn engine_name(&self) -> &str;

    /// Collects every row of `query`.
    async fn fetch_all(&self, query: &str) -> Result<Vec<Row>, QueryError> {
        let mut rows = Vec::new();
        self.for_each_row(query, &mut |row| {
            rows.push(row);
            Ok(ControlFlow::Continue(()))
        })
        .await?;
        Ok(rows)
    }
}
