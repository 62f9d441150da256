// flightapp-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::ValueRef;
use duckdb::{AccessMode, Config, Connection};
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::domain::error::QueryError;
use crate::domain::session::{IsolationLevel, SessionSettings};
use crate::error::FlightError;
use crate::infrastructure::error::ConnectionError;
use crate::ports::connector::{Connector, Row, RowVisitor, Value};

/// Embedded engine. Transactions are auto-committed and serializable natively,
/// so only [`SessionSettings::DEFAULT`] can be honoured.
pub struct DuckDBConnector {
    conn: Arc<Mutex<Option<Connection>>>,
    session: SessionSettings,
}

impl DuckDBConnector {
    pub fn new(db_path: &str) -> Result<Self, ConnectionError> {
        Self::with_session(db_path, SessionSettings::DEFAULT)
    }

    pub fn with_session(db_path: &str, session: SessionSettings) -> Result<Self, ConnectionError> {
        Self::open(db_path, session, AccessMode::ReadWrite)
    }

    /// Opens an existing database file without write access, so a mistyped
    /// path fails instead of creating an empty database. `:memory:` stays
    /// read-write.
    pub fn read_only(db_path: &str, session: SessionSettings) -> Result<Self, ConnectionError> {
        Self::open(db_path, session, AccessMode::ReadOnly)
    }

    fn open(
        db_path: &str,
        session: SessionSettings,
        access: AccessMode,
    ) -> Result<Self, ConnectionError> {
        if !session.auto_commit {
            return Err(ConnectionError::UnsupportedSetting {
                engine: "duckdb".to_string(),
                setting: "auto-commit off".to_string(),
            });
        }
        if session.isolation != IsolationLevel::Serializable {
            return Err(ConnectionError::UnsupportedSetting {
                engine: "duckdb".to_string(),
                setting: format!("isolation level {}", session.isolation),
            });
        }

        let read_only = matches!(access, AccessMode::ReadOnly) && db_path != ":memory:";
        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(Config::default())?
        } else {
            Connection::open_with_flags(db_path, Config::default().access_mode(access)?)?
        };
        debug!(path = db_path, read_only, "🦆 DuckDB session opened");

        Ok(Self {
            conn: Arc::new(Mutex::new(Some(conn))),
            session,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Connection>>, QueryError> {
        self.conn
            .lock()
            .map_err(|_| QueryError::execution("DuckDB Mutex Poisoned"))
    }
}

fn duck_err(e: duckdb::Error) -> QueryError {
    QueryError::execution(e.to_string())
}

fn to_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Integer(i64::from(b)),
        ValueRef::TinyInt(i) => Value::Integer(i64::from(i)),
        ValueRef::SmallInt(i) => Value::Integer(i64::from(i)),
        ValueRef::Int(i) => Value::Integer(i64::from(i)),
        ValueRef::BigInt(i) => Value::Integer(i),
        // SUM over INTEGER yields HUGEINT
        ValueRef::HugeInt(i) => match i64::try_from(i) {
            Ok(v) => Value::Integer(v),
            Err(_) => Value::Real(i as f64),
        },
        ValueRef::UTinyInt(i) => Value::Integer(i64::from(i)),
        ValueRef::USmallInt(i) => Value::Integer(i64::from(i)),
        ValueRef::UInt(i) => Value::Integer(i64::from(i)),
        ValueRef::UBigInt(i) => match i64::try_from(i) {
            Ok(v) => Value::Integer(v),
            Err(_) => Value::Real(i as f64),
        },
        ValueRef::Float(f) => Value::Real(f64::from(f)),
        ValueRef::Double(f) => Value::Real(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        other => Value::Text(format!("{:?}", other)),
    }
}

#[async_trait]
impl Connector for DuckDBConnector {
    async fn execute(&self, query: &str) -> Result<(), QueryError> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or_else(QueryError::closed)?;
        conn.execute_batch(query).map_err(duck_err)
    }

    async fn for_each_row(
        &self,
        query: &str,
        visit: &mut RowVisitor<'_>,
    ) -> Result<usize, QueryError> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or_else(QueryError::closed)?;

        // Statement and result set are dropped on every return path.
        let mut stmt = conn.prepare(query).map_err(duck_err)?;
        let mut rows = stmt.query([]).map_err(duck_err)?;
        let names: Vec<String> = rows
            .as_ref()
            .map(|s| s.column_names().into_iter().map(|n| n.to_string()).collect())
            .unwrap_or_default();

        let mut visited = 0;
        while let Some(row) = rows.next().map_err(duck_err)? {
            let mut columns = Vec::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let value = row.get_ref(i).map_err(duck_err)?;
                columns.push((name.clone(), to_value(value)));
            }
            visited += 1;
            if visit(Row::new(columns))?.is_break() {
                break;
            }
        }
        Ok(visited)
    }

    fn session(&self) -> SessionSettings {
        self.session
    }

    async fn close(&self) -> Result<(), FlightError> {
        let mut guard = self.conn.lock().map_err(|_| {
            ConnectionError::Io(std::io::Error::other("DuckDB Mutex Poisoned"))
        })?;
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| ConnectionError::DuckDB(e))?;
            debug!("🦆 DuckDB session closed");
        }
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
