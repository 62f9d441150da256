// flightapp-core/src/infrastructure/adapters/sqlserver.rs

use async_trait::async_trait;
use futures::TryStreamExt;
use tiberius::{Client, ColumnData, Config};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info, instrument};

use crate::domain::config::DbConnConfig;
use crate::domain::error::QueryError;
use crate::domain::session::SessionSettings;
use crate::error::FlightError;
use crate::infrastructure::error::ConnectionError;
use crate::ports::connector::{Connector, Row, RowVisitor, Value};

type SqlClient = Client<Compat<TcpStream>>;

/// SQL Server session over TDS, opened from the JDBC-style target string.
pub struct SqlServerConnector {
    client: Mutex<Option<SqlClient>>,
    session: SessionSettings,
}

impl SqlServerConnector {
    #[instrument(skip(config), fields(target_url = %config.redacted_url()))]
    pub async fn connect(
        config: &DbConnConfig,
        session: SessionSettings,
    ) -> Result<Self, ConnectionError> {
        let target = config.redacted_url();
        let handshake = |source| ConnectionError::SqlServer {
            target: target.clone(),
            source,
        };

        // Certificate validation stays on unless the target carries trustServerCertificate=true.
        let tds = Config::from_jdbc_string(&config.jdbc_url()).map_err(handshake)?;

        let tcp = TcpStream::connect(tds.get_addr()).await?;
        tcp.set_nodelay(true)?;

        let mut client = Client::connect(tds, tcp.compat_write())
            .await
            .map_err(handshake)?;

        // Session-level SETs must go out as a plain batch: inside sp_executesql
        // they would be reverted when the call returns.
        client
            .simple_query(session.to_tsql())
            .await
            .map_err(handshake)?
            .into_results()
            .await
            .map_err(handshake)?;
        info!(isolation = %session.isolation, auto_commit = session.auto_commit, "Connected to SQL Server");

        Ok(Self {
            client: Mutex::new(Some(client)),
            session,
        })
    }
}

fn tds_err(e: tiberius::error::Error) -> QueryError {
    QueryError::execution(e.to_string())
}

fn to_value(data: ColumnData<'static>) -> Value {
    match data {
        ColumnData::U8(v) => v.map_or(Value::Null, |i| Value::Integer(i64::from(i))),
        ColumnData::I16(v) => v.map_or(Value::Null, |i| Value::Integer(i64::from(i))),
        ColumnData::I32(v) => v.map_or(Value::Null, |i| Value::Integer(i64::from(i))),
        ColumnData::I64(v) => v.map_or(Value::Null, Value::Integer),
        ColumnData::F32(v) => v.map_or(Value::Null, |f| Value::Real(f64::from(f))),
        ColumnData::F64(v) => v.map_or(Value::Null, Value::Real),
        ColumnData::Bit(v) => v.map_or(Value::Null, |b| Value::Integer(i64::from(b))),
        ColumnData::String(v) => v.map_or(Value::Null, |s| Value::Text(s.into_owned())),
        ColumnData::Numeric(v) => v.map_or(Value::Null, |n| {
            if n.scale() == 0 {
                match i64::try_from(n.value()) {
                    Ok(i) => Value::Integer(i),
                    Err(_) => Value::Real(n.value() as f64),
                }
            } else {
                Value::Real(n.value() as f64 / 10f64.powi(i32::from(n.scale())))
            }
        }),
        other => Value::Text(format!("{:?}", other)),
    }
}

fn to_row(row: tiberius::Row) -> Row {
    let names: Vec<String> = row.columns().iter().map(|c| c.name().to_string()).collect();
    Row::new(names.into_iter().zip(row.into_iter().map(to_value)).collect())
}

#[async_trait]
impl Connector for SqlServerConnector {
    async fn execute(&self, query: &str) -> Result<(), QueryError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or_else(QueryError::closed)?;
        client
            .simple_query(query)
            .await
            .map_err(tds_err)?
            .into_results()
            .await
            .map_err(tds_err)?;
        Ok(())
    }

    async fn for_each_row(
        &self,
        query: &str,
        visit: &mut RowVisitor<'_>,
    ) -> Result<usize, QueryError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or_else(QueryError::closed)?;

        // Unread rows left in the stream are drained by the client before the next query.
        let mut stream = client
            .simple_query(query)
            .await
            .map_err(tds_err)?
            .into_row_stream();

        let mut visited = 0;
        while let Some(row) = stream.try_next().await.map_err(tds_err)? {
            visited += 1;
            if visit(to_row(row))?.is_break() {
                break;
            }
        }
        Ok(visited)
    }

    fn session(&self) -> SessionSettings {
        self.session
    }

    async fn close(&self) -> Result<(), FlightError> {
        if let Some(client) = self.client.lock().await.take() {
            client.close().await.map_err(|source| ConnectionError::SqlServer {
                target: "sqlserver".to_string(),
                source,
            })?;
            debug!("SQL Server session closed");
        }
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "sqlserver"
    }
}
