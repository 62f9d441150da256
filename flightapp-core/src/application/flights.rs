// flightapp-core/src/application/flights.rs

use std::ops::ControlFlow;
use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::domain::config::{DbConnConfig, Engine};
use crate::domain::error::QueryError;
use crate::domain::flights::{
    DELAY_RANKING_QUERY, DayCount, FIFTH_SLOWEST_INDEX, FLIGHT_COUNT_QUERY, FLIGHTS_BY_DAY_QUERY,
    NULL_TEXT,
};
use crate::error::FlightError;
use crate::infrastructure::error::ConnectionError;
use crate::ports::connector::{Connector, Row, RowVisitor};

use super::connect::open_connection;

/// Owns the one connection the reports run on.
///
/// Call [`close`](Self::close) on the normal path. Any other exit drops the
/// connector, which releases the session.
pub struct FlightQueries {
    connector: Box<dyn Connector>,
}

impl FlightQueries {
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self { connector }
    }

    pub async fn open(config: &DbConnConfig, engine: Engine) -> Result<Self, ConnectionError> {
        Ok(Self::new(open_connection(config, engine).await?))
    }

    pub fn connector(&self) -> &dyn Connector {
        self.connector.as_ref()
    }

    /// Number of rows in `Flights`.
    pub async fn flight_count(&self) -> Result<i64, QueryError> {
        let mut count = None;
        self.run(FLIGHT_COUNT_QUERY, &mut |row| {
            count = Some(row.get_i64("count")?);
            Ok(ControlFlow::Break(()))
        })
        .await?;
        count.ok_or_else(|| QueryError::shape("The count query returned no row."))
    }

    /// Streams `(day, count)` groups to `on_day` in the order the engine returns them.
    /// Rows handed over before a failure stay handed over.
    pub async fn for_each_day_count<F>(&self, mut on_day: F) -> Result<usize, QueryError>
    where
        F: FnMut(DayCount) + Send,
    {
        self.run(FLIGHTS_BY_DAY_QUERY, &mut |row| {
            on_day(DayCount {
                day: text_or_null(&row, "day")?,
                count: row.get_i64("count")?,
            });
            Ok(ControlFlow::Continue(()))
        })
        .await
    }

    pub async fn flights_by_day(&self) -> Result<Vec<DayCount>, QueryError> {
        let mut days = Vec::new();
        self.for_each_day_count(|day| days.push(day)).await?;
        Ok(days)
    }

    /// Carrier name of the fifth row of the delay ranking, `None` with fewer
    /// than five rows. Rows after the fifth are never read.
    pub async fn fifth_slowest_airline(&self) -> Result<Option<String>, QueryError> {
        let mut index = 0;
        let mut name = None;
        self.run(DELAY_RANKING_QUERY, &mut |row| {
            if index == FIFTH_SLOWEST_INDEX {
                name = Some(text_or_null(&row, "name")?);
                return Ok(ControlFlow::Break(()));
            }
            index += 1;
            Ok(ControlFlow::Continue(()))
        })
        .await?;
        Ok(name)
    }

    /// Ad-hoc query over the same session.
    pub async fn query(&self, sql: &str) -> Result<Vec<Row>, QueryError> {
        let mut rows = Vec::new();
        self.run(sql, &mut |row| {
            rows.push(row);
            Ok(ControlFlow::Continue(()))
        })
        .await?;
        Ok(rows)
    }

    /// Releases the session. The handle is consumed so no query can follow.
    pub async fn close(self) -> Result<(), FlightError> {
        self.connector.close().await
    }

    #[instrument(skip(self, visit), fields(engine = self.connector.engine_name(), query.len = query.len()))]
    async fn run(&self, query: &str, visit: &mut RowVisitor<'_>) -> Result<usize, QueryError> {
        let start = Instant::now();
        debug!("⚡ Executing Query: {}", query);

        let result = self.connector.for_each_row(query, visit).await;
        let duration = start.elapsed();

        match &result {
            Ok(rows) => debug!(rows, "✅ Query finished in {:.2?}", duration),
            Err(e) => error!(kind = %e.kind, "❌ Query failed after {:.2?}: {}", duration, e),
        }
        result
    }
}

/// Text columns of the reports print a NULL as `null`.
fn text_or_null(row: &Row, name: &str) -> Result<String, QueryError> {
    Ok(row
        .get_opt_string(name)?
        .unwrap_or_else(|| NULL_TEXT.to_string()))
}
