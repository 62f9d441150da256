// flightapp-core/src/application/test_support.rs
//
// DuckDB fixtures shaped like the flights dataset.

use async_trait::async_trait;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::error::QueryError;
use crate::domain::session::SessionSettings;
use crate::error::FlightError;
use crate::infrastructure::adapters::DuckDBConnector;
use crate::ports::connector::{Connector, Row, RowVisitor};

use super::flights::FlightQueries;

pub const SCHEMA: &str = "
    CREATE TABLE Carriers (cid VARCHAR, name VARCHAR);
    CREATE TABLE Weekdays (did INTEGER, day_of_week VARCHAR);
    CREATE TABLE Flights (
        fid INTEGER,
        day_of_week_id INTEGER,
        carrier_id VARCHAR,
        origin_city VARCHAR,
        departure_delay INTEGER
    );
    INSERT INTO Weekdays VALUES
        (1, 'Monday'), (2, 'Tuesday'), (3, 'Wednesday'), (4, 'Thursday'),
        (5, 'Friday'), (6, 'Saturday'), (7, 'Sunday');
";

/// 100 flights over 7 weekdays and 6 carriers, one origin city per carrier.
/// Total delay grows with the carrier index, so `Carrier 1` ranks fifth.
pub const HUNDRED_FLIGHTS: &str = "
    INSERT INTO Carriers SELECT concat('C', i), concat('Carrier ', i) FROM range(6) t(i);
    INSERT INTO Flights
        SELECT i, (i % 7) + 1, concat('C', i % 6), concat('Origin ', i % 6), ((i % 6) + 1) * 3
        FROM range(100) t(i);
";

/// `groups` carriers with one flight each; `Carrier 0` has the largest delay,
/// so the ranking reads `Carrier 0`, `Carrier 1`, ...
pub fn ranked_carriers(groups: usize) -> String {
    format!(
        "INSERT INTO Carriers SELECT concat('C', i), concat('Carrier ', i) FROM range({n}) t(i);
         INSERT INTO Flights
             SELECT i, 1, concat('C', i), concat('City ', i), ({n} - i) * 10
             FROM range({n}) t(i);",
        n = groups
    )
}

pub async fn seeded(data: &str) -> anyhow::Result<FlightQueries> {
    let connector = DuckDBConnector::new(":memory:")?;
    connector.execute(SCHEMA).await?;
    connector.execute(data).await?;
    Ok(FlightQueries::new(Box::new(connector)))
}

/// Wraps a connector and counts the rows it actually hands out.
pub struct CountingConnector {
    pub inner: DuckDBConnector,
    pub rows_read: Arc<AtomicUsize>,
}

#[async_trait]
impl Connector for CountingConnector {
    async fn execute(&self, query: &str) -> Result<(), QueryError> {
        self.inner.execute(query).await
    }

    async fn for_each_row(
        &self,
        query: &str,
        visit: &mut RowVisitor<'_>,
    ) -> Result<usize, QueryError> {
        let visited = self.inner.for_each_row(query, visit).await?;
        self.rows_read.fetch_add(visited, Ordering::SeqCst);
        Ok(visited)
    }

    fn session(&self) -> SessionSettings {
        self.inner.session()
    }

    async fn close(&self) -> Result<(), FlightError> {
        self.inner.close().await
    }

    fn engine_name(&self) -> &str {
        "counting"
    }
}

/// Hands out the first `rows_before_failure` rows of each result, then fails
/// the way a dropped connection does halfway through a result set.
pub struct FailingMidStream {
    pub inner: DuckDBConnector,
    pub rows_before_failure: usize,
}

pub const MID_STREAM_FAILURE: &str = "Connection reset while reading the result set.";

#[async_trait]
impl Connector for FailingMidStream {
    async fn execute(&self, query: &str) -> Result<(), QueryError> {
        self.inner.execute(query).await
    }

    async fn for_each_row(
        &self,
        query: &str,
        visit: &mut RowVisitor<'_>,
    ) -> Result<usize, QueryError> {
        let limit = self.rows_before_failure;
        let mut handed_out = 0;
        let mut cut_off = |row: Row| {
            if handed_out == limit {
                return Ok(ControlFlow::Break(()));
            }
            handed_out += 1;
            visit(row)
        };
        self.inner.for_each_row(query, &mut cut_off).await?;

        if handed_out == limit {
            return Err(QueryError::execution(MID_STREAM_FAILURE));
        }
        Ok(handed_out)
    }

    fn session(&self) -> SessionSettings {
        self.inner.session()
    }

    async fn close(&self) -> Result<(), FlightError> {
        self.inner.close().await
    }

    fn engine_name(&self) -> &str {
        "failing"
    }
}
