// flightapp-core/src/application/report.rs
//
// The three report sections. Query failures are not propagated here: the
// error message is written in place of the section and a sentinel stands in
// for the value, exactly as the report has always behaved.

use std::io::{self, Write};

use crate::domain::flights::{
    FAILED_COUNT, FlightReport, NO_RESULT, count_line, day_line, fifth_slowest_line,
};

use super::flights::FlightQueries;

/// Writes `Rows in Flights table: <n>`; `-1` after printing the error on failure.
pub async fn print_flight_count<W: Write>(queries: &FlightQueries, out: &mut W) -> io::Result<i64> {
    let count = match queries.flight_count().await {
        Ok(count) => count,
        Err(e) => {
            writeln!(out, "{}", e)?;
            FAILED_COUNT
        }
    };
    writeln!(out, "{}", count_line(count))?;
    Ok(count)
}

/// Writes one `Flights on <day>: <count>` line per row as it arrives.
/// On failure the error is written and the section ends; earlier lines stay.
pub async fn print_flights_by_day<W: Write + Send>(
    queries: &FlightQueries,
    out: &mut W,
) -> io::Result<()> {
    let mut write_err = None;
    let result = queries
        .for_each_day_count(|day| {
            if write_err.is_none() {
                if let Err(e) = writeln!(out, "{}", day_line(&day.day, day.count)) {
                    write_err = Some(e);
                }
            }
        })
        .await;

    if let Some(e) = write_err {
        return Err(e);
    }
    if let Err(e) = result {
        writeln!(out, "{}", e)?;
    }
    Ok(())
}

/// Writes `Fifth slowest airline is: <name>`. The name is empty with fewer than
/// five ranked rows, and `no result` after printing the error on failure.
pub async fn print_fifth_slowest<W: Write>(
    queries: &FlightQueries,
    out: &mut W,
) -> io::Result<String> {
    let name = match queries.fifth_slowest_airline().await {
        Ok(name) => name.unwrap_or_default(),
        Err(e) => {
            writeln!(out, "{}", e)?;
            NO_RESULT.to_string()
        }
    };
    writeln!(out, "{}", fifth_slowest_line(&name))?;
    Ok(name)
}

/// All three sections, in order, on the same session.
pub async fn print_flight_report<W: Write + Send>(
    queries: &FlightQueries,
    out: &mut W,
) -> io::Result<()> {
    print_flight_count(queries, out).await?;
    print_flights_by_day(queries, out).await?;
    print_fifth_slowest(queries, out).await?;
    Ok(())
}

/// Structured variant used for JSON output: failures become `None` plus a message.
pub async fn collect_flight_report(queries: &FlightQueries) -> FlightReport {
    let mut report = FlightReport::default();

    match queries.flight_count().await {
        Ok(count) => report.total_flights = Some(count),
        Err(e) => report.errors.push(e.to_string()),
    }
    match queries.flights_by_day().await {
        Ok(days) => report.by_day = Some(days),
        Err(e) => report.errors.push(e.to_string()),
    }
    match queries.fifth_slowest_airline().await {
        Ok(name) => report.fifth_slowest_airline = Some(name.unwrap_or_default()),
        Err(e) => report.errors.push(e.to_string()),
    }

    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        FailingMidStream, HUNDRED_FLIGHTS, MID_STREAM_FAILURE, SCHEMA, ranked_carriers, seeded,
    };
    use crate::ports::connector::Connector;
    use crate::infrastructure::adapters::DuckDBConnector;
    use anyhow::Result;

    fn lines(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out).lines().map(str::to_string).collect()
    }

    async fn closed_queries() -> Result<FlightQueries> {
        let connector = DuckDBConnector::new(":memory:")?;
        let queries = FlightQueries::new(Box::new(connector));
        queries.connector().close().await?;
        Ok(queries)
    }

    #[tokio::test]
    async fn test_full_report() -> Result<()> {
        let queries = seeded(HUNDRED_FLIGHTS).await?;
        let mut out = Vec::new();
        print_flight_report(&queries, &mut out).await?;

        let lines = lines(&out);
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Rows in Flights table: 100");
        let day_total: i64 = lines[1..8]
            .iter()
            .map(|l| {
                assert!(l.starts_with("Flights on "));
                l.rsplit(": ").next().unwrap().parse::<i64>().unwrap()
            })
            .sum();
        assert_eq!(day_total, 100);
        assert_eq!(lines[8], "Fifth slowest airline is: Carrier 1");
        Ok(())
    }

    #[tokio::test]
    async fn test_count_failure_prints_error_and_minus_one() -> Result<()> {
        let queries = closed_queries().await?;
        let mut out = Vec::new();
        assert_eq!(print_flight_count(&queries, &mut out).await?, -1);
        assert_eq!(
            lines(&out),
            ["The connection is closed.", "Rows in Flights table: -1"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_by_day_failure_prints_only_the_error() -> Result<()> {
        let queries = closed_queries().await?;
        let mut out = Vec::new();
        print_flights_by_day(&queries, &mut out).await?;
        assert_eq!(lines(&out), ["The connection is closed."]);
        Ok(())
    }

    #[tokio::test]
    async fn test_by_day_lines_before_a_failure_stay_printed() -> Result<()> {
        let inner = DuckDBConnector::new(":memory:")?;
        inner.execute(SCHEMA).await?;
        inner.execute(HUNDRED_FLIGHTS).await?;
        let queries = FlightQueries::new(Box::new(FailingMidStream {
            inner,
            rows_before_failure: 3,
        }));

        let mut out = Vec::new();
        print_flights_by_day(&queries, &mut out).await?;

        let lines = lines(&out);
        assert_eq!(lines.len(), 4);
        for line in &lines[..3] {
            assert!(line.starts_with("Flights on "), "unexpected line: {line}");
        }
        assert_eq!(lines[3], MID_STREAM_FAILURE);
        Ok(())
    }

    #[tokio::test]
    async fn test_null_text_prints_as_null() -> Result<()> {
        let queries = seeded(&ranked_carriers(6)).await?;
        queries
            .connector()
            .execute(
                "UPDATE Carriers SET name = NULL WHERE cid = 'C4';
                 UPDATE Weekdays SET day_of_week = NULL WHERE did = 1;",
            )
            .await?;

        let mut out = Vec::new();
        print_flights_by_day(&queries, &mut out).await?;
        assert_eq!(print_fifth_slowest(&queries, &mut out).await?, "null");
        assert_eq!(
            lines(&out),
            ["Flights on null: 6", "Fifth slowest airline is: null"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_fifth_slowest_sentinels() -> Result<()> {
        let mut out = Vec::new();
        let short = seeded(&ranked_carriers(4)).await?;
        assert_eq!(print_fifth_slowest(&short, &mut out).await?, "");

        let failed = closed_queries().await?;
        assert_eq!(print_fifth_slowest(&failed, &mut out).await?, "no result");

        assert_eq!(
            lines(&out),
            [
                "Fifth slowest airline is: ",
                "The connection is closed.",
                "Fifth slowest airline is: no result",
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_collect_report_records_failures() -> Result<()> {
        let queries = closed_queries().await?;
        let report = collect_flight_report(&queries).await;
        assert_eq!(report.total_flights, None);
        assert_eq!(report.by_day, None);
        assert_eq!(report.fifth_slowest_airline, None);
        assert_eq!(report.errors.len(), 3);

        let queries = seeded(&ranked_carriers(6)).await?;
        let report = collect_flight_report(&queries).await;
        assert!(report.is_complete());
        assert_eq!(report.total_flights, Some(6));
        assert_eq!(report.fifth_slowest_airline.as_deref(), Some("Carrier 4"));
        Ok(())
    }
}
