// flightapp/src/commands/report.rs
//
// USE CASE: Run the canned flight reports.

use std::io::{self, Write};

use flightapp_core::FlightQueries;
use flightapp_core::application::report::{
    collect_flight_report, print_fifth_slowest, print_flight_count, print_flight_report,
    print_flights_by_day,
};

use crate::cli::OutputFormat;

/// Which part of the report to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    All,
    Count,
    ByDay,
    FifthSlowest,
}

pub async fn execute(
    queries: &FlightQueries,
    section: Section,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut out = io::stdout();

    match (section, format) {
        (Section::All, OutputFormat::Json) => {
            let report = collect_flight_report(queries).await;
            writeln!(out, "{}", report.to_json()?)?;
        }
        (Section::All, OutputFormat::Text) => print_flight_report(queries, &mut out).await?,
        (Section::Count, _) => {
            print_flight_count(queries, &mut out).await?;
        }
        (Section::ByDay, _) => print_flights_by_day(queries, &mut out).await?,
        (Section::FifthSlowest, _) => {
            print_fifth_slowest(queries, &mut out).await?;
        }
    }

    out.flush()?;
    Ok(())
}
