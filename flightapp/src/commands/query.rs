// flightapp/src/commands/query.rs
//
// USE CASE: Execute a raw SQL query (ad-hoc) on the configured connection.

use comfy_table::Table;
use flightapp_core::{FlightError, FlightQueries};

pub async fn execute(queries: &FlightQueries, query: &str) -> Result<(), FlightError> {
    let rows = queries.query(query).await?;

    let Some(first) = rows.first() else {
        println!("(0 rows)");
        return Ok(());
    };

    let mut table = Table::new();
    table.set_header(first.column_names());
    for row in &rows {
        table.add_row(row.columns().iter().map(|(_, value)| value.to_string()));
    }

    println!("{table}");
    println!("({} rows)", rows.len());
    Ok(())
}
