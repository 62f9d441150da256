// flightapp-core/src/application/mod.rs

pub mod connect;
pub mod flights;
pub mod report;

#[cfg(test)]
pub(crate) mod test_support;

// --- RE-EXPORTS (FACADE PATTERN) ---
pub use connect::open_connection;
pub use flights::FlightQueries;
pub use report::{
    collect_flight_report, print_fifth_slowest, print_flight_count, print_flight_report,
    print_flights_by_day,
};
