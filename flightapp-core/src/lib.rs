// flightapp-core/src/lib.rs

#![allow(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports: the Connector contract and backend-neutral rows.
pub mod ports;

// 2. Domain: config record, session settings, canned flight queries.
// Depends on nothing but the ports.
pub mod domain;

// 3. Infrastructure: properties loader, DuckDB and SQL Server adapters.
pub mod infrastructure;

// 4. Application: connection opener, query runners, report printers.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::{FlightQueries, open_connection};
pub use domain::{DbConnConfig, Engine};
pub use error::FlightError;
