pub mod config;
pub mod error;
pub mod flights;
pub mod session;

// Re-exports to keep imports short elsewhere
pub use config::{DbConnConfig, Engine};
pub use error::{QueryError, QueryErrorKind};
pub use flights::{DayCount, FlightReport};
pub use session::{IsolationLevel, SessionSettings};
