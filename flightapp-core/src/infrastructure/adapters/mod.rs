pub mod duckdb;
pub mod sqlserver;

pub use self::duckdb::DuckDBConnector;
pub use self::sqlserver::SqlServerConnector;
