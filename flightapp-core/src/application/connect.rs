// flightapp-core/src/application/connect.rs

use tracing::{info, instrument};

use crate::domain::config::{DbConnConfig, Engine};
use crate::domain::session::SessionSettings;
use crate::infrastructure::adapters::{DuckDBConnector, SqlServerConnector};
use crate::infrastructure::error::ConnectionError;
use crate::ports::connector::Connector;

/// Opens the single session used by the reports, with auto-commit on and
/// serializable isolation.
///
/// For DuckDB the `database_name` property is an existing database file,
/// opened read-only (`:memory:` for a throwaway database).
#[instrument(skip(config))]
pub async fn open_connection(
    config: &DbConnConfig,
    engine: Engine,
) -> Result<Box<dyn Connector>, ConnectionError> {
    let session = SessionSettings::DEFAULT;
    let connector: Box<dyn Connector> = match engine {
        Engine::SqlServer => {
            info!(target_url = %config.redacted_url(), "Opening SQL Server connection");
            Box::new(SqlServerConnector::connect(config, session).await?)
        }
        Engine::DuckDB => {
            info!(path = %config.database_name, "Opening DuckDB database");
            Box::new(DuckDBConnector::read_only(&config.database_name, session)?)
        }
    };
    Ok(connector)
}
