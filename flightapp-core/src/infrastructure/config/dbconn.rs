// flightapp-core/src/infrastructure/config/dbconn.rs

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use super::properties::parse_properties;
use crate::domain::config::DbConnConfig;
use crate::infrastructure::error::ConfigError;

/// Default file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dbconn.properties";

pub const SERVER_URL_KEY: &str = "flightapp.server_url";
pub const DATABASE_NAME_KEY: &str = "flightapp.database_name";
pub const USERNAME_KEY: &str = "flightapp.username";
pub const PASSWORD_KEY: &str = "flightapp.password";
/// Optional. Only a case-insensitive `true` disables certificate validation.
pub const TRUST_SERVER_CERTIFICATE_KEY: &str = "flightapp.trust_server_certificate";

// (property key, environment override)
const OVERRIDES: [(&str, &str); 4] = [
    (SERVER_URL_KEY, "FLIGHTAPP_SERVER_URL"),
    (DATABASE_NAME_KEY, "FLIGHTAPP_DATABASE_NAME"),
    (USERNAME_KEY, "FLIGHTAPP_USERNAME"),
    (PASSWORD_KEY, "FLIGHTAPP_PASSWORD"),
];

#[instrument]
pub fn load_dbconn_config(path: &Path) -> Result<DbConnConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound(path.display().to_string()));
    }
    info!(path = ?path, "Loading connection properties");

    let content = fs::read_to_string(path)?;
    let mut props = parse_properties(&content);

    // The file must be complete on its own; env vars only replace values.
    let config = config_from_properties(&props)?;
    apply_env_overrides(&mut props, |key| std::env::var(key).ok());
    let overridden = config_from_properties(&props)?;

    if overridden != config {
        info!("Connection properties overridden via ENV");
    }
    Ok(overridden)
}

pub fn config_from_properties(props: &HashMap<String, String>) -> Result<DbConnConfig, ConfigError> {
    let get = |key: &str| {
        props
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    };

    Ok(DbConnConfig {
        server_url: get(SERVER_URL_KEY)?,
        database_name: get(DATABASE_NAME_KEY)?,
        username: get(USERNAME_KEY)?,
        password: get(PASSWORD_KEY)?,
        trust_server_certificate: props
            .get(TRUST_SERVER_CERTIFICATE_KEY)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
    })
}

fn apply_env_overrides<F>(props: &mut HashMap<String, String>, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for (key, var) in OVERRIDES {
        if let Some(value) = lookup(var) {
            props.insert(key.to_string(), value);
        }
    }
}
