pub mod dbconn;
pub mod properties;

pub use dbconn::{DEFAULT_CONFIG_FILE, load_dbconn_config};
pub use properties::parse_properties;
