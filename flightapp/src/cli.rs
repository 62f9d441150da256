// flightapp/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use flightapp_core::Engine;
use flightapp_core::infrastructure::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "flightapp")]
#[command(about = "Runs the canned flight reports against the configured database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Connection properties file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Database backend
    #[arg(
        long,
        global = true,
        value_enum,
        env = "FLIGHTAPP_ENGINE",
        default_value_t = Engine::SqlServer
    )]
    pub engine: Engine,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Prints all three reports (default)
    Report {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Prints the number of rows in the Flights table
    Count,

    /// Prints the number of flights per weekday
    ByDay,

    /// Prints the carrier ranked fifth by total departure delay
    FifthSlowest,

    /// Executes a raw SQL query (Ad-hoc) and prints the rows as a table
    Query { query: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// No subcommand means the full report.
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Report {
            format: OutputFormat::Text,
        })
    }
}
