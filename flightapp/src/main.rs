// flightapp/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::report::Section;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing), on stderr so stdout only carries the report.
    // RUST_LOG=debug flightapp ... to see each query with its timing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command_or_default();
    tracing::debug!(config = ?cli.config, engine = %cli.engine, ?command, "Starting flightapp");

    // A. Config + connection: any failure here is fatal.
    let queries = match commands::connect(&cli.config, cli.engine).await {
        Ok(queries) => queries,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    };

    // B. Run the command. `queries` is dropped (and the session released) on every path.
    let result = match command {
        Commands::Report { format } => {
            commands::report::execute(&queries, Section::All, format).await
        }
        Commands::Count => {
            commands::report::execute(&queries, Section::Count, cli::OutputFormat::Text).await
        }
        Commands::ByDay => {
            commands::report::execute(&queries, Section::ByDay, cli::OutputFormat::Text).await
        }
        Commands::FifthSlowest => {
            commands::report::execute(&queries, Section::FifthSlowest, cli::OutputFormat::Text)
                .await
        }
        Commands::Query { query } => commands::query::execute(&queries, &query)
            .await
            .map_err(anyhow::Error::from),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        drop(queries);
        std::process::exit(1);
    }

    // C. Always close the connection when done.
    commands::close(queries).await
}
