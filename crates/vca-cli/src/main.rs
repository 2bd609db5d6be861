//! Virtual CA CLI - Command-line interface
//!
//! Runs the query-resolution pipeline from the terminal.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Logs go to stderr so answers and JSON stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Runtime::new()?;

    // Failures are already reported by the command
    if runtime.block_on(commands::execute(cli)).is_err() {
        std::process::exit(1);
    }

    Ok(())
}
