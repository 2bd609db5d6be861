//! Command implementations

mod ask;
mod doctor;
mod transcribe;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use vca_core::config::LayeredConfig;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    let mut config = LayeredConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.update_from_cli(cli.overrides());

    let result = match cli.command {
        Commands::Ask(args) => ask::execute(args, &config, &output, cli.explain).await,
        Commands::Transcribe(args) => transcribe::execute(args, &config, &output, cli.explain).await,
        Commands::Doctor(args) => doctor::execute(args, &config, &output),
    };

    if let Err(e) = &result {
        output.error(e);
    }
    result
}
