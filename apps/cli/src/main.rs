//! fhir-primconv - FHIR primitive conversion from the command line
//!
//! Reads a document literal or wire JSON, converts it with `ferrum-primitives`
//! and prints the result on stdout.

mod commands;
mod config;
mod logging;

use anyhow::Context;
use clap::Parser;

use crate::commands::Cli;
use crate::config::CliConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    logging::init_logging(&config.logging).context("Failed to initialize logging")?;
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        command = ?cli.command,
        "Starting fhir-primconv"
    );

    let outcome = commands::run(&cli.command, &config.output)?;
    println!("{}", outcome.output);

    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}
