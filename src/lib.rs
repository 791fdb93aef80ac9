//! Price Watch - cross-shop product price comparison
//!
//! Scrapes product pages, cleans their prices, compares them across sources
//! and raises an alert when the spread gets too wide.

// Module declarations
pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use commands::Cli;
use infrastructure::{AppConfig, init_logging_with_config};

/// Parse the command line, set up logging and run the selected command
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load_default(),
    }
    .context("Failed to load configuration")?;

    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    init_logging_with_config(&config.logging).context("Failed to initialize logging")?;
    info!("🚀 price-watch {} starting", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(commands::execute(cli, config))
}
