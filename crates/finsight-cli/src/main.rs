//! Finsight CLI - Personal finance transaction analyzer
//!
//! Usage:
//!   finsight analyze --file txns.json     Analyze the last 30 days
//!   finsight config                       Show thresholds and categories
//!   finsight classify dining rent         Show category classes

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze(args) => commands::cmd_analyze(config_path, &args),
        Commands::Config => commands::cmd_config(config_path),
        Commands::Classify { categories } => commands::cmd_classify(config_path, &categories),
    }
}
