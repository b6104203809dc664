//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Finsight - Turn your transactions into insights
#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Personal finance transaction analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analysis config file (defaults to ~/.local/share/finsight/config/analysis.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze transactions and print insights and recommendations
    Analyze(AnalyzeArgs),

    /// Show the effective analysis configuration
    Config,

    /// Show how categories are classified
    Classify {
        /// Category names to classify
        #[arg(required = true)]
        categories: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Transactions file (.json or .csv)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Window start (YYYY-MM-DD or RFC 3339); defaults to 30 days before the end
    #[arg(long)]
    pub start: Option<String>,

    /// Window end (YYYY-MM-DD or RFC 3339); defaults to now
    #[arg(long)]
    pub end: Option<String>,

    /// Treat this instant as "now" for reproducible runs
    #[arg(long)]
    pub as_of: Option<String>,

    /// Override the invest threshold (in paise)
    #[arg(long)]
    pub invest_threshold: Option<i64>,

    /// Override the high discretionary ratio (0.0 - 1.0)
    #[arg(long)]
    pub discretionary_ratio: Option<f64>,

    /// Print the JSON report instead of text
    #[arg(long)]
    pub json: bool,
}
