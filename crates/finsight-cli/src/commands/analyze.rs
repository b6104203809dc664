//! Analyze command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use finsight_core::analysis::minor_to_display_currency as inr;
use finsight_core::config::validate_ratio;
use finsight_core::import::{load_file, parse_timestamp};
use finsight_core::{
    AnalysisEngine, AnalysisOptions, AnalysisReport, AnalysisResult, Clock, FixedClock,
    SystemClock,
};
use tracing::info;

use super::load_config;
use crate::cli::AnalyzeArgs;

fn parse_flag(value: Option<&str>, flag: &str) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|v| {
            parse_timestamp(v)
                .with_context(|| format!("Invalid --{} (use YYYY-MM-DD or RFC 3339)", flag))
        })
        .transpose()
}

/// Turn command-line flags into per-call analysis options
pub fn build_options(args: &AnalyzeArgs) -> Result<AnalysisOptions> {
    let discretionary_high_ratio = args
        .discretionary_ratio
        .map(validate_ratio)
        .transpose()
        .context("Invalid --discretionary-ratio")?;

    Ok(AnalysisOptions {
        start: parse_flag(args.start.as_deref(), "start")?,
        end: parse_flag(args.end.as_deref(), "end")?,
        surplus_invest_threshold_minor: args.invest_threshold,
        discretionary_high_ratio,
    })
}

/// Load config and transactions, then analyze
pub fn run_analysis(config_path: Option<&Path>, args: &AnalyzeArgs) -> Result<AnalysisResult> {
    let config = load_config(config_path)?;
    let options = build_options(args)?;

    let clock: Arc<dyn Clock> = match parse_flag(args.as_of.as_deref(), "as-of")? {
        Some(instant) => Arc::new(FixedClock::new(instant)),
        None => Arc::new(SystemClock),
    };

    let transactions = load_file(&args.file)
        .with_context(|| format!("Failed to load transactions from {}", args.file.display()))?;
    info!(count = transactions.len(), "Loaded transactions");

    let engine = AnalysisEngine::with_clock(config, clock);
    Ok(engine.analyze(&transactions, &options))
}

fn inr_unsigned(amount_minor: u64) -> String {
    inr(i64::try_from(amount_minor).unwrap_or(i64::MAX))
}

/// Human-readable report
pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let date = |d: DateTime<Utc>| d.format("%Y-%m-%d").to_string();

    out.push_str(&format!(
        "\n📊 Analysis {} → {}\n",
        date(result.window.start),
        date(result.window.end)
    ));
    out.push_str("   ─────────────────────────────\n");
    out.push_str(&format!("   Income:        {}\n", inr_unsigned(result.income)));
    out.push_str(&format!("   Expenses:      {}\n", inr_unsigned(result.expense)));
    out.push_str(&format!("   Net:           {}\n", inr(result.net)));
    out.push_str(&format!("   Essentials:    {}\n", inr_unsigned(result.essentials)));
    out.push_str(&format!("   Discretionary: {}\n", inr_unsigned(result.discretionary)));

    out.push_str("\n💡 Insights\n");
    for insight in &result.insights {
        out.push_str(&format!("   • {}\n", insight));
    }

    if result.recommendations.is_empty() {
        out.push_str("\n✅ No recommendations - spending looks balanced.\n");
    } else {
        out.push_str("\n🎯 Recommendations\n");
        for rec in &result.recommendations {
            out.push_str(&format!("   • {}\n", rec));
        }
    }

    out
}

pub fn cmd_analyze(config_path: Option<&Path>, args: &AnalyzeArgs) -> Result<()> {
    let result = run_analysis(config_path, args)?;

    if args.json {
        let report = AnalysisReport::from(&result);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&result));
    }

    Ok(())
}
