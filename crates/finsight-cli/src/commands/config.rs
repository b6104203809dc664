//! Config command implementations and the shared config loader

use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::analysis::{classify, minor_to_display_currency};
use finsight_core::{AnalysisConfig, ConfigSource};
use tracing::info;

/// Load the analysis config, logging where it came from
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let (config, source) =
        AnalysisConfig::load(path).context("Failed to load analysis config")?;
    match &source {
        ConfigSource::Embedded => info!("Using default analysis config"),
        ConfigSource::File(p) => info!(path = %p.display(), "Using analysis config file"),
    }
    Ok(config)
}

pub fn cmd_config(path: Option<&Path>) -> Result<()> {
    let (config, source) =
        AnalysisConfig::load(path).context("Failed to load analysis config")?;

    println!();
    println!("⚙️  Analysis Config ({})", source);
    println!("   ─────────────────────────────");
    println!(
        "   Invest threshold:        {} ({} paise)",
        minor_to_display_currency(config.thresholds.surplus_invest_threshold_minor),
        config.thresholds.surplus_invest_threshold_minor
    );
    println!(
        "   High discretionary ratio: {:.0}%",
        config.thresholds.discretionary_high_ratio * 100.0
    );
    println!();
    println!(
        "   Essential:     {}",
        config.vocabulary.essential().collect::<Vec<_>>().join(", ")
    );
    println!(
        "   Discretionary: {}",
        config.vocabulary.discretionary().collect::<Vec<_>>().join(", ")
    );
    if source == ConfigSource::Embedded {
        if let Some(default_path) = finsight_core::config::default_config_path() {
            println!();
            println!("   💡 Tip: Override at {}", default_path.display());
        }
    }
    println!();

    Ok(())
}

pub fn cmd_classify(path: Option<&Path>, categories: &[String]) -> Result<()> {
    let config = load_config(path)?;

    for category in categories {
        let class = classify(Some(category), &config.vocabulary);
        println!("   {:<20} {}", category, class);
    }

    Ok(())
}
