//! Analysis engine - runs the stages in order
//!
//! window -> filter -> classify/aggregate -> rules. Every stage is a pure
//! function; the engine only owns the configuration and the clock.

use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::{AnalysisConfig, Thresholds};
use crate::models::{AnalysisOptions, AnalysisResult, Transaction};

use super::aggregate::aggregate;
use super::filter::filter_in_window;
use super::rules::{evaluate, insights};
use super::window::resolve_window;

/// Stateless transaction analyzer
///
/// Cheap to clone and safe to share across threads; each call to
/// [`AnalysisEngine::analyze`] is independent.
#[derive(Clone)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    clock: Arc<dyn Clock>,
}

impl AnalysisEngine {
    /// Engine backed by the system clock
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Engine with an explicit clock (for tests and reproducible runs)
    pub fn with_clock(config: AnalysisConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, transactions: &[Transaction], options: &AnalysisOptions) -> AnalysisResult {
        analyze_transactions(transactions, options, &self.config, self.clock.as_ref())
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl std::fmt::Debug for AnalysisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Thresholds for one call: per-call overrides on top of the config
pub fn effective_thresholds(config: &AnalysisConfig, options: &AnalysisOptions) -> Thresholds {
    Thresholds {
        surplus_invest_threshold_minor: options
            .surplus_invest_threshold_minor
            .unwrap_or(config.thresholds.surplus_invest_threshold_minor),
        discretionary_high_ratio: options
            .discretionary_high_ratio
            .unwrap_or(config.thresholds.discretionary_high_ratio),
    }
}

/// Analyze `transactions` over the resolved window
///
/// Defined for every input: an empty list or an inverted window yields
/// zero totals and the two insight lines.
pub fn analyze_transactions(
    transactions: &[Transaction],
    options: &AnalysisOptions,
    config: &AnalysisConfig,
    clock: &dyn Clock,
) -> AnalysisResult {
    let window = resolve_window(options.start, options.end, clock);
    let thresholds = effective_thresholds(config, options);

    let in_range = filter_in_window(transactions, &window);
    debug!(
        start = %window.start,
        end = %window.end,
        total = transactions.len(),
        in_range = in_range.len(),
        "Resolved analysis window"
    );

    let totals = aggregate(in_range.iter().copied(), &config.vocabulary);
    debug!(
        income = totals.income,
        expense = totals.expense,
        essentials = totals.essentials,
        discretionary = totals.discretionary,
        "Aggregated transactions"
    );

    let insights = insights(&totals, &window);
    let recommendations = evaluate(&totals, &thresholds);
    for rec in &recommendations {
        debug!(rule = rec.rule.as_str(), "Recommendation fired");
    }

    AnalysisResult {
        window,
        income: totals.income,
        expense: totals.expense,
        net: totals.net(),
        essentials: totals.essentials,
        discretionary: totals.discretionary,
        insights,
        recommendations: recommendations.into_iter().map(|r| r.message).collect(),
    }
}
