//! Insight lines and recommendation rules
//!
//! Rules run in a fixed order and are independent of each other, except that
//! the surplus and deficit rules form an if/else-if pair. The high
//! discretionary rule can fire alongside either of them.

use serde::Serialize;

use crate::config::Thresholds;
use crate::models::{saturating_i64, AnalysisWindow};

use super::aggregate::Totals;
use super::format::{minor_to_display_currency as inr, percent};

/// Essentials below this share of expense trigger the coverage rule (3/10)
const ESSENTIAL_COVERAGE_NUMERATOR: u128 = 3;
const ESSENTIAL_COVERAGE_DENOMINATOR: u128 = 10;

/// Which rule produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Discretionary ratio at or above the configured threshold
    HighDiscretionary,
    /// Net at or above the invest threshold
    InvestSurplus,
    /// Net below zero
    Overspending,
    /// Essentials under 30% of expense
    LowEssentials,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighDiscretionary => "high_discretionary",
            Self::InvestSurplus => "invest_surplus",
            Self::Overspending => "overspending",
            Self::LowEssentials => "low_essentials",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fired rule and its rendered message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub rule: RuleKind,
    pub message: String,
}

impl Recommendation {
    fn new(rule: RuleKind, message: String) -> Self {
        Self { rule, message }
    }
}

/// The two summary lines, always present
pub fn insights(totals: &Totals, window: &AnalysisWindow) -> Vec<String> {
    vec![
        format!(
            "Income: {}, Expenses: {}, Net: {} over {} days.",
            inr(saturating_i64(totals.income)),
            inr(saturating_i64(totals.expense)),
            inr(totals.net()),
            window.days_spanned()
        ),
        format!(
            "Essentials: {} ({}%), Discretionary: {} ({}%).",
            inr(saturating_i64(totals.essentials)),
            percent(totals.essentials_ratio()),
            inr(saturating_i64(totals.discretionary)),
            percent(totals.discretionary_ratio())
        ),
    ]
}

/// Evaluate every rule in order
pub fn evaluate(totals: &Totals, thresholds: &Thresholds) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let ratio = totals.discretionary_ratio();
    let net = totals.net();

    if ratio >= thresholds.discretionary_high_ratio {
        recommendations.push(Recommendation::new(
            RuleKind::HighDiscretionary,
            format!(
                "Save: Discretionary spend is high ({}%). Consider reducing dining/shopping to free up ₹3–5k/month.",
                percent(ratio)
            ),
        ));
    }

    if net >= thresholds.surplus_invest_threshold_minor {
        recommendations.push(Recommendation::new(
            RuleKind::InvestSurplus,
            format!(
                "Invest: You have a surplus of {}. Consider a SIP of {} in a conservative balanced fund or an RD.",
                inr(net),
                inr(net.div_euclid(2))
            ),
        ));
    } else if net < 0 {
        recommendations.push(Recommendation::new(
            RuleKind::Overspending,
            format!(
                "Save: You are overspending by {}. Prioritise essentials and pause non-essential spends.",
                inr(net.saturating_neg())
            ),
        ));
    }

    if essentials_below_coverage(totals) {
        recommendations.push(Recommendation::new(
            RuleKind::LowEssentials,
            "Buy essentials: Essentials seem low this period. Ensure groceries, utilities, and insurance are covered to avoid last-minute premiums."
                .to_string(),
        ));
    }

    recommendations
}

/// `essentials < expense * 0.3`, compared exactly in integers
fn essentials_below_coverage(totals: &Totals) -> bool {
    u128::from(totals.essentials) * ESSENTIAL_COVERAGE_DENOMINATOR
        < u128::from(totals.expense) * ESSENTIAL_COVERAGE_NUMERATOR
}
