//! Domain models for Finsight

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::format::round_minor_to_major;

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money coming in (salary, refunds, transfers in)
    Inflow,
    /// Money going out
    Outflow,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inflow => "INFLOW",
            Self::Outflow => "OUTFLOW",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INFLOW" => Ok(Self::Inflow),
            "OUTFLOW" => Ok(Self::Outflow),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dated, typed money movement
///
/// `amount_minor` is the absolute value in the currency's smallest unit
/// (paise for INR). The sign lives entirely in `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: DateTime<Utc>,
    pub amount_minor: u64,
    pub kind: TransactionKind,
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(date: DateTime<Utc>, amount_minor: u64, kind: TransactionKind) -> Self {
        Self {
            date,
            amount_minor,
            kind,
            category: None,
        }
    }

    pub fn inflow(date: DateTime<Utc>, amount_minor: u64) -> Self {
        Self::new(date, amount_minor, TransactionKind::Inflow)
    }

    pub fn outflow(date: DateTime<Utc>, amount_minor: u64) -> Self {
        Self::new(date, amount_minor, TransactionKind::Outflow)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Inclusive analysis interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Per-call inputs besides the transactions themselves
///
/// Every field is optional. Threshold overrides apply to this call only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOptions {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub surplus_invest_threshold_minor: Option<i64>,
    pub discretionary_high_ratio: Option<f64>,
}

impl AnalysisOptions {
    pub fn with_window(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self {
            start,
            end,
            ..Default::default()
        }
    }
}

/// Output of one analysis call
///
/// All amounts are in minor units. `net == income - expense` (clamped to
/// the `i64` range) and `essentials + discretionary <= expense`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub window: AnalysisWindow,
    pub income: u64,
    pub expense: u64,
    pub net: i64,
    pub essentials: u64,
    pub discretionary: u64,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Discretionary share of expense, 0 when there was no expense
    pub fn discretionary_ratio(&self) -> f64 {
        if self.expense > 0 {
            self.discretionary as f64 / self.expense as f64
        } else {
            0.0
        }
    }

    /// Expense that fell in neither vocabulary
    pub fn unclassified(&self) -> u64 {
        self.expense
            .saturating_sub(self.essentials)
            .saturating_sub(self.discretionary)
    }
}

/// Major-unit totals for transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub income_rupees: i64,
    pub expense_rupees: i64,
    pub net_rupees: i64,
}

/// The shape handed to an HTTP or JSON consumer
///
/// Insights and recommendations are forwarded verbatim; the totals are
/// rounded to whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: ReportSummary,
}

impl From<&AnalysisResult> for AnalysisReport {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            insights: result.insights.clone(),
            recommendations: result.recommendations.clone(),
            summary: ReportSummary {
                income_rupees: round_minor_to_major(saturating_i64(result.income)),
                expense_rupees: round_minor_to_major(saturating_i64(result.expense)),
                net_rupees: round_minor_to_major(result.net),
            },
        }
    }
}

/// Widen an unsigned minor-unit amount, clamping at `i64::MAX`
pub(crate) fn saturating_i64(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}
