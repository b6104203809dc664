//! Finsight Core Library
//!
//! Transaction analysis for the Finsight personal finance app:
//! - Analysis engine (window, filter, classify, aggregate, rules)
//! - Currency rendering with Indian digit grouping
//! - Analysis configuration (thresholds and category vocabularies)
//! - Injectable clock for reproducible analysis
//! - JSON/CSV transaction loading

pub mod analysis;
pub mod clock;
pub mod config;
pub mod error;
pub mod import;
pub mod models;

pub use analysis::{
    analyze_transactions, minor_to_display_currency, AnalysisEngine, Recommendation, RuleKind,
    SpendClass, Totals,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AnalysisConfig, CategoryVocabulary, ConfigSource, Thresholds};
pub use error::{Error, Result};
pub use models::{
    AnalysisOptions, AnalysisReport, AnalysisResult, AnalysisWindow, ReportSummary, Transaction,
    TransactionKind,
};
