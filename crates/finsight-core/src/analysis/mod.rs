//! Transaction analysis
//!
//! Turns a list of dated, typed, categorized money movements into totals,
//! two insight lines and a set of recommendations. The stages run strictly
//! forward:
//!
//! 1. [`window`] - resolve the inclusive analysis interval
//! 2. [`filter`] - keep transactions dated inside it
//! 3. [`classify`] - tag outflow categories as essential or discretionary
//! 4. [`aggregate`] - integer minor-unit totals
//! 5. [`rules`] - insight lines and threshold rules
//!
//! [`format`] renders minor units for display and is only used at the end.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finsight_core::analysis::AnalysisEngine;
//! use finsight_core::{AnalysisConfig, AnalysisOptions};
//!
//! let engine = AnalysisEngine::new(AnalysisConfig::default());
//! let result = engine.analyze(&transactions, &AnalysisOptions::default());
//! ```

pub mod aggregate;
pub mod classify;
pub mod engine;
pub mod filter;
pub mod format;
pub mod rules;
pub mod window;

pub use aggregate::{aggregate, Totals};
pub use classify::{classify, SpendClass};
pub use engine::{analyze_transactions, effective_thresholds, AnalysisEngine};
pub use filter::filter_in_window;
pub use format::{minor_to_display_currency, round_minor_to_major};
pub use rules::{Recommendation, RuleKind};
pub use window::{resolve_window, DEFAULT_WINDOW_DAYS};
