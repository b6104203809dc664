//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Load transactions and run the analysis engine
//! - `config` - Config inspection (config, classify) and the shared loader

pub mod analyze;
pub mod config;

// Re-export command functions for main.rs
pub use analyze::*;
pub use config::*;
