//! Analysis configuration
//!
//! Thresholds for the recommendation rules and the category vocabularies
//! used by the classifier. The configuration is immutable for the duration of
//! an analysis call.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/finsight/config/analysis.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analysis.toml");

/// Default surplus (₹7,000 in paise) above which investing is suggested
pub const DEFAULT_SURPLUS_INVEST_THRESHOLD_MINOR: i64 = 700_000;

/// Default discretionary share of expense that counts as high
pub const DEFAULT_DISCRETIONARY_HIGH_RATIO: f64 = 0.4;

const DEFAULT_ESSENTIAL: &[&str] = &[
    "rent",
    "utilities",
    "electricity",
    "water",
    "gas",
    "internet",
    "mobile",
    "groceries",
    "education",
    "healthcare",
    "insurance",
    "transport",
    "emi",
    "loan",
];

const DEFAULT_DISCRETIONARY: &[&str] = &[
    "dining",
    "shopping",
    "entertainment",
    "travel",
    "subscriptions",
    "luxury",
];

/// Rule thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Net at or above this (minor units) triggers the invest recommendation
    pub surplus_invest_threshold_minor: i64,
    /// Discretionary ratio at or above this triggers the reduce-spend recommendation
    pub discretionary_high_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            surplus_invest_threshold_minor: DEFAULT_SURPLUS_INVEST_THRESHOLD_MINOR,
            discretionary_high_ratio: DEFAULT_DISCRETIONARY_HIGH_RATIO,
        }
    }
}

/// Fixed essential/discretionary category sets
///
/// Names are stored lower-cased. A name present in both sets is treated as
/// essential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryVocabulary {
    essential: BTreeSet<String>,
    discretionary: BTreeSet<String>,
}

impl CategoryVocabulary {
    pub fn new<E, D, S>(essential: E, discretionary: D) -> Self
    where
        E: IntoIterator<Item = S>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            essential: normalize_set(essential),
            discretionary: normalize_set(discretionary),
        }
    }

    pub fn is_essential(&self, category: &str) -> bool {
        self.essential.contains(category)
    }

    pub fn is_discretionary(&self, category: &str) -> bool {
        self.discretionary.contains(category)
    }

    pub fn essential(&self) -> impl Iterator<Item = &str> {
        self.essential.iter().map(String::as_str)
    }

    pub fn discretionary(&self) -> impl Iterator<Item = &str> {
        self.discretionary.iter().map(String::as_str)
    }
}

impl Default for CategoryVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_ESSENTIAL.iter(), DEFAULT_DISCRETIONARY.iter())
    }
}

fn normalize_set<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Compiled-in defaults
    Embedded,
    /// Read from a file on disk
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisConfig {
    pub thresholds: Thresholds,
    pub vocabulary: CategoryVocabulary,
}

impl AnalysisConfig {
    /// Load from `path` if given and present, else the default override
    /// location, else the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        if let Some(path) = candidate.filter(|p| p.exists()) {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            let config = Self::parse(&content, Some(path.as_path()))?;
            debug!(path = %path.display(), "Loaded analysis config");
            return Ok((config, ConfigSource::File(path)));
        }

        debug!("Using embedded analysis config");
        Ok((Self::from_toml(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::parse(content, None)
    }

    fn parse(content: &str, origin: Option<&Path>) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        for key in raw.unknown_keys() {
            match origin {
                Some(path) => warn!(path = %path.display(), key = %key, "Ignoring unknown config key"),
                None => warn!(key = %key, "Ignoring unknown config key"),
            }
        }

        let mut config = Self::default();

        if let Some(thresholds) = raw.thresholds {
            if let Some(minor) = thresholds.surplus_invest_threshold_minor {
                config.thresholds.surplus_invest_threshold_minor = minor;
            }
            if let Some(ratio) = thresholds.discretionary_high_ratio {
                config.thresholds.discretionary_high_ratio = validate_ratio(ratio)?;
            }
        }

        if let Some(categories) = raw.categories {
            let essential = categories
                .essential
                .unwrap_or_else(|| config.vocabulary.essential().map(String::from).collect());
            let discretionary = categories
                .discretionary
                .unwrap_or_else(|| config.vocabulary.discretionary().map(String::from).collect());
            config.vocabulary = CategoryVocabulary::new(essential, discretionary);
        }

        Ok(config)
    }
}

/// Reject ratios that would make the high-discretionary rule meaningless
pub fn validate_ratio(ratio: f64) -> Result<f64> {
    if ratio.is_finite() && ratio >= 0.0 {
        Ok(ratio)
    } else {
        Err(Error::Config(format!(
            "discretionary_high_ratio must be a non-negative number, got {}",
            ratio
        )))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finsight").join("config").join("analysis.toml"))
}

/// Raw config structure for TOML parsing
///
/// Keys not named here land in `extra` so they can be reported.
#[derive(Debug, Deserialize)]
struct RawConfig {
    thresholds: Option<RawThresholds>,
    categories: Option<RawCategories>,
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    surplus_invest_threshold_minor: Option<i64>,
    discretionary_high_ratio: Option<f64>,
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    essential: Option<Vec<String>>,
    discretionary: Option<Vec<String>>,
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

impl RawConfig {
    /// Dotted paths of every key that will be ignored
    fn unknown_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.extra.keys().cloned().collect();
        if let Some(thresholds) = &self.thresholds {
            keys.extend(thresholds.extra.keys().map(|k| format!("thresholds.{}", k)));
        }
        if let Some(categories) = &self.categories {
            keys.extend(categories.extra.keys().map(|k| format!("categories.{}", k)));
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = AnalysisConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.thresholds.surplus_invest_threshold_minor, 700_000);
        assert_eq!(config.vocabulary.essential().count(), 14);
        assert_eq!(config.vocabulary.discretionary().count(), 6);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = AnalysisConfig::from_toml(
            r#"
[thresholds]
discretionary_high_ratio = 0.25
"#,
        )
        .unwrap();

        assert_eq!(config.thresholds.discretionary_high_ratio, 0.25);
        assert_eq!(
            config.thresholds.surplus_invest_threshold_minor,
            DEFAULT_SURPLUS_INVEST_THRESHOLD_MINOR
        );
        assert_eq!(config.vocabulary, CategoryVocabulary::default());
    }

    #[test]
    fn test_vocabulary_override_is_normalized() {
        let config = AnalysisConfig::from_toml(
            r#"
[categories]
essential = [" Rent ", "PETCARE", ""]
"#,
        )
        .unwrap();

        assert!(config.vocabulary.is_essential("rent"));
        assert!(config.vocabulary.is_essential("petcare"));
        assert!(!config.vocabulary.is_essential("groceries"));
        assert!(config.vocabulary.is_discretionary("dining"));
        assert_eq!(config.vocabulary.essential().count(), 2);
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let err = AnalysisConfig::from_toml("[thresholds]\ndiscretionary_high_ratio = -0.1\n")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(validate_ratio(f64::NAN).is_err());
        assert!(validate_ratio(0.0).is_ok());
    }

    #[test]
    fn test_misspelled_key_is_ignored_and_reported() {
        let content = "[thresholds]\ndiscretionary_high_rato = 0.1\n";

        let config = AnalysisConfig::from_toml(content).unwrap();
        assert_eq!(config.thresholds, Thresholds::default());

        let raw: RawConfig = toml::from_str(content).unwrap();
        assert_eq!(raw.unknown_keys(), vec!["thresholds.discretionary_high_rato"]);
    }

    #[test]
    fn test_unknown_keys_at_every_level() {
        let raw: RawConfig = toml::from_str(
            r#"
currency = "INR"

[thresholds]
surplus_invest_threshold_minor = 5

[categories]
essentials = ["rent"]

[alerts]
enabled = true
"#,
        )
        .unwrap();

        assert_eq!(
            raw.unknown_keys(),
            vec!["alerts", "currency", "categories.essentials"]
        );
        assert_eq!(
            raw.thresholds.and_then(|t| t.surplus_invest_threshold_minor),
            Some(5)
        );
    }

    #[test]
    fn test_embedded_config_has_no_unknown_keys() {
        let raw: RawConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(raw.unknown_keys().is_empty());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = AnalysisConfig::from_toml("[thresholds\n").unwrap_err();
        assert!(err.to_string().contains("Invalid config TOML"));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[thresholds]\nsurplus_invest_threshold_minor = 100").unwrap();

        let (config, source) = AnalysisConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.thresholds.surplus_invest_threshold_minor, 100);
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_load_missing_explicit_path_uses_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let (config, source) = AnalysisConfig::load(Some(&missing)).unwrap();
        assert_eq!(source, ConfigSource::Embedded);
        assert_eq!(config, AnalysisConfig::default());
    }
}
