//! Spend classification against the category vocabularies

use serde::Serialize;

use crate::config::CategoryVocabulary;

/// Classification of an outflow's category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendClass {
    Essential,
    Discretionary,
    Unclassified,
}

impl SpendClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Discretionary => "discretionary",
            Self::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for SpendClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a category name, case-insensitively
///
/// The name is lower-cased but not trimmed; the importer trims categories on
/// the way in. Missing categories are unclassified. The essential set is
/// checked first.
pub fn classify(category: Option<&str>, vocabulary: &CategoryVocabulary) -> SpendClass {
    let name = match category {
        Some(name) if !name.is_empty() => name.to_lowercase(),
        _ => return SpendClass::Unclassified,
    };

    if vocabulary.is_essential(&name) {
        SpendClass::Essential
    } else if vocabulary.is_discretionary(&name) {
        SpendClass::Discretionary
    } else {
        SpendClass::Unclassified
    }
}
