//! Trait sets - resistances, immunities, languages, and similar lists

use serde::{Deserialize, Serialize};

/// Named trait categories carried on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraitCategory {
    Resistance,
    Immunity,
    Vulnerability,
    ConditionImmunity,
    Language,
    Proficiency,
}

impl TraitCategory {
    /// Section heading used on the printed sheet.
    pub fn label(&self) -> &'static str {
        match self {
            TraitCategory::Resistance => "Damage Resistances",
            TraitCategory::Immunity => "Damage Immunities",
            TraitCategory::Vulnerability => "Damage Vulnerabilities",
            TraitCategory::ConditionImmunity => "Condition Immunities",
            TraitCategory::Language => "Languages",
            TraitCategory::Proficiency => "Proficiencies",
        }
    }
}

/// An ordered list of free-text entries for one trait category.
///
/// Invariant: user-entered custom entries precede standard catalog entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitSet {
    pub category: TraitCategory,
    pub entries: Vec<String>,
}

impl TraitSet {
    /// Build a trait set with custom entries ahead of catalog entries.
    pub fn new(category: TraitCategory, custom: Vec<String>, standard: Vec<String>) -> Self {
        let mut entries = custom;
        entries.extend(standard);
        Self { category, entries }
    }

    /// An empty set for the category.
    pub fn empty(category: TraitCategory) -> Self {
        Self {
            category,
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
