//! Print options - the per-invocation configuration value
//!
//! A pure configuration value with no lifecycle beyond one print/preview
//! invocation, optionally persisted as per-sheet-kind defaults through the
//! engine's settings store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four output shapes the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetKind {
    Character,
    Npc,
    EncounterGroup,
    PartySummary,
}

impl SheetKind {
    /// Settings-store key for this kind's persisted defaults.
    pub fn settings_key(&self) -> &'static str {
        match self {
            SheetKind::Character => "character",
            SheetKind::Npc => "npc",
            SheetKind::EncounterGroup => "encounterGroup",
            SheetKind::PartySummary => "partySummary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SheetKind::Character => "Character Sheet",
            SheetKind::Npc => "NPC Stat Block",
            SheetKind::EncounterGroup => "Encounter",
            SheetKind::PartySummary => "Party Summary",
        }
    }
}

impl std::fmt::Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.settings_key())
    }
}

/// Whether the output window triggers the native print dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    /// Open the window and invoke the print dialog after render settling
    Print,
    /// Open the window only
    Preview,
}

/// User-selected paper size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

impl PaperSize {
    /// CSS `@page` size token.
    pub fn css_size(&self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::Letter => "letter",
        }
    }
}

/// Whether the portrait image is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortraitMode {
    #[default]
    Shown,
    Hidden,
}

/// Options for one print/preview invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrintOptions {
    pub paper: PaperSize,
    pub portrait: PortraitMode,
    /// Section visibility keyed by section name; absent keys default to
    /// visible.
    pub sections: BTreeMap<String, bool>,
}

impl PrintOptions {
    /// Whether a named section should be rendered.
    pub fn section_enabled(&self, key: &str) -> bool {
        self.sections.get(key).copied().unwrap_or(true)
    }

    /// Builder-style section toggle.
    pub fn with_section(mut self, key: impl Into<String>, enabled: bool) -> Self {
        self.sections.insert(key.into(), enabled);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_default_visible() {
        let options = PrintOptions::default();
        assert!(options.section_enabled("spellcasting"));
    }

    #[test]
    fn test_section_toggle() {
        let options = PrintOptions::default().with_section("inventory", false);
        assert!(!options.section_enabled("inventory"));
        assert!(options.section_enabled("skills"));
    }

    #[test]
    fn test_options_round_trip() {
        let options = PrintOptions {
            paper: PaperSize::Letter,
            portrait: PortraitMode::Hidden,
            sections: BTreeMap::from([("traits".to_string(), false)]),
        };
        let json = serde_json::to_string(&options).expect("serialize");
        let back: PrintOptions = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, options);
    }

    #[test]
    fn test_settings_keys_are_distinct() {
        let keys = [
            SheetKind::Character.settings_key(),
            SheetKind::Npc.settings_key(),
            SheetKind::EncounterGroup.settings_key(),
            SheetKind::PartySummary.settings_key(),
        ];
        let unique: std::collections::BTreeSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }
}
