//! Skill records derived on every extraction
//!
//! Skills are never persisted by this subsystem; each extraction derives
//! them fresh from the host document.

use serde::{Deserialize, Serialize};

use super::AbilityKey;

/// Proficiency tier for skills and saves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyTier {
    /// Not proficient
    #[default]
    None,
    /// Half proficiency (Jack of All Trades, etc.)
    Half,
    /// Standard proficiency
    Proficient,
    /// Expertise (double proficiency)
    Expert,
}

impl ProficiencyTier {
    /// Get the multiplier for this proficiency tier.
    pub fn multiplier(&self) -> f32 {
        match self {
            ProficiencyTier::None => 0.0,
            ProficiencyTier::Half => 0.5,
            ProficiencyTier::Proficient => 1.0,
            ProficiencyTier::Expert => 2.0,
        }
    }

    /// Map the host's numeric proficiency value (0 / 0.5 / 1 / 2).
    pub fn from_multiplier(value: f64) -> Self {
        if value >= 2.0 {
            ProficiencyTier::Expert
        } else if value >= 1.0 {
            ProficiencyTier::Proficient
        } else if value > 0.0 {
            ProficiencyTier::Half
        } else {
            ProficiencyTier::None
        }
    }
}

/// One skill row on the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Host skill key ("acr", "ste", ...)
    pub key: String,
    /// Display label ("Acrobatics", "Stealth", ...)
    pub label: String,
    /// Governing ability
    pub ability: AbilityKey,
    /// Total bonus including proficiency
    pub total: i32,
    /// Passive score (= 10 + total unless explicitly overridden)
    pub passive: i32,
    pub tier: ProficiencyTier,
}

impl Skill {
    /// Build a skill row, defaulting the passive score to 10 + total.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        ability: AbilityKey,
        total: i32,
        passive: Option<i32>,
        tier: ProficiencyTier,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            ability,
            total,
            passive: passive.unwrap_or(10 + total),
            tier,
        }
    }

    /// Whether the character is at least proficient in this skill.
    pub fn is_proficient(&self) -> bool {
        matches!(
            self.tier,
            ProficiencyTier::Proficient | ProficiencyTier::Expert
        )
    }
}
