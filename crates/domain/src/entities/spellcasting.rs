//! Spellcasting profile - slot pools and spells grouped by level

use serde::{Deserialize, Serialize};

use super::AbilityKey;

/// A spell slot pool for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPool {
    /// Spell level 1-9
    pub level: u8,
    pub available: i32,
    pub max: i32,
}

/// The separate pact-magic pool, when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PactPool {
    /// Level the pact slots are cast at
    pub level: u8,
    pub available: i32,
    pub max: i32,
}

/// One spell row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellEntry {
    pub name: String,
    pub casting_time: String,
    pub range: String,
    pub duration: String,
    /// Component shorthand ("V, S, M")
    pub components: String,
    /// Derived effect/attack summary ("+7", "DC 15 DEX", "8d6")
    pub effect: Option<String>,
    pub prepared: bool,
    pub favorite: bool,
}

/// Spells known/prepared at one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellLevelGroup {
    /// 0 for cantrips
    pub level: u8,
    pub spells: Vec<SpellEntry>,
}

impl SpellLevelGroup {
    /// Display heading for this spell level.
    pub fn label(&self) -> String {
        match self.level {
            0 => "Cantrips".to_string(),
            1 => "1st Level".to_string(),
            2 => "2nd Level".to_string(),
            3 => "3rd Level".to_string(),
            n => format!("{}th Level", n),
        }
    }
}

/// The spellcasting block of a sheet.
///
/// Extraction yields `None` (absence, not an empty profile) when the
/// document has no spellcasting ability or no spell sub-items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingProfile {
    pub ability: AbilityKey,
    pub attack_bonus: i32,
    pub save_dc: i32,
    /// Slot pools ordered by level 1-9; levels with zero max are omitted
    pub slots: Vec<SlotPool>,
    pub pact: Option<PactPool>,
    /// Spell groups ordered by level, cantrips first
    pub levels: Vec<SpellLevelGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_labels() {
        let group = |level| SpellLevelGroup {
            level,
            spells: Vec::new(),
        };
        assert_eq!(group(0).label(), "Cantrips");
        assert_eq!(group(1).label(), "1st Level");
        assert_eq!(group(2).label(), "2nd Level");
        assert_eq!(group(3).label(), "3rd Level");
        assert_eq!(group(9).label(), "9th Level");
    }
}
