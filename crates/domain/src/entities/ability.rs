//! Ability scores - the six core abilities and their derived figures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game_systems::dnd5e;

/// One of the six fixed ability identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKey {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl AbilityKey {
    /// All six abilities in canonical order.
    pub const ALL: [AbilityKey; 6] = [
        AbilityKey::Str,
        AbilityKey::Dex,
        AbilityKey::Con,
        AbilityKey::Int,
        AbilityKey::Wis,
        AbilityKey::Cha,
    ];

    /// The three-letter key used by the host data model ("str", "dex", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            AbilityKey::Str => "str",
            AbilityKey::Dex => "dex",
            AbilityKey::Con => "con",
            AbilityKey::Int => "int",
            AbilityKey::Wis => "wis",
            AbilityKey::Cha => "cha",
        }
    }

    /// Full display name ("Strength", ...).
    pub fn label(&self) -> &'static str {
        match self {
            AbilityKey::Str => "Strength",
            AbilityKey::Dex => "Dexterity",
            AbilityKey::Con => "Constitution",
            AbilityKey::Int => "Intelligence",
            AbilityKey::Wis => "Wisdom",
            AbilityKey::Cha => "Charisma",
        }
    }

    /// Upper-case abbreviation ("STR", ...) for stat-block display.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            AbilityKey::Str => "STR",
            AbilityKey::Dex => "DEX",
            AbilityKey::Con => "CON",
            AbilityKey::Int => "INT",
            AbilityKey::Wis => "WIS",
            AbilityKey::Cha => "CHA",
        }
    }
}

impl std::str::FromStr for AbilityKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "str" => Ok(AbilityKey::Str),
            "dex" => Ok(AbilityKey::Dex),
            "con" => Ok(AbilityKey::Con),
            "int" => Ok(AbilityKey::Int),
            "wis" => Ok(AbilityKey::Wis),
            "cha" => Ok(AbilityKey::Cha),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ability score with its derived modifier and save bonus.
///
/// Invariants: `modifier = floor((value - 10) / 2)` unless an explicit
/// override was supplied; `save = modifier + proficiency bonus` when
/// proficient, else `modifier`, unless an explicit override was supplied,
/// in which case the override is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScore {
    pub key: AbilityKey,
    pub value: i32,
    pub modifier: i32,
    pub save: i32,
    pub save_proficient: bool,
}

impl AbilityScore {
    /// Derive an ability score from its raw value.
    pub fn from_value(key: AbilityKey, value: i32, save_proficient: bool, prof_bonus: i32) -> Self {
        let modifier = dnd5e::ability_modifier(value);
        let save = if save_proficient {
            modifier + prof_bonus
        } else {
            modifier
        };
        Self {
            key,
            value,
            modifier,
            save,
            save_proficient,
        }
    }

    /// The absent-data default: value 10, modifier 0.
    pub fn absent(key: AbilityKey) -> Self {
        Self::from_value(key, 10, false, 0)
    }

    /// Replace the computed save with an explicit override.
    pub fn with_save_override(self, save: i32) -> Self {
        Self { save, ..self }
    }

    /// Replace the computed modifier with an explicit override.
    pub fn with_modifier_override(self, modifier: i32) -> Self {
        Self { modifier, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_derivation() {
        let score = AbilityScore::from_value(AbilityKey::Str, 16, false, 2);
        assert_eq!(score.modifier, 3);
        assert_eq!(score.save, 3);
    }

    #[test]
    fn test_proficient_save_adds_bonus() {
        let score = AbilityScore::from_value(AbilityKey::Con, 14, true, 3);
        assert_eq!(score.modifier, 2);
        assert_eq!(score.save, 5);
    }

    #[test]
    fn test_save_override_is_verbatim() {
        let score = AbilityScore::from_value(AbilityKey::Dex, 14, true, 3).with_save_override(9);
        assert_eq!(score.save, 9);
        assert_eq!(score.modifier, 2);
    }

    #[test]
    fn test_absent_defaults_to_ten() {
        let score = AbilityScore::absent(AbilityKey::Wis);
        assert_eq!(score.value, 10);
        assert_eq!(score.modifier, 0);
        assert_eq!(score.save, 0);
        assert!(!score.save_proficient);
    }

    #[test]
    fn test_key_round_trip() {
        for key in AbilityKey::ALL {
            assert_eq!(key.as_str().parse::<AbilityKey>(), Ok(key));
        }
        assert!("luck".parse::<AbilityKey>().is_err());
    }
}
