//! Action entries - attacks, features with uses, and their activation buckets

use serde::{Deserialize, Serialize};

/// Categorical tag governing which action bucket a feature belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationType {
    Action,
    Bonus,
    Reaction,
    /// Passive features and anything with an unrecognized activation tag
    #[default]
    #[serde(other)]
    Other,
}

impl ActivationType {
    /// Section heading used on the printed sheet.
    pub fn label(&self) -> &'static str {
        match self {
            ActivationType::Action => "Actions",
            ActivationType::Bonus => "Bonus Actions",
            ActivationType::Reaction => "Reactions",
            ActivationType::Other => "Other",
        }
    }
}

impl std::str::FromStr for ActivationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "action" => Ok(ActivationType::Action),
            "bonus" => Ok(ActivationType::Bonus),
            "reaction" => Ok(ActivationType::Reaction),
            _ => Ok(ActivationType::Other),
        }
    }
}

/// The rule governing when a limited-use counter resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecoveryPeriod {
    ShortRest,
    LongRest,
    Dawn,
    /// Unknown period for forward compatibility
    #[serde(other)]
    Unknown,
}

impl RecoveryPeriod {
    /// Display label ("Short Rest", ...).
    pub fn label(&self) -> &'static str {
        match self {
            RecoveryPeriod::ShortRest => "Short Rest",
            RecoveryPeriod::LongRest => "Long Rest",
            RecoveryPeriod::Dawn => "Dawn",
            RecoveryPeriod::Unknown => "Recharge",
        }
    }
}

impl std::str::FromStr for RecoveryPeriod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sr" | "short" => Ok(RecoveryPeriod::ShortRest),
            "lr" | "long" => Ok(RecoveryPeriod::LongRest),
            "day" | "dawn" => Ok(RecoveryPeriod::Dawn),
            _ => Ok(RecoveryPeriod::Unknown),
        }
    }
}

/// A limited-use counter (current/max/recovery period).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitedUses {
    pub current: i32,
    pub max: i32,
    pub recovery: Option<RecoveryPeriod>,
}

/// Kind of structured attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackKind {
    MeleeWeapon,
    RangedWeapon,
    MeleeSpell,
    RangedSpell,
    /// Unknown attack tag for forward compatibility
    #[serde(other)]
    Unknown,
}

impl std::str::FromStr for AttackKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mwak" => Ok(AttackKind::MeleeWeapon),
            "rwak" => Ok(AttackKind::RangedWeapon),
            "msak" => Ok(AttackKind::MeleeSpell),
            "rsak" => Ok(AttackKind::RangedSpell),
            _ => Ok(AttackKind::Unknown),
        }
    }
}

impl AttackKind {
    pub fn label(&self) -> &'static str {
        match self {
            AttackKind::MeleeWeapon => "Melee Weapon Attack",
            AttackKind::RangedWeapon => "Ranged Weapon Attack",
            AttackKind::MeleeSpell => "Melee Spell Attack",
            AttackKind::RangedSpell => "Ranged Spell Attack",
            AttackKind::Unknown => "Attack",
        }
    }
}

/// One damage component of an attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageComponent {
    /// Display formula after placeholder resolution ("2d6+3")
    pub formula: String,
    /// Arithmetic mean of the formula, floored; 0 when unparseable
    pub average: i32,
    pub damage_type: Option<String>,
}

/// Structured attack payload attached to an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackPayload {
    pub kind: AttackKind,
    pub to_hit: i32,
    /// Reach or range string ("5 ft.", "80/320 ft.")
    pub range: Option<String>,
    pub damage: Vec<DamageComponent>,
    /// Pre-formatted save string ("DC 13 DEX") when the attack forces one
    pub save: Option<String>,
}

/// A named action or feature after placeholder resolution and markup
/// stripping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntry {
    pub name: String,
    pub description: String,
    pub activation: ActivationType,
    pub uses: Option<LimitedUses>,
    pub attack: Option<AttackPayload>,
    pub favorite: bool,
}

impl ActionEntry {
    /// A plain entry with no uses or attack payload.
    pub fn plain(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            activation: ActivationType::Other,
            uses: None,
            attack: None,
            favorite: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_parse_buckets() {
        assert_eq!("action".parse(), Ok(ActivationType::Action));
        assert_eq!("bonus".parse(), Ok(ActivationType::Bonus));
        assert_eq!("reaction".parse(), Ok(ActivationType::Reaction));
        assert_eq!("legendary".parse(), Ok(ActivationType::Other));
        assert_eq!("".parse(), Ok(ActivationType::Other));
    }

    #[test]
    fn test_recovery_labels() {
        assert_eq!("lr".parse::<RecoveryPeriod>().map(|r| r.label()), Ok("Long Rest"));
        assert_eq!("sr".parse::<RecoveryPeriod>().map(|r| r.label()), Ok("Short Rest"));
        assert_eq!("dawn".parse::<RecoveryPeriod>().map(|r| r.label()), Ok("Dawn"));
    }

    #[test]
    fn test_attack_kind_parse() {
        assert_eq!("mwak".parse(), Ok(AttackKind::MeleeWeapon));
        assert_eq!("rsak".parse(), Ok(AttackKind::RangedSpell));
        assert_eq!("????".parse(), Ok(AttackKind::Unknown));
    }
}
