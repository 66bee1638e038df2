//! Combat profile - armor class, hit points, movement, senses, hit dice

use serde::{Deserialize, Serialize};

/// Hit point pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitPoints {
    pub current: i32,
    pub max: i32,
    pub temp: i32,
}

/// One named movement entry (walk, fly, swim, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedEntry {
    pub label: String,
    pub distance: i32,
}

impl SpeedEntry {
    pub fn new(label: impl Into<String>, distance: i32) -> Self {
        Self {
            label: label.into(),
            distance,
        }
    }

    /// The fallback used when the document carries no movement data.
    pub fn default_walk() -> Self {
        Self::new("Walk", 30)
    }
}

/// One named sense entry (darkvision, blindsight, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenseEntry {
    pub label: String,
    pub range: i32,
}

impl SenseEntry {
    pub fn new(label: impl Into<String>, range: i32) -> Self {
        Self {
            label: label.into(),
            range,
        }
    }
}

/// Hit dice aggregated by die denomination across class sub-items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitDicePool {
    /// Die denomination (6, 8, 10, 12)
    pub die_size: u8,
    pub total: u32,
    pub spent: u32,
}

impl HitDicePool {
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.spent)
    }
}

/// The combat block of a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatProfile {
    pub armor_class: i32,
    /// Optional armor description ("natural armor", "chain mail")
    pub armor_label: Option<String>,
    pub hit_points: HitPoints,
    pub initiative: i32,
    pub speeds: Vec<SpeedEntry>,
    pub senses: Vec<SenseEntry>,
    pub proficiency_bonus: i32,
    pub hit_dice: Vec<HitDicePool>,
}
