//! Character sheet composite extraction.

use serde_json::Value;
use sheetpress_domain::{
    dnd5e, AbilityScore, CombatProfile, InventoryItem, Skill, SpellcastingProfile, TraitSet,
};
use sheetpress_shared::{DocumentKind, HostDocument};

use super::abilities::extract_abilities;
use super::actions::{categorize_actions, ActionBuckets};
use super::combat::extract_combat;
use super::error::ExtractError;
use super::features::{extract_features, FeatureGroup};
use super::inventory::extract_inventory;
use super::skills::extract_skills;
use super::spellcasting::extract_spellcasting;
use super::traits::extract_traits;

/// The full character record handed to the view-model transformer.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSheet {
    pub name: String,
    /// "Fighter 5 / Wizard 2"
    pub class_line: String,
    pub race: String,
    pub background: String,
    pub alignment: String,
    pub level: i32,
    pub xp: Option<i64>,
    pub portrait: Option<String>,
    pub abilities: Vec<AbilityScore>,
    pub skills: Vec<Skill>,
    pub combat: CombatProfile,
    pub traits: Vec<TraitSet>,
    pub spellcasting: Option<SpellcastingProfile>,
    pub inventory: Vec<InventoryItem>,
    pub features: Vec<FeatureGroup>,
    pub actions: ActionBuckets,
}

/// Aggregate every field extractor for a character document.
pub fn extract_character(doc: &HostDocument) -> Result<CharacterSheet, ExtractError> {
    if doc.kind() != DocumentKind::Character {
        return Err(ExtractError::unsupported_kind(
            "character sheet",
            "character",
        ));
    }

    let classes = class_items(doc);
    let level = total_level(doc, &classes);
    let prof_bonus = doc
        .i64_at("attributes.prof")
        .map(|p| p as i32)
        .unwrap_or_else(|| dnd5e::proficiency_bonus(level));

    let abilities = extract_abilities(doc, prof_bonus);
    let actions = categorize_actions(doc, &abilities, prof_bonus);

    Ok(CharacterSheet {
        name: doc.name().to_string(),
        class_line: class_line(&classes),
        race: named_item(doc, "race")
            .or_else(|| doc.str_at("details.race").map(str::to_string))
            .unwrap_or_default(),
        background: named_item(doc, "background")
            .or_else(|| doc.str_at("details.background").map(str::to_string))
            .unwrap_or_default(),
        alignment: doc
            .str_at("details.alignment")
            .unwrap_or_default()
            .to_string(),
        level,
        xp: doc.i64_at("details.xp.value"),
        portrait: doc
            .value_at("img")
            .and_then(Value::as_str)
            .filter(|img| !img.is_empty())
            .map(str::to_string),
        skills: extract_skills(doc),
        combat: extract_combat(doc, prof_bonus),
        traits: extract_traits(doc),
        spellcasting: extract_spellcasting(doc, prof_bonus),
        inventory: extract_inventory(doc),
        features: extract_features(doc),
        abilities,
        actions,
    })
}

fn class_items(doc: &HostDocument) -> Vec<(String, i64)> {
    doc.items()
        .into_iter()
        .filter(|item| item.raw().get("type").and_then(Value::as_str) == Some("class"))
        .map(|item| {
            let levels = item.i64_at("levels").unwrap_or(1).max(1);
            (item.name().to_string(), levels)
        })
        .collect()
}

fn total_level(doc: &HostDocument, classes: &[(String, i64)]) -> i32 {
    if !classes.is_empty() {
        return classes.iter().map(|(_, levels)| *levels as i32).sum();
    }
    doc.i64_at("details.level").unwrap_or(1) as i32
}

fn class_line(classes: &[(String, i64)]) -> String {
    classes
        .iter()
        .map(|(name, levels)| format!("{} {}", name, levels))
        .collect::<Vec<_>>()
        .join(" / ")
}

fn named_item(doc: &HostDocument, type_name: &str) -> Option<String> {
    doc.items()
        .into_iter()
        .find(|item| item.raw().get("type").and_then(Value::as_str) == Some(type_name))
        .map(|item| item.name().to_string())
}
