//! NPC stat-block composite extraction.
//!
//! When the active host version exposes a pre-computed presentation
//! context its already-resolved text is trusted as-is; otherwise the
//! manual path re-derives to-hit, damage, and save DCs from first
//! principles.

use serde_json::Value;
use sheetpress_domain::{
    AbilityScore, ActionEntry, ActivationType, ChallengeRating, CombatProfile, Skill,
    SpellcastingProfile, TraitSet,
};
use sheetpress_shared::{coerce_f64, DocumentKind, HostDocument};

use super::abilities::extract_abilities;
use super::actions::build_attack;
use super::combat::extract_combat;
use super::error::ExtractError;
use super::fields::{capitalize, is_favorite, limited_uses};
use super::skills::extract_skills;
use super::spellcasting::extract_spellcasting;
use super::text::clean_text;
use super::traits::extract_traits;

/// The NPC record handed to the view-model transformer.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcSheet {
    pub name: String,
    /// "Medium Humanoid, Neutral Evil"
    pub type_line: String,
    pub challenge: ChallengeRating,
    pub xp: u32,
    pub portrait: Option<String>,
    pub abilities: Vec<AbilityScore>,
    pub combat: CombatProfile,
    pub skills: Vec<Skill>,
    pub traits: Vec<TraitSet>,
    /// Passive features
    pub features: Vec<ActionEntry>,
    pub actions: Vec<ActionEntry>,
    pub reactions: Vec<ActionEntry>,
    pub spellcasting: Option<SpellcastingProfile>,
}

/// Extract an NPC stat block.
pub fn extract_npc(doc: &HostDocument) -> Result<NpcSheet, ExtractError> {
    if doc.kind() == DocumentKind::Group {
        return Err(ExtractError::unsupported_kind("NPC stat block", "actor"));
    }

    let challenge = challenge_rating(doc);
    let prof_bonus = doc
        .i64_at("attributes.prof")
        .map(|p| p as i32)
        .unwrap_or_else(|| challenge.proficiency_bonus());

    let abilities = extract_abilities(doc, prof_bonus);
    let (features, actions, reactions) = match doc.presentation() {
        Some(context) => presentation_entries(context),
        None => manual_entries(doc, &abilities, prof_bonus),
    };

    Ok(NpcSheet {
        name: doc.name().to_string(),
        type_line: type_line(doc),
        xp: challenge.experience_points(),
        challenge,
        portrait: doc
            .value_at("img")
            .and_then(Value::as_str)
            .filter(|img| !img.is_empty())
            .map(str::to_string),
        combat: extract_combat(doc, prof_bonus),
        skills: extract_skills(doc),
        traits: extract_traits(doc),
        spellcasting: extract_spellcasting(doc, prof_bonus),
        abilities,
        features,
        actions,
        reactions,
    })
}

fn challenge_rating(doc: &HostDocument) -> ChallengeRating {
    if let Some(value) = doc.system_at("details.cr").and_then(coerce_f64) {
        return ChallengeRating::new(value);
    }
    doc.str_at("details.cr")
        .and_then(|text| ChallengeRating::parse(text).ok())
        .unwrap_or(ChallengeRating::new(0.0))
}

fn type_line(doc: &HostDocument) -> String {
    let size = match doc.str_at("traits.size").unwrap_or("") {
        "tiny" => "Tiny",
        "sm" => "Small",
        "med" => "Medium",
        "lg" => "Large",
        "huge" => "Huge",
        "grg" => "Gargantuan",
        other => return join_type_line(capitalize(other), doc),
    };
    join_type_line(size.to_string(), doc)
}

fn join_type_line(size: String, doc: &HostDocument) -> String {
    let creature_type = doc
        .str_at("details.type.value")
        .or_else(|| doc.str_at("details.type"))
        .map(capitalize)
        .unwrap_or_default();
    let alignment = doc.str_at("details.alignment").unwrap_or_default();
    let mut line = [size, creature_type]
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if !alignment.is_empty() {
        if line.is_empty() {
            line = alignment.to_string();
        } else {
            line = format!("{}, {}", line, alignment);
        }
    }
    line
}

/// Trusted path: the host already resolved every formula in the
/// presentation context.
fn presentation_entries(
    context: &Value,
) -> (Vec<ActionEntry>, Vec<ActionEntry>, Vec<ActionEntry>) {
    let read = |key: &str| -> Vec<ActionEntry> {
        match context.get(key) {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| {
                    ActionEntry::plain(
                        entry.get("name").and_then(Value::as_str).unwrap_or(""),
                        entry
                            .get("description")
                            .and_then(Value::as_str)
                            .unwrap_or(""),
                    )
                })
                .collect(),
            _ => Vec::new(),
        }
    };
    (read("features"), read("actions"), read("reactions"))
}

/// Manual fallback: derive attack rows and feature text from the raw
/// sub-items.
fn manual_entries(
    doc: &HostDocument,
    abilities: &[AbilityScore],
    prof_bonus: i32,
) -> (Vec<ActionEntry>, Vec<ActionEntry>, Vec<ActionEntry>) {
    let mut features = Vec::new();
    let mut actions = Vec::new();
    let mut reactions = Vec::new();

    for item in doc.items() {
        match item.raw().get("type").and_then(Value::as_str) {
            Some("weapon") => {
                let mut entry = build_attack(doc, &item, abilities, prof_bonus);
                entry.activation = ActivationType::Action;
                actions.push(entry);
            }
            Some("feat") => {
                let activation: ActivationType = item
                    .str_at("activation.type")
                    .and_then(|t| t.parse().ok())
                    .unwrap_or_default();
                let entry = ActionEntry {
                    name: item.name().to_string(),
                    description: item
                        .str_at("description.value")
                        .map(|raw| clean_text(raw, doc))
                        .unwrap_or_default(),
                    activation,
                    uses: limited_uses(item.system_at("uses")),
                    attack: None,
                    favorite: is_favorite(&item),
                };
                match activation {
                    ActivationType::Reaction => reactions.push(entry),
                    ActivationType::Action | ActivationType::Bonus => actions.push(entry),
                    ActivationType::Other => features.push(entry),
                }
            }
            _ => {}
        }
    }
    (features, actions, reactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn goblin() -> HostDocument {
        HostDocument::new(json!({
            "type": "npc",
            "name": "Goblin",
            "system": {
                "details": {"cr": 0.25, "type": {"value": "humanoid"}, "alignment": "Neutral Evil"},
                "traits": {"size": "sm"},
                "abilities": {"dex": {"value": 14}}
            },
            "items": [
                {"type": "weapon", "name": "Scimitar", "system": {
                    "actionType": "mwak",
                    "damage": {"parts": [["1d6+@mod", "slashing"]]}
                }},
                {"type": "feat", "name": "Nimble Escape", "system": {
                    "activation": {"type": "bonus"},
                    "description": {"value": "<p>Disengage or Hide as a bonus action.</p>"}
                }},
                {"type": "feat", "name": "Keen Hearing", "system": {
                    "description": {"value": "<p>Advantage on hearing checks.</p>"}
                }}
            ]
        }))
    }

    #[test]
    fn test_rejects_group_documents() {
        let group = HostDocument::new(json!({"type": "group", "name": "Warband"}));
        assert!(matches!(
            extract_npc(&group),
            Err(ExtractError::UnsupportedKind { .. })
        ));
    }

    #[test]
    fn test_challenge_and_xp() {
        let sheet = extract_npc(&goblin()).expect("sheet");
        assert_eq!(sheet.challenge.label(), "1/4");
        assert_eq!(sheet.xp, 50);
        // CR 1/4 -> proficiency +2
        assert_eq!(sheet.combat.proficiency_bonus, 2);
    }

    #[test]
    fn test_string_challenge_rating() {
        let doc = HostDocument::new(json!({
            "type": "npc", "name": "Boss",
            "system": {"details": {"cr": "1/2"}}
        }));
        let sheet = extract_npc(&doc).expect("sheet");
        assert_eq!(sheet.xp, 100);
    }

    #[test]
    fn test_type_line() {
        let sheet = extract_npc(&goblin()).expect("sheet");
        assert_eq!(sheet.type_line, "Small Humanoid, Neutral Evil");
    }

    #[test]
    fn test_manual_path_buckets_and_attack_derivation() {
        let sheet = extract_npc(&goblin()).expect("sheet");
        assert_eq!(sheet.features.len(), 1);
        assert_eq!(sheet.features[0].name, "Keen Hearing");
        assert_eq!(sheet.actions.len(), 2);
        let scimitar = sheet
            .actions
            .iter()
            .find(|a| a.name == "Scimitar")
            .expect("attack");
        let payload = scimitar.attack.as_ref().expect("payload");
        // DEX 14 is irrelevant for mwak without finesse; STR defaults to 10
        assert_eq!(payload.to_hit, 2);
        assert_eq!(payload.damage[0].formula, "1d6+0");
    }

    #[test]
    fn test_presentation_context_is_trusted() {
        let doc = HostDocument::new(json!({
            "type": "npc",
            "name": "Ogre",
            "presentation": {
                "actions": [{"name": "Greatclub", "description": "Melee Weapon Attack: +6 to hit, 2d8+4 bludgeoning."}],
                "features": [{"name": "Brutish", "description": "Hits hard."}]
            },
            "system": {"details": {"cr": 2}},
            "items": [
                {"type": "weapon", "name": "Ignored", "system": {}}
            ]
        }));
        let sheet = extract_npc(&doc).expect("sheet");
        assert_eq!(sheet.actions.len(), 1);
        assert_eq!(sheet.actions[0].name, "Greatclub");
        assert!(sheet.actions[0]
            .description
            .contains("+6 to hit"));
        assert_eq!(sheet.features[0].name, "Brutish");
    }
}
