//! Skill extraction - one entry per present skill key.

use serde_json::Value;
use sheetpress_domain::{dnd5e, AbilityKey, ProficiencyTier, Skill};
use sheetpress_shared::{coerce_f64, coerce_i64, HostDocument};

use super::fields::capitalize;

/// Extract every skill present on the document, sorted by display label
/// for stable human-facing ordering (not by key).
pub fn extract_skills(doc: &HostDocument) -> Vec<Skill> {
    let map = match doc.system_at("skills") {
        Some(Value::Object(map)) => map,
        _ => return Vec::new(),
    };
    let mut skills: Vec<Skill> = map
        .iter()
        .map(|(key, block)| skill_from_block(key, block))
        .collect();
    skills.sort_by(|a, b| a.label.cmp(&b.label));
    skills
}

fn skill_from_block(key: &str, block: &Value) -> Skill {
    let label = block
        .get("label")
        .and_then(Value::as_str)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .or_else(|| dnd5e::skill_label(key).map(str::to_string))
        .unwrap_or_else(|| capitalize(key));
    let ability = block
        .get("ability")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<AbilityKey>().ok())
        .or_else(|| dnd5e::skill_ability(key))
        .unwrap_or(AbilityKey::Dex);
    let total = block.get("total").and_then(coerce_i64).unwrap_or(0) as i32;
    let passive = block
        .get("passive")
        .and_then(coerce_i64)
        .map(|p| p as i32);
    let tier = ProficiencyTier::from_multiplier(
        block.get("value").and_then(coerce_f64).unwrap_or(0.0),
    );
    Skill::new(key, label, ability, total, passive, tier)
}
