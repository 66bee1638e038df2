//! Weapon/action categorization for character sheets.

use serde_json::Value;
use sheetpress_domain::{
    dice_average, dnd5e, resolve_placeholders, AbilityKey, AbilityScore, ActionEntry,
    ActivationType, AttackKind, AttackPayload, DamageComponent,
};
use sheetpress_shared::{coerce_bool, coerce_i64, collection_values, first_entry, HostDocument};

use super::fields::{damage_part_formula, damage_part_type, is_favorite, limited_uses};
use super::text::clean_text;

/// Features that grant extra damage without carrying an activation of
/// their own; recognized by name and lifted into the attack table.
const EXTRA_DAMAGE_FEATURES: [&str; 2] = ["sneak attack", "divine smite"];

/// The categorized action tables of a character sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionBuckets {
    /// Structured attack rows (weapons plus recognized damage features)
    pub attacks: Vec<ActionEntry>,
    pub actions: Vec<ActionEntry>,
    pub bonus: Vec<ActionEntry>,
    pub reactions: Vec<ActionEntry>,
    pub other: Vec<ActionEntry>,
}

impl ActionBuckets {
    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
            && self.actions.is_empty()
            && self.bonus.is_empty()
            && self.reactions.is_empty()
            && self.other.is_empty()
    }
}

/// Classify each equipment-type sub-item into a weapon attack row or an
/// activation bucket.
pub fn categorize_actions(
    doc: &HostDocument,
    abilities: &[AbilityScore],
    prof_bonus: i32,
) -> ActionBuckets {
    let mut buckets = ActionBuckets::default();
    for item in doc.items() {
        let type_name = item.raw().get("type").and_then(Value::as_str).unwrap_or("");
        let lowered = item.name().to_lowercase();
        let is_extra_damage = EXTRA_DAMAGE_FEATURES
            .iter()
            .any(|pattern| lowered.contains(pattern));

        if type_name == "weapon" {
            buckets
                .attacks
                .push(build_attack(doc, &item, abilities, prof_bonus));
            continue;
        }
        if is_extra_damage {
            // Name-pattern override: damage rider without an activation.
            let mut entry = build_attack(doc, &item, abilities, prof_bonus);
            entry.activation = ActivationType::Other;
            buckets.attacks.push(entry);
            continue;
        }
        if type_name != "feat" {
            continue;
        }
        let activation: ActivationType = match item.str_at("activation.type") {
            Some(kind) if !kind.is_empty() && kind != "passive" => {
                kind.parse().unwrap_or_default()
            }
            _ => continue,
        };
        let mut entry = feature_action(doc, &item);
        entry.activation = activation;
        match activation {
            ActivationType::Action => buckets.actions.push(entry),
            ActivationType::Bonus => buckets.bonus.push(entry),
            ActivationType::Reaction => buckets.reactions.push(entry),
            ActivationType::Other => buckets.other.push(entry),
        }
    }
    buckets
}

fn feature_action(doc: &HostDocument, item: &HostDocument) -> ActionEntry {
    let description = item
        .str_at("description.value")
        .map(|raw| clean_text(raw, doc))
        .unwrap_or_default();
    ActionEntry {
        name: item.name().to_string(),
        description,
        activation: ActivationType::Other,
        uses: limited_uses(item.system_at("uses")),
        attack: None,
        favorite: is_favorite(item),
    }
}

/// Build a structured attack row for a weapon (or damage feature).
pub(super) fn build_attack(
    doc: &HostDocument,
    item: &HostDocument,
    abilities: &[AbilityScore],
    prof_bonus: i32,
) -> ActionEntry {
    let kind = attack_kind(item);
    let ability = attack_ability(item, abilities, kind);
    let modifier = ability_modifier_of(abilities, ability);
    let proficient = item
        .system_at("proficient")
        .and_then(coerce_bool)
        .unwrap_or(true);
    let item_bonus = item
        .system_at("attackBonus")
        .and_then(coerce_i64)
        .or_else(|| item.system_at("magicalBonus").and_then(coerce_i64))
        .unwrap_or(0) as i32;
    let to_hit = modifier + if proficient { prof_bonus } else { 0 } + item_bonus;

    let damage: Vec<DamageComponent> = damage_parts(item)
        .iter()
        .filter_map(|part| {
            let formula = damage_part_formula(part)?;
            let resolved = resolve_placeholders(&formula, modifier, prof_bonus);
            Some(DamageComponent {
                average: dice_average(&resolved),
                formula: resolved,
                damage_type: damage_part_type(part),
            })
        })
        .collect();

    let description = item
        .str_at("description.value")
        .map(|raw| clean_text(raw, doc))
        .unwrap_or_default();

    ActionEntry {
        name: item.name().to_string(),
        description,
        activation: ActivationType::Action,
        uses: limited_uses(item.system_at("uses")),
        attack: Some(AttackPayload {
            kind,
            to_hit,
            range: range_text(item, kind),
            damage,
            save: save_text(item),
        }),
        favorite: is_favorite(item),
    }
}

fn attack_kind(item: &HostDocument) -> AttackKind {
    if let Some(kind) = item
        .str_at("actionType")
        .and_then(|t| t.parse::<AttackKind>().ok())
        .filter(|k| *k != AttackKind::Unknown)
    {
        return kind;
    }
    // Newer data nests the classification inside the first attack activity.
    for activity in collection_values(item.system_at("activities")) {
        if activity.get("type").and_then(Value::as_str) != Some("attack") {
            continue;
        }
        let value = activity
            .get("attack")
            .and_then(|a| a.get("type"))
            .and_then(|t| t.get("value"))
            .and_then(Value::as_str);
        return match value {
            Some("melee") => AttackKind::MeleeWeapon,
            Some("ranged") => AttackKind::RangedWeapon,
            _ => AttackKind::Unknown,
        };
    }
    AttackKind::Unknown
}

fn attack_ability(
    item: &HostDocument,
    abilities: &[AbilityScore],
    kind: AttackKind,
) -> AbilityKey {
    if let Some(key) = item
        .str_at("ability")
        .and_then(|a| a.parse::<AbilityKey>().ok())
    {
        return key;
    }
    let finesse = collection_values(item.system_at("properties"))
        .iter()
        .any(|p| p.as_str() == Some("fin"));
    if finesse {
        let str_mod = ability_modifier_of(abilities, AbilityKey::Str);
        let dex_mod = ability_modifier_of(abilities, AbilityKey::Dex);
        return if dex_mod > str_mod {
            AbilityKey::Dex
        } else {
            AbilityKey::Str
        };
    }
    match kind {
        AttackKind::RangedWeapon => AbilityKey::Dex,
        AttackKind::MeleeSpell | AttackKind::RangedSpell => AbilityKey::Int,
        _ => AbilityKey::Str,
    }
}

fn ability_modifier_of(abilities: &[AbilityScore], key: AbilityKey) -> i32 {
    abilities
        .iter()
        .find(|score| score.key == key)
        .map(|score| score.modifier)
        .unwrap_or_else(|| dnd5e::ability_modifier(10))
}

fn damage_parts(item: &HostDocument) -> Vec<Value> {
    let legacy = collection_values(item.system_at("damage.parts"));
    if !legacy.is_empty() {
        return legacy;
    }
    let base = item.system_at("damage.base");
    if let Some(base) = base {
        if !base.is_null() {
            return vec![base.clone()];
        }
    }
    for activity in collection_values(item.system_at("activities")) {
        let parts = collection_values(activity.get("damage").and_then(|d| d.get("parts")));
        if !parts.is_empty() {
            return parts;
        }
    }
    Vec::new()
}

fn range_text(item: &HostDocument, kind: AttackKind) -> Option<String> {
    let value = item.i64_at("range.value").unwrap_or(0);
    let long = item.i64_at("range.long").unwrap_or(0);
    let units = item.str_at("range.units").unwrap_or("ft");
    if value > 0 && long > value {
        return Some(format!("{}/{} {}.", value, long, units));
    }
    if value > 0 {
        return Some(format!("{} {}.", value, units));
    }
    let reach = item
        .i64_at("range.reach")
        .or_else(|| item.i64_at("reach.value"));
    if let Some(reach) = reach.filter(|r| *r > 0) {
        return Some(format!("{} {}.", reach, units));
    }
    match kind {
        AttackKind::MeleeWeapon | AttackKind::MeleeSpell => Some(format!("5 {}.", units)),
        _ => None,
    }
}

fn save_text(item: &HostDocument) -> Option<String> {
    let block = item.system_at("save")?;
    let dc = block.get("dc").and_then(coerce_i64)?;
    let ability = first_entry(block.get("ability"))
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_uppercase)
        .unwrap_or_default();
    Some(format!("DC {} {}", dc, ability).trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn abilities() -> Vec<AbilityScore> {
        vec![
            AbilityScore::from_value(AbilityKey::Str, 16, false, 3),
            AbilityScore::from_value(AbilityKey::Dex, 18, false, 3),
            AbilityScore::from_value(AbilityKey::Con, 12, false, 3),
            AbilityScore::from_value(AbilityKey::Int, 10, false, 3),
            AbilityScore::from_value(AbilityKey::Wis, 10, false, 3),
            AbilityScore::from_value(AbilityKey::Cha, 8, false, 3),
        ]
    }

    fn doc(items: Vec<Value>) -> HostDocument {
        HostDocument::new(json!({"type": "character", "items": items}))
    }

    #[test]
    fn test_weapon_becomes_attack_row() {
        let buckets = categorize_actions(
            &doc(vec![json!({
                "type": "weapon", "name": "Longsword",
                "system": {
                    "actionType": "mwak",
                    "proficient": true,
                    "damage": {"parts": [["1d8+@mod", "slashing"]]}
                }
            })]),
            &abilities(),
            3,
        );
        assert_eq!(buckets.attacks.len(), 1);
        let attack = buckets.attacks[0].attack.as_ref().expect("payload");
        assert_eq!(attack.kind, AttackKind::MeleeWeapon);
        // STR 16 -> +3, proficient -> +3
        assert_eq!(attack.to_hit, 6);
        assert_eq!(attack.damage[0].formula, "1d8+3");
        assert_eq!(attack.damage[0].average, 7);
        assert_eq!(attack.damage[0].damage_type.as_deref(), Some("slashing"));
        assert_eq!(attack.range.as_deref(), Some("5 ft."));
    }

    #[test]
    fn test_finesse_prefers_higher_modifier() {
        let buckets = categorize_actions(
            &doc(vec![json!({
                "type": "weapon", "name": "Rapier",
                "system": {
                    "actionType": "mwak",
                    "properties": ["fin"],
                    "damage": {"parts": [["1d8+@mod", "piercing"]]}
                }
            })]),
            &abilities(),
            3,
        );
        let attack = buckets.attacks[0].attack.as_ref().expect("payload");
        // DEX 18 (+4) beats STR 16 (+3)
        assert_eq!(attack.to_hit, 7);
    }

    #[test]
    fn test_activation_buckets() {
        let buckets = categorize_actions(
            &doc(vec![
                json!({"type": "feat", "name": "Second Wind",
                       "system": {"activation": {"type": "bonus"}}}),
                json!({"type": "feat", "name": "Protection",
                       "system": {"activation": {"type": "reaction"}}}),
                json!({"type": "feat", "name": "Keen Senses",
                       "system": {"activation": {"type": ""}}}),
            ]),
            &abilities(),
            3,
        );
        assert_eq!(buckets.bonus.len(), 1);
        assert_eq!(buckets.reactions.len(), 1);
        // Passive features stay out of the action economy tables
        assert!(buckets.other.is_empty());
        assert!(buckets.actions.is_empty());
    }

    #[test]
    fn test_name_pattern_damage_feature_joins_attacks() {
        let buckets = categorize_actions(
            &doc(vec![json!({
                "type": "feat", "name": "Sneak Attack",
                "system": {"damage": {"parts": [["3d6", ""]]}}
            })]),
            &abilities(),
            3,
        );
        assert_eq!(buckets.attacks.len(), 1);
        let attack = buckets.attacks[0].attack.as_ref().expect("payload");
        assert_eq!(attack.damage[0].formula, "3d6");
        assert_eq!(attack.damage[0].average, 10);
    }

    #[test]
    fn test_ranged_weapon_range_text() {
        let buckets = categorize_actions(
            &doc(vec![json!({
                "type": "weapon", "name": "Shortbow",
                "system": {
                    "actionType": "rwak",
                    "range": {"value": 80, "long": 320, "units": "ft"},
                    "damage": {"parts": [["1d6+@mod", "piercing"]]}
                }
            })]),
            &abilities(),
            3,
        );
        let attack = buckets.attacks[0].attack.as_ref().expect("payload");
        assert_eq!(attack.range.as_deref(), Some("80/320 ft."));
        // DEX for ranged
        assert_eq!(attack.to_hit, 7);
    }
}
