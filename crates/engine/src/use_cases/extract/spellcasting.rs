//! Spellcasting extraction.
//!
//! Absence is meaningful: a document with no casting ability or no
//! spell-type sub-items yields `None`, not an empty profile.

use std::collections::BTreeMap;

use serde_json::Value;
use sheetpress_domain::{
    dnd5e, resolve_placeholders, AbilityKey, PactPool, SlotPool, SpellEntry,
    SpellLevelGroup, SpellcastingProfile,
};
use sheetpress_shared::{
    coerce_bool, coerce_i64, collection_values, first_entry, HostDocument,
};

use super::fields::{damage_part_formula, is_favorite};

/// Extract the spellcasting profile, or `None` when the document has no
/// casting ability or no spell sub-items.
pub fn extract_spellcasting(doc: &HostDocument, prof_bonus: i32) -> Option<SpellcastingProfile> {
    let ability: AbilityKey = doc
        .str_at("attributes.spellcasting")
        .and_then(|s| s.parse().ok())?;
    let spells: Vec<HostDocument> = doc
        .items()
        .into_iter()
        .filter(|item| item.raw().get("type").and_then(Value::as_str) == Some("spell"))
        .collect();
    if spells.is_empty() {
        return None;
    }

    let ability_mod = doc
        .i64_at(&format!("abilities.{}.mod", ability.as_str()))
        .map(|m| m as i32)
        .unwrap_or_else(|| {
            let value = doc
                .i64_at(&format!("abilities.{}.value", ability.as_str()))
                .unwrap_or(10) as i32;
            dnd5e::ability_modifier(value)
        });
    let attack_bonus = ability_mod + prof_bonus;
    let save_dc = doc
        .i64_at("attributes.spelldc")
        .map(|dc| dc as i32)
        .unwrap_or(8 + ability_mod + prof_bonus);

    Some(SpellcastingProfile {
        ability,
        attack_bonus,
        save_dc,
        slots: slot_pools(doc),
        pact: pact_pool(doc),
        levels: spell_groups(doc, &spells, ability_mod, attack_bonus, save_dc),
    })
}

/// Slot pools for levels 1-9, omitting levels with zero maximum.
fn slot_pools(doc: &HostDocument) -> Vec<SlotPool> {
    (1..=9)
        .filter_map(|level| {
            let path = format!("spells.spell{}", level);
            let block = doc.system_at(&path)?;
            let max = block.get("max").and_then(coerce_i64).unwrap_or(0) as i32;
            if max <= 0 {
                return None;
            }
            let available = block.get("value").and_then(coerce_i64).unwrap_or(0) as i32;
            Some(SlotPool {
                level,
                available,
                max,
            })
        })
        .collect()
}

fn pact_pool(doc: &HostDocument) -> Option<PactPool> {
    let block = doc.system_at("spells.pact")?;
    let max = block.get("max").and_then(coerce_i64).unwrap_or(0) as i32;
    if max <= 0 {
        return None;
    }
    Some(PactPool {
        level: block.get("level").and_then(coerce_i64).unwrap_or(1) as u8,
        available: block.get("value").and_then(coerce_i64).unwrap_or(0) as i32,
        max,
    })
}

/// Group spell sub-items by level, cantrips first, alphabetical within a
/// level with favorites leading.
fn spell_groups(
    doc: &HostDocument,
    spells: &[HostDocument],
    ability_mod: i32,
    attack_bonus: i32,
    save_dc: i32,
) -> Vec<SpellLevelGroup> {
    let mut by_level: BTreeMap<u8, Vec<SpellEntry>> = BTreeMap::new();
    for spell in spells {
        let level = spell.i64_at("level").unwrap_or(0).clamp(0, 9) as u8;
        by_level
            .entry(level)
            .or_default()
            .push(spell_entry(doc, spell, ability_mod, attack_bonus, save_dc));
    }
    by_level
        .into_iter()
        .map(|(level, mut spells)| {
            spells.sort_by(|a, b| {
                b.favorite
                    .cmp(&a.favorite)
                    .then_with(|| a.name.cmp(&b.name))
            });
            SpellLevelGroup { level, spells }
        })
        .collect()
}

fn spell_entry(
    doc: &HostDocument,
    spell: &HostDocument,
    ability_mod: i32,
    attack_bonus: i32,
    save_dc: i32,
) -> SpellEntry {
    SpellEntry {
        name: spell.name().to_string(),
        casting_time: casting_time(spell),
        range: range_text(spell),
        duration: duration_text(spell),
        components: components_text(spell),
        effect: effect_text(doc, spell, ability_mod, attack_bonus, save_dc),
        prepared: spell
            .bool_at("preparation.prepared")
            .unwrap_or(false),
        favorite: is_favorite(spell),
    }
}

fn casting_time(spell: &HostDocument) -> String {
    let kind = spell.str_at("activation.type").unwrap_or("");
    let label = match kind {
        "action" => "Action",
        "bonus" => "Bonus Action",
        "reaction" => "Reaction",
        "minute" => "Minute",
        "hour" => "Hour",
        "" => return String::new(),
        other => return super::fields::capitalize(other),
    };
    match spell.i64_at("activation.value") {
        Some(value) if value > 1 => format!("{} {}s", value, label),
        Some(value) if value == 1 => format!("1 {}", label),
        _ => label.to_string(),
    }
}

fn range_text(spell: &HostDocument) -> String {
    match spell.str_at("range.units") {
        Some("self") => "Self".to_string(),
        Some("touch") => "Touch".to_string(),
        Some(units) => {
            let value = spell.i64_at("range.value").unwrap_or(0);
            let long = spell.i64_at("range.long").unwrap_or(0);
            if value <= 0 {
                String::new()
            } else if long > 0 {
                format!("{}/{} {}.", value, long, units)
            } else {
                format!("{} {}.", value, units)
            }
        }
        None => String::new(),
    }
}

fn duration_text(spell: &HostDocument) -> String {
    match spell.str_at("duration.units") {
        Some("inst") => "Instantaneous".to_string(),
        Some("perm") => "Permanent".to_string(),
        Some(units) => match spell.i64_at("duration.value") {
            Some(value) if value > 1 => format!("{} {}s", value, units),
            Some(value) if value >= 0 => format!("{} {}", value, units),
            _ => super::fields::capitalize(units),
        },
        None => String::new(),
    }
}

/// Component shorthand from either the modern property set or the legacy
/// component flags.
fn components_text(spell: &HostDocument) -> String {
    let mut letters = Vec::new();
    let properties = collection_values(spell.system_at("properties"));
    if !properties.is_empty() {
        for property in properties {
            match property.as_str() {
                Some("vocal") => letters.push("V"),
                Some("somatic") => letters.push("S"),
                Some("material") => letters.push("M"),
                _ => {}
            }
        }
    } else if let Some(Value::Object(flags)) = spell.system_at("components") {
        for (key, letter) in [("vocal", "V"), ("somatic", "S"), ("material", "M")] {
            if flags.get(key).and_then(coerce_bool).unwrap_or(false) {
                letters.push(letter);
            }
        }
    }
    letters.join(", ")
}

/// Derive the effect/attack summary by inspecting the first activity
/// matching an attack, save, damage, or heal shape.
fn effect_text(
    doc: &HostDocument,
    spell: &HostDocument,
    ability_mod: i32,
    attack_bonus: i32,
    save_dc: i32,
) -> Option<String> {
    let prof = doc.i64_at("attributes.prof").unwrap_or(0) as i32;
    for activity in collection_values(spell.system_at("activities")) {
        match activity.get("type").and_then(Value::as_str) {
            Some("attack") => {
                return Some(format!("{:+}", attack_bonus));
            }
            Some("save") => {
                let dc = activity
                    .get("save")
                    .and_then(|save| save.get("dc"))
                    .and_then(coerce_i64)
                    .map(|dc| dc as i32)
                    .unwrap_or(save_dc);
                let ability = first_entry(
                    activity.get("save").and_then(|save| save.get("ability")),
                )
                .as_ref()
                .and_then(Value::as_str)
                .map(str::to_uppercase)
                .unwrap_or_default();
                return Some(format!("DC {} {}", dc, ability).trim_end().to_string());
            }
            Some("damage") | Some("heal") => {
                let parts = collection_values(
                    activity.get("damage").and_then(|d| d.get("parts")),
                );
                let healing = activity.get("healing");
                let formula = parts
                    .iter()
                    .filter_map(damage_part_formula)
                    .next()
                    .or_else(|| healing.and_then(damage_part_formula));
                if let Some(formula) = formula {
                    let resolved = resolve_placeholders(&formula, ability_mod, prof);
                    return Some(resolved);
                }
            }
            _ => {}
        }
    }
    // Legacy documents carry damage parts directly on the spell.
    collection_values(spell.system_at("damage.parts"))
        .iter()
        .filter_map(damage_part_formula)
        .next()
        .map(|formula| resolve_placeholders(&formula, ability_mod, prof))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn caster(items: Value) -> HostDocument {
        HostDocument::new(json!({
            "type": "character",
            "system": {
                "attributes": {"spellcasting": "int", "prof": 3},
                "abilities": {"int": {"value": 18, "mod": 4}},
                "spells": {
                    "spell1": {"value": 3, "max": 4},
                    "spell2": {"value": 0, "max": 3},
                    "spell3": {"value": 0, "max": 0},
                    "pact": {"value": 2, "max": 2, "level": 3}
                }
            },
            "items": items
        }))
    }

    fn spell(name: &str, level: i64, system_extra: Value) -> Value {
        let mut system = json!({"level": level});
        if let (Value::Object(base), Value::Object(extra)) = (&mut system, system_extra) {
            for (k, v) in extra {
                base.insert(k, v);
            }
        }
        json!({"type": "spell", "name": name, "system": system})
    }

    #[test]
    fn test_no_casting_ability_yields_none() {
        let doc = HostDocument::new(json!({
            "type": "character",
            "system": {},
            "items": [spell("Fire Bolt", 0, json!({}))]
        }));
        assert!(extract_spellcasting(&doc, 2).is_none());
    }

    #[test]
    fn test_no_spell_items_yields_none() {
        let doc = caster(json!([{"type": "weapon", "name": "Dagger", "system": {}}]));
        assert!(extract_spellcasting(&doc, 3).is_none());
    }

    #[test]
    fn test_attack_bonus_and_save_dc() {
        let doc = caster(json!([spell("Fire Bolt", 0, json!({}))]));
        let profile = extract_spellcasting(&doc, 3).expect("profile");
        assert_eq!(profile.ability, AbilityKey::Int);
        assert_eq!(profile.attack_bonus, 7);
        assert_eq!(profile.save_dc, 15);
    }

    #[test]
    fn test_slot_pools_skip_empty_levels() {
        let doc = caster(json!([spell("Shield", 1, json!({}))]));
        let profile = extract_spellcasting(&doc, 3).expect("profile");
        assert_eq!(profile.slots.len(), 2);
        assert_eq!(profile.slots[0].level, 1);
        assert_eq!(profile.slots[0].available, 3);
        assert_eq!(profile.slots[0].max, 4);
        let pact = profile.pact.expect("pact pool");
        assert_eq!(pact.level, 3);
        assert_eq!(pact.max, 2);
    }

    #[test]
    fn test_attack_activity_effect() {
        let doc = caster(json!([spell(
            "Fire Bolt",
            0,
            json!({"activities": {"a1": {"type": "attack"}}})
        )]));
        let profile = extract_spellcasting(&doc, 3).expect("profile");
        let bolt = &profile.levels[0].spells[0];
        assert_eq!(bolt.effect.as_deref(), Some("+7"));
    }

    #[test]
    fn test_save_activity_effect() {
        let doc = caster(json!([spell(
            "Fireball",
            3,
            json!({"activities": {"a1": {"type": "save", "save": {"ability": ["dex"], "dc": {"value": 15}}}}})
        )]));
        let profile = extract_spellcasting(&doc, 3).expect("profile");
        let fireball = &profile.levels[0].spells[0];
        assert_eq!(fireball.effect.as_deref(), Some("DC 15 DEX"));
    }

    #[test]
    fn test_damage_activity_substitutes_modifier() {
        let doc = caster(json!([spell(
            "Cure Wounds",
            1,
            json!({"activities": {"a1": {"type": "heal", "healing": {"custom": {"formula": "1d8+@mod"}}}}})
        )]));
        let profile = extract_spellcasting(&doc, 3).expect("profile");
        let cure = &profile.levels[0].spells[0];
        assert_eq!(cure.effect.as_deref(), Some("1d8+4"));
    }

    #[test]
    fn test_groups_ordered_by_level_cantrips_first() {
        let doc = caster(json!([
            spell("Fireball", 3, json!({})),
            spell("Fire Bolt", 0, json!({})),
            spell("Shield", 1, json!({}))
        ]));
        let profile = extract_spellcasting(&doc, 3).expect("profile");
        let levels: Vec<u8> = profile.levels.iter().map(|g| g.level).collect();
        assert_eq!(levels, vec![0, 1, 3]);
    }

    #[test]
    fn test_components_from_property_set() {
        let doc = caster(json!([spell(
            "Fireball",
            3,
            json!({"properties": ["vocal", "somatic", "material"]})
        )]));
        let profile = extract_spellcasting(&doc, 3).expect("profile");
        assert_eq!(profile.levels[0].spells[0].components, "V, S, M");
    }
}
