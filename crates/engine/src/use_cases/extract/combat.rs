//! Combat-block extraction.

use std::collections::BTreeMap;

use serde_json::Value;
use sheetpress_domain::{CombatProfile, HitDicePool, HitPoints, SenseEntry, SpeedEntry};
use sheetpress_shared::{coerce_f64, coerce_i64, HostDocument};

use super::fields::capitalize;

/// Extract the combat profile.
///
/// Speed defaults to a single 30-unit walk entry when no movement data
/// exists; hit dice are aggregated across all class-type sub-items by die
/// denomination.
pub fn extract_combat(doc: &HostDocument, default_prof: i32) -> CombatProfile {
    CombatProfile {
        armor_class: armor_class(doc),
        armor_label: armor_label(doc),
        hit_points: hit_points(doc),
        initiative: initiative(doc),
        speeds: speeds(doc),
        senses: senses(doc),
        proficiency_bonus: doc
            .i64_at("attributes.prof")
            .map(|p| p as i32)
            .unwrap_or(default_prof),
        hit_dice: hit_dice(doc),
    }
}

fn armor_class(doc: &HostDocument) -> i32 {
    // Ordered chain: computed value, flat override, bare numeric field.
    doc.i64_at("attributes.ac.value")
        .or_else(|| doc.i64_at("attributes.ac.flat"))
        .or_else(|| doc.system_at("attributes.ac").and_then(coerce_i64))
        .unwrap_or(10) as i32
}

fn armor_label(doc: &HostDocument) -> Option<String> {
    doc.str_at("attributes.ac.calc")
        .filter(|calc| !calc.is_empty() && *calc != "default" && *calc != "flat")
        .map(str::to_string)
}

fn hit_points(doc: &HostDocument) -> HitPoints {
    HitPoints {
        current: doc.i64_at("attributes.hp.value").unwrap_or(0) as i32,
        max: doc.i64_at("attributes.hp.max").unwrap_or(0) as i32,
        temp: doc.i64_at("attributes.hp.temp").unwrap_or(0) as i32,
    }
}

fn initiative(doc: &HostDocument) -> i32 {
    doc.i64_at("attributes.init.total")
        .or_else(|| doc.i64_at("attributes.init.mod"))
        .or_else(|| doc.system_at("attributes.init").and_then(coerce_i64))
        .unwrap_or(0) as i32
}

fn speeds(doc: &HostDocument) -> Vec<SpeedEntry> {
    let mut entries = named_distances(doc.system_at("attributes.movement"));
    if entries.is_empty() {
        return vec![SpeedEntry::default_walk()];
    }
    // Walk leads, remaining modes alphabetical.
    entries.sort_by(|a, b| {
        let a_walk = a.0 == "walk";
        let b_walk = b.0 == "walk";
        b_walk.cmp(&a_walk).then_with(|| a.0.cmp(&b.0))
    });
    entries
        .into_iter()
        .map(|(label, distance)| SpeedEntry::new(capitalize(&label), distance))
        .collect()
}

fn senses(doc: &HostDocument) -> Vec<SenseEntry> {
    let mut entries = named_distances(doc.system_at("attributes.senses"));
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    let mut senses: Vec<SenseEntry> = entries
        .into_iter()
        .map(|(label, range)| SenseEntry::new(capitalize(&label), range))
        .collect();
    if let Some(special) = doc
        .str_at("attributes.senses.special")
        .filter(|s| !s.is_empty())
    {
        senses.push(SenseEntry::new(special, 0));
    }
    senses
}

/// Collect the positive numeric entries of a `{name: distance}` block,
/// skipping the unit/annotation fields that share it.
fn named_distances(block: Option<&Value>) -> Vec<(String, i32)> {
    let map = match block {
        Some(Value::Object(map)) => map,
        _ => return Vec::new(),
    };
    map.iter()
        .filter(|(key, _)| *key != "units" && *key != "special" && *key != "hover")
        .filter_map(|(key, v)| {
            let distance = coerce_f64(v)?;
            (distance > 0.0).then(|| (key.clone(), distance as i32))
        })
        .collect()
}

fn hit_dice(doc: &HostDocument) -> Vec<HitDicePool> {
    let mut pools: BTreeMap<u8, (u32, u32)> = BTreeMap::new();
    for item in doc.items() {
        if item.raw().get("type").and_then(Value::as_str) != Some("class") {
            continue;
        }
        let levels = item.i64_at("levels").unwrap_or(1).max(0) as u32;
        let denomination = item
            .str_at("hitDice")
            .and_then(|hd| hd.trim_start_matches(['d', 'D']).parse::<u8>().ok())
            .or_else(|| item.i64_at("hd.denomination").map(|d| d as u8));
        let Some(die_size) = denomination else {
            continue;
        };
        let spent = item
            .i64_at("hitDiceUsed")
            .or_else(|| item.i64_at("hd.spent"))
            .unwrap_or(0)
            .max(0) as u32;
        let pool = pools.entry(die_size).or_insert((0, 0));
        pool.0 += levels;
        pool.1 += spent;
    }
    pools
        .into_iter()
        .map(|(die_size, (total, spent))| HitDicePool {
            die_size,
            total,
            spent,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> HostDocument {
        HostDocument::new(value)
    }

    #[test]
    fn test_speed_defaults_to_walk_30() {
        let combat = extract_combat(&doc(json!({"type": "npc"})), 2);
        assert_eq!(combat.speeds, vec![SpeedEntry::default_walk()]);
    }

    #[test]
    fn test_walk_leads_other_speeds() {
        let combat = extract_combat(
            &doc(json!({"system": {"attributes": {"movement": {
                "fly": 60, "walk": 30, "units": "ft", "hover": true, "swim": 0
            }}}})),
            2,
        );
        let labels: Vec<&str> = combat.speeds.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Walk", "Fly"]);
    }

    #[test]
    fn test_ac_fallback_chain() {
        assert_eq!(
            extract_combat(&doc(json!({"system": {"attributes": {"ac": {"value": 17}}}})), 2)
                .armor_class,
            17
        );
        assert_eq!(
            extract_combat(&doc(json!({"system": {"attributes": {"ac": {"flat": 15}}}})), 2)
                .armor_class,
            15
        );
        assert_eq!(
            extract_combat(&doc(json!({"system": {"attributes": {"ac": 13}}})), 2).armor_class,
            13
        );
        assert_eq!(extract_combat(&doc(json!({})), 2).armor_class, 10);
    }

    #[test]
    fn test_hit_dice_aggregated_by_denomination() {
        let combat = extract_combat(
            &doc(json!({"items": [
                {"type": "class", "name": "Fighter", "system": {"levels": 5, "hitDice": "d10", "hitDiceUsed": 2}},
                {"type": "class", "name": "Champion", "system": {"levels": 3, "hitDice": "d10"}},
                {"type": "class", "name": "Wizard", "system": {"levels": 2, "hitDice": "d6"}},
                {"type": "spell", "name": "Fire Bolt", "system": {}}
            ]})),
            2,
        );
        assert_eq!(
            combat.hit_dice,
            vec![
                HitDicePool { die_size: 6, total: 2, spent: 0 },
                HitDicePool { die_size: 10, total: 8, spent: 2 },
            ]
        );
    }

    #[test]
    fn test_senses_with_special_note() {
        let combat = extract_combat(
            &doc(json!({"system": {"attributes": {"senses": {
                "darkvision": 60, "units": "ft", "special": "see invisibility"
            }}}})),
            2,
        );
        assert_eq!(combat.senses.len(), 2);
        assert_eq!(combat.senses[0].label, "Darkvision");
        assert_eq!(combat.senses[0].range, 60);
        assert_eq!(combat.senses[1].label, "see invisibility");
    }

    #[test]
    fn test_proficiency_prefers_document_value() {
        let combat = extract_combat(
            &doc(json!({"system": {"attributes": {"prof": 4}}})),
            2,
        );
        assert_eq!(combat.proficiency_bonus, 4);
        assert_eq!(extract_combat(&doc(json!({})), 3).proficiency_bonus, 3);
    }
}
