//! Ability extraction - six entries, always.

use serde_json::Value;
use sheetpress_domain::{AbilityKey, AbilityScore};
use sheetpress_shared::{coerce_bool, coerce_i64, HostDocument};

/// Extract all six ability scores.
///
/// Absent ability blocks default to value 10 (modifier 0). An explicit
/// numeric or object-wrapped save field overrides the computed save; an
/// explicit modifier field overrides the derived one.
pub fn extract_abilities(doc: &HostDocument, prof_bonus: i32) -> Vec<AbilityScore> {
    AbilityKey::ALL
        .iter()
        .map(|&key| {
            let path = format!("abilities.{}", key.as_str());
            match doc.system_at(&path) {
                Some(block) => ability_from_block(key, block, prof_bonus),
                None => AbilityScore::absent(key),
            }
        })
        .collect()
}

fn ability_from_block(key: AbilityKey, block: &Value, prof_bonus: i32) -> AbilityScore {
    let value = block
        .get("value")
        .and_then(coerce_i64)
        .unwrap_or(10) as i32;
    // Save proficiency moved under the save block in newer data formats.
    let proficient = block
        .get("proficient")
        .and_then(coerce_bool)
        .or_else(|| {
            block
                .get("save")
                .and_then(|s| s.get("proficient"))
                .and_then(coerce_bool)
        })
        .unwrap_or(false);
    let mut score = AbilityScore::from_value(key, value, proficient, prof_bonus);
    if let Some(modifier) = block.get("mod").and_then(coerce_i64) {
        score = score.with_modifier_override(modifier as i32);
    }
    // A numeric save or `{value}`-wrapped save is an explicit override.
    if let Some(save) = block.get("save").and_then(coerce_i64) {
        score = score.with_save_override(save as i32);
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(system: Value) -> HostDocument {
        HostDocument::new(json!({"type": "character", "system": system}))
    }

    #[test]
    fn test_six_entries_always_produced() {
        let abilities = extract_abilities(&doc(json!({})), 2);
        assert_eq!(abilities.len(), 6);
        for score in &abilities {
            assert_eq!(score.value, 10);
            assert_eq!(score.modifier, 0);
        }
    }

    #[test]
    fn test_derived_modifier_and_save() {
        let abilities = extract_abilities(
            &doc(json!({"abilities": {"str": {"value": 16, "proficient": 1}}})),
            3,
        );
        let str_score = &abilities[0];
        assert_eq!(str_score.modifier, 3);
        assert_eq!(str_score.save, 6);
        assert!(str_score.save_proficient);
    }

    #[test]
    fn test_numeric_save_override() {
        let abilities = extract_abilities(
            &doc(json!({"abilities": {"dex": {"value": 14, "save": 9}}})),
            2,
        );
        assert_eq!(abilities[1].save, 9);
    }

    #[test]
    fn test_object_wrapped_save_override() {
        let abilities = extract_abilities(
            &doc(json!({"abilities": {"dex": {"value": 14, "save": {"value": 7, "proficient": 1}}}})),
            2,
        );
        assert_eq!(abilities[1].save, 7);
        assert!(abilities[1].save_proficient);
    }

    #[test]
    fn test_save_block_without_value_computes() {
        let abilities = extract_abilities(
            &doc(json!({"abilities": {"wis": {"value": 12, "save": {"proficient": 1}}}})),
            2,
        );
        let wis = &abilities[4];
        assert_eq!(wis.modifier, 1);
        assert_eq!(wis.save, 3);
    }

    #[test]
    fn test_explicit_modifier_override() {
        let abilities = extract_abilities(
            &doc(json!({"abilities": {"con": {"value": 10, "mod": 5}}})),
            2,
        );
        assert_eq!(abilities[2].modifier, 5);
    }
}
