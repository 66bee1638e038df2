//! Trait-set extraction through the shape normalizers.

use serde_json::Value;
use sheetpress_domain::{TraitCategory, TraitSet};
use sheetpress_shared::{collection_values, string_list, HostDocument};

/// Resolve one trait block into an ordered set.
///
/// The standard entries go through the shape normalizer (set, array, or
/// keyed object); semicolon-delimited custom entries are split and placed
/// ahead of them. Absent or null input yields an empty set, never an
/// error.
pub fn resolve_trait_set(category: TraitCategory, block: Option<&Value>) -> TraitSet {
    let block = match block {
        Some(b) if !b.is_null() => b,
        _ => return TraitSet::empty(category),
    };
    let custom: Vec<String> = block
        .get("custom")
        .and_then(Value::as_str)
        .map(|text| {
            text.split(';')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let standard = match block.get("value") {
        Some(Value::Object(_)) => collection_values(block.get("value"))
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        other => string_list(other),
    };
    TraitSet::new(category, custom, standard)
}

/// Extract every trait category carried on the document.
///
/// Empty categories are included; the view-model layer suppresses them.
pub fn extract_traits(doc: &HostDocument) -> Vec<TraitSet> {
    let categories = [
        (TraitCategory::Resistance, "traits.dr"),
        (TraitCategory::Immunity, "traits.di"),
        (TraitCategory::Vulnerability, "traits.dv"),
        (TraitCategory::ConditionImmunity, "traits.ci"),
        (TraitCategory::Language, "traits.languages"),
    ];
    let mut sets: Vec<TraitSet> = categories
        .into_iter()
        .map(|(category, path)| resolve_trait_set(category, doc.system_at(path)))
        .collect();
    // Weapon and armor proficiencies merge into one category, weapons first.
    let weapons = resolve_trait_set(TraitCategory::Proficiency, doc.system_at("traits.weaponProf"));
    let armor = resolve_trait_set(TraitCategory::Proficiency, doc.system_at("traits.armorProf"));
    let mut entries = weapons.entries;
    entries.extend(armor.entries);
    sets.push(TraitSet {
        category: TraitCategory::Proficiency,
        entries,
    });
    sets
}
