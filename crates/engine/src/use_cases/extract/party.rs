//! Party-summary composite extraction.
//!
//! Unlike encounter groups, party members resolve through the
//! member-reference list only - there is no async member-resolution path
//! for this output kind.

use serde_json::Value;
use sheetpress_domain::{dnd5e, AbilityKey, SenseEntry, Skill};
use sheetpress_shared::{coerce_i64, DocumentKind, HostDocument};

use super::abilities::extract_abilities;
use super::combat::extract_combat;
use super::error::ExtractError;
use super::skills::extract_skills;
use crate::infrastructure::ports::DocumentStore;

/// One flattened member row of the party summary.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyMember {
    pub name: String,
    /// Abbreviated class string ("Rog 5/Ftr 2")
    pub class_line: String,
    pub level: i32,
    pub armor_class: i32,
    pub hit_points_max: i32,
    pub senses: Vec<SenseEntry>,
    pub passive_perception: i32,
    pub passive_investigation: i32,
    pub passive_insight: i32,
    /// Six saves in canonical ability order
    pub saves: Vec<(AbilityKey, i32)>,
    /// Proficient skills sorted by bonus descending
    pub proficient_skills: Vec<Skill>,
    /// "4/4 . 3/3 . 2/2" spell-slot availability by level
    pub slot_summary: Option<String>,
    /// "2/2 (level 3)" pact-slot availability
    pub pact_summary: Option<String>,
}

/// The party summary record.
#[derive(Debug, Clone, PartialEq)]
pub struct PartySummarySheet {
    pub name: String,
    pub members: Vec<PartyMember>,
}

/// Extract a party summary by walking the group's member references.
pub async fn extract_party(
    doc: &HostDocument,
    store: &dyn DocumentStore,
) -> Result<PartySummarySheet, ExtractError> {
    if doc.kind() != DocumentKind::Group {
        return Err(ExtractError::unsupported_kind("party summary", "group"));
    }

    let mut members = Vec::new();
    for reference in doc.member_refs() {
        let member = match store.get(&reference).await {
            Ok(member) => member,
            Err(e) => {
                tracing::warn!(reference = %reference, error = %e, "skipping unresolvable member");
                continue;
            }
        };
        members.push(member_row(&member));
    }

    Ok(PartySummarySheet {
        name: doc.name().to_string(),
        members,
    })
}

fn member_row(doc: &HostDocument) -> PartyMember {
    let classes: Vec<(String, i64)> = doc
        .items()
        .into_iter()
        .filter(|item| item.raw().get("type").and_then(Value::as_str) == Some("class"))
        .map(|item| (item.name().to_string(), item.i64_at("levels").unwrap_or(1)))
        .collect();
    let level: i32 = if classes.is_empty() {
        doc.i64_at("details.level").unwrap_or(1) as i32
    } else {
        classes.iter().map(|(_, l)| *l as i32).sum()
    };
    let prof_bonus = doc
        .i64_at("attributes.prof")
        .map(|p| p as i32)
        .unwrap_or_else(|| dnd5e::proficiency_bonus(level));

    let abilities = extract_abilities(doc, prof_bonus);
    let combat = extract_combat(doc, prof_bonus);
    let skills = extract_skills(doc);

    let passive = |key: &str| -> i32 {
        skills
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.passive)
            .unwrap_or(10)
    };

    let mut proficient_skills: Vec<Skill> =
        skills.iter().filter(|s| s.is_proficient()).cloned().collect();
    proficient_skills.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));

    PartyMember {
        name: doc.name().to_string(),
        class_line: abbreviated_classes(&classes),
        level,
        armor_class: combat.armor_class,
        hit_points_max: combat.hit_points.max,
        senses: combat.senses,
        passive_perception: passive("prc"),
        passive_investigation: passive("inv"),
        passive_insight: passive("ins"),
        saves: abilities.iter().map(|a| (a.key, a.save)).collect(),
        proficient_skills,
        slot_summary: slot_summary(doc),
        pact_summary: pact_summary(doc),
    }
}

/// "Rogue 5 / Fighter 2" compressed to "Rog 5/Ftr 2".
fn abbreviated_classes(classes: &[(String, i64)]) -> String {
    classes
        .iter()
        .map(|(name, levels)| {
            let abbrev: String = name.chars().take(3).collect();
            format!("{} {}", abbrev, levels)
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn slot_summary(doc: &HostDocument) -> Option<String> {
    let pools: Vec<String> = (1..=9)
        .filter_map(|level| {
            let block = doc.system_at(&format!("spells.spell{}", level))?;
            let max = block.get("max").and_then(coerce_i64)?;
            if max <= 0 {
                return None;
            }
            let value = block
                .get("value")
                .and_then(coerce_i64)
                .unwrap_or(0);
            Some(format!("{}/{}", value, max))
        })
        .collect();
    if pools.is_empty() {
        None
    } else {
        Some(pools.join(" \u{b7} "))
    }
}

fn pact_summary(doc: &HostDocument) -> Option<String> {
    let block = doc.system_at("spells.pact")?;
    let max = block.get("max").and_then(coerce_i64)?;
    if max <= 0 {
        return None;
    }
    let value = block
        .get("value")
        .and_then(coerce_i64)
        .unwrap_or(0);
    let level = block
        .get("level")
        .and_then(coerce_i64)
        .unwrap_or(1);
    Some(format!("{}/{} (level {})", value, max, level))
}
