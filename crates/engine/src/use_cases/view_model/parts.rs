//! Shared view-model part builders used by more than one output kind.

use sheetpress_domain::{
    AbilityScore, ActionEntry, CombatProfile, SpellcastingProfile, TraitSet,
};

use super::format::{escape_html, proficiency_glyph, rich_text, signed, uses_annotation};
use super::types::{
    AbilityVm, AttackVm, CombatVm, EntryVm, SkillVm, SpellGroupVm, SpellVm, SpellcastingVm,
    TraitLineVm,
};

pub(super) fn ability_vms(abilities: &[AbilityScore]) -> Vec<AbilityVm> {
    abilities
        .iter()
        .map(|score| AbilityVm {
            abbr: score.key.abbreviation().to_string(),
            score: score.value.to_string(),
            modifier: signed(score.modifier),
            save: signed(score.save),
            save_proficient: score.save_proficient,
        })
        .collect()
}

pub(super) fn combat_vm(combat: &CombatProfile) -> CombatVm {
    let hit_points = if combat.hit_points.temp > 0 {
        format!(
            "{} / {} (+{} temp)",
            combat.hit_points.current, combat.hit_points.max, combat.hit_points.temp
        )
    } else {
        format!("{} / {}", combat.hit_points.current, combat.hit_points.max)
    };
    let speed = combat
        .speeds
        .iter()
        .map(|entry| format!("{} {} ft.", escape_html(&entry.label), entry.distance))
        .collect::<Vec<_>>()
        .join(", ");
    let senses = combat
        .senses
        .iter()
        .map(|entry| {
            if entry.range > 0 {
                format!("{} {} ft.", escape_html(&entry.label), entry.range)
            } else {
                escape_html(&entry.label)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let hit_dice = if combat.hit_dice.is_empty() {
        None
    } else {
        Some(
            combat
                .hit_dice
                .iter()
                .map(|pool| {
                    if pool.spent > 0 {
                        format!("{}d{} ({} spent)", pool.total, pool.die_size, pool.spent)
                    } else {
                        format!("{}d{}", pool.total, pool.die_size)
                    }
                })
                .collect::<Vec<_>>()
                .join(" \u{b7} "),
        )
    };
    CombatVm {
        armor_class: match &combat.armor_label {
            Some(label) => format!("{} ({})", combat.armor_class, escape_html(label)),
            None => combat.armor_class.to_string(),
        },
        hit_points,
        initiative: signed(combat.initiative),
        speed,
        senses,
        proficiency: signed(combat.proficiency_bonus),
        hit_dice,
    }
}

pub(super) fn skill_vms(skills: &[sheetpress_domain::Skill]) -> Vec<SkillVm> {
    skills
        .iter()
        .map(|skill| SkillVm {
            label: escape_html(&skill.label),
            total: signed(skill.total),
            passive: skill.passive.to_string(),
            glyph: proficiency_glyph(skill.tier).to_string(),
        })
        .collect()
}

/// Non-empty trait sets as display lines; `None` when nothing survives.
pub(super) fn trait_lines(traits: &[TraitSet]) -> Option<Vec<TraitLineVm>> {
    let lines: Vec<TraitLineVm> = traits
        .iter()
        .filter(|set| !set.is_empty())
        .map(|set| TraitLineVm {
            label: set.category.label().to_string(),
            entries: escape_html(&set.entries.join(", ")),
        })
        .collect();
    (!lines.is_empty()).then_some(lines)
}

pub(super) fn entry_vm(entry: &ActionEntry) -> EntryVm {
    EntryVm {
        name: escape_html(&entry.name),
        meta: entry.uses.as_ref().map(uses_annotation),
        description: rich_text(&entry.description),
    }
}

pub(super) fn attack_vm(entry: &ActionEntry) -> AttackVm {
    let payload = entry.attack.as_ref();
    let damage = payload
        .map(|attack| {
            attack
                .damage
                .iter()
                .map(|component| {
                    let mut text = match &component.damage_type {
                        Some(kind) => format!("{} {}", component.formula, kind),
                        None => component.formula.clone(),
                    };
                    if component.average > 0 {
                        text = format!("{} (avg. {})", text, component.average);
                    }
                    escape_html(&text)
                })
                .collect::<Vec<_>>()
                .join(" plus ")
        })
        .unwrap_or_default();
    AttackVm {
        name: escape_html(&entry.name),
        to_hit: payload.map(|attack| signed(attack.to_hit)).unwrap_or_default(),
        range: payload
            .and_then(|attack| attack.range.as_deref())
            .map(escape_html)
            .unwrap_or_default(),
        damage,
        // Save-related highlighting call site: escape first, then decorate
        save: payload
            .and_then(|attack| attack.save.as_deref())
            .map(rich_text),
    }
}

pub(super) fn spellcasting_vm(profile: &SpellcastingProfile) -> SpellcastingVm {
    let summary = format!(
        "Spellcasting Ability {} \u{b7} Attack {} \u{b7} Save DC {}",
        profile.ability.label(),
        signed(profile.attack_bonus),
        profile.save_dc
    );
    let pact = profile.pact.as_ref().map(|pool| {
        format!(
            "Pact Magic: {}/{} slots (level {})",
            pool.available, pool.max, pool.level
        )
    });
    let groups = profile
        .levels
        .iter()
        .map(|group| {
            let slots = profile
                .slots
                .iter()
                .find(|pool| pool.level == group.level)
                .map(|pool| format!("{}/{} slots", pool.available, pool.max));
            SpellGroupVm {
                heading: group.label(),
                slots,
                spells: group
                    .spells
                    .iter()
                    .map(|spell| SpellVm {
                        name: escape_html(&spell.name),
                        time: escape_html(&spell.casting_time),
                        range: escape_html(&spell.range),
                        duration: escape_html(&spell.duration),
                        components: escape_html(&spell.components),
                        effect: spell
                            .effect
                            .as_deref()
                            .map(escape_html)
                            .unwrap_or_default(),
                        prepared: spell.prepared,
                        favorite: spell.favorite,
                    })
                    .collect(),
            }
        })
        .collect();
    SpellcastingVm {
        summary,
        pact,
        groups,
    }
}
