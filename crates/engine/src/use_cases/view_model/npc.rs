//! NPC stat-block transformer.

use sheetpress_shared::PrintOptions;

use super::format::{escape_html, grouped, signed};
use super::parts::{ability_vms, combat_vm, entry_vm, spellcasting_vm, trait_lines};
use super::types::{EntryVm, NpcVm};
use crate::use_cases::extract::NpcSheet;

/// Transform an NPC record into its presentation tree.
pub fn npc_view_model(sheet: &NpcSheet, options: &PrintOptions) -> NpcVm {
    let challenge_line = format!(
        "CR {} ({} XP)",
        sheet.challenge.label(),
        grouped(sheet.xp)
    );

    let skills_line = (options.section_enabled("skills") && !sheet.skills.is_empty()).then(|| {
        sheet
            .skills
            .iter()
            .filter(|skill| skill.is_proficient())
            .map(|skill| format!("{} {}", escape_html(&skill.label), signed(skill.total)))
            .collect::<Vec<_>>()
            .join(", ")
    });
    let skills_line = skills_line.filter(|line| !line.is_empty());

    let saves_line = {
        let proficient: Vec<String> = sheet
            .abilities
            .iter()
            .filter(|score| score.save_proficient)
            .map(|score| format!("{} {}", score.key.abbreviation(), signed(score.save)))
            .collect();
        (!proficient.is_empty()).then(|| proficient.join(", "))
    };

    NpcVm {
        name: escape_html(&sheet.name),
        type_line: escape_html(&sheet.type_line),
        challenge_line,
        abilities: ability_vms(&sheet.abilities),
        combat: combat_vm(&sheet.combat),
        traits: options
            .section_enabled("traits")
            .then(|| trait_lines(&sheet.traits))
            .flatten(),
        skills_line,
        saves_line,
        features: section(options, "features", &sheet.features),
        actions: section(options, "actions", &sheet.actions),
        reactions: section(options, "actions", &sheet.reactions),
        spellcasting: options
            .section_enabled("spellcasting")
            .then(|| sheet.spellcasting.as_ref().map(spellcasting_vm))
            .flatten(),
    }
}

fn section(
    options: &PrintOptions,
    key: &str,
    entries: &[sheetpress_domain::ActionEntry],
) -> Option<Vec<EntryVm>> {
    (options.section_enabled(key) && !entries.is_empty())
        .then(|| entries.iter().map(entry_vm).collect())
}
