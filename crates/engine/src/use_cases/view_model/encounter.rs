//! Encounter-group transformer.

use sheetpress_shared::PrintOptions;

use super::format::{escape_html, grouped};
use super::npc::npc_view_model;
use super::types::EncounterVm;
use crate::use_cases::extract::EncounterSheet;

/// Transform an encounter record; each member renders with the same
/// options as the group.
pub fn encounter_view_model(sheet: &EncounterSheet, options: &PrintOptions) -> EncounterVm {
    let members = sheet
        .members
        .iter()
        .map(|member| npc_view_model(member, options))
        .collect();
    encounter_vm_with_members(sheet, members)
}

/// Assemble the group tree around member view models that were built
/// elsewhere (the orchestrator maps members in parallel); order must
/// match the sheet's member order.
pub fn encounter_vm_with_members(
    sheet: &EncounterSheet,
    members: Vec<super::types::NpcVm>,
) -> EncounterVm {
    let total_xp: u32 = sheet.members.iter().map(|member| member.xp).sum();
    let summary_line = match sheet.members.len() {
        1 => format!("1 creature \u{b7} {} XP", grouped(total_xp)),
        count => format!("{} creatures \u{b7} {} XP", count, grouped(total_xp)),
    };
    EncounterVm {
        name: escape_html(&sheet.name),
        summary_line,
        members,
    }
}
