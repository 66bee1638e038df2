//! Party-summary transformer.

use sheetpress_shared::PrintOptions;

use super::format::{escape_html, signed};
use super::types::{PartyMemberVm, PartyVm, StatLineVm};
use crate::use_cases::extract::{PartyMember, PartySummarySheet};

/// Transform a party summary record into its presentation tree.
pub fn party_view_model(sheet: &PartySummarySheet, options: &PrintOptions) -> PartyVm {
    PartyVm {
        name: escape_html(&sheet.name),
        members: sheet
            .members
            .iter()
            .map(|member| member_vm(member, options))
            .collect(),
    }
}

fn member_vm(member: &PartyMember, options: &PrintOptions) -> PartyMemberVm {
    let senses = member
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
    let saves_line = member
        .saves
        .iter()
        .map(|(key, save)| format!("{} {}", key.abbreviation(), signed(*save)))
        .collect::<Vec<_>>()
        .join(" \u{b7} ");
    let skills_line = member
        .proficient_skills
        .iter()
        .map(|skill| format!("{} {}", escape_html(&skill.label), signed(skill.total)))
        .collect::<Vec<_>>()
        .join(", ");
    let passives = vec![
        StatLineVm {
            label: "Passive Perception".to_string(),
            value: member.passive_perception.to_string(),
        },
        StatLineVm {
            label: "Passive Investigation".to_string(),
            value: member.passive_investigation.to_string(),
        },
        StatLineVm {
            label: "Passive Insight".to_string(),
            value: member.passive_insight.to_string(),
        },
    ];
    let slots_line = if options.section_enabled("spellcasting") {
        match (&member.slot_summary, &member.pact_summary) {
            (Some(slots), Some(pact)) => Some(format!("{} \u{b7} {}", slots, pact)),
            (Some(slots), None) => Some(slots.clone()),
            (None, Some(pact)) => Some(pact.clone()),
            (None, None) => None,
        }
    } else {
        None
    };

    PartyMemberVm {
        name: escape_html(&member.name),
        class_line: escape_html(&member.class_line),
        armor_class: member.armor_class.to_string(),
        hit_points: member.hit_points_max.to_string(),
        senses,
        passives,
        saves_line,
        skills_line,
        slots_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetpress_domain::AbilityKey;

    fn member() -> PartyMember {
        PartyMember {
            name: "Mira".to_string(),
            class_line: "Rog 5".to_string(),
            level: 5,
            armor_class: 15,
            hit_points_max: 31,
            senses: vec![],
            passive_perception: 12,
            passive_investigation: 11,
            passive_insight: 10,
            saves: vec![(AbilityKey::Str, 0), (AbilityKey::Dex, 6)],
            proficient_skills: vec![],
            slot_summary: Some("3/4".to_string()),
            pact_summary: None,
        }
    }

    #[test]
    fn test_saves_line_signed() {
        let sheet = PartySummarySheet {
            name: "The Lanterns".to_string(),
            members: vec![member()],
        };
        let vm = party_view_model(&sheet, &PrintOptions::default());
        assert_eq!(vm.members[0].saves_line, "STR +0 \u{b7} DEX +6");
        assert_eq!(vm.members[0].slots_line.as_deref(), Some("3/4"));
    }

    #[test]
    fn test_spellcasting_section_toggle_hides_slots() {
        let sheet = PartySummarySheet {
            name: "P".to_string(),
            members: vec![member()],
        };
        let options = PrintOptions::default().with_section("spellcasting", false);
        let vm = party_view_model(&sheet, &options);
        assert!(vm.members[0].slots_line.is_none());
    }
}
