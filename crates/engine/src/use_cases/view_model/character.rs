//! Character sheet transformer.

use sheetpress_domain::InventoryItem;
use sheetpress_shared::{PortraitMode, PrintOptions};

use super::format::{escape_html, uses_annotation};
use super::parts::{
    ability_vms, attack_vm, combat_vm, entry_vm, skill_vms, spellcasting_vm, trait_lines,
};
use super::types::{CharacterVm, ItemVm, SectionVm};
use crate::use_cases::extract::CharacterSheet;

/// Transform a character record into its presentation tree.
pub fn character_view_model(sheet: &CharacterSheet, options: &PrintOptions) -> CharacterVm {
    let identity_line = [&sheet.race, &sheet.background, &sheet.alignment]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| escape_html(part))
        .collect::<Vec<_>>()
        .join(" \u{b7} ");

    let skills = (options.section_enabled("skills") && !sheet.skills.is_empty())
        .then(|| skill_vms(&sheet.skills));
    let traits = options
        .section_enabled("traits")
        .then(|| trait_lines(&sheet.traits))
        .flatten();
    let attacks = (options.section_enabled("attacks") && !sheet.actions.attacks.is_empty())
        .then(|| sheet.actions.attacks.iter().map(attack_vm).collect());
    let actions = if options.section_enabled("actions") {
        action_sections(sheet)
    } else {
        Vec::new()
    };
    let features = (options.section_enabled("features") && !sheet.features.is_empty()).then(|| {
        sheet
            .features
            .iter()
            .map(|group| SectionVm {
                heading: group.category.label().to_string(),
                entries: group.entries.iter().map(entry_vm).collect(),
            })
            .collect()
    });
    let spellcasting = options
        .section_enabled("spellcasting")
        .then(|| sheet.spellcasting.as_ref().map(spellcasting_vm))
        .flatten();
    let inventory = (options.section_enabled("inventory") && !sheet.inventory.is_empty())
        .then(|| sheet.inventory.iter().map(item_vm).collect());

    CharacterVm {
        name: escape_html(&sheet.name),
        class_line: escape_html(&sheet.class_line),
        identity_line,
        portrait: match options.portrait {
            PortraitMode::Shown => sheet.portrait.as_deref().map(escape_html),
            PortraitMode::Hidden => None,
        },
        abilities: ability_vms(&sheet.abilities),
        combat: combat_vm(&sheet.combat),
        skills,
        traits,
        attacks,
        actions,
        features,
        spellcasting,
        inventory,
    }
}

fn action_sections(sheet: &CharacterSheet) -> Vec<SectionVm> {
    let buckets = [
        ("Actions", &sheet.actions.actions),
        ("Bonus Actions", &sheet.actions.bonus),
        ("Reactions", &sheet.actions.reactions),
        ("Other", &sheet.actions.other),
    ];
    buckets
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(heading, entries)| SectionVm {
            heading: heading.to_string(),
            entries: entries.iter().map(entry_vm).collect(),
        })
        .collect()
}

fn item_vm(item: &InventoryItem) -> ItemVm {
    ItemVm {
        name: escape_html(&item.name),
        kind: item.kind.label().to_string(),
        quantity: item.quantity.to_string(),
        weight: if item.weight > 0.0 {
            format!("{} lb.", item.weight)
        } else {
            String::new()
        },
        equipped: item.equipped,
        uses: item.uses.as_ref().map(|uses| uses_annotation(uses)),
        contents: item.contents.iter().map(item_vm).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::extract::extract_character;
    use serde_json::json;
    use sheetpress_shared::HostDocument;

    fn sheet() -> CharacterSheet {
        let doc = HostDocument::new(json!({
            "type": "character",
            "name": "Mira & Co.",
            "system": {
                "details": {"alignment": "Neutral Good"},
                "skills": {"ste": {"total": 6, "value": 1}}
            },
            "items": [
                {"type": "class", "name": "Rogue", "system": {"levels": 5}}
            ]
        }));
        extract_character(&doc).expect("sheet")
    }

    #[test]
    fn test_name_escaped_exactly_once() {
        let vm = character_view_model(&sheet(), &PrintOptions::default());
        assert_eq!(vm.name, "Mira &amp; Co.");
        assert!(!vm.name.contains("&amp;amp;"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let vm = character_view_model(&sheet(), &PrintOptions::default());
        // No spells, no inventory, no traits on this document
        assert!(vm.spellcasting.is_none());
        assert!(vm.inventory.is_none());
        assert!(vm.traits.is_none());
        assert!(vm.attacks.is_none());
        // Skills exist
        assert!(vm.skills.is_some());
    }

    #[test]
    fn test_disabled_section_is_suppressed() {
        let options = PrintOptions::default().with_section("skills", false);
        let vm = character_view_model(&sheet(), &options);
        assert!(vm.skills.is_none());
    }

    #[test]
    fn test_hidden_portrait_mode() {
        let mut record = sheet();
        record.portrait = Some("img/mira.webp".to_string());
        let shown = character_view_model(&record, &PrintOptions::default());
        assert_eq!(shown.portrait.as_deref(), Some("img/mira.webp"));
        let hidden = character_view_model(
            &record,
            &PrintOptions {
                portrait: PortraitMode::Hidden,
                ..Default::default()
            },
        );
        assert!(hidden.portrait.is_none());
    }
}
