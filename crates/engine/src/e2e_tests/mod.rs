//! End-to-end pipeline tests over fixture documents.
//!
//! Each test drives the full extract -> transform -> render -> output
//! path through `PrintService` with mocked host ports and asserts on the
//! final HTML document.

use std::sync::Arc;
use std::sync::Mutex;

use serde_json::{json, Value};
use sheetpress_shared::{HostDocument, PrintMode, SheetKind};

use crate::infrastructure::documents::FileDocumentStore;
use crate::infrastructure::ports::{MockSettingsStore, Notifier, OutputPort, PortError};
use crate::PrintService;

/// Output port that captures the rendered document for assertions.
struct CapturingOutput {
    captured: Arc<Mutex<Option<String>>>,
}

#[async_trait::async_trait]
impl OutputPort for CapturingOutput {
    async fn open(&self, html: &str, _mode: PrintMode) -> Result<(), PortError> {
        *self.captured.lock().expect("lock") = Some(html.to_string());
        Ok(())
    }
}

struct QuietNotifier;

impl Notifier for QuietNotifier {
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

fn service_with_documents(
    documents: Vec<Value>,
) -> (PrintService, Arc<Mutex<Option<String>>>) {
    let captured = Arc::new(Mutex::new(None));
    let output = CapturingOutput {
        captured: Arc::clone(&captured),
    };
    let mut settings = MockSettingsStore::new();
    settings.expect_print_defaults().returning(|_| Ok(None));
    let service = PrintService::new(
        Arc::new(FileDocumentStore::from_documents(documents)),
        Arc::new(settings),
        Arc::new(output),
        Arc::new(QuietNotifier),
    );
    (service, captured)
}

fn rendered(captured: &Arc<Mutex<Option<String>>>) -> String {
    captured
        .lock()
        .expect("lock")
        .clone()
        .expect("a document was rendered")
}

fn fixture_character() -> HostDocument {
    HostDocument::new(json!({
        "type": "character",
        "name": "Mira \"Lantern\" Dawnbrook",
        "system": {
            "details": {"alignment": "Neutral Good"},
            "abilities": {
                "str": {"value": 8},
                "dex": {"value": 16, "proficient": 1},
                "con": {"value": 12},
                "int": {"value": 14, "proficient": 1},
                "wis": {"value": 13},
                "cha": {"value": 10}
            },
            "skills": {
                "ste": {"total": 6, "value": 1},
                "acr": {"total": 3, "value": 0},
                "inv": {"total": 5, "value": 1}
            },
            "attributes": {
                "hp": {"value": 28, "max": 31},
                "ac": {"value": 15},
                "movement": {"walk": 30},
                "spellcasting": "int",
                "prof": 3
            },
            "traits": {
                "dr": {"value": ["fire"], "custom": "Bludgeoning from nonmagical attacks"},
                "languages": {"value": ["common", "elvish"]}
            },
            "spells": {
                "spell1": {"value": 3, "max": 4}
            }
        },
        "items": [
            {"type": "class", "name": "Rogue", "system": {"levels": 5, "hitDice": "d8", "hitDiceUsed": 1}},
            {"type": "weapon", "_id": "rapier", "name": "Rapier", "system": {
                "actionType": "mwak",
                "equipped": true,
                "quantity": 1,
                "properties": ["fin"],
                "damage": {"parts": [["1d8+@mod", "piercing"]]}
            }},
            {"type": "spell", "name": "Shield", "system": {
                "level": 1,
                "activation": {"type": "reaction"},
                "range": {"units": "self"},
                "duration": {"value": 1, "units": "round"},
                "properties": ["vocal", "somatic"]
            }},
            {"type": "feat", "name": "Cunning Action", "system": {
                "type": {"value": "class"},
                "activation": {"type": "bonus"},
                "description": {"value": "<p>Dash, Disengage, or Hide as a bonus action.</p>"}
            }},
            {"type": "container", "_id": "pack", "name": "Backpack", "system": {"quantity": 1}},
            {"type": "consumable", "_id": "rations", "name": "Rations", "system": {
                "quantity": 5, "container": "pack"
            }}
        ]
    }))
}

#[tokio::test]
async fn test_character_sheet_end_to_end() {
    let (service, captured) = service_with_documents(vec![]);
    service
        .print(
            &fixture_character(),
            SheetKind::Character,
            PrintMode::Preview,
            None,
        )
        .await
        .expect("pipeline");
    let html = rendered(&captured);

    // Self-contained document
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<style>"));
    // Name escaped exactly once
    assert!(html.contains("Mira &quot;Lantern&quot; Dawnbrook"));
    assert!(!html.contains("&amp;quot;"));
    // Abilities and combat header
    assert!(html.contains("DEX"));
    assert!(html.contains("<b>AC</b> 15"));
    assert!(html.contains("<b>HP</b> 28 / 31"));
    // Skills sorted by label: Acrobatics before Investigation before Stealth
    let acr = html.find("Acrobatics").expect("acrobatics");
    let inv = html.find("Investigation").expect("investigation");
    let ste = html.find("Stealth").expect("stealth");
    assert!(acr < inv && inv < ste);
    // Custom trait entries precede catalog entries
    let custom = html.find("Bludgeoning from nonmagical attacks").expect("custom");
    let fire = html.find("fire").expect("fire");
    assert!(custom < fire);
    // Finesse rapier: DEX +3 with proficiency +3
    assert!(html.contains("<td>+6</td>"));
    assert!(html.contains("1d8+3 piercing (avg. 7)"));
    // Spellcasting present with slot line
    assert!(html.contains("<h2>Spellcasting</h2>"));
    assert!(html.contains("3/4 slots"));
    // Container nesting
    assert!(html.contains("Backpack"));
    assert!(html.contains("&#8627; Rations"));
    // Bonus action bucket
    assert!(html.contains("<h2>Bonus Actions</h2>"));
    assert!(html.contains("Cunning Action"));
}

#[tokio::test]
async fn test_character_without_spellcasting_omits_section() {
    let doc = HostDocument::new(json!({
        "type": "character",
        "name": "Brawler",
        "system": {},
        "items": []
    }));
    let (service, captured) = service_with_documents(vec![]);
    service
        .print(&doc, SheetKind::Character, PrintMode::Preview, None)
        .await
        .expect("pipeline");
    let html = rendered(&captured);
    assert!(!html.contains("Spellcasting"));
    assert!(!html.contains("<h2>Inventory</h2>"));
}

#[tokio::test]
async fn test_npc_stat_block_end_to_end() {
    let doc = HostDocument::new(json!({
        "type": "npc",
        "name": "Goblin Boss",
        "system": {
            "details": {"cr": 1, "type": {"value": "humanoid"}, "alignment": "Neutral Evil"},
            "traits": {"size": "sm"},
            "abilities": {"str": {"value": 10}, "dex": {"value": 14}},
            "attributes": {"hp": {"value": 21, "max": 21}, "ac": {"value": 17}}
        },
        "items": [
            {"type": "weapon", "name": "Scimitar", "system": {
                "actionType": "mwak",
                "damage": {"parts": [["1d6+@mod", "slashing"]]}
            }}
        ]
    }));
    let (service, captured) = service_with_documents(vec![]);
    service
        .print(&doc, SheetKind::Npc, PrintMode::Print, None)
        .await
        .expect("pipeline");
    let html = rendered(&captured);
    assert!(html.contains("Goblin Boss"));
    assert!(html.contains("Small Humanoid, Neutral Evil"));
    assert!(html.contains("CR 1 (200 XP)"));
    assert!(html.contains("Scimitar"));
}

#[tokio::test]
async fn test_encounter_group_end_to_end() {
    let goblin = json!({
        "uuid": "Actor.gob", "_id": "gob", "type": "npc", "name": "Goblin",
        "system": {"details": {"cr": 0.25}}
    });
    let ogre = json!({
        "uuid": "Actor.ogre", "_id": "ogre", "type": "npc", "name": "Ogre",
        "system": {"details": {"cr": 2}}
    });
    let group = HostDocument::new(json!({
        "type": "group",
        "name": "Road Ambush",
        "system": {"members": ["Actor.gob", "Actor.ogre", "Actor.gob"]}
    }));
    let (service, captured) = service_with_documents(vec![goblin, ogre]);
    service
        .print(&group, SheetKind::EncounterGroup, PrintMode::Preview, None)
        .await
        .expect("pipeline");
    let html = rendered(&captured);
    assert!(html.contains("Road Ambush"));
    // Duplicate member reference deduplicates: 2 creatures, 50 + 450 XP
    assert!(html.contains("2 creatures \u{b7} 500 XP"));
    // Members rendered in original order
    let gob = html.find("Goblin").expect("goblin");
    let ogre_pos = html.find("Ogre").expect("ogre");
    assert!(gob < ogre_pos);
}

#[tokio::test]
async fn test_party_summary_end_to_end() {
    let mira = json!({
        "uuid": "Actor.mira", "_id": "mira", "type": "character", "name": "Mira",
        "system": {
            "attributes": {"hp": {"max": 31}, "ac": {"value": 15}},
            "abilities": {"dex": {"value": 16, "proficient": 1}},
            "skills": {"prc": {"total": 2, "value": 1}}
        },
        "items": [{"type": "class", "name": "Rogue", "system": {"levels": 5}}]
    });
    let party = HostDocument::new(json!({
        "type": "group",
        "name": "The Lanterns",
        "system": {"members": ["Actor.mira"]}
    }));
    let (service, captured) = service_with_documents(vec![mira]);
    service
        .print(&party, SheetKind::PartySummary, PrintMode::Preview, None)
        .await
        .expect("pipeline");
    let html = rendered(&captured);
    assert!(html.contains("The Lanterns"));
    assert!(html.contains("Rog 5"));
    assert!(html.contains("<b>Passive Perception</b> 12"));
}
