//! Extraction - host documents to typed sheet records.
//!
//! Field extractors are pure functions over one [`HostDocument`]; the
//! per-kind composite extractors orchestrate them and add derived figures
//! (XP from challenge rating, average damage, to-hit bonuses). Absent
//! optional fields default silently to their documented fallback values;
//! unexpected shapes fall through an ordered chain of interpretation
//! strategies ending in empty/zero.

mod abilities;
mod actions;
mod character;
mod combat;
mod encounter;
mod error;
mod features;
mod fields;
mod inventory;
mod npc;
mod party;
mod skills;
mod spellcasting;
mod text;
mod traits;

pub use abilities::extract_abilities;
pub use actions::{categorize_actions, ActionBuckets};
pub use character::{extract_character, CharacterSheet};
pub use combat::extract_combat;
pub use encounter::{extract_encounter, EncounterSheet};
pub use error::ExtractError;
pub use features::{extract_features, FeatureCategory, FeatureGroup};
pub use inventory::extract_inventory;
pub use npc::{extract_npc, NpcSheet};
pub use party::{extract_party, PartyMember, PartySummarySheet};
pub use skills::extract_skills;
pub use spellcasting::extract_spellcasting;
pub use text::clean_text;
pub use traits::{extract_traits, resolve_trait_set};
