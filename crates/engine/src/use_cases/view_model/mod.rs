//! View-model transformation - extractor output to presentation trees.
//!
//! Transformers are pure functions: extractor record + print options in,
//! a tree of already-escaped, already-formatted strings and booleans out.
//! The renderer interpolates these trees without further branching.

mod character;
mod encounter;
pub mod format;
mod npc;
mod parts;
mod party;
mod types;

pub use character::character_view_model;
pub use encounter::{encounter_view_model, encounter_vm_with_members};
pub use npc::npc_view_model;
pub use party::party_view_model;
pub use types::{
    AbilityVm, AttackVm, CharacterVm, CombatVm, EncounterVm, EntryVm, ItemVm, NpcVm,
    PartyMemberVm, PartyVm, SectionVm, SkillVm, SpellGroupVm, SpellVm, SpellcastingVm,
    StatLineVm, TraitLineVm, ViewModel,
};
