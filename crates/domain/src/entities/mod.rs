//! Sheet entities - the normalized records produced by extraction
//!
//! Every entity here is recomputed from the host's live document graph on
//! each extraction call. This layer owns none of the underlying data and
//! never mutates the host documents.

mod ability;
mod action;
mod combat;
mod inventory;
mod skill;
mod spellcasting;
mod trait_set;

pub use ability::{AbilityKey, AbilityScore};
pub use action::{
    ActionEntry, ActivationType, AttackKind, AttackPayload, DamageComponent, LimitedUses,
    RecoveryPeriod,
};
pub use combat::{CombatProfile, HitDicePool, HitPoints, SenseEntry, SpeedEntry};
pub use inventory::{InventoryItem, ItemKind};
pub use skill::{ProficiencyTier, Skill};
pub use spellcasting::{PactPool, SlotPool, SpellEntry, SpellLevelGroup, SpellcastingProfile};
pub use trait_set::{TraitCategory, TraitSet};
