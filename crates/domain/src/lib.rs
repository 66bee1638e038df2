pub mod entities;
pub mod error;
pub mod game_systems;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    AbilityKey, AbilityScore, ActionEntry, ActivationType, AttackKind, AttackPayload,
    CombatProfile, DamageComponent, HitDicePool, HitPoints, InventoryItem, ItemKind,
    LimitedUses, PactPool, ProficiencyTier, RecoveryPeriod, SenseEntry, Skill, SlotPool,
    SpeedEntry, SpellEntry, SpellLevelGroup, SpellcastingProfile, TraitCategory, TraitSet,
};

pub use error::DomainError;

// Re-export game system rules
pub use game_systems::dnd5e;

// Re-export value objects
pub use value_objects::{
    dice_average, resolve_placeholders, ChallengeParseError, ChallengeRating, DiceFormula,
    DiceParseError,
};
