//! combat_core - Combat resolution engine for actor-vs-actor exchanges
//!
//! This library provides:
//! - BonusAggregate: every numeric combat modifier for one actor, per tick
//! - BonusAggregator: builds and caches aggregates from statuses, gear and behavior
//! - Damage resolution: auto-attacks, weapon skills and spell-like skills
//! - Skillchain: the elemental combo state machine and magic-burst windows
//! - Rolls: the single seedable primitive behind every probability gate

pub mod actor;
pub mod aggregate;
pub mod content;
pub mod resolve;
pub mod rolls;
pub mod skillchain;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use actor::{Actor, ActorKind, CastState};
pub use aggregate::{
    AddedEffect, AddedEffectProc, AttributeBonuses, BehaviorBonuses, BonusAggregate,
    BonusAggregator, HandBonuses, HandProc, InflictedStatus, JobTraits, Modifier, RetaliationProc,
    ScalarBonus,
};
pub use content::{
    ActionKind, AugmentDefinition, ConfigError, ContentError, ContentRegistry, Equipped, FtpCurve,
    GameConstants, HandRestriction, ItemDefinition, ItemTrait, MonsterDefinition, ResourceCost,
    SpellDefinition, SpellKind, WeaponDefinition, WeaponSkillDefinition, WeaponSkillKind,
};
pub use resolve::{
    check_cast_interrupt, resolve_auto_attack, resolve_spell, resolve_weapon_skill, AttackContext,
    AutoAttackResult, CombatEvent, SkillDamageResult, SpellResult, Swing, SwingKind, SwingOutcome,
};
pub use rolls::Rolls;
pub use skillchain::{advance, combine, ChainAttribute, ChainLink, ChainOutcome, ChainState};
pub use status::{tick_statuses, ActiveStatus, StatusKind};
pub use types::{
    ActorId, Attribute, AugmentId, DamageKind, Element, EquipSlot, Hand, ItemId, Job, MonsterId,
    SpellId, StatKind, WeaponSkillId,
};
