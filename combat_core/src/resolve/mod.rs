//! Damage resolution - auto-attacks, weapon skills and spell-like skills
//!
//! Each resolver consumes two pre-built aggregates (attacker and defender)
//! plus action parameters, and produces a plain-data result for the
//! surrounding event/combat-log layer. All randomness routes through
//! [`Rolls`](crate::rolls::Rolls).

mod auto_attack;
mod result;
mod spell;
mod weapon_skill;

pub use auto_attack::resolve_auto_attack;
pub use result::{
    AutoAttackResult, CombatEvent, SkillDamageResult, SpellResult, Swing, SwingKind, SwingOutcome,
};
pub use spell::{check_cast_interrupt, resolve_spell};
pub use weapon_skill::resolve_weapon_skill;

use crate::actor::Actor;
use crate::aggregate::BonusAggregate;
use crate::content::{ContentError, ContentRegistry, WeaponDefinition};
use crate::types::{Attribute, EquipSlot, StatKind};

/// Everything a resolver needs about one exchange
///
/// Aggregates are borrowed from the [`BonusAggregator`](crate::aggregate::BonusAggregator)
/// (or a scoped copy) by the caller; the resolvers never touch the cache.
pub struct AttackContext<'a> {
    pub attacker: &'a Actor,
    pub defender: &'a Actor,
    pub attacker_bonuses: &'a BonusAggregate,
    pub defender_bonuses: &'a BonusAggregate,
    pub content: &'a ContentRegistry,
}

/// Effective attribute value: base + flat bonus, scaled by any attribute
/// multipliers, floored at zero
pub(crate) fn effective_attribute(actor: &Actor, bonuses: &BonusAggregate, attribute: Attribute) -> f64 {
    let flat = actor.base_attribute(attribute) + bonuses.attributes.get(attribute);
    (flat as f64 * bonuses.multiplier_for(StatKind::Attribute(attribute))).max(0.0)
}

/// The weapon definition equipped in a slot, if any
///
/// A missing item in the slot is an expected runtime state; an equipped item
/// id with no definition is a content bug and fails.
pub(crate) fn weapon_in<'a>(
    content: &'a ContentRegistry,
    actor: &Actor,
    slot: EquipSlot,
) -> Result<Option<&'a WeaponDefinition>, ContentError> {
    match actor.equipped(slot) {
        Some(equipped) => Ok(content.item(equipped.item)?.weapon.as_ref()),
        None => Ok(None),
    }
}

/// Attacker/defender attribute ratio, clamped to the configured safe range
pub(crate) fn clamped_ratio(numerator: f64, denominator: f64, floor: f64, cap: f64) -> f64 {
    (numerator / denominator.max(1.0)).clamp(floor, cap)
}

/// Melee critical-hit chance as an integer percent
///
/// 10 x the capped DEX/AGI ratio, plus the attacker's crit-rate potency,
/// minus the defender's anti-crit potency. The roll helper treats values
/// outside [0, 100) as certainty either way.
pub(crate) fn melee_crit_chance(ctx: &AttackContext) -> i32 {
    let constants = &ctx.content.constants.attack;
    let dex = effective_attribute(ctx.attacker, ctx.attacker_bonuses, Attribute::Dex);
    let agi = effective_attribute(ctx.defender, ctx.defender_bonuses, Attribute::Agi);
    let ratio = (dex / agi.max(1.0)).min(constants.crit_ratio_cap);
    (10.0 * ratio) as i32 + ctx.attacker_bonuses.crit_rate - ctx.defender_bonuses.crit_defense
}

/// Chance for a swing to land, clamped between the configured bounds
pub(crate) fn hit_chance(ctx: &AttackContext) -> i32 {
    let constants = &ctx.content.constants.attack;
    let delta = ctx.attacker_bonuses.accuracy - ctx.defender_bonuses.evasion;
    (constants.base_hit_rate + delta / 2).clamp(constants.min_hit_rate, constants.max_hit_rate)
}
