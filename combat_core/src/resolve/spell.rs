//! Spell-like skill resolution and cast interruption

use super::result::SpellResult;
use super::{clamped_ratio, effective_attribute, weapon_in, AttackContext};
use crate::actor::Actor;
use crate::aggregate::BonusAggregate;
use crate::content::{ContentError, GameConstants, SpellKind};
use crate::rolls::Rolls;
use crate::skillchain::ChainState;
use crate::types::{DamageKind, EquipSlot, SpellId, StatKind};
use tracing::debug;

/// Resolve one spell-like skill against the defender
///
/// `potency` is the caller-supplied base strength of the skill (spell tier,
/// blue-magic payload, ...). `chain_state` is the defender's current
/// skillchain state as stored by the surrounding layer; a spell whose
/// element matches a live chain step magic-bursts.
pub fn resolve_spell(
    ctx: &AttackContext,
    spell_id: SpellId,
    potency: f64,
    mp_spent: i32,
    chain_state: Option<&ChainState>,
    now: f64,
    rolls: &mut Rolls,
) -> Result<SpellResult, ContentError> {
    let spell = ctx.content.spell(spell_id)?;
    let constants = &ctx.content.constants;

    let mut damage = potency;

    // Affinity stances only touch blue magic.
    if spell.kind.is_blue() {
        let affinity = match spell.kind {
            SpellKind::BluePhysical => ctx.attacker_bonuses.physical_affinity,
            _ => ctx.attacker_bonuses.magical_affinity,
        };
        damage *= 1.0 + affinity as f64 / 100.0;
    }

    // Restraint rides physical-type spells only.
    if spell.kind.is_physical() {
        damage *= 1.0 + ctx.attacker_bonuses.restraint as f64 / 100.0;
    }

    damage *= ctx.attacker_bonuses.boost_multiplier();
    damage *= 1.0 + ctx.attacker_bonuses.magic_attack as f64 / 100.0;

    // Attacker/defender stat ratio from the spell's scaling attributes.
    let attacker_stat = effective_attribute(ctx.attacker, ctx.attacker_bonuses, spell.attack_attribute);
    let defender_stat = effective_attribute(ctx.defender, ctx.defender_bonuses, spell.defense_attribute);
    damage *= clamped_ratio(
        attacker_stat,
        defender_stat,
        constants.attack.ratio_floor,
        constants.attack.ratio_cap,
    );

    damage *= ctx.defender_bonuses.magical_taken_multiplier();

    // Spells crit only off the flat crit-rate potency.
    let critical = rolls.roll_against(ctx.attacker_bonuses.crit_rate);
    if critical {
        damage *= ctx
            .attacker_bonuses
            .crit_multiplier(constants.attack.crit_base_multiplier);
    }

    // Magic burst against the defender's current chain step.
    let burst_step = chain_state.and_then(|state| state.burst_step(spell.element, now));
    if let Some(step) = burst_step {
        let burst = &constants.burst;
        let mut multiplier = (burst.base + burst.per_step * step as f64).min(burst.cap);
        multiplier *= 1.0 + ctx.attacker_bonuses.magic_burst_damage as f64 / 100.0;
        damage *= multiplier;
    }

    // Elemental resistance, including any resistance multipliers from
    // status effects (a matching DoT softens the stat it multiplies).
    let resist_potency = ctx.defender_bonuses.resist(spell.element) as f64
        * ctx
            .defender_bonuses
            .multiplier_for(StatKind::Resist(spell.element));
    let resist_multiplier = (1.0 - resist_potency / 100.0).clamp(0.0, 2.0);
    damage *= resist_multiplier;

    // Effective weapon magic-power; an unarmed caster gets no bonus.
    if let Some(weapon) = weapon_in(ctx.content, ctx.attacker, EquipSlot::MainHand)? {
        damage *= 1.0 + weapon.magic_power as f64 / 100.0;
    }

    debug!(spell = spell_id.0, damage, ?burst_step, "resolving spell");

    Ok(SpellResult {
        attacker: ctx.attacker.id,
        defender: ctx.defender.id,
        spell: spell_id,
        damage: damage.max(0.0) as i32,
        critical,
        burst_step,
        resist_multiplier,
        mp_spent,
        damage_kind: DamageKind::Magical,
    })
}

/// Check whether a hit interrupts the defender's cast
///
/// Uninterruptible casts never break; otherwise the base interrupt rate is
/// reduced by the defender's interrupt-resist potency and rolled.
pub fn check_cast_interrupt(
    defender: &Actor,
    defender_bonuses: &BonusAggregate,
    constants: &GameConstants,
    rolls: &mut Rolls,
) -> bool {
    let Some(cast) = defender.casting else {
        return false;
    };
    if cast.uninterruptible {
        return false;
    }
    let chance = constants.attack.base_interrupt_rate - defender_bonuses.interrupt_resist;
    rolls.roll_against(chance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorKind, CastState};
    use crate::content::{ContentRegistry, Equipped, ItemDefinition, SpellDefinition, WeaponDefinition};
    use crate::skillchain::ChainAttribute;
    use crate::types::{ActorId, Attribute, Element, ItemId};

    fn fire_spell() -> SpellDefinition {
        SpellDefinition {
            id: SpellId(1),
            name: "Fire".to_string(),
            kind: SpellKind::Elemental,
            element: Element::Fire,
            mp_cost: 30,
            cast_time: 3.0,
            recast_time: 6.0,
            attack_attribute: Attribute::Int,
            defense_attribute: Attribute::Int,
        }
    }

    fn setup() -> (ContentRegistry, Actor, Actor) {
        let mut content = ContentRegistry::new();
        content.register_spell(fire_spell());
        let attacker = Actor::new(ActorId(1), ActorKind::Player, 50)
            .with_attribute(Attribute::Int, 60);
        let defender = Actor::new(ActorId(2), ActorKind::Player, 50)
            .with_attribute(Attribute::Int, 60);
        (content, attacker, defender)
    }

    fn plain_ctx<'a>(
        content: &'a ContentRegistry,
        attacker: &'a Actor,
        defender: &'a Actor,
        att_bonuses: &'a BonusAggregate,
        def_bonuses: &'a BonusAggregate,
    ) -> AttackContext<'a> {
        AttackContext {
            attacker,
            defender,
            attacker_bonuses: att_bonuses,
            defender_bonuses: def_bonuses,
            content,
        }
    }

    #[test]
    fn test_plain_spell_deals_potency() {
        let (content, attacker, defender) = setup();
        let att = BonusAggregate::new();
        let def = BonusAggregate::new();
        let ctx = plain_ctx(&content, &attacker, &defender, &att, &def);
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(1), 100.0, 30, None, 0.0, &mut rolls).unwrap();
        // Ratio 1.0, no bonuses, no burst, no resistance.
        assert_eq!(result.damage, 100);
        assert_eq!(result.burst_step, None);
        assert!(!result.critical);
        assert_eq!(result.mp_spent, 30);
    }

    #[test]
    fn test_magic_burst_ramps_and_caps() {
        let (content, attacker, defender) = setup();
        let att = BonusAggregate::new();
        let def = BonusAggregate::new();
        let ctx = plain_ctx(&content, &attacker, &defender, &att, &def);

        // Step 1 of a Liquefaction chain bursts fire at x1.5.
        let state = ChainState::Step {
            step: 1,
            attribute: ChainAttribute::Liquefaction,
            expires_at: 10.0,
        };
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(1), 100.0, 30, Some(&state), 5.0, &mut rolls).unwrap();
        assert_eq!(result.burst_step, Some(1));
        assert_eq!(result.damage, 150);

        // Deep chains cap at x2.5.
        let state = ChainState::Step {
            step: 9,
            attribute: ChainAttribute::Liquefaction,
            expires_at: 10.0,
        };
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(1), 100.0, 30, Some(&state), 5.0, &mut rolls).unwrap();
        assert_eq!(result.damage, 250);
    }

    #[test]
    fn test_burst_requires_matching_element_and_live_window() {
        let (content, attacker, defender) = setup();
        let att = BonusAggregate::new();
        let def = BonusAggregate::new();
        let ctx = plain_ctx(&content, &attacker, &defender, &att, &def);

        // Induration bursts ice, not fire.
        let state = ChainState::Step {
            step: 2,
            attribute: ChainAttribute::Induration,
            expires_at: 10.0,
        };
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(1), 100.0, 30, Some(&state), 5.0, &mut rolls).unwrap();
        assert_eq!(result.burst_step, None);
        assert_eq!(result.damage, 100);

        // An expired window never bursts.
        let state = ChainState::Step {
            step: 2,
            attribute: ChainAttribute::Liquefaction,
            expires_at: 4.0,
        };
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(1), 100.0, 30, Some(&state), 5.0, &mut rolls).unwrap();
        assert_eq!(result.burst_step, None);
    }

    #[test]
    fn test_burst_damage_bonus_scales_the_burst() {
        let (content, attacker, defender) = setup();
        let mut att = BonusAggregate::new();
        att.magic_burst_damage = 20;
        let def = BonusAggregate::new();
        let ctx = plain_ctx(&content, &attacker, &defender, &att, &def);
        let state = ChainState::Step {
            step: 1,
            attribute: ChainAttribute::Liquefaction,
            expires_at: 10.0,
        };
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(1), 100.0, 30, Some(&state), 5.0, &mut rolls).unwrap();
        // 100 * 1.5 * 1.2 = 180
        assert_eq!(result.damage, 180);
    }

    #[test]
    fn test_resistance_mitigates_and_weakness_amplifies() {
        let (content, attacker, defender) = setup();
        let att = BonusAggregate::new();
        let mut def = BonusAggregate::new();
        def.resist[Element::Fire.index()] = 50;
        let ctx = plain_ctx(&content, &attacker, &defender, &att, &def);
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(1), 100.0, 30, None, 0.0, &mut rolls).unwrap();
        assert_eq!(result.damage, 50);
        assert!((result.resist_multiplier - 0.5).abs() < 1e-9);

        let mut def = BonusAggregate::new();
        def.resist[Element::Fire.index()] = -50;
        let ctx = plain_ctx(&content, &attacker, &defender, &att, &def);
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(1), 100.0, 30, None, 0.0, &mut rolls).unwrap();
        assert_eq!(result.damage, 150);
    }

    #[test]
    fn test_weapon_magic_power_multiplies() {
        let (mut content, mut attacker, defender) = setup();
        content.register_item(ItemDefinition {
            id: ItemId(9),
            name: "Caster Staff".to_string(),
            slot: EquipSlot::MainHand,
            stats: vec![],
            traits: vec![],
            static_augments: vec![],
            weapon: Some(WeaponDefinition {
                power: 12,
                delay: 360,
                h2h: false,
                magic_power: 25,
            }),
        });
        attacker
            .equipment
            .insert(EquipSlot::MainHand, Equipped::bare(ItemId(9)));

        let att = BonusAggregate::new();
        let def = BonusAggregate::new();
        let ctx = plain_ctx(&content, &attacker, &defender, &att, &def);
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(1), 100.0, 30, None, 0.0, &mut rolls).unwrap();
        assert_eq!(result.damage, 125);
    }

    #[test]
    fn test_blue_magic_affinity() {
        let (mut content, attacker, defender) = setup();
        content.register_spell(SpellDefinition {
            id: SpellId(2),
            name: "Bludgeon".to_string(),
            kind: SpellKind::BluePhysical,
            element: Element::Earth,
            mp_cost: 20,
            cast_time: 1.0,
            recast_time: 10.0,
            attack_attribute: Attribute::Str,
            defense_attribute: Attribute::Vit,
        });
        let mut att = BonusAggregate::new();
        att.physical_affinity = 30;
        att.restraint = 10;
        let def = BonusAggregate::new();
        let ctx = plain_ctx(&content, &attacker, &defender, &att, &def);
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(2), 100.0, 20, None, 0.0, &mut rolls).unwrap();
        // STR 10 / VIT 10 ratio 1.0; 100 * 1.3 affinity * 1.1 restraint = 143
        assert_eq!(result.damage, 143);

        // A magical blue spell ignores the physical stance.
        content.register_spell(SpellDefinition {
            id: SpellId(3),
            name: "Cursed Sphere".to_string(),
            kind: SpellKind::BlueMagical,
            element: Element::Water,
            mp_cost: 25,
            cast_time: 2.0,
            recast_time: 12.0,
            attack_attribute: Attribute::Int,
            defense_attribute: Attribute::Int,
        });
        let ctx = plain_ctx(&content, &attacker, &defender, &att, &def);
        let mut rolls = Rolls::from_seed(1);
        let result =
            resolve_spell(&ctx, SpellId(3), 100.0, 25, None, 0.0, &mut rolls).unwrap();
        assert_eq!(result.damage, 100);
    }

    #[test]
    fn test_interrupt_respects_resist_and_uninterruptible() {
        let constants = GameConstants::default();
        let mut defender = Actor::new(ActorId(5), ActorKind::Player, 30);
        let bonuses = BonusAggregate::new();
        let mut rolls = Rolls::from_seed(1);

        // Not casting: nothing to interrupt.
        assert!(!check_cast_interrupt(&defender, &bonuses, &constants, &mut rolls));

        // Uninterruptible casts never break.
        defender.casting = Some(CastState {
            remaining: 2.0,
            uninterruptible: true,
        });
        assert!(!check_cast_interrupt(&defender, &bonuses, &constants, &mut rolls));

        // Full interrupt-resist makes the roll a guaranteed failure.
        defender.casting = Some(CastState {
            remaining: 2.0,
            uninterruptible: false,
        });
        let mut resistant = BonusAggregate::new();
        resistant.interrupt_resist = 100;
        for _ in 0..100 {
            assert!(!check_cast_interrupt(&defender, &resistant, &constants, &mut rolls));
        }

        // An unprotected cast breaks about half the time.
        let interrupted = (0..1000)
            .filter(|_| check_cast_interrupt(&defender, &bonuses, &constants, &mut rolls))
            .count();
        assert!((400..=600).contains(&interrupted), "{interrupted}");
    }
}
