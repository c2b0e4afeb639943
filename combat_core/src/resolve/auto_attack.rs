//! Auto-attack resolution

use super::result::{AutoAttackResult, CombatEvent, Swing, SwingKind, SwingOutcome};
use super::spell::check_cast_interrupt;
use super::{clamped_ratio, effective_attribute, hit_chance, melee_crit_chance, weapon_in, AttackContext};
use crate::aggregate::{AddedEffect, BonusAggregate};
use crate::content::ContentError;
use crate::rolls::Rolls;
use crate::types::{Attribute, EquipSlot, Hand};
use tracing::trace;

/// Resolve the number of swings one hand delivers this round
///
/// The quadruple, triple and double rates form a priority ladder: each is
/// rolled in descending order and the first success wins, so they never
/// stack. Per-hand occurrence rates only participate during true
/// auto-attacks (`hand` is `None` for weapon-skill rounds).
pub(super) fn swing_ladder(
    bonuses: &BonusAggregate,
    hand: Option<Hand>,
    hand_rate_cap: i32,
    rolls: &mut Rolls,
) -> u32 {
    let (occ_quad, occ_triple, occ_double) = match hand {
        Some(hand) => {
            let sub = bonuses.hand(hand);
            (
                sub.quad_swing.min(hand_rate_cap),
                sub.triple_swing.min(hand_rate_cap),
                sub.double_swing.min(hand_rate_cap),
            )
        }
        None => (0, 0, 0),
    };
    if rolls.roll_against(bonuses.quad_attack + occ_quad) {
        4
    } else if rolls.roll_against(bonuses.triple_attack + occ_triple) {
        3
    } else if rolls.roll_against(bonuses.double_attack + occ_double) {
        2
    } else {
        1
    }
}

/// Raw damage of one physical swing before the critical roll
///
/// `clamp(STR/VIT) x weapon power x damage-taken x boost`, the core physical
/// formula shared by auto-attacks and counters.
pub(super) fn base_swing_damage(ctx: &AttackContext, power: i32) -> f64 {
    let constants = &ctx.content.constants.attack;
    let strength = effective_attribute(ctx.attacker, ctx.attacker_bonuses, Attribute::Str);
    let vitality = effective_attribute(ctx.defender, ctx.defender_bonuses, Attribute::Vit);
    let ratio = clamped_ratio(strength, vitality, constants.ratio_floor, constants.ratio_cap);
    ratio
        * power as f64
        * ctx.defender_bonuses.physical_taken_multiplier()
        * ctx.attacker_bonuses.boost_multiplier()
}

/// TP one landed swing grants its attacker
pub(super) fn swing_tp_gain(
    ctx: &AttackContext,
    delay: i32,
    critical: bool,
    h2h: bool,
) -> i32 {
    let tp = &ctx.content.constants.tp;
    let mut gain = delay as f64 / tp.delay_divisor;
    gain *= 1.0 + ctx.attacker_bonuses.store_tp as f64 / 100.0;
    if critical {
        gain *= tp.crit_tp_multiplier;
    }
    if h2h {
        gain /= tp.h2h_tp_divisor;
    }
    gain as i32
}

/// TP the defender gains from being struck once
///
/// Scales with the defenders' AGI advantage, is cut by the attacker's
/// subtle-blow potency, and grows with the defender's own store-TP.
pub(super) fn target_tp_gain(ctx: &AttackContext, delay: i32) -> i32 {
    let tp = &ctx.content.constants.tp;
    let attacker_agi = effective_attribute(ctx.attacker, ctx.attacker_bonuses, Attribute::Agi);
    let defender_agi = effective_attribute(ctx.defender, ctx.defender_bonuses, Attribute::Agi);
    let ratio = clamped_ratio(
        defender_agi,
        attacker_agi,
        tp.target_ratio_floor,
        tp.target_ratio_cap,
    );
    let subtle = (1.0 - ctx.attacker_bonuses.subtle_blow as f64 / 100.0).max(0.0);
    let store = 1.0 + ctx.defender_bonuses.store_tp as f64 / 100.0;
    (delay as f64 / tp.delay_divisor * ratio * subtle * store) as i32
}

/// Roll the attacker's on-hit added effects and the defender's retaliation
/// spikes for one landed swing
pub(super) fn roll_hit_procs(ctx: &AttackContext, rolls: &mut Rolls, events: &mut Vec<CombatEvent>) {
    for proc in &ctx.attacker_bonuses.added_effects {
        if !rolls.roll_against(proc.chance) {
            continue;
        }
        events.push(match proc.effect {
            AddedEffect::Elemental { element, potency } => CombatEvent::AddedDamage {
                element: Some(element),
                amount: potency,
            },
            AddedEffect::HpDrain { potency } => CombatEvent::HpDrained { amount: potency },
            AddedEffect::MpDrain { potency } => CombatEvent::MpDrained { amount: potency },
        });
    }
    for proc in &ctx.defender_bonuses.retaliations {
        if !rolls.roll_against(proc.chance) {
            continue;
        }
        events.push(CombatEvent::Spike {
            element: proc.element,
            amount: proc.potency,
        });
        if let Some(inflicted) = &proc.inflicts {
            events.push(CombatEvent::StatusInflicted {
                kind: inflicted.kind,
                potency: inflicted.potency,
                duration: inflicted.duration,
            });
        }
    }
}

/// The defender's answering swing when a counter proc fires
///
/// Counters never crit; the proc roll already gated them.
fn counter_damage(ctx: &AttackContext) -> Result<i32, ContentError> {
    let constants = &ctx.content.constants.attack;
    let power = weapon_in(ctx.content, ctx.defender, EquipSlot::MainHand)?
        .map(|weapon| weapon.power)
        .unwrap_or(constants.unarmed_power);
    let strength = effective_attribute(ctx.defender, ctx.defender_bonuses, Attribute::Str);
    let vitality = effective_attribute(ctx.attacker, ctx.attacker_bonuses, Attribute::Vit);
    let ratio = clamped_ratio(strength, vitality, constants.ratio_floor, constants.ratio_cap);
    let damage = ratio
        * power as f64
        * ctx.attacker_bonuses.physical_taken_multiplier()
        * ctx.defender_bonuses.boost_multiplier();
    Ok(damage as i32)
}

/// Resolve one swing against the defender
fn resolve_swing(
    ctx: &AttackContext,
    kind: SwingKind,
    power: i32,
    delay: i32,
    h2h: bool,
    rolls: &mut Rolls,
    result: &mut AutoAttackResult,
) -> Result<(), ContentError> {
    // Paralysis eats the swing before anything else.
    if rolls.roll_against(ctx.attacker_bonuses.paralysis) {
        result.swings.push(Swing {
            kind,
            outcome: SwingOutcome::Paralyzed,
        });
        return Ok(());
    }

    if !rolls.roll_against(hit_chance(ctx)) {
        result.swings.push(Swing {
            kind,
            outcome: SwingOutcome::Miss,
        });
        return Ok(());
    }

    if rolls.roll_against(ctx.defender_bonuses.parry) {
        result.swings.push(Swing {
            kind,
            outcome: SwingOutcome::Parried,
        });
        return Ok(());
    }

    if rolls.roll_against(ctx.defender_bonuses.counter) {
        let counter_damage = counter_damage(ctx)?;
        result.swings.push(Swing {
            kind,
            outcome: SwingOutcome::Countered { counter_damage },
        });
        return Ok(());
    }

    let mut damage = base_swing_damage(ctx, power);

    let crit_chance = melee_crit_chance(ctx);
    let critical = rolls.roll_against(crit_chance);
    if critical {
        let base = ctx.content.constants.attack.crit_base_multiplier;
        damage *= ctx.attacker_bonuses.crit_multiplier(base);
    }

    // Double-damage is a per-hand occurrence rate, so kicks never proc it.
    let hand = match kind {
        SwingKind::Main => Some(Hand::Main),
        SwingKind::Off => Some(Hand::Off),
        SwingKind::Kick => None,
    };
    let cap = ctx.content.constants.multi_attack.hand_rate_cap;
    let double_damage = hand
        .map(|hand| rolls.roll_against(ctx.attacker_bonuses.hand(hand).double_damage.min(cap)))
        .unwrap_or(false);
    if double_damage {
        damage *= 2.0;
    }

    trace!(kind = ?kind, damage, critical, "swing landed");
    result.swings.push(Swing {
        kind,
        outcome: SwingOutcome::Hit {
            damage: damage as i32,
            critical,
            double_damage,
        },
    });
    result.tp_gained += swing_tp_gain(ctx, delay, critical, h2h);
    result.target_tp_gained += target_tp_gain(ctx, delay);
    roll_hit_procs(ctx, rolls, &mut result.events);
    if check_cast_interrupt(ctx.defender, ctx.defender_bonuses, &ctx.content.constants, rolls) {
        result.events.push(CombatEvent::CastInterrupted);
    }
    Ok(())
}

/// Resolve one full auto-attack round
///
/// Swing counts come from the quad/triple/double priority ladder per hand,
/// plus an independent follow-up roll and hand-to-hand kick sub-hits. Each
/// swing then runs the paralysis/evasion/parry/counter gauntlet before
/// dealing damage.
pub fn resolve_auto_attack(
    ctx: &AttackContext,
    rolls: &mut Rolls,
) -> Result<AutoAttackResult, ContentError> {
    let constants = &ctx.content.constants;
    let mut result = AutoAttackResult {
        attacker: ctx.attacker.id,
        defender: ctx.defender.id,
        swings: Vec::new(),
        tp_gained: 0,
        target_tp_gained: 0,
        events: Vec::new(),
    };

    let main_weapon = weapon_in(ctx.content, ctx.attacker, EquipSlot::MainHand)?;
    let off_weapon = weapon_in(ctx.content, ctx.attacker, EquipSlot::OffHand)?;

    // An unarmed actor fights hand-to-hand with fallback numbers.
    let (main_power, main_delay, h2h) = match main_weapon {
        Some(weapon) => (weapon.power, weapon.delay, weapon.h2h),
        None => (constants.attack.unarmed_power, constants.attack.unarmed_delay, true),
    };

    let cap = constants.multi_attack.hand_rate_cap;
    let mut main_swings = swing_ladder(ctx.attacker_bonuses, Some(Hand::Main), cap, rolls);
    if rolls.roll_against(ctx.attacker_bonuses.follow_up) {
        main_swings += 1;
    }
    for _ in 0..main_swings {
        resolve_swing(ctx, SwingKind::Main, main_power, main_delay, h2h, rolls, &mut result)?;
    }

    if let Some(weapon) = off_weapon {
        let off_swings = swing_ladder(ctx.attacker_bonuses, Some(Hand::Off), cap, rolls);
        for _ in 0..off_swings {
            resolve_swing(
                ctx,
                SwingKind::Off,
                weapon.power,
                weapon.delay,
                weapon.h2h,
                rolls,
                &mut result,
            )?;
        }
    }

    // Hand-to-hand style synthesizes kick sub-hits.
    if h2h && rolls.roll_against(ctx.attacker_bonuses.kick_attacks) {
        resolve_swing(
            ctx,
            SwingKind::Kick,
            constants.attack.kick_power,
            main_delay,
            true,
            rolls,
            &mut result,
        )?;
    }

    Ok(result)
}
