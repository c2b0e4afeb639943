//! Weapon-skill resolution

use super::auto_attack::{swing_ladder, swing_tp_gain, target_tp_gain};
use super::result::SkillDamageResult;
use super::{clamped_ratio, effective_attribute, melee_crit_chance, weapon_in, AttackContext};
use crate::content::ContentError;
use crate::rolls::Rolls;
use crate::types::{Attribute, DamageKind, EquipSlot, WeaponSkillId};
use tracing::debug;

/// Resolve one weapon-skill invocation
///
/// Rounds come from the auto-attack swing ladder, rolled once per configured
/// hit (per-hand occurrence rates excluded), plus one extra round for an
/// off-hand weapon. The TP curve is evaluated once from the excess TP beyond
/// the skill's cost and applied to the first round, or to all rounds for
/// spread skills. Physical skills share a single critical determination for
/// the whole invocation; magical variants never crit. The skillchain damage
/// multiplier is applied by the orchestrating caller, not here.
pub fn resolve_weapon_skill(
    ctx: &AttackContext,
    skill_id: WeaponSkillId,
    tp_spent: i32,
    rolls: &mut Rolls,
) -> Result<SkillDamageResult, ContentError> {
    let skill = ctx.content.weapon_skill(skill_id)?;
    let constants = &ctx.content.constants;

    let main_weapon = weapon_in(ctx.content, ctx.attacker, EquipSlot::MainHand)?;
    let (weapon_power, delay, h2h) = match main_weapon {
        Some(weapon) => (weapon.power, weapon.delay, weapon.h2h),
        None => (
            constants.attack.unarmed_power,
            constants.attack.unarmed_delay,
            true,
        ),
    };

    // Secondary attribute contribution adds weighted flat power.
    let mut power = weapon_power;
    if let Some((attribute, weight)) = skill.secondary_attribute {
        power += (effective_attribute(ctx.attacker, ctx.attacker_bonuses, attribute) * weight) as i32;
    }

    // Round count: one ladder roll per configured hit, plus the off hand.
    let cap = constants.multi_attack.hand_rate_cap;
    let mut rounds = 0;
    for _ in 0..skill.hits {
        rounds += swing_ladder(ctx.attacker_bonuses, None, cap, rolls);
    }
    if weapon_in(ctx.content, ctx.attacker, EquipSlot::OffHand)?.is_some() {
        rounds += 1;
    }
    let rounds = rounds.min(constants.multi_attack.max_ws_rounds);

    // One TP-curve evaluation per invocation.
    let excess_tp =
        (tp_spent + ctx.attacker_bonuses.tp_bonus - constants.tp.ws_tp_cost).max(0);
    let ftp = skill.ftp.eval(excess_tp);

    // One critical determination shared by every round.
    let critical = skill.kind.is_physical() && rolls.roll_against(melee_crit_chance(ctx));

    let attacker_stat = effective_attribute(ctx.attacker, ctx.attacker_bonuses, skill.attribute);
    let defender_attribute = if skill.kind.is_physical() {
        Attribute::Vit
    } else {
        Attribute::Int
    };
    let defender_stat = effective_attribute(ctx.defender, ctx.defender_bonuses, defender_attribute);
    let ratio = clamped_ratio(
        attacker_stat,
        defender_stat,
        constants.attack.ratio_floor,
        constants.attack.ratio_cap,
    );
    let base = ratio * power as f64;

    // Multipliers common to every round of this invocation.
    let mut shared = 1.0 + ctx.attacker_bonuses.weapon_skill_damage as f64 / 100.0;
    if skill.element.is_some() {
        shared *= 1.0 + ctx.attacker_bonuses.elemental_ws_damage as f64 / 100.0;
    }
    shared *= ctx.attacker_bonuses.boost_multiplier();
    if skill.kind.is_physical() {
        shared *= ctx.defender_bonuses.physical_taken_multiplier();
        shared *= 1.0 + ctx.attacker_bonuses.restraint as f64 / 100.0;
    } else {
        shared *= 1.0 + ctx.attacker_bonuses.magic_attack as f64 / 100.0;
        shared *= ctx.defender_bonuses.magical_taken_multiplier();
    }
    if critical {
        shared *= ctx
            .attacker_bonuses
            .crit_multiplier(constants.attack.crit_base_multiplier);
    }

    debug!(skill = skill_id.0, rounds, ftp, critical, "resolving weapon skill");

    let mut result = SkillDamageResult {
        attacker: ctx.attacker.id,
        defender: ctx.defender.id,
        skill: skill_id,
        hits: Vec::with_capacity(rounds as usize),
        critical,
        damage_kind: if skill.kind.is_physical() {
            DamageKind::Physical
        } else {
            DamageKind::Magical
        },
        tp_spent,
        tp_gained: 0,
        target_tp_gained: 0,
    };

    for round in 0..rounds {
        let curve = if round == 0 || skill.ftp_spread { ftp } else { 1.0 };
        let damage = (base * curve * shared).max(0.0) as i32;
        result.hits.push(damage);
        result.tp_gained += swing_tp_gain(ctx, delay, critical, h2h);
        result.target_tp_gained += target_tp_gain(ctx, delay);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, ActorKind};
    use crate::aggregate::BonusAggregate;
    use crate::content::{
        ContentRegistry, Equipped, FtpCurve, ItemDefinition, WeaponDefinition,
        WeaponSkillDefinition, WeaponSkillKind,
    };
    use crate::skillchain::ChainAttribute;
    use crate::types::{ActorId, Element, ItemId};

    fn sword() -> ItemDefinition {
        ItemDefinition {
            id: ItemId(1),
            name: "Test Sword".to_string(),
            slot: EquipSlot::MainHand,
            stats: vec![],
            traits: vec![],
            static_augments: vec![],
            weapon: Some(WeaponDefinition {
                power: 30,
                delay: 240,
                h2h: false,
                magic_power: 0,
            }),
        }
    }

    fn triple_strike(kind: WeaponSkillKind, ftp: FtpCurve, ftp_spread: bool) -> WeaponSkillDefinition {
        WeaponSkillDefinition {
            id: WeaponSkillId(1),
            name: "Triple Strike".to_string(),
            kind,
            element: None,
            hits: 3,
            attribute: Attribute::Str,
            secondary_attribute: None,
            chain_attributes: vec![ChainAttribute::Liquefaction],
            ftp,
            ftp_spread,
            consumes_all_tp: false,
        }
    }

    fn setup(skill: WeaponSkillDefinition) -> (ContentRegistry, Actor, Actor) {
        let mut content = ContentRegistry::new();
        content.register_item(sword());
        content.register_weapon_skill(skill);
        let mut attacker = Actor::new(ActorId(1), ActorKind::Player, 50)
            .with_attribute(Attribute::Str, 50)
            .with_attribute(Attribute::Dex, 50);
        attacker
            .equipment
            .insert(EquipSlot::MainHand, Equipped::bare(ItemId(1)));
        let defender = Actor::new(ActorId(2), ActorKind::Player, 50)
            .with_attribute(Attribute::Vit, 50)
            .with_attribute(Attribute::Agi, 50);
        (content, attacker, defender)
    }

    fn no_crit() -> BonusAggregate {
        let mut bonuses = BonusAggregate::new();
        bonuses.crit_rate = -1000;
        bonuses
    }

    #[test]
    fn test_three_hit_skill_with_flat_curve() {
        let (content, attacker, defender) =
            setup(triple_strike(WeaponSkillKind::Physical, FtpCurve::flat(1.0), false));
        let att_bonuses = no_crit();
        let def_bonuses = BonusAggregate::new();
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &att_bonuses,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        let mut rolls = Rolls::from_seed(1);
        let result = resolve_weapon_skill(&ctx, WeaponSkillId(1), 1000, &mut rolls).unwrap();

        // No multi-attack bonuses: exactly the configured three rounds, each
        // the plain auto-attack base (ratio 1.0 x power 30).
        assert_eq!(result.hits, vec![30, 30, 30]);
        assert!(!result.critical);
        assert_eq!(result.damage_kind, DamageKind::Physical);
        assert_eq!(result.tp_spent, 1000);
    }

    #[test]
    fn test_ftp_applies_to_first_round_only() {
        let curve = FtpCurve {
            points: vec![(0, 2.0)],
        };
        let (content, attacker, defender) =
            setup(triple_strike(WeaponSkillKind::Physical, curve, false));
        let att_bonuses = no_crit();
        let def_bonuses = BonusAggregate::new();
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &att_bonuses,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        let mut rolls = Rolls::from_seed(1);
        let result = resolve_weapon_skill(&ctx, WeaponSkillId(1), 1000, &mut rolls).unwrap();
        assert_eq!(result.hits, vec![60, 30, 30]);
    }

    #[test]
    fn test_spread_ftp_applies_to_every_round() {
        let curve = FtpCurve {
            points: vec![(0, 2.0)],
        };
        let (content, attacker, defender) =
            setup(triple_strike(WeaponSkillKind::Physical, curve, true));
        let att_bonuses = no_crit();
        let def_bonuses = BonusAggregate::new();
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &att_bonuses,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        let mut rolls = Rolls::from_seed(1);
        let result = resolve_weapon_skill(&ctx, WeaponSkillId(1), 1000, &mut rolls).unwrap();
        assert_eq!(result.hits, vec![60, 60, 60]);
    }

    #[test]
    fn test_excess_tp_walks_the_curve() {
        let curve = FtpCurve {
            points: vec![(0, 1.0), (1000, 2.0)],
        };
        let (content, attacker, defender) =
            setup(triple_strike(WeaponSkillKind::Physical, curve, false));
        let att_bonuses = no_crit();
        let def_bonuses = BonusAggregate::new();
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &att_bonuses,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        // 2000 TP spent = 1000 excess = top of the curve.
        let mut rolls = Rolls::from_seed(1);
        let result = resolve_weapon_skill(&ctx, WeaponSkillId(1), 2000, &mut rolls).unwrap();
        assert_eq!(result.hits[0], 60);

        // tp_bonus counts toward the excess.
        let mut boosted = no_crit();
        boosted.tp_bonus = 1000;
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &boosted,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        let mut rolls = Rolls::from_seed(1);
        let result = resolve_weapon_skill(&ctx, WeaponSkillId(1), 1000, &mut rolls).unwrap();
        assert_eq!(result.hits[0], 60);
    }

    #[test]
    fn test_physical_multipliers_stack() {
        let (content, attacker, defender) =
            setup(triple_strike(WeaponSkillKind::Physical, FtpCurve::flat(1.0), false));
        let mut att_bonuses = no_crit();
        att_bonuses.weapon_skill_damage = 50; // x1.5
        att_bonuses.restraint = 20; // x1.2
        let mut def_bonuses = BonusAggregate::new();
        def_bonuses.physical_damage_taken = -50; // x0.5
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &att_bonuses,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        let mut rolls = Rolls::from_seed(1);
        let result = resolve_weapon_skill(&ctx, WeaponSkillId(1), 1000, &mut rolls).unwrap();
        // 30 * 1.5 * 1.2 * 0.5 = 27
        assert_eq!(result.hits[0], 27);
    }

    #[test]
    fn test_magical_skill_never_crits_and_uses_magic_attack() {
        let mut skill = triple_strike(WeaponSkillKind::Magical, FtpCurve::flat(1.0), false);
        skill.element = Some(Element::Fire);
        skill.attribute = Attribute::Int;
        let (content, mut attacker, mut defender) = setup(skill);
        attacker.base_attributes[Attribute::Int.index()] = 60;
        defender.base_attributes[Attribute::Int.index()] = 60;

        let mut att_bonuses = BonusAggregate::new();
        att_bonuses.crit_rate = 1000; // would guarantee a crit if rolled
        att_bonuses.magic_attack = 30;
        att_bonuses.elemental_ws_damage = 10;
        let def_bonuses = BonusAggregate::new();
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &att_bonuses,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        let mut rolls = Rolls::from_seed(1);
        let result = resolve_weapon_skill(&ctx, WeaponSkillId(1), 1000, &mut rolls).unwrap();
        assert!(!result.critical);
        assert_eq!(result.damage_kind, DamageKind::Magical);
        // 30 * 1.1 (elemental ws) * 1.3 (magic attack) = 42.9 -> 42
        assert_eq!(result.hits[0], 42);
    }

    #[test]
    fn test_off_hand_adds_a_round_and_cap_holds() {
        let (mut content, mut attacker, defender) =
            setup(triple_strike(WeaponSkillKind::Physical, FtpCurve::flat(1.0), false));
        content.register_item(ItemDefinition {
            id: ItemId(2),
            name: "Off Knife".to_string(),
            slot: EquipSlot::OffHand,
            stats: vec![],
            traits: vec![],
            static_augments: vec![],
            weapon: Some(WeaponDefinition {
                power: 10,
                delay: 200,
                h2h: false,
                magic_power: 0,
            }),
        });
        attacker
            .equipment
            .insert(EquipSlot::OffHand, Equipped::bare(ItemId(2)));

        let att_bonuses = no_crit();
        let def_bonuses = BonusAggregate::new();
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &att_bonuses,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        let mut rolls = Rolls::from_seed(1);
        let result = resolve_weapon_skill(&ctx, WeaponSkillId(1), 1000, &mut rolls).unwrap();
        assert_eq!(result.hits.len(), 4);

        // With guaranteed quadruple attacks the total still caps.
        let mut stacked = no_crit();
        stacked.quad_attack = 100;
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &stacked,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        let mut rolls = Rolls::from_seed(1);
        let result = resolve_weapon_skill(&ctx, WeaponSkillId(1), 1000, &mut rolls).unwrap();
        assert_eq!(result.hits.len(), 8);
    }

    #[test]
    fn test_unknown_skill_fails_fast() {
        let (content, attacker, defender) =
            setup(triple_strike(WeaponSkillKind::Physical, FtpCurve::flat(1.0), false));
        let att_bonuses = no_crit();
        let def_bonuses = BonusAggregate::new();
        let ctx = AttackContext {
            attacker: &attacker,
            defender: &defender,
            attacker_bonuses: &att_bonuses,
            defender_bonuses: &def_bonuses,
            content: &content,
        };
        let mut rolls = Rolls::from_seed(1);
        let err = resolve_weapon_skill(&ctx, WeaponSkillId(404), 1000, &mut rolls).unwrap_err();
        assert_eq!(err, ContentError::UnknownWeaponSkill(WeaponSkillId(404)));
    }
}
