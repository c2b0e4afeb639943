//! Modifier - The closed set of bonus kinds every source lowers to

use super::{AddedEffectProc, BonusAggregate, HandProc, RetaliationProc};
use crate::types::{Attribute, Element, Hand, StatKind};
use serde::{Deserialize, Serialize};

/// A named scalar potency on the aggregate
///
/// Each variant maps to exactly one signed-integer field; potencies from all
/// sources combine additively. The `apply` match is exhaustive so a new kind
/// cannot be silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarBonus {
    Haste,
    FastCast,
    DoubleAttack,
    TripleAttack,
    QuadAttack,
    FollowUp,
    KickAttacks,
    DualWield,
    CritRate,
    CritDamage,
    CritDefense,
    StoreTp,
    SubtleBlow,
    ConserveTp,
    ConserveMp,
    TpBonus,
    Regen,
    Refresh,
    Regain,
    Accuracy,
    Evasion,
    Attack,
    Defense,
    Counter,
    Parry,
    Guard,
    MagicAccuracy,
    MagicEvasion,
    MagicAttack,
    MagicDefense,
    MagicBurstDamage,
    SkillchainDamage,
    SkillchainWindow,
    WeaponSkillDamage,
    ElementalWsDamage,
    PhysicalDamageTaken,
    MagicalDamageTaken,
    Enmity,
    MovementSpeed,
    InterruptResist,
    CurePotency,
    PhysicalAffinity,
    MagicalAffinity,
    Restraint,
    Boost,
    Paralysis,
    StunResist,
    SleepResist,
    PetrifyResist,
    TerrorResist,
}

impl ScalarBonus {
    /// Every scalar kind, used by the exhaustiveness sweep in tests
    pub const ALL: [ScalarBonus; 50] = [
        ScalarBonus::Haste,
        ScalarBonus::FastCast,
        ScalarBonus::DoubleAttack,
        ScalarBonus::TripleAttack,
        ScalarBonus::QuadAttack,
        ScalarBonus::FollowUp,
        ScalarBonus::KickAttacks,
        ScalarBonus::DualWield,
        ScalarBonus::CritRate,
        ScalarBonus::CritDamage,
        ScalarBonus::CritDefense,
        ScalarBonus::StoreTp,
        ScalarBonus::SubtleBlow,
        ScalarBonus::ConserveTp,
        ScalarBonus::ConserveMp,
        ScalarBonus::TpBonus,
        ScalarBonus::Regen,
        ScalarBonus::Refresh,
        ScalarBonus::Regain,
        ScalarBonus::Accuracy,
        ScalarBonus::Evasion,
        ScalarBonus::Attack,
        ScalarBonus::Defense,
        ScalarBonus::Counter,
        ScalarBonus::Parry,
        ScalarBonus::Guard,
        ScalarBonus::MagicAccuracy,
        ScalarBonus::MagicEvasion,
        ScalarBonus::MagicAttack,
        ScalarBonus::MagicDefense,
        ScalarBonus::MagicBurstDamage,
        ScalarBonus::SkillchainDamage,
        ScalarBonus::SkillchainWindow,
        ScalarBonus::WeaponSkillDamage,
        ScalarBonus::ElementalWsDamage,
        ScalarBonus::PhysicalDamageTaken,
        ScalarBonus::MagicalDamageTaken,
        ScalarBonus::Enmity,
        ScalarBonus::MovementSpeed,
        ScalarBonus::InterruptResist,
        ScalarBonus::CurePotency,
        ScalarBonus::PhysicalAffinity,
        ScalarBonus::MagicalAffinity,
        ScalarBonus::Restraint,
        ScalarBonus::Boost,
        ScalarBonus::Paralysis,
        ScalarBonus::StunResist,
        ScalarBonus::SleepResist,
        ScalarBonus::PetrifyResist,
        ScalarBonus::TerrorResist,
    ];

    /// Add a potency to the matching aggregate field
    pub fn apply(self, bonuses: &mut BonusAggregate, potency: i32) {
        match self {
            ScalarBonus::Haste => bonuses.haste += potency,
            ScalarBonus::FastCast => bonuses.fast_cast += potency,
            ScalarBonus::DoubleAttack => bonuses.double_attack += potency,
            ScalarBonus::TripleAttack => bonuses.triple_attack += potency,
            ScalarBonus::QuadAttack => bonuses.quad_attack += potency,
            ScalarBonus::FollowUp => bonuses.follow_up += potency,
            ScalarBonus::KickAttacks => bonuses.kick_attacks += potency,
            ScalarBonus::DualWield => bonuses.dual_wield += potency,
            ScalarBonus::CritRate => bonuses.crit_rate += potency,
            ScalarBonus::CritDamage => bonuses.crit_damage += potency,
            ScalarBonus::CritDefense => bonuses.crit_defense += potency,
            ScalarBonus::StoreTp => bonuses.store_tp += potency,
            ScalarBonus::SubtleBlow => bonuses.subtle_blow += potency,
            ScalarBonus::ConserveTp => bonuses.conserve_tp += potency,
            ScalarBonus::ConserveMp => bonuses.conserve_mp += potency,
            ScalarBonus::TpBonus => bonuses.tp_bonus += potency,
            ScalarBonus::Regen => bonuses.regen += potency,
            ScalarBonus::Refresh => bonuses.refresh += potency,
            ScalarBonus::Regain => bonuses.regain += potency,
            ScalarBonus::Accuracy => bonuses.accuracy += potency,
            ScalarBonus::Evasion => bonuses.evasion += potency,
            ScalarBonus::Attack => bonuses.attack += potency,
            ScalarBonus::Defense => bonuses.defense += potency,
            ScalarBonus::Counter => bonuses.counter += potency,
            ScalarBonus::Parry => bonuses.parry += potency,
            ScalarBonus::Guard => bonuses.guard += potency,
            ScalarBonus::MagicAccuracy => bonuses.magic_accuracy += potency,
            ScalarBonus::MagicEvasion => bonuses.magic_evasion += potency,
            ScalarBonus::MagicAttack => bonuses.magic_attack += potency,
            ScalarBonus::MagicDefense => bonuses.magic_defense += potency,
            ScalarBonus::MagicBurstDamage => bonuses.magic_burst_damage += potency,
            ScalarBonus::SkillchainDamage => bonuses.skillchain_damage += potency,
            ScalarBonus::SkillchainWindow => bonuses.skillchain_window += potency,
            ScalarBonus::WeaponSkillDamage => bonuses.weapon_skill_damage += potency,
            ScalarBonus::ElementalWsDamage => bonuses.elemental_ws_damage += potency,
            ScalarBonus::PhysicalDamageTaken => bonuses.physical_damage_taken += potency,
            ScalarBonus::MagicalDamageTaken => bonuses.magical_damage_taken += potency,
            ScalarBonus::Enmity => bonuses.enmity += potency,
            ScalarBonus::MovementSpeed => bonuses.movement_speed += potency,
            ScalarBonus::InterruptResist => bonuses.interrupt_resist += potency,
            ScalarBonus::CurePotency => bonuses.cure_potency += potency,
            ScalarBonus::PhysicalAffinity => bonuses.physical_affinity += potency,
            ScalarBonus::MagicalAffinity => bonuses.magical_affinity += potency,
            ScalarBonus::Restraint => bonuses.restraint += potency,
            ScalarBonus::Boost => bonuses.boost += potency,
            ScalarBonus::Paralysis => bonuses.paralysis += potency,
            ScalarBonus::StunResist => bonuses.stun_resist += potency,
            ScalarBonus::SleepResist => bonuses.sleep_resist += potency,
            ScalarBonus::PetrifyResist => bonuses.petrify_resist += potency,
            ScalarBonus::TerrorResist => bonuses.terror_resist += potency,
        }
    }
}

/// One combat modifier from any source
///
/// Status effects, item stats, traits, augments, monster definitions and job
/// traits all lower to lists of these; a single exhaustive match folds them
/// into the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Flat bonus to a core attribute
    Attribute { attribute: Attribute, potency: i32 },
    MaxHp(i32),
    MaxMp(i32),
    MaxHpPercent(i32),
    MaxMpPercent(i32),
    /// Multiplicative factor on a stat; compounds in aggregation order
    Multiplier { stat: StatKind, factor: f64 },
    /// Additive potency on a named scalar field
    Scalar { bonus: ScalarBonus, potency: i32 },
    /// Elemental resistance potency
    ElementResist { element: Element, potency: i32 },
    /// Occurrence rate on one hand's swing-proc sub-aggregate
    HandRate { hand: Hand, proc: HandProc, rate: i32 },
    /// On-hit added damage proc
    AddedEffect(AddedEffectProc),
    /// Defender-side spike proc
    Retaliation(RetaliationProc),
}

impl Modifier {
    /// Fold this modifier into an aggregate
    pub fn apply(&self, bonuses: &mut BonusAggregate) {
        match self {
            Modifier::Attribute { attribute, potency } => {
                bonuses.attributes.add(*attribute, *potency);
            }
            Modifier::MaxHp(potency) => bonuses.attributes.max_hp += potency,
            Modifier::MaxMp(potency) => bonuses.attributes.max_mp += potency,
            Modifier::MaxHpPercent(potency) => bonuses.attributes.max_hp_percent += potency,
            Modifier::MaxMpPercent(potency) => bonuses.attributes.max_mp_percent += potency,
            Modifier::Multiplier { stat, factor } => bonuses.push_multiplier(*stat, *factor),
            Modifier::Scalar { bonus, potency } => bonus.apply(bonuses, *potency),
            Modifier::ElementResist { element, potency } => {
                bonuses.resist[element.index()] += potency;
            }
            Modifier::HandRate { hand, proc, rate } => {
                let hand = bonuses.hand_mut(*hand);
                match proc {
                    HandProc::DoubleSwing => hand.double_swing += rate,
                    HandProc::TripleSwing => hand.triple_swing += rate,
                    HandProc::QuadSwing => hand.quad_swing += rate,
                    HandProc::DoubleDamage => hand.double_damage += rate,
                }
            }
            Modifier::AddedEffect(proc) => bonuses.added_effects.push(proc.clone()),
            Modifier::Retaliation(proc) => bonuses.retaliations.push(proc.clone()),
        }
    }

    /// Convenience constructor for the common scalar case
    pub fn scalar(bonus: ScalarBonus, potency: i32) -> Modifier {
        Modifier::Scalar { bonus, potency }
    }
}
