//! BonusAggregate - Aggregated combat modifiers for one actor

mod builder;
mod modifier;

pub use builder::{BehaviorBonuses, BonusAggregator, JobTraits};
pub use modifier::{Modifier, ScalarBonus};

use crate::status::StatusKind;
use crate::types::{Attribute, Element, Hand, StatKind};
use serde::{Deserialize, Serialize};

/// Flat attribute and resource-pool bonuses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeBonuses {
    /// Flat bonus per core attribute, indexed by `Attribute::index`
    pub flat: [i32; 6],
    pub max_hp: i32,
    pub max_mp: i32,
    /// Percent bonus to the max HP pool
    pub max_hp_percent: i32,
    /// Percent bonus to the max MP pool
    pub max_mp_percent: i32,
}

impl AttributeBonuses {
    /// Get the flat bonus for an attribute
    pub fn get(&self, attribute: Attribute) -> i32 {
        self.flat[attribute.index()]
    }

    /// Add a flat bonus to an attribute
    pub fn add(&mut self, attribute: Attribute, potency: i32) {
        self.flat[attribute.index()] += potency;
    }
}

/// Occurrence rates for bonus-swing procs on one attacking hand
///
/// These only apply during true auto-attacks, never weapon skills, and are
/// capped separately from the global multi-attack potencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandBonuses {
    /// Chance to swing twice
    pub double_swing: i32,
    /// Chance to swing three times
    pub triple_swing: i32,
    /// Chance to swing four times
    pub quad_swing: i32,
    /// Chance for a swing to deal double damage
    pub double_damage: i32,
}

impl HandBonuses {
    /// True if no occurrence rate is set
    pub fn is_empty(&self) -> bool {
        *self == HandBonuses::default()
    }
}

/// Which hand-proc field a modifier feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandProc {
    DoubleSwing,
    TripleSwing,
    QuadSwing,
    DoubleDamage,
}

/// An on-hit bonus damage effect carried by the attacker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddedEffect {
    /// Extra elemental damage on the struck target
    Elemental { element: Element, potency: i32 },
    /// Damage the target and heal the attacker for the same amount
    HpDrain { potency: i32 },
    /// Drain MP from the target into the attacker
    MpDrain { potency: i32 },
}

/// A proc-gated added effect: rolls `chance` on every landed hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedEffectProc {
    pub chance: i32,
    pub effect: AddedEffect,
}

/// A status a retaliation proc inflicts on the attacker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflictedStatus {
    pub kind: StatusKind,
    pub potency: i32,
    pub duration: f64,
}

/// A defender-side spike effect: rolls `chance` on every hit taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetaliationProc {
    pub chance: i32,
    /// Spike element, `None` for plain physical spikes
    pub element: Option<Element>,
    pub potency: i32,
    /// Optional status inflicted on the attacker alongside the spike
    pub inflicts: Option<InflictedStatus>,
}

/// Every numeric combat modifier for one actor at one point in time
///
/// Built by the [`BonusAggregator`] and valid only for the tick (or explicit
/// scope) in which it was built. Never persist one or share it between
/// actors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusAggregate {
    // === Additive stat block ===
    pub attributes: AttributeBonuses,

    // === Multiplicative stat block ===
    /// Stat multipliers in application order; later factors compound on
    /// earlier ones
    pub multipliers: Vec<(StatKind, f64)>,

    // === Swing economy ===
    pub haste: i32,
    pub fast_cast: i32,
    pub double_attack: i32,
    pub triple_attack: i32,
    pub quad_attack: i32,
    pub follow_up: i32,
    pub kick_attacks: i32,
    pub dual_wield: i32,

    // === Critical hits ===
    pub crit_rate: i32,
    pub crit_damage: i32,
    pub crit_defense: i32,

    // === TP economy ===
    pub store_tp: i32,
    pub subtle_blow: i32,
    pub conserve_tp: i32,
    pub conserve_mp: i32,
    pub tp_bonus: i32,

    // === Ticking recovery ===
    pub regen: i32,
    pub refresh: i32,
    pub regain: i32,

    // === Melee exchange ===
    pub accuracy: i32,
    pub evasion: i32,
    pub attack: i32,
    pub defense: i32,
    pub counter: i32,
    pub parry: i32,
    pub guard: i32,

    // === Magic exchange ===
    pub magic_accuracy: i32,
    pub magic_evasion: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub magic_burst_damage: i32,

    // === Weapon skills and chains ===
    pub skillchain_damage: i32,
    pub skillchain_window: i32,
    pub weapon_skill_damage: i32,
    pub elemental_ws_damage: i32,

    // === Incoming damage ===
    pub physical_damage_taken: i32,
    pub magical_damage_taken: i32,

    // === Utility ===
    pub enmity: i32,
    pub movement_speed: i32,
    pub interrupt_resist: i32,
    pub cure_potency: i32,

    // === Stance effects ===
    pub physical_affinity: i32,
    pub magical_affinity: i32,
    pub restraint: i32,
    pub boost: i32,
    pub paralysis: i32,

    // === Crowd-control resistance ===
    pub stun_resist: i32,
    pub sleep_resist: i32,
    pub petrify_resist: i32,
    pub terror_resist: i32,

    // === Elemental resistance ===
    /// Potency per element, indexed by `Element::index`
    pub resist: [i32; 8],

    // === Hand sub-aggregates ===
    /// Per-hand swing proc rates, indexed by `Hand::index`
    pub hands: [HandBonuses; 3],

    // === Proc lists ===
    pub added_effects: Vec<AddedEffectProc>,
    pub retaliations: Vec<RetaliationProc>,
}

impl BonusAggregate {
    /// Create an empty aggregate
    pub fn new() -> Self {
        BonusAggregate::default()
    }

    /// Compounded multiplier for a stat, in application order
    pub fn multiplier_for(&self, stat: StatKind) -> f64 {
        self.multipliers
            .iter()
            .filter(|(s, _)| *s == stat)
            .fold(1.0, |acc, (_, factor)| acc * factor)
    }

    /// Append a multiplier; it compounds on everything aggregated before it
    pub fn push_multiplier(&mut self, stat: StatKind, factor: f64) {
        self.multipliers.push((stat, factor));
    }

    /// Resistance potency against an element
    pub fn resist(&self, element: Element) -> i32 {
        self.resist[element.index()]
    }

    /// Hand sub-aggregate for a hand
    pub fn hand(&self, hand: Hand) -> &HandBonuses {
        &self.hands[hand.index()]
    }

    /// Mutable hand sub-aggregate for a hand
    pub fn hand_mut(&mut self, hand: Hand) -> &mut HandBonuses {
        &mut self.hands[hand.index()]
    }

    /// Grant full resistance to the crowd-control family
    ///
    /// Used while an uninterruptible cast is in progress.
    pub fn grant_crowd_control_immunity(&mut self) {
        self.stun_resist = 100;
        self.sleep_resist = 100;
        self.petrify_resist = 100;
        self.terror_resist = 100;
    }

    /// Outgoing damage multiplier from boost potency
    pub fn boost_multiplier(&self) -> f64 {
        1.0 + self.boost as f64 / 100.0
    }

    /// Physical damage-taken multiplier, floored at zero
    pub fn physical_taken_multiplier(&self) -> f64 {
        (1.0 + self.physical_damage_taken as f64 / 100.0).max(0.0)
    }

    /// Magical damage-taken multiplier, floored at zero
    pub fn magical_taken_multiplier(&self) -> f64 {
        (1.0 + self.magical_damage_taken as f64 / 100.0).max(0.0)
    }

    /// Critical damage multiplier when a crit lands
    pub fn crit_multiplier(&self, base: f64) -> f64 {
        base * (1.0 + self.crit_damage as f64 / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_compounds_in_order() {
        let mut agg = BonusAggregate::new();
        agg.push_multiplier(StatKind::Attack, 1.5);
        agg.push_multiplier(StatKind::Defense, 0.5);
        agg.push_multiplier(StatKind::Attack, 1.2);

        assert!((agg.multiplier_for(StatKind::Attack) - 1.8).abs() < 1e-9);
        assert!((agg.multiplier_for(StatKind::Defense) - 0.5).abs() < 1e-9);
        assert!((agg.multiplier_for(StatKind::Accuracy) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_damage_taken_multiplier_floors_at_zero() {
        let mut agg = BonusAggregate::new();
        agg.physical_damage_taken = -150;
        assert!((agg.physical_taken_multiplier() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_crowd_control_immunity() {
        let mut agg = BonusAggregate::new();
        agg.grant_crowd_control_immunity();
        assert_eq!(agg.stun_resist, 100);
        assert_eq!(agg.sleep_resist, 100);
        assert_eq!(agg.petrify_resist, 100);
        assert_eq!(agg.terror_resist, 100);
    }

    #[test]
    fn test_hand_indexing() {
        let mut agg = BonusAggregate::new();
        agg.hand_mut(Hand::Off).double_swing = 15;
        assert_eq!(agg.hand(Hand::Off).double_swing, 15);
        assert!(agg.hand(Hand::Main).is_empty());
    }
}
