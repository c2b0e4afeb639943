//! Status effects - active buffs/debuffs on an actor and their bonus contributions

use crate::aggregate::{Modifier, ScalarBonus};
use crate::types::{Element, StatKind};
use serde::{Deserialize, Serialize};

/// Every status effect kind the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Movement-speed debuff
    Weight,
    /// Elemental damage-over-time (burn, frost, shock, ...)
    ElementalDot(Element),
    /// Blocks natural recovery entirely
    Disease,
    /// Chance to lose a swing or action
    Paralysis,
    /// Attack-speed debuff
    Slow,
    /// Attack-speed buff
    Haste,
    Stun,
    Sleep,
    Petrify,
    Terror,
    /// Flat outgoing damage buff
    Boost,
    /// Stacking counter that feeds physical weapon-skill damage
    Restraint,
    /// Blue-magic physical affinity stance
    ChainAffinity,
    /// Blue-magic magical affinity stance
    BurstAffinity,
    /// Percent attack buff
    AttackBoost,
    /// Percent defense buff
    DefenseBoost,
}

/// A status effect currently on an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveStatus {
    pub kind: StatusKind,
    /// Signed magnitude of the effect
    pub potency: i32,
    /// Time remaining in seconds
    pub remaining: f64,
    /// Current stack count
    pub stacks: u32,
}

impl ActiveStatus {
    pub fn new(kind: StatusKind, potency: i32, duration: f64) -> Self {
        ActiveStatus {
            kind,
            potency,
            remaining: duration,
            stacks: 1,
        }
    }

    /// Check if the effect is still active
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0 && self.stacks > 0
    }

    /// Tick the effect duration
    /// Returns true if the effect is still active
    pub fn tick(&mut self, delta: f64) -> bool {
        self.remaining -= delta;
        self.is_active()
    }

    /// Add a stack, capped
    pub fn add_stack(&mut self, max_stacks: u32) {
        if self.stacks < max_stacks {
            self.stacks += 1;
        }
    }

    /// Refresh duration
    pub fn refresh(&mut self, duration: f64) {
        self.remaining = duration;
    }

    /// Lower this status into its aggregate contributions
    ///
    /// The match is exhaustive over [`StatusKind`]; a new kind cannot be
    /// silently skipped. An inactive status contributes nothing.
    pub fn modifiers(&self) -> Vec<Modifier> {
        if !self.is_active() {
            return Vec::new();
        }
        let potency = self.potency;
        match self.kind {
            StatusKind::Weight => {
                vec![Modifier::scalar(ScalarBonus::MovementSpeed, -potency)]
            }
            StatusKind::ElementalDot(element) => vec![
                Modifier::scalar(ScalarBonus::Regen, -potency),
                Modifier::Multiplier {
                    stat: StatKind::Resist(element),
                    factor: 0.9,
                },
            ],
            StatusKind::Disease => vec![
                Modifier::scalar(ScalarBonus::Regen, -potency),
                Modifier::scalar(ScalarBonus::Refresh, -potency),
            ],
            StatusKind::Paralysis => {
                vec![Modifier::scalar(ScalarBonus::Paralysis, potency)]
            }
            StatusKind::Slow => vec![Modifier::scalar(ScalarBonus::Haste, -potency)],
            StatusKind::Haste => vec![Modifier::scalar(ScalarBonus::Haste, potency)],
            // Control states carry no numeric contribution; the action layer
            // checks for their presence directly.
            StatusKind::Stun | StatusKind::Sleep | StatusKind::Petrify | StatusKind::Terror => {
                Vec::new()
            }
            StatusKind::Boost => vec![Modifier::scalar(ScalarBonus::Boost, potency)],
            StatusKind::Restraint => vec![Modifier::scalar(
                ScalarBonus::Restraint,
                potency * self.stacks as i32,
            )],
            StatusKind::ChainAffinity => {
                vec![Modifier::scalar(ScalarBonus::PhysicalAffinity, potency)]
            }
            StatusKind::BurstAffinity => {
                vec![Modifier::scalar(ScalarBonus::MagicalAffinity, potency)]
            }
            StatusKind::AttackBoost => vec![Modifier::Multiplier {
                stat: StatKind::Attack,
                factor: 1.0 + potency as f64 / 100.0,
            }],
            StatusKind::DefenseBoost => vec![Modifier::Multiplier {
                stat: StatKind::Defense,
                factor: 1.0 + potency as f64 / 100.0,
            }],
        }
    }
}

/// Tick a status list, dropping expired effects
///
/// Returns the kinds that expired this tick.
pub fn tick_statuses(statuses: &mut Vec<ActiveStatus>, delta: f64) -> Vec<StatusKind> {
    let mut expired = Vec::new();
    statuses.retain_mut(|status| {
        if status.tick(delta) {
            true
        } else {
            expired.push(status.kind);
            false
        }
    });
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::BonusAggregate;

    #[test]
    fn test_status_tick_and_expiry() {
        let mut statuses = vec![
            ActiveStatus::new(StatusKind::Haste, 15, 10.0),
            ActiveStatus::new(StatusKind::Weight, 30, 2.0),
        ];
        let expired = tick_statuses(&mut statuses, 5.0);
        assert_eq!(expired, vec![StatusKind::Weight]);
        assert_eq!(statuses.len(), 1);
        assert!((statuses[0].remaining - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_expired_status_contributes_nothing() {
        let mut status = ActiveStatus::new(StatusKind::Boost, 25, 1.0);
        status.tick(2.0);
        assert!(status.modifiers().is_empty());
    }

    #[test]
    fn test_weight_subtracts_movement_speed() {
        let status = ActiveStatus::new(StatusKind::Weight, 30, 10.0);
        let mut agg = BonusAggregate::new();
        for modifier in status.modifiers() {
            modifier.apply(&mut agg);
        }
        assert_eq!(agg.movement_speed, -30);
    }

    #[test]
    fn test_elemental_dot_cuts_regen_and_resist() {
        let status = ActiveStatus::new(StatusKind::ElementalDot(Element::Fire), 5, 30.0);
        let mut agg = BonusAggregate::new();
        for modifier in status.modifiers() {
            modifier.apply(&mut agg);
        }
        assert_eq!(agg.regen, -5);
        assert!((agg.multiplier_for(StatKind::Resist(Element::Fire)) - 0.9).abs() < 1e-9);
        assert!((agg.multiplier_for(StatKind::Resist(Element::Ice)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_restraint_scales_with_stacks() {
        let mut status = ActiveStatus::new(StatusKind::Restraint, 2, 60.0);
        status.add_stack(10);
        status.add_stack(10);
        let mut agg = BonusAggregate::new();
        for modifier in status.modifiers() {
            modifier.apply(&mut agg);
        }
        assert_eq!(agg.restraint, 6);
    }

    #[test]
    fn test_zero_potency_status_is_idempotent() {
        let status = ActiveStatus::new(StatusKind::Haste, 0, 10.0);
        let mut agg = BonusAggregate::new();
        for modifier in status.modifiers() {
            modifier.apply(&mut agg);
        }
        assert_eq!(agg, BonusAggregate::new());
    }
}
