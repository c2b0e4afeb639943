//! Resolution results - Plain data consumed by the event/combat-log layer

use crate::status::StatusKind;
use crate::types::{ActorId, DamageKind, Element, SpellId, WeaponSkillId};
use serde::{Deserialize, Serialize};

/// A secondary effect produced during resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatEvent {
    /// Added damage on the struck target from an on-hit proc
    AddedDamage { element: Option<Element>, amount: i32 },
    /// HP drained from the target into the attacker
    HpDrained { amount: i32 },
    /// MP drained from the target into the attacker
    MpDrained { amount: i32 },
    /// Spike damage dealt back to the attacker
    Spike { element: Option<Element>, amount: i32 },
    /// A status inflicted by a retaliation proc
    StatusInflicted {
        kind: StatusKind,
        potency: i32,
        duration: f64,
    },
    /// The defender's cast was interrupted by the hit
    CastInterrupted,
}

/// Which hand (or synthesized sub-hit) delivered a swing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingKind {
    Main,
    Off,
    Kick,
}

/// Outcome of one swing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingOutcome {
    Hit {
        damage: i32,
        critical: bool,
        double_damage: bool,
    },
    Miss,
    Parried,
    /// The defender countered; the attacker takes the listed damage instead
    Countered { counter_damage: i32 },
    /// The swing was lost to paralysis
    Paralyzed,
}

/// One swing of an auto-attack round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swing {
    pub kind: SwingKind,
    pub outcome: SwingOutcome,
}

/// Result of one auto-attack round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoAttackResult {
    pub attacker: ActorId,
    pub defender: ActorId,
    pub swings: Vec<Swing>,
    /// TP the attacker gained this round
    pub tp_gained: i32,
    /// TP the defender gained from being struck
    pub target_tp_gained: i32,
    pub events: Vec<CombatEvent>,
}

impl AutoAttackResult {
    /// Total damage dealt to the defender
    pub fn total_damage(&self) -> i32 {
        self.swings
            .iter()
            .map(|swing| match swing.outcome {
                SwingOutcome::Hit { damage, .. } => damage,
                _ => 0,
            })
            .sum()
    }

    /// Number of swings that landed
    pub fn landed_hits(&self) -> usize {
        self.swings
            .iter()
            .filter(|swing| matches!(swing.outcome, SwingOutcome::Hit { .. }))
            .count()
    }

    /// Whether any landed swing was critical
    pub fn any_critical(&self) -> bool {
        self.swings.iter().any(|swing| {
            matches!(
                swing.outcome,
                SwingOutcome::Hit { critical: true, .. }
            )
        })
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        let damage = self.total_damage();
        if damage > 0 {
            parts.push(format!(
                "{} damage in {} hit(s)",
                damage,
                self.landed_hits()
            ));
        }
        if self.any_critical() {
            parts.push("critical".to_string());
        }
        let misses = self
            .swings
            .iter()
            .filter(|s| matches!(s.outcome, SwingOutcome::Miss))
            .count();
        if misses > 0 {
            parts.push(format!("{misses} missed"));
        }
        if self
            .swings
            .iter()
            .any(|s| matches!(s.outcome, SwingOutcome::Countered { .. }))
        {
            parts.push("countered".to_string());
        }
        if self.tp_gained > 0 {
            parts.push(format!("+{} TP", self.tp_gained));
        }
        if parts.is_empty() {
            "No effect".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Result of one weapon-skill invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDamageResult {
    pub attacker: ActorId,
    pub defender: ActorId,
    pub skill: WeaponSkillId,
    /// Damage per round, in resolution order
    pub hits: Vec<i32>,
    /// The invocation-wide critical determination
    pub critical: bool,
    pub damage_kind: DamageKind,
    /// TP consumed by the skill
    pub tp_spent: i32,
    /// TP returned to the attacker by the skill's own hits
    pub tp_gained: i32,
    /// TP the defender gained from being struck
    pub target_tp_gained: i32,
}

impl SkillDamageResult {
    /// Total damage across all rounds
    pub fn total_damage(&self) -> i32 {
        self.hits.iter().sum()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "{} damage in {} round(s)",
            self.total_damage(),
            self.hits.len()
        )];
        if self.critical {
            parts.push("critical".to_string());
        }
        parts.push(format!("-{} TP", self.tp_spent));
        parts.join(", ")
    }
}

/// Result of one spell-like skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellResult {
    pub attacker: ActorId,
    pub defender: ActorId,
    pub spell: SpellId,
    pub damage: i32,
    pub critical: bool,
    /// The chain step this spell burst against, if any
    pub burst_step: Option<u32>,
    /// Elemental mitigation applied (1.0 = unresisted)
    pub resist_multiplier: f64,
    pub mp_spent: i32,
    pub damage_kind: DamageKind,
}

impl SpellResult {
    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} damage", self.damage)];
        if let Some(step) = self.burst_step {
            parts.push(format!("magic burst (step {step})"));
        }
        if self.critical {
            parts.push("critical".to_string());
        }
        if self.resist_multiplier < 1.0 {
            parts.push("resisted".to_string());
        }
        parts.join(", ")
    }
}
