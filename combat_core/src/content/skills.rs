//! Weapon skill, spell and action-kind definitions

use super::{ContentError, ContentRegistry};
use crate::aggregate::BonusAggregate;
use crate::rolls::Rolls;
use crate::skillchain::ChainAttribute;
use crate::types::{Attribute, Element, SpellId, WeaponSkillId};
use serde::{Deserialize, Serialize};

/// TP-scaling potency curve keyed to excess TP beyond the skill's cost
///
/// Breakpoints are `(excess_tp, multiplier)` pairs in ascending TP order;
/// evaluation clamps outside the range and interpolates linearly inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FtpCurve {
    pub points: Vec<(i32, f64)>,
}

impl FtpCurve {
    /// A curve that ignores TP entirely
    pub fn flat(multiplier: f64) -> Self {
        FtpCurve {
            points: vec![(0, multiplier)],
        }
    }

    /// Evaluate the curve at an excess-TP value
    pub fn eval(&self, excess_tp: i32) -> f64 {
        let Some(first) = self.points.first() else {
            return 1.0;
        };
        if excess_tp <= first.0 {
            return first.1;
        }
        for window in self.points.windows(2) {
            let (lo_tp, lo) = window[0];
            let (hi_tp, hi) = window[1];
            if excess_tp <= hi_tp {
                let span = (hi_tp - lo_tp) as f64;
                if span <= 0.0 {
                    return hi;
                }
                let t = (excess_tp - lo_tp) as f64 / span;
                return lo + (hi - lo) * t;
            }
        }
        self.points.last().map(|(_, v)| *v).unwrap_or(1.0)
    }
}

/// How a weapon skill's damage scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponSkillKind {
    Physical,
    /// Magical damage delivered through the weapon's power
    MagicalWeapon,
    /// Pure magical scaling, independent of weapon power
    Magical,
}

impl WeaponSkillKind {
    pub fn is_physical(self) -> bool {
        matches!(self, WeaponSkillKind::Physical)
    }
}

/// A content-authored weapon skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSkillDefinition {
    pub id: WeaponSkillId,
    pub name: String,
    pub kind: WeaponSkillKind,
    /// Element for elemental weapon-skill bonuses and magical variants
    #[serde(default)]
    pub element: Option<Element>,
    /// Configured hit count per invocation
    pub hits: u32,
    /// Primary scaling attribute
    pub attribute: Attribute,
    /// Optional secondary attribute adding weighted flat power
    #[serde(default)]
    pub secondary_attribute: Option<(Attribute, f64)>,
    /// Elemental attributes offered to the skillchain state machine
    #[serde(default)]
    pub chain_attributes: Vec<ChainAttribute>,
    pub ftp: FtpCurve,
    /// Apply the TP curve to all rounds instead of only the first
    #[serde(default)]
    pub ftp_spread: bool,
    /// Consume the actor's entire TP pool instead of the base cost
    #[serde(default)]
    pub consumes_all_tp: bool,
}

/// Spell family, driving affinity and restraint interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellKind {
    Elemental,
    Divine,
    BluePhysical,
    BlueMagical,
}

impl SpellKind {
    /// Blue magic interacts with the affinity stances
    pub fn is_blue(self) -> bool {
        matches!(self, SpellKind::BluePhysical | SpellKind::BlueMagical)
    }

    /// Physical-type spells ride the restraint counter
    pub fn is_physical(self) -> bool {
        matches!(self, SpellKind::BluePhysical)
    }
}

/// A content-authored spell-like skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    pub kind: SpellKind,
    pub element: Element,
    pub mp_cost: i32,
    /// Base cast time in seconds
    pub cast_time: f64,
    /// Base recast time in seconds
    pub recast_time: f64,
    /// Attacker attribute in the damage ratio
    #[serde(default = "default_attack_attribute")]
    pub attack_attribute: Attribute,
    /// Defender attribute in the damage ratio
    #[serde(default = "default_defense_attribute")]
    pub defense_attribute: Attribute,
}

fn default_attack_attribute() -> Attribute {
    Attribute::Int
}

fn default_defense_attribute() -> Attribute {
    Attribute::Mnd
}

/// Resources an action consumes, after conserve procs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCost {
    pub mp: i32,
    pub tp: i32,
}

/// The closed set of action kinds, each with its own cost/range/cast rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Spell(SpellId),
    WeaponSkill(WeaponSkillId),
    JobAbility,
    MobSkill { tp_cost: i32 },
    Ranged,
}

impl ActionKind {
    /// Resolve the resource cost of this action
    ///
    /// Conserve-TP/MP rolls refund a fraction of the base cost; the
    /// consumes-all flag on TP-scaling skills drains the current pool.
    pub fn cost(
        self,
        content: &ContentRegistry,
        bonuses: &BonusAggregate,
        current_tp: i32,
        rolls: &mut Rolls,
    ) -> Result<ResourceCost, ContentError> {
        let constants = &content.constants;
        match self {
            ActionKind::Spell(id) => {
                let spell = content.spell(id)?;
                let mut mp = spell.mp_cost;
                if rolls.roll_against(bonuses.conserve_mp) {
                    mp -= (mp as f64 * constants.resources.conserve_refund) as i32;
                }
                Ok(ResourceCost { mp, tp: 0 })
            }
            ActionKind::WeaponSkill(id) => {
                let skill = content.weapon_skill(id)?;
                let base = constants.tp.ws_tp_cost;
                let mut tp = if skill.consumes_all_tp {
                    current_tp.max(base)
                } else {
                    base
                };
                if rolls.roll_against(bonuses.conserve_tp) {
                    tp -= (base as f64 * constants.resources.conserve_refund) as i32;
                }
                Ok(ResourceCost { mp: 0, tp })
            }
            ActionKind::JobAbility | ActionKind::Ranged => Ok(ResourceCost::default()),
            ActionKind::MobSkill { tp_cost } => Ok(ResourceCost { mp: 0, tp: tp_cost }),
        }
    }

    /// Maximum usable range in game units
    pub fn range(self) -> f64 {
        match self {
            ActionKind::Spell(_) => 20.0,
            ActionKind::WeaponSkill(_) => 3.0,
            ActionKind::JobAbility => 3.0,
            ActionKind::MobSkill { .. } => 6.0,
            ActionKind::Ranged => 24.0,
        }
    }

    /// Cast time after the caster's fast-cast bonus
    pub fn cast_time(
        self,
        content: &ContentRegistry,
        bonuses: &BonusAggregate,
    ) -> Result<f64, ContentError> {
        match self {
            ActionKind::Spell(id) => {
                let spell = content.spell(id)?;
                let reduction = (bonuses.fast_cast as f64 / 100.0).clamp(0.0, 0.8);
                Ok(spell.cast_time * (1.0 - reduction))
            }
            ActionKind::WeaponSkill(_)
            | ActionKind::JobAbility
            | ActionKind::MobSkill { .. }
            | ActionKind::Ranged => Ok(0.0),
        }
    }
}
