//! BonusAggregator - Builds and caches per-actor aggregates for the current tick

use super::{BonusAggregate, Modifier, ScalarBonus};
use crate::actor::Actor;
use crate::content::{ContentError, ContentRegistry, HandRestriction, MonsterDefinition};
use crate::status::StatusKind;
use crate::types::{ActorId, EquipSlot, Job};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Behavior-controller hook for actor-specific bonuses
///
/// The aggregator delegates the last aggregation step here, letting the job
/// system (or a monster AI controller) contribute without the aggregate
/// knowing about either.
pub trait BehaviorBonuses {
    fn bonuses(&self, actor: &Actor) -> Vec<Modifier>;
}

/// Default behavior delegate: player job traits by level
pub struct JobTraits;

impl BehaviorBonuses for JobTraits {
    fn bonuses(&self, actor: &Actor) -> Vec<Modifier> {
        let Some(job) = actor.job else {
            return Vec::new();
        };
        let level = actor.level;
        let mut out = Vec::new();
        match job {
            Job::Warrior => {
                if level >= 25 {
                    out.push(Modifier::scalar(ScalarBonus::DoubleAttack, 10));
                }
                if level >= 10 {
                    out.push(Modifier::scalar(ScalarBonus::Attack, 10));
                }
            }
            Job::Monk => {
                if level >= 10 {
                    out.push(Modifier::scalar(ScalarBonus::Counter, 10));
                }
                if level >= 25 {
                    out.push(Modifier::scalar(ScalarBonus::KickAttacks, 10));
                }
            }
            Job::Thief => {
                if level >= 10 {
                    out.push(Modifier::scalar(ScalarBonus::Evasion, 10));
                }
                if level >= 55 {
                    out.push(Modifier::scalar(ScalarBonus::TripleAttack, 5));
                }
            }
            Job::WhiteMage => {
                if level >= 25 {
                    out.push(Modifier::scalar(ScalarBonus::Regen, 1));
                }
                if level >= 10 {
                    out.push(Modifier::scalar(ScalarBonus::CurePotency, 10));
                }
            }
            Job::BlackMage => {
                if level >= 10 {
                    out.push(Modifier::scalar(ScalarBonus::ConserveMp, 25));
                }
                if level >= 20 {
                    out.push(Modifier::scalar(ScalarBonus::MagicAttack, 10));
                }
            }
            Job::RedMage => {
                if level >= 15 {
                    out.push(Modifier::scalar(ScalarBonus::FastCast, 15));
                }
                if level >= 25 {
                    out.push(Modifier::scalar(ScalarBonus::Refresh, 1));
                }
            }
        }
        out
    }
}

/// Builds a [`BonusAggregate`] per actor and memoizes it for the current tick
///
/// The cache is an explicit context object owned by the combat system: call
/// [`BonusAggregator::clear`] exactly once at every tick boundary, and
/// [`BonusAggregator::clear_actor`] when an actor's equipment or statuses
/// meaningfully change mid-tick. Not safe for concurrent use.
pub struct BonusAggregator {
    cache: HashMap<ActorId, BonusAggregate>,
    behavior: Box<dyn BehaviorBonuses>,
}

impl Default for BonusAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl BonusAggregator {
    /// Aggregator with the default job-trait behavior delegate
    pub fn new() -> Self {
        BonusAggregator {
            cache: HashMap::new(),
            behavior: Box::new(JobTraits),
        }
    }

    /// Aggregator with a custom behavior delegate
    pub fn with_behavior(behavior: Box<dyn BehaviorBonuses>) -> Self {
        BonusAggregator {
            cache: HashMap::new(),
            behavior,
        }
    }

    /// The aggregate for an actor, built on first request this tick
    pub fn get(
        &mut self,
        actor: &Actor,
        content: &ContentRegistry,
    ) -> Result<&BonusAggregate, ContentError> {
        match self.cache.entry(actor.id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!(actor = actor.id.0, "building bonus aggregate");
                let built = build_aggregate(actor, content, self.behavior.as_ref())?;
                Ok(entry.insert(built))
            }
        }
    }

    /// Invalidate the whole cache; call once per world tick
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Invalidate a single actor's entry
    pub fn clear_actor(&mut self, id: ActorId) {
        self.cache.remove(&id);
    }

    /// Run `body` against a one-off adjusted copy of the actor's aggregate
    ///
    /// The cached value is never touched: `adjust` mutates a clone, `body`
    /// reads it, and the steady-state aggregate survives bit-for-bit. Used
    /// by weapon-skill resolution for temporary multiplier tweaks.
    pub fn scoped<R>(
        &mut self,
        actor: &Actor,
        content: &ContentRegistry,
        adjust: impl FnOnce(&mut BonusAggregate),
        body: impl FnOnce(&BonusAggregate) -> R,
    ) -> Result<R, ContentError> {
        let mut scoped = self.get(actor, content)?.clone();
        adjust(&mut scoped);
        Ok(body(&scoped))
    }
}

/// Build an actor's aggregate from scratch
///
/// Steps run in a fixed order because multipliers compound in application
/// order.
fn build_aggregate(
    actor: &Actor,
    content: &ContentRegistry,
    behavior: &dyn BehaviorBonuses,
) -> Result<BonusAggregate, ContentError> {
    let mut bonuses = BonusAggregate::new();
    let constants = &content.constants;

    // Monster definition is needed by two steps below; unknown monster ids
    // are content bugs and fail here.
    let monster: Option<&MonsterDefinition> = match actor.monster_id() {
        Some(id) => Some(content.monster(id)?),
        None => None,
    };

    // 1. Active status effects.
    for status in &actor.statuses {
        for modifier in status.modifiers() {
            modifier.apply(&mut bonuses);
        }
    }

    // 2-4. Equipment: base stats, traits, then augments. Slots walk in
    // canonical order so multiplier application stays deterministic.
    for slot in EquipSlot::all() {
        let Some(equipped) = actor.equipped(*slot) else {
            continue;
        };
        let item = content.item(equipped.item)?;

        for stat in &item.stats {
            stat.apply(&mut bonuses);
        }

        for item_trait in &item.traits {
            match item_trait.restriction {
                HandRestriction::None => item_trait.modifier.apply(&mut bonuses),
                HandRestriction::MainOnly => {
                    if *slot == EquipSlot::MainHand {
                        item_trait.modifier.apply(&mut bonuses);
                    }
                }
                HandRestriction::ThisHand => match (&item_trait.modifier, slot.hand()) {
                    (Modifier::HandRate { proc, rate, .. }, Some(hand)) => {
                        Modifier::HandRate {
                            hand,
                            proc: *proc,
                            rate: *rate,
                        }
                        .apply(&mut bonuses);
                    }
                    _ => item_trait.modifier.apply(&mut bonuses),
                },
            }
        }

        // Ranked, socketed, then static augments. Unknown instance augment
        // ids are no-ops; only definitional lookups fail hard.
        for (id, rank) in &equipped.ranked {
            if let Some(augment) = content.augment(*id) {
                augment.modifier_at(*rank).apply(&mut bonuses);
            }
        }
        for id in equipped.socketed.iter().chain(&item.static_augments) {
            if let Some(augment) = content.augment(*id) {
                augment.modifier.apply(&mut bonuses);
            }
        }
    }

    // 5. Passive recovery from resting or being out of combat.
    let diseased = actor.has_status(StatusKind::Disease);
    let recovery_eligible = if actor.is_player() {
        (actor.resting || !actor.has_enmity) && !diseased
    } else {
        !actor.has_enmity && !monster.map(|m| m.harvest_node).unwrap_or(false)
    };
    if recovery_eligible {
        let fraction = constants.resources.resting_pool_fraction;
        bonuses.regen += (actor.max_hp as f64 * fraction) as i32;
        bonuses.refresh += (actor.max_mp as f64 * fraction) as i32;
    }

    // 6. Player baseline recovery and the dual-wield bonus.
    if actor.is_player() {
        bonuses.regen += 1;
        bonuses.refresh += 1;
    }
    if actor.is_dual_wielding() {
        bonuses.dual_wield += constants.multi_attack.base_dual_wield;
    }

    // 7. Monster-family bonuses.
    if let Some(monster) = monster {
        for modifier in &monster.bonuses {
            modifier.apply(&mut bonuses);
        }
    }

    // 8. An uninterruptible cast shrugs off crowd control for its duration.
    if actor.casting.map(|c| c.uninterruptible).unwrap_or(false) {
        bonuses.grant_crowd_control_immunity();
    }

    // 9. Behavior-specific bonuses.
    for modifier in behavior.bonuses(actor) {
        modifier.apply(&mut bonuses);
    }

    Ok(bonuses)
}
