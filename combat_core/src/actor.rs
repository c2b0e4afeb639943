//! Actor - The read-only combat snapshot of a player or monster
//!
//! Actor state is owned by the surrounding game layer; the engine only reads
//! it while building aggregates and resolving actions.

use crate::content::Equipped;
use crate::status::ActiveStatus;
use crate::types::{ActorId, Attribute, EquipSlot, Job, MonsterId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What kind of entity an actor is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    Monster(MonsterId),
}

/// An in-progress cast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastState {
    /// Seconds until the cast completes
    pub remaining: f64,
    /// Uninterruptible casts also shrug off crowd control
    pub uninterruptible: bool,
}

/// Combat-relevant state of one actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    /// Job drives the behavior delegate; monsters usually have none
    #[serde(default)]
    pub job: Option<Job>,
    pub level: u32,

    // === Base stats ===
    /// Base core attributes, indexed by `Attribute::index`
    pub base_attributes: [i32; 6],
    pub max_hp: i32,
    pub max_mp: i32,

    // === Current resources ===
    pub hp: i32,
    pub mp: i32,
    pub tp: i32,

    // === Volatile combat state ===
    #[serde(default)]
    pub statuses: Vec<ActiveStatus>,
    #[serde(default)]
    pub equipment: HashMap<EquipSlot, Equipped>,
    #[serde(default)]
    pub resting: bool,
    /// True while at least one enemy holds hate on this actor
    #[serde(default)]
    pub has_enmity: bool,
    #[serde(default)]
    pub casting: Option<CastState>,
}

impl Actor {
    /// Create a bare actor with uniform base attributes
    pub fn new(id: ActorId, kind: ActorKind, level: u32) -> Self {
        Actor {
            id,
            kind,
            job: None,
            level,
            base_attributes: [10; 6],
            max_hp: 100,
            max_mp: 50,
            hp: 100,
            mp: 50,
            tp: 0,
            statuses: Vec::new(),
            equipment: HashMap::new(),
            resting: false,
            has_enmity: false,
            casting: None,
        }
    }

    /// Base value of one attribute
    pub fn base_attribute(&self, attribute: Attribute) -> i32 {
        self.base_attributes[attribute.index()]
    }

    /// Set a base attribute (builder style)
    pub fn with_attribute(mut self, attribute: Attribute, value: i32) -> Self {
        self.base_attributes[attribute.index()] = value;
        self
    }

    /// Set the job (builder style)
    pub fn with_job(mut self, job: Job) -> Self {
        self.job = Some(job);
        self
    }

    /// Check if the actor has a given status active
    pub fn has_status(&self, kind: crate::status::StatusKind) -> bool {
        self.statuses.iter().any(|s| s.kind == kind && s.is_active())
    }

    /// The equipped item in a slot, if any
    pub fn equipped(&self, slot: EquipSlot) -> Option<&Equipped> {
        self.equipment.get(&slot)
    }

    /// Dual-wielding means a weapon in each hand
    pub fn is_dual_wielding(&self) -> bool {
        self.equipment.contains_key(&EquipSlot::MainHand)
            && self.equipment.contains_key(&EquipSlot::OffHand)
    }

    /// Monster definition id, if this actor is a monster
    pub fn monster_id(&self) -> Option<MonsterId> {
        match self.kind {
            ActorKind::Player => None,
            ActorKind::Monster(id) => Some(id),
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusKind;
    use crate::types::ItemId;

    #[test]
    fn test_dual_wield_requires_both_hands() {
        let mut actor = Actor::new(ActorId(1), ActorKind::Player, 10);
        assert!(!actor.is_dual_wielding());
        actor
            .equipment
            .insert(EquipSlot::MainHand, Equipped::bare(ItemId(1)));
        assert!(!actor.is_dual_wielding());
        actor
            .equipment
            .insert(EquipSlot::OffHand, Equipped::bare(ItemId(2)));
        assert!(actor.is_dual_wielding());
    }

    #[test]
    fn test_has_status_ignores_expired() {
        let mut actor = Actor::new(ActorId(1), ActorKind::Player, 10);
        actor
            .statuses
            .push(ActiveStatus::new(StatusKind::Haste, 15, 0.0));
        assert!(!actor.has_status(StatusKind::Haste));
        actor
            .statuses
            .push(ActiveStatus::new(StatusKind::Haste, 15, 10.0));
        assert!(actor.has_status(StatusKind::Haste));
    }

    #[test]
    fn test_builder_attributes() {
        let actor = Actor::new(ActorId(2), ActorKind::Player, 30)
            .with_attribute(Attribute::Str, 55)
            .with_job(Job::Warrior);
        assert_eq!(actor.base_attribute(Attribute::Str), 55);
        assert_eq!(actor.base_attribute(Attribute::Vit), 10);
        assert_eq!(actor.job, Some(Job::Warrior));
    }
}
