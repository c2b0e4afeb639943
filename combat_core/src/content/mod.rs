//! Content definitions consumed by the resolver, and their registry
//!
//! Item, augment, monster and skill definitions are authored outside this
//! crate; the registry gives the engine read-only access to them. A lookup
//! for an id with no registered definition is a data-authoring bug and fails
//! hard with [`ContentError`] rather than degrading silently.

mod constants;
mod items;
mod monsters;
mod skills;

pub use constants::{
    AttackConstants, BurstConstants, ChainConstants, GameConstants, MultiAttackConstants,
    ResourceConstants, TpConstants,
};
pub use items::{AugmentDefinition, Equipped, HandRestriction, ItemDefinition, ItemTrait, WeaponDefinition};
pub use monsters::MonsterDefinition;
pub use skills::{
    ActionKind, FtpCurve, ResourceCost, SpellDefinition, SpellKind, WeaponSkillDefinition,
    WeaponSkillKind,
};

use crate::types::{AugmentId, ItemId, MonsterId, SpellId, WeaponSkillId};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors from loading tunables or content tables
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// A referenced definition id with no registered definition
///
/// These indicate missing game-content data, not a runtime condition, so
/// they surface as hard errors at the lookup site.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentError {
    #[error("unknown item definition: {0:?}")]
    UnknownItem(ItemId),
    #[error("unknown monster definition: {0:?}")]
    UnknownMonster(MonsterId),
    #[error("unknown weapon skill definition: {0:?}")]
    UnknownWeaponSkill(WeaponSkillId),
    #[error("unknown spell definition: {0:?}")]
    UnknownSpell(SpellId),
}

/// Load and parse a TOML value from a path
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Parse a TOML value from a string
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Registry of all content definitions visible to the engine
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    items: HashMap<ItemId, ItemDefinition>,
    augments: HashMap<AugmentId, AugmentDefinition>,
    monsters: HashMap<MonsterId, MonsterDefinition>,
    weapon_skills: HashMap<WeaponSkillId, WeaponSkillDefinition>,
    spells: HashMap<SpellId, SpellDefinition>,
    pub constants: GameConstants,
}

impl ContentRegistry {
    /// Create an empty registry with default constants
    pub fn new() -> Self {
        ContentRegistry::default()
    }

    // === Registration ===

    pub fn register_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.id, item);
    }

    pub fn register_augment(&mut self, augment: AugmentDefinition) {
        self.augments.insert(augment.id, augment);
    }

    pub fn register_monster(&mut self, monster: MonsterDefinition) {
        self.monsters.insert(monster.id, monster);
    }

    pub fn register_weapon_skill(&mut self, skill: WeaponSkillDefinition) {
        self.weapon_skills.insert(skill.id, skill);
    }

    pub fn register_spell(&mut self, spell: SpellDefinition) {
        self.spells.insert(spell.id, spell);
    }

    /// Register items parsed from a JSON table
    pub fn register_items_json(&mut self, json: &str) -> Result<(), ConfigError> {
        let items: Vec<ItemDefinition> = serde_json::from_str(json)?;
        for item in items {
            self.register_item(item);
        }
        Ok(())
    }

    // === Lookup (definitional; unknown ids are content bugs) ===

    pub fn item(&self, id: ItemId) -> Result<&ItemDefinition, ContentError> {
        self.items.get(&id).ok_or(ContentError::UnknownItem(id))
    }

    pub fn monster(&self, id: MonsterId) -> Result<&MonsterDefinition, ContentError> {
        self.monsters.get(&id).ok_or(ContentError::UnknownMonster(id))
    }

    pub fn weapon_skill(&self, id: WeaponSkillId) -> Result<&WeaponSkillDefinition, ContentError> {
        self.weapon_skills
            .get(&id)
            .ok_or(ContentError::UnknownWeaponSkill(id))
    }

    pub fn spell(&self, id: SpellId) -> Result<&SpellDefinition, ContentError> {
        self.spells.get(&id).ok_or(ContentError::UnknownSpell(id))
    }

    /// Non-failing augment lookup
    ///
    /// Unknown augment ids attached to an item instance are treated as
    /// no-ops at aggregation time, so this returns an `Option`.
    pub fn augment(&self, id: AugmentId) -> Option<&AugmentDefinition> {
        self.augments.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_item_is_an_error() {
        let registry = ContentRegistry::new();
        assert_eq!(
            registry.item(ItemId(999)).unwrap_err(),
            ContentError::UnknownItem(ItemId(999))
        );
    }

    #[test]
    fn test_unknown_augment_is_a_noop_lookup() {
        let registry = ContentRegistry::new();
        assert!(registry.augment(crate::types::AugmentId(4)).is_none());
    }

    #[test]
    fn test_items_json_round_trip() {
        let mut registry = ContentRegistry::new();
        let json = r#"[
            {
                "id": 101,
                "name": "Bronze Sword",
                "slot": "main_hand",
                "weapon": { "power": 10, "delay": 240 }
            }
        ]"#;
        registry.register_items_json(json).unwrap();
        let item = registry.item(ItemId(101)).unwrap();
        assert_eq!(item.name, "Bronze Sword");
        assert_eq!(item.weapon.as_ref().unwrap().power, 10);
    }
}
