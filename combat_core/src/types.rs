//! Core types specific to combat_core

use serde::{Deserialize, Serialize};

/// Unique identifier for an actor (player or monster) in the current zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Identifier for an item definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Identifier for an augment definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AugmentId(pub u32);

/// Identifier for a monster definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

/// Identifier for a weapon skill definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponSkillId(pub u32);

/// Identifier for a spell definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpellId(pub u32);

/// The six core combat attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Str,
    Dex,
    Vit,
    Agi,
    Int,
    Mnd,
}

impl Attribute {
    /// Get all attributes in canonical order
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Str,
            Attribute::Dex,
            Attribute::Vit,
            Attribute::Agi,
            Attribute::Int,
            Attribute::Mnd,
        ]
    }

    /// Index into per-attribute arrays
    pub fn index(self) -> usize {
        match self {
            Attribute::Str => 0,
            Attribute::Dex => 1,
            Attribute::Vit => 2,
            Attribute::Agi => 3,
            Attribute::Int => 4,
            Attribute::Mnd => 5,
        }
    }
}

/// The eight elements used for spells, resistances and skillchains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Ice,
    Wind,
    Earth,
    Lightning,
    Water,
    Light,
    Dark,
}

impl Element {
    /// Get all elements in canonical order
    pub fn all() -> &'static [Element] {
        &[
            Element::Fire,
            Element::Ice,
            Element::Wind,
            Element::Earth,
            Element::Lightning,
            Element::Water,
            Element::Light,
            Element::Dark,
        ]
    }

    /// Index into per-element arrays
    pub fn index(self) -> usize {
        match self {
            Element::Fire => 0,
            Element::Ice => 1,
            Element::Wind => 2,
            Element::Earth => 3,
            Element::Lightning => 4,
            Element::Water => 5,
            Element::Light => 6,
            Element::Dark => 7,
        }
    }
}

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    MainHand,
    OffHand,
    Ranged,
    Head,
    Body,
    Hands,
    Legs,
    Feet,
}

impl EquipSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipSlot] {
        &[
            EquipSlot::MainHand,
            EquipSlot::OffHand,
            EquipSlot::Ranged,
            EquipSlot::Head,
            EquipSlot::Body,
            EquipSlot::Hands,
            EquipSlot::Legs,
            EquipSlot::Feet,
        ]
    }

    /// The attacking hand this slot corresponds to, if any
    pub fn hand(self) -> Option<Hand> {
        match self {
            EquipSlot::MainHand => Some(Hand::Main),
            EquipSlot::OffHand => Some(Hand::Off),
            EquipSlot::Ranged => Some(Hand::Ranged),
            _ => None,
        }
    }
}

/// A slot capable of delivering an auto-attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Main,
    Off,
    Ranged,
}

impl Hand {
    /// Index into per-hand arrays
    pub fn index(self) -> usize {
        match self {
            Hand::Main => 0,
            Hand::Off => 1,
            Hand::Ranged => 2,
        }
    }
}

/// Physical vs magical damage, carried on results for the event layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Physical,
    Magical,
}

/// Player job, used by the behavior delegate for job-trait bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Job {
    Warrior,
    Monk,
    Thief,
    WhiteMage,
    BlackMage,
    RedMage,
}

/// A stat that can receive a compounding multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Attribute(Attribute),
    Attack,
    Defense,
    Accuracy,
    Evasion,
    MagicAttack,
    MagicDefense,
    Resist(Element),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_indices_are_distinct() {
        let mut seen = [false; 6];
        for attr in Attribute::all() {
            assert!(!seen[attr.index()]);
            seen[attr.index()] = true;
        }
    }

    #[test]
    fn test_element_indices_are_distinct() {
        let mut seen = [false; 8];
        for element in Element::all() {
            assert!(!seen[element.index()]);
            seen[element.index()] = true;
        }
    }

    #[test]
    fn test_only_weapon_slots_map_to_hands() {
        assert_eq!(EquipSlot::MainHand.hand(), Some(Hand::Main));
        assert_eq!(EquipSlot::OffHand.hand(), Some(Hand::Off));
        assert_eq!(EquipSlot::Ranged.hand(), Some(Hand::Ranged));
        assert_eq!(EquipSlot::Body.hand(), None);
    }
}
