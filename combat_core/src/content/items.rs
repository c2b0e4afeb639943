//! Item, weapon and augment definitions

use crate::aggregate::Modifier;
use crate::types::{AugmentId, EquipSlot, ItemId};
use serde::{Deserialize, Serialize};

/// Restriction on where an item trait applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandRestriction {
    /// Applies regardless of the slot the item occupies
    #[default]
    None,
    /// Applies only while the item is in the main hand
    MainOnly,
    /// Routed to the sub-aggregate of whichever hand holds the item
    ThisHand,
}

/// An augment-linked bonus baked into an item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTrait {
    pub modifier: Modifier,
    #[serde(default)]
    pub restriction: HandRestriction,
}

/// Weapon-specific combat numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    /// Base weapon power per swing
    pub power: i32,
    /// Swing delay, the basis of TP gain
    pub delay: i32,
    /// Hand-to-hand style weapon (kicks, halved TP)
    #[serde(default)]
    pub h2h: bool,
    /// Potency multiplied into spell damage cast with this weapon
    #[serde(default)]
    pub magic_power: i32,
}

/// A content-authored item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipSlot,
    /// Flat base combat stats
    #[serde(default)]
    pub stats: Vec<Modifier>,
    /// Augment-linked traits with hand restrictions
    #[serde(default)]
    pub traits: Vec<ItemTrait>,
    /// Augments baked into the definition itself
    #[serde(default)]
    pub static_augments: Vec<AugmentId>,
    /// Present for weapons
    #[serde(default)]
    pub weapon: Option<WeaponDefinition>,
}

/// An augment definition; instances reference these by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentDefinition {
    pub id: AugmentId,
    pub modifier: Modifier,
    /// Extra potency granted per rank for ranked instances
    #[serde(default)]
    pub per_rank: i32,
}

impl AugmentDefinition {
    /// The modifier this augment grants at a rank
    ///
    /// Rank scaling only applies to potency-carrying variants; the rest are
    /// returned unchanged.
    pub fn modifier_at(&self, rank: u8) -> Modifier {
        let extra = self.per_rank * rank as i32;
        if extra == 0 {
            return self.modifier.clone();
        }
        match &self.modifier {
            Modifier::Attribute { attribute, potency } => Modifier::Attribute {
                attribute: *attribute,
                potency: potency + extra,
            },
            Modifier::MaxHp(potency) => Modifier::MaxHp(potency + extra),
            Modifier::MaxMp(potency) => Modifier::MaxMp(potency + extra),
            Modifier::Scalar { bonus, potency } => Modifier::Scalar {
                bonus: *bonus,
                potency: potency + extra,
            },
            Modifier::ElementResist { element, potency } => Modifier::ElementResist {
                element: *element,
                potency: potency + extra,
            },
            other => other.clone(),
        }
    }
}

/// An equipped item instance on an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipped {
    pub item: ItemId,
    /// Socketed augment instances
    #[serde(default)]
    pub socketed: Vec<AugmentId>,
    /// Dynamically-ranked augment instances
    #[serde(default)]
    pub ranked: Vec<(AugmentId, u8)>,
}

impl Equipped {
    /// A bare item with no instance augments
    pub fn bare(item: ItemId) -> Self {
        Equipped {
            item,
            socketed: Vec::new(),
            ranked: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ScalarBonus;

    #[test]
    fn test_ranked_augment_scales_potency() {
        let augment = AugmentDefinition {
            id: AugmentId(1),
            modifier: Modifier::scalar(ScalarBonus::Accuracy, 5),
            per_rank: 2,
        };
        assert_eq!(
            augment.modifier_at(3),
            Modifier::scalar(ScalarBonus::Accuracy, 11)
        );
        assert_eq!(
            augment.modifier_at(0),
            Modifier::scalar(ScalarBonus::Accuracy, 5)
        );
    }

    #[test]
    fn test_rank_scaling_skips_non_potency_variants() {
        let augment = AugmentDefinition {
            id: AugmentId(2),
            modifier: Modifier::Multiplier {
                stat: crate::types::StatKind::Attack,
                factor: 1.1,
            },
            per_rank: 5,
        };
        assert_eq!(augment.modifier_at(4), augment.modifier);
    }
}
