//! Monster definitions

use crate::aggregate::Modifier;
use crate::types::MonsterId;
use serde::{Deserialize, Serialize};

/// A content-authored monster family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDefinition {
    pub id: MonsterId,
    pub name: String,
    /// Innate weapon power used when the monster attacks
    pub base_damage: i32,
    /// Innate swing delay
    pub base_delay: i32,
    /// Family-specific bonuses folded into the aggregate
    #[serde(default)]
    pub bonuses: Vec<Modifier>,
    /// Experience reward scalar
    #[serde(default = "default_reward_scalar")]
    pub exp_scalar: f64,
    /// Treasure reward scalar
    #[serde(default = "default_reward_scalar")]
    pub drop_scalar: f64,
    /// True for harvest-node actors, which never gain the idle regen bonus
    #[serde(default)]
    pub harvest_node: bool,
}

fn default_reward_scalar() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ScalarBonus;

    #[test]
    fn test_monster_definition_parse() {
        let json = r#"{
            "id": 7,
            "name": "Stone Crab",
            "base_damage": 14,
            "base_delay": 300,
            "bonuses": [
                { "scalar": { "bonus": "defense", "potency": 25 } }
            ]
        }"#;
        let monster: MonsterDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(monster.name, "Stone Crab");
        assert_eq!(
            monster.bonuses,
            vec![Modifier::scalar(ScalarBonus::Defense, 25)]
        );
        assert!((monster.exp_scalar - 1.0).abs() < f64::EPSILON);
        assert!(!monster.harvest_node);
    }
}
