//! Game constants configuration

use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub attack: AttackConstants,
    #[serde(default)]
    pub tp: TpConstants,
    #[serde(default)]
    pub multi_attack: MultiAttackConstants,
    #[serde(default)]
    pub chain: ChainConstants,
    #[serde(default)]
    pub burst: BurstConstants,
    #[serde(default)]
    pub resources: ResourceConstants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackConstants {
    /// Base chance for a swing to land before accuracy/evasion adjustment
    #[serde(default = "default_base_hit_rate")]
    pub base_hit_rate: i32,
    /// Hit-rate clamp floor
    #[serde(default = "default_min_hit_rate")]
    pub min_hit_rate: i32,
    /// Hit-rate clamp ceiling
    #[serde(default = "default_max_hit_rate")]
    pub max_hit_rate: i32,
    /// Attacker/defender attribute ratio floor
    #[serde(default = "default_ratio_floor")]
    pub ratio_floor: f64,
    /// Attacker/defender attribute ratio cap
    #[serde(default = "default_ratio_cap")]
    pub ratio_cap: f64,
    /// Base critical damage multiplier
    #[serde(default = "default_crit_base_multiplier")]
    pub crit_base_multiplier: f64,
    /// Cap on the DEX/AGI ratio in the crit chance formula
    #[serde(default = "default_crit_ratio_cap")]
    pub crit_ratio_cap: f64,
    /// Fallback weapon power when no weapon is equipped
    #[serde(default = "default_unarmed_power")]
    pub unarmed_power: i32,
    /// Fallback weapon delay when no weapon is equipped
    #[serde(default = "default_unarmed_delay")]
    pub unarmed_delay: i32,
    /// Weapon power of a hand-to-hand kick sub-hit
    #[serde(default = "default_kick_power")]
    pub kick_power: i32,
    /// Base chance to interrupt a hit defender's cast
    #[serde(default = "default_interrupt_rate")]
    pub base_interrupt_rate: i32,
}

impl Default for AttackConstants {
    fn default() -> Self {
        AttackConstants {
            base_hit_rate: 75,
            min_hit_rate: 20,
            max_hit_rate: 95,
            ratio_floor: 0.1,
            ratio_cap: 10.0,
            crit_base_multiplier: 1.15,
            crit_ratio_cap: 2.0,
            unarmed_power: 3,
            unarmed_delay: 240,
            kick_power: 8,
            base_interrupt_rate: 50,
        }
    }
}

fn default_base_hit_rate() -> i32 {
    75
}
fn default_min_hit_rate() -> i32 {
    20
}
fn default_max_hit_rate() -> i32 {
    95
}
fn default_ratio_floor() -> f64 {
    0.1
}
fn default_ratio_cap() -> f64 {
    10.0
}
fn default_crit_base_multiplier() -> f64 {
    1.15
}
fn default_crit_ratio_cap() -> f64 {
    2.0
}
fn default_unarmed_power() -> i32 {
    3
}
fn default_unarmed_delay() -> i32 {
    240
}
fn default_kick_power() -> i32 {
    8
}
fn default_interrupt_rate() -> i32 {
    50
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TpConstants {
    /// TP gained per swing is delay divided by this
    #[serde(default = "default_delay_divisor")]
    pub delay_divisor: f64,
    /// Extra TP multiplier on critical swings
    #[serde(default = "default_crit_tp_multiplier")]
    pub crit_tp_multiplier: f64,
    /// Hand-to-hand swings gain TP at half rate
    #[serde(default = "default_h2h_tp_divisor")]
    pub h2h_tp_divisor: f64,
    /// Floor of the AGI ratio in target TP gain
    #[serde(default = "default_target_ratio_floor")]
    pub target_ratio_floor: f64,
    /// Cap of the AGI ratio in target TP gain
    #[serde(default = "default_target_ratio_cap")]
    pub target_ratio_cap: f64,
    /// Base TP cost of a weapon skill
    #[serde(default = "default_ws_tp_cost")]
    pub ws_tp_cost: i32,
    /// Maximum TP an actor can hold
    #[serde(default = "default_tp_cap")]
    pub tp_cap: i32,
}

impl Default for TpConstants {
    fn default() -> Self {
        TpConstants {
            delay_divisor: 3.0,
            crit_tp_multiplier: 1.25,
            h2h_tp_divisor: 2.0,
            target_ratio_floor: 0.5,
            target_ratio_cap: 2.0,
            ws_tp_cost: 1000,
            tp_cap: 3000,
        }
    }
}

fn default_delay_divisor() -> f64 {
    3.0
}
fn default_crit_tp_multiplier() -> f64 {
    1.25
}
fn default_h2h_tp_divisor() -> f64 {
    2.0
}
fn default_target_ratio_floor() -> f64 {
    0.5
}
fn default_target_ratio_cap() -> f64 {
    2.0
}
fn default_ws_tp_cost() -> i32 {
    1000
}
fn default_tp_cap() -> i32 {
    3000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiAttackConstants {
    /// Cap on each per-hand occurrence rate
    #[serde(default = "default_hand_rate_cap")]
    pub hand_rate_cap: i32,
    /// Cap on total weapon-skill rounds per invocation
    #[serde(default = "default_max_ws_rounds")]
    pub max_ws_rounds: u32,
    /// Flat dual-wield potency granted by wielding two weapons
    #[serde(default = "default_base_dual_wield")]
    pub base_dual_wield: i32,
}

impl Default for MultiAttackConstants {
    fn default() -> Self {
        MultiAttackConstants {
            hand_rate_cap: 50,
            max_ws_rounds: 8,
            base_dual_wield: 10,
        }
    }
}

fn default_hand_rate_cap() -> i32 {
    50
}
fn default_max_ws_rounds() -> u32 {
    8
}
fn default_base_dual_wield() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConstants {
    /// Window of a freshly opened chain, in seconds
    #[serde(default = "default_open_window")]
    pub open_window: f64,
    /// Floor of the shrinking step window
    #[serde(default = "default_min_window")]
    pub min_window: f64,
    /// Window shrink per chain step, in seconds
    #[serde(default = "default_window_step")]
    pub window_step: f64,
    /// Closing-damage bonus per step beyond the first
    #[serde(default = "default_step_bonus")]
    pub step_bonus: f64,
    /// Cap of the per-step closing-damage factor
    #[serde(default = "default_step_bonus_cap")]
    pub step_bonus_cap: f64,
}

impl Default for ChainConstants {
    fn default() -> Self {
        ChainConstants {
            open_window: 10.0,
            min_window: 6.0,
            window_step: 0.5,
            step_bonus: 0.2,
            step_bonus_cap: 2.0,
        }
    }
}

fn default_open_window() -> f64 {
    10.0
}
fn default_min_window() -> f64 {
    6.0
}
fn default_window_step() -> f64 {
    0.5
}
fn default_step_bonus() -> f64 {
    0.2
}
fn default_step_bonus_cap() -> f64 {
    2.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstConstants {
    /// Burst multiplier base; step 1 bursts at base + per_step
    #[serde(default = "default_burst_base")]
    pub base: f64,
    /// Burst multiplier gain per chain step
    #[serde(default = "default_burst_per_step")]
    pub per_step: f64,
    /// Burst multiplier cap
    #[serde(default = "default_burst_cap")]
    pub cap: f64,
}

impl Default for BurstConstants {
    fn default() -> Self {
        BurstConstants {
            base: 1.25,
            per_step: 0.25,
            cap: 2.5,
        }
    }
}

fn default_burst_base() -> f64 {
    1.25
}
fn default_burst_per_step() -> f64 {
    0.25
}
fn default_burst_cap() -> f64 {
    2.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConstants {
    /// Fraction of a cost refunded by a conserve proc
    #[serde(default = "default_conserve_refund")]
    pub conserve_refund: f64,
    /// Fraction of the max pool recovered per resting tick
    #[serde(default = "default_resting_fraction")]
    pub resting_pool_fraction: f64,
}

impl Default for ResourceConstants {
    fn default() -> Self {
        ResourceConstants {
            conserve_refund: 0.5,
            resting_pool_fraction: 0.10,
        }
    }
}

fn default_conserve_refund() -> f64 {
    0.5
}
fn default_resting_fraction() -> f64 {
    0.10
}
