//! Skillchain - The elemental combo state machine
//!
//! Chain state is stored per defending actor by the surrounding game layer;
//! this module owns the transitions. Using a skill with chain attributes
//! either opens a chain, advances it one step (dealing bonus closing damage),
//! or resets it to a fresh opening. Each step also opens a magic-burst
//! window for spells whose element matches the step's attribute.

use crate::content::ChainConstants;
use serde::{Deserialize, Serialize};

use crate::types::Element;

/// Elemental attribute a weapon skill offers to the chain system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainAttribute {
    // Tier 1
    Liquefaction,
    Scission,
    Reverberation,
    Detonation,
    Induration,
    Impaction,
    Compression,
    Transfixion,
    // Tier 2
    Gravitation,
    Distortion,
    Fusion,
    Fragmentation,
    // Tier 3
    Light,
    Darkness,
    // Tier 4
    Radiance,
    Umbra,
}

impl ChainAttribute {
    /// Chain tier, driving the closing-damage level factor
    pub fn level(self) -> u8 {
        match self {
            ChainAttribute::Liquefaction
            | ChainAttribute::Scission
            | ChainAttribute::Reverberation
            | ChainAttribute::Detonation
            | ChainAttribute::Induration
            | ChainAttribute::Impaction
            | ChainAttribute::Compression
            | ChainAttribute::Transfixion => 1,
            ChainAttribute::Gravitation
            | ChainAttribute::Distortion
            | ChainAttribute::Fusion
            | ChainAttribute::Fragmentation => 2,
            ChainAttribute::Light | ChainAttribute::Darkness => 3,
            ChainAttribute::Radiance | ChainAttribute::Umbra => 4,
        }
    }

    /// Elements that can magic-burst against this attribute
    pub fn burst_elements(self) -> &'static [Element] {
        match self {
            ChainAttribute::Liquefaction => &[Element::Fire],
            ChainAttribute::Scission => &[Element::Earth],
            ChainAttribute::Reverberation => &[Element::Water],
            ChainAttribute::Detonation => &[Element::Wind],
            ChainAttribute::Induration => &[Element::Ice],
            ChainAttribute::Impaction => &[Element::Lightning],
            ChainAttribute::Compression => &[Element::Dark],
            ChainAttribute::Transfixion => &[Element::Light],
            ChainAttribute::Gravitation => &[Element::Earth, Element::Dark],
            ChainAttribute::Distortion => &[Element::Ice, Element::Water],
            ChainAttribute::Fusion => &[Element::Fire, Element::Light],
            ChainAttribute::Fragmentation => &[Element::Wind, Element::Lightning],
            ChainAttribute::Light | ChainAttribute::Radiance => {
                &[Element::Fire, Element::Wind, Element::Lightning, Element::Light]
            }
            ChainAttribute::Darkness | ChainAttribute::Umbra => {
                &[Element::Ice, Element::Earth, Element::Water, Element::Dark]
            }
        }
    }
}

/// The fixed attribute-to-attribute transition table
///
/// The scan over this table is order-dependent on the *candidate* sides
/// (first pairing found wins); the table itself is a pure pairing function.
/// Tier-2 attributes allow loop-backs into tier 1; Light and Darkness
/// escalate into Radiance and Umbra.
pub fn combine(current: ChainAttribute, next: ChainAttribute) -> Option<ChainAttribute> {
    use ChainAttribute::*;
    match (current, next) {
        // Tier 1 pairings
        (Transfixion, Compression) => Some(Compression),
        (Transfixion, Scission) => Some(Distortion),
        (Transfixion, Reverberation) => Some(Reverberation),
        (Compression, Transfixion) => Some(Transfixion),
        (Compression, Detonation) => Some(Detonation),
        (Liquefaction, Scission) => Some(Scission),
        (Liquefaction, Impaction) => Some(Fusion),
        (Scission, Liquefaction) => Some(Liquefaction),
        (Scission, Detonation) => Some(Detonation),
        (Scission, Reverberation) => Some(Reverberation),
        (Reverberation, Induration) => Some(Induration),
        (Reverberation, Impaction) => Some(Impaction),
        (Detonation, Compression) => Some(Gravitation),
        (Detonation, Scission) => Some(Scission),
        (Induration, Compression) => Some(Compression),
        (Induration, Reverberation) => Some(Fragmentation),
        (Induration, Impaction) => Some(Impaction),
        (Impaction, Liquefaction) => Some(Liquefaction),
        (Impaction, Detonation) => Some(Detonation),
        // Tier 2 escalations
        (Gravitation, Distortion) => Some(Darkness),
        (Gravitation, Fragmentation) => Some(Fragmentation),
        (Distortion, Gravitation) => Some(Darkness),
        (Distortion, Fusion) => Some(Fusion),
        (Fusion, Gravitation) => Some(Gravitation),
        (Fusion, Fragmentation) => Some(Light),
        (Fragmentation, Distortion) => Some(Distortion),
        (Fragmentation, Fusion) => Some(Light),
        // Tier 2 loop-backs into tier 1
        (Fusion, Liquefaction) => Some(Liquefaction),
        (Gravitation, Scission) => Some(Scission),
        (Distortion, Induration) => Some(Induration),
        (Fragmentation, Detonation) => Some(Detonation),
        // Tier 3 escalations
        (Light, Light) => Some(Radiance),
        (Darkness, Darkness) => Some(Umbra),
        _ => None,
    }
}

/// Chain state for one defending actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainState {
    /// A chain waiting for its first pairing
    Open {
        /// Candidate attributes usable to continue
        candidates: Vec<ChainAttribute>,
        expires_at: f64,
    },
    /// An advanced chain
    Step {
        /// Chain depth, starting at 1
        step: u32,
        /// The resolved attribute of the current step
        attribute: ChainAttribute,
        expires_at: f64,
    },
}

impl ChainState {
    /// An expired chain is equivalent to no chain
    pub fn is_expired(&self, now: f64) -> bool {
        let expires_at = match self {
            ChainState::Open { expires_at, .. } => *expires_at,
            ChainState::Step { expires_at, .. } => *expires_at,
        };
        now >= expires_at
    }

    /// The step a spell of this element would burst against, if the window
    /// is still live
    pub fn burst_step(&self, element: Element, now: f64) -> Option<u32> {
        if self.is_expired(now) {
            return None;
        }
        match self {
            ChainState::Open { .. } => None,
            ChainState::Step { step, attribute, .. } => {
                if attribute.burst_elements().contains(&element) {
                    Some(*step)
                } else {
                    None
                }
            }
        }
    }
}

/// A chain link that just closed, carrying its damage context
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainLink {
    pub attribute: ChainAttribute,
    pub step: u32,
}

impl ChainLink {
    /// Closing-damage multiplier applied to the skill that closed the link
    ///
    /// The attacker's skillchain-damage potency scales the result.
    pub fn damage_multiplier(&self, constants: &ChainConstants, skillchain_damage: i32) -> f64 {
        let level_factor = match self.attribute.level() {
            1 => 0.5,
            2 => 0.75,
            3 => 1.0,
            _ => 1.25,
        };
        let step_factor = (1.0 + constants.step_bonus * (self.step.saturating_sub(1)) as f64)
            .min(constants.step_bonus_cap);
        level_factor * step_factor * (1.0 + skillchain_damage as f64 / 100.0)
    }
}

/// Result of feeding one skill use into a defender's chain state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChainOutcome {
    /// The skill has no chain attributes; state is untouched
    None,
    /// A fresh chain opened (also the reset path on a failed pairing)
    Opened(ChainState),
    /// The chain advanced one step
    Advanced { state: ChainState, link: ChainLink },
}

impl ChainOutcome {
    /// The state to store for the defender, if any
    pub fn state(&self) -> Option<&ChainState> {
        match self {
            ChainOutcome::None => None,
            ChainOutcome::Opened(state) => Some(state),
            ChainOutcome::Advanced { state, .. } => Some(state),
        }
    }
}

fn open(attributes: &[ChainAttribute], now: f64, window_bonus: f64, constants: &ChainConstants) -> ChainState {
    ChainState::Open {
        candidates: attributes.to_vec(),
        expires_at: now + constants.open_window + window_bonus,
    }
}

/// Advance a defender's chain state with a newly-used skill's attributes
///
/// `window_bonus` comes from the attacker's aggregate. The candidate scan is
/// deliberately order-dependent: the current state's attributes are scanned
/// in order, then the skill's, and the first pairing present in the
/// transition table wins.
pub fn advance(
    current: Option<&ChainState>,
    attributes: &[ChainAttribute],
    now: f64,
    window_bonus: f64,
    constants: &ChainConstants,
) -> ChainOutcome {
    if attributes.is_empty() {
        return ChainOutcome::None;
    }

    let live = current.filter(|state| !state.is_expired(now));
    let Some(state) = live else {
        return ChainOutcome::Opened(open(attributes, now, window_bonus, constants));
    };

    let (held, step): (&[ChainAttribute], u32) = match state {
        ChainState::Open { candidates, .. } => (candidates.as_slice(), 0),
        ChainState::Step { attribute, step, .. } => (std::slice::from_ref(attribute), *step),
    };

    for current_attr in held {
        for next_attr in attributes {
            if let Some(result) = combine(*current_attr, *next_attr) {
                let step = step + 1;
                let window = (constants.open_window - constants.window_step * step as f64)
                    .max(constants.min_window);
                let state = ChainState::Step {
                    step,
                    attribute: result,
                    expires_at: now + window + window_bonus,
                };
                let link = ChainLink {
                    attribute: result,
                    step,
                };
                return ChainOutcome::Advanced { state, link };
            }
        }
    }

    // No pairing matched: the chain resets to a fresh opening.
    ChainOutcome::Opened(open(attributes, now, window_bonus, constants))
}
