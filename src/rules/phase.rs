//! Phase A (special cards) and Phase B (movement) as pure functions over the
//! turn's revealed contributions.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, SpecialEffect};
use crate::core::ParticipantId;

/// One participant's card for the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contribution {
    pub participant: ParticipantId,
    pub card: Card,
}

impl Contribution {
    #[must_use]
    pub fn new(participant: ParticipantId, card: Card) -> Self {
        Self { participant, card }
    }
}

/// Result of the special-effect phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialPhase {
    /// No special card was played.
    Plain,
    /// A lone DoubleMultiplier.
    Doubled,
    /// A lone SwapTwo; the turn ends after the swap.
    Swap { owner: ParticipantId },
    /// A lone ReshuffleOwnership; the turn ends after the redeal.
    Reshuffle { owner: ParticipantId },
    /// Two or more specials cancel each other out.
    Voided { count: usize },
}

impl SpecialPhase {
    /// Movement multiplier, or `None` if the turn ends without movement.
    #[must_use]
    pub fn multiplier(self) -> Option<u32> {
        match self {
            SpecialPhase::Plain | SpecialPhase::Voided { .. } => Some(1),
            SpecialPhase::Doubled => Some(2),
            SpecialPhase::Swap { .. } | SpecialPhase::Reshuffle { .. } => None,
        }
    }
}

impl std::fmt::Display for SpecialPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecialPhase::Plain => write!(f, "no specials"),
            SpecialPhase::Doubled => write!(f, "movement doubled"),
            SpecialPhase::Swap { owner } => write!(f, "{} swaps two pieces", owner),
            SpecialPhase::Reshuffle { owner } => write!(f, "{} reshuffles ownership", owner),
            SpecialPhase::Voided { count } => write!(f, "{} specials voided", count),
        }
    }
}

/// Count the specials and decide what they do this turn.
#[must_use]
pub fn special_phase(contributions: &[Contribution]) -> SpecialPhase {
    let mut specials = contributions
        .iter()
        .filter_map(|c| c.card.special().map(|e| (c.participant, e)));

    let Some((owner, effect)) = specials.next() else {
        return SpecialPhase::Plain;
    };
    let extra = specials.count();
    if extra > 0 {
        return SpecialPhase::Voided { count: extra + 1 };
    }
    match effect {
        SpecialEffect::DoubleMultiplier => SpecialPhase::Doubled,
        SpecialEffect::SwapTwo => SpecialPhase::Swap { owner },
        SpecialEffect::ReshuffleOwnership => SpecialPhase::Reshuffle { owner },
    }
}

/// What the marker does in Phase B.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub min_value: u8,
    /// Contributions holding the minimum value, in contribution order.
    pub movers: Vec<Contribution>,
    pub distance: u32,
}

impl Movement {
    /// Two or more participants tied on the minimum.
    #[must_use]
    pub fn is_batting(&self) -> bool {
        self.movers.len() > 1
    }
}

/// Lowest movement value wins; everyone who played it moves the marker.
///
/// Returns `None` when no number or plus-two card was played.
#[must_use]
pub fn movement(contributions: &[Contribution], multiplier: u32) -> Option<Movement> {
    let min_value = contributions.iter().filter_map(|c| c.card.value()).min()?;
    let movers = contributions
        .iter()
        .filter(|c| c.card.value() == Some(min_value))
        .copied()
        .collect();
    Some(Movement {
        min_value,
        movers,
        distance: u32::from(min_value) * multiplier,
    })
}
