//! Participants: a hand, a secretly owned color, and who decides for them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;
use super::player::ParticipantId;
use crate::cards::Card;
use crate::policy::Personality;

/// Hand storage. Hands hold a handful of cards, so they stay inline.
pub type Hand = SmallVec<[Card; 4]>;

/// Who makes decisions for a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Decisions arrive through the external human-input interface.
    Human,
    /// Decisions come from a fixed personality's policy.
    Computer(Personality),
}

impl Controller {
    #[must_use]
    pub fn personality(self) -> Option<Personality> {
        match self {
            Controller::Human => None,
            Controller::Computer(p) => Some(p),
        }
    }
}

impl std::fmt::Display for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::Human => write!(f, "human"),
            Controller::Computer(p) => write!(f, "{}", p),
        }
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub hand: Hand,
    /// Secretly owned piece. Only ReshuffleOwnership reassigns it.
    pub color: Color,
    /// Flips to true as a pointing penalty; reset only by ReshuffleOwnership.
    pub revealed: bool,
    pub controller: Controller,
}

impl Participant {
    #[must_use]
    pub fn new(id: ParticipantId, color: Color, controller: Controller) -> Self {
        Self {
            id,
            hand: Hand::new(),
            color,
            revealed: false,
            controller,
        }
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human)
    }

    /// Remove and return the card at `index`, if it exists.
    pub fn take_card(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    /// Reveal this participant's color. Returns true if it was hidden.
    pub fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.revealed, true)
    }
}
