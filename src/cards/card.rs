//! Card values.
//!
//! Cards are plain values: two cards with the same face are interchangeable,
//! so the deck is a multiset and conservation is checked by counting faces.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Effects carried by special cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecialEffect {
    /// Doubles this turn's marker movement.
    DoubleMultiplier,
    /// Owner swaps two pieces on the standings board; no movement.
    SwapTwo,
    /// Participants' owned colors are redealt among themselves; no movement.
    ReshuffleOwnership,
}

impl std::fmt::Display for SpecialEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecialEffect::DoubleMultiplier => write!(f, "x2"),
            SpecialEffect::SwapTwo => write!(f, "Swap"),
            SpecialEffect::ReshuffleOwnership => write!(f, "Reshuffle"),
        }
    }
}

/// A single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Card {
    /// Plain number card. The deck only holds 1, 3 and 4.
    Number(u8),
    /// Moves like a 2 and binds any single-mover effect to its color.
    PlusTwo(Color),
    Special(SpecialEffect),
}

impl Card {
    /// Movement value of a number or plus-two card.
    #[must_use]
    pub fn value(self) -> Option<u8> {
        match self {
            Card::Number(v) => Some(v),
            Card::PlusTwo(_) => Some(2),
            Card::Special(_) => None,
        }
    }

    /// The color a plus-two card is bound to.
    #[must_use]
    pub fn bound_color(self) -> Option<Color> {
        match self {
            Card::PlusTwo(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn special(self) -> Option<SpecialEffect> {
        match self {
            Card::Special(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_special(self) -> bool {
        matches!(self, Card::Special(_))
    }

    /// Is this the plain number card `value`?
    #[must_use]
    pub fn is_number(self, value: u8) -> bool {
        self == Card::Number(value)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Number(v) => write!(f, "{}", v),
            Card::PlusTwo(c) => write!(f, "{}+2", c),
            Card::Special(e) => write!(f, "{}", e),
        }
    }
}
