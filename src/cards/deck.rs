//! Deck composition and card census.
//!
//! The deck is fixed: 10 each of 1, 3 and 4; two plus-two cards per color;
//! 5 x2, 4 swap and 2 reshuffle specials. 55 cards in total.

use rustc_hash::FxHashMap;

use super::card::{Card, SpecialEffect};
use crate::core::Color;

/// Counts of each card face.
pub type Census = FxHashMap<Card, usize>;

/// A deck described as (face, copies) entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckComposition {
    entries: Vec<(Card, usize)>,
}

impl DeckComposition {
    /// The standard 55-card deck.
    #[must_use]
    pub fn standard() -> Self {
        let mut entries = vec![
            (Card::Number(1), 10),
            (Card::Number(3), 10),
            (Card::Number(4), 10),
        ];
        entries.extend(Color::ALL.into_iter().map(|c| (Card::PlusTwo(c), 2)));
        entries.extend([
            (Card::Special(SpecialEffect::DoubleMultiplier), 5),
            (Card::Special(SpecialEffect::SwapTwo), 4),
            (Card::Special(SpecialEffect::ReshuffleOwnership), 2),
        ]);
        Self { entries }
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Expand into an unshuffled card list, in entry order.
    #[must_use]
    pub fn build(&self) -> Vec<Card> {
        self.entries
            .iter()
            .flat_map(|&(card, n)| std::iter::repeat(card).take(n))
            .collect()
    }

    /// Face counts of this composition.
    #[must_use]
    pub fn census(&self) -> Census {
        census(self.build().iter())
    }
}

/// Count card faces.
pub fn census<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Census {
    let mut counts = Census::default();
    for card in cards {
        *counts.entry(*card).or_insert(0) += 1;
    }
    counts
}
