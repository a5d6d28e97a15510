//! Card supply: the shared draw pile and discard pile.
//!
//! The draw pile is ordered with the top at the end of the vec. When it runs
//! dry mid-draw, the discard pile is shuffled into a fresh draw pile. If both
//! piles are empty the draw stops short; that is logged, never an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::Card;
use crate::core::{GameRng, Hand};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSupply {
    /// Top of the pile is the last element.
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl CardSupply {
    /// Build a supply from a card list, shuffled into the draw pile.
    #[must_use]
    pub fn new(mut cards: Vec<Card>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut cards);
        Self {
            draw_pile: cards,
            discard_pile: Vec::new(),
        }
    }

    /// Build a supply with an exact draw pile order (top = last) and discards.
    #[must_use]
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            draw_pile,
            discard_pile,
        }
    }

    /// Move up to `n` cards from the top of the draw pile into `hand`.
    ///
    /// Returns the number of cards actually drawn.
    pub fn draw(&mut self, hand: &mut Hand, n: usize, rng: &mut GameRng) -> usize {
        for drawn in 0..n {
            if self.draw_pile.is_empty() && !self.recycle(rng) {
                warn!(requested = n, drawn, "draw and discard piles are both empty");
                return drawn;
            }
            match self.draw_pile.pop() {
                Some(card) => hand.push(card),
                None => return drawn,
            }
        }
        n
    }

    /// Put a played card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Pull one copy of `card` out of the supply, draw pile first.
    ///
    /// Returns false if no copy is left in either pile.
    pub fn take(&mut self, card: Card) -> bool {
        for pile in [&mut self.draw_pile, &mut self.discard_pile] {
            if let Some(i) = pile.iter().rposition(|&c| c == card) {
                pile.remove(i);
                return true;
            }
        }
        false
    }

    /// Put a card back on top of the draw pile.
    pub fn put_on_top(&mut self, card: Card) {
        self.draw_pile.push(card);
    }

    /// Shuffle the discard pile into a new draw pile.
    ///
    /// Returns false if there was nothing to recycle.
    fn recycle(&mut self, rng: &mut GameRng) -> bool {
        if self.discard_pile.is_empty() {
            return false;
        }
        debug!(cards = self.discard_pile.len(), "draw pile exhausted, reshuffling discards");
        self.draw_pile.append(&mut self.discard_pile);
        rng.shuffle(&mut self.draw_pile);
        true
    }

    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Cards in both piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every card held by the supply, draw pile first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile.iter().chain(self.discard_pile.iter())
    }
}
