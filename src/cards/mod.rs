//! Cards and the fixed deck composition.
//!
//! - `Card`: number, plus-two, or special card
//! - `DeckComposition`: the 55-card deck and face counting

mod card;
mod deck;

pub use card::{Card, SpecialEffect};
pub use deck::{census, Census, DeckComposition};
