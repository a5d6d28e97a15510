//! Card locations outside the hands: the shared draw and discard piles.

mod supply;

pub use supply::CardSupply;
