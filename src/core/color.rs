//! The seven piece colors.
//!
//! Every color is a piece on the standings board. At setup each participant
//! secretly receives one color; the rest are neutral pieces.

use serde::{Deserialize, Serialize};

/// One of the seven game pieces.
///
/// Declaration order is the canonical order used wherever iteration must
/// be deterministic (deck building, setup shuffles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Pink,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    /// Number of pieces in the game.
    pub const COUNT: usize = 7;

    /// All colors in canonical order.
    pub const ALL: [Color; Color::COUNT] = [
        Color::Red,
        Color::Pink,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    /// Lowercase name, as used in configs and on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Pink => "pink",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
        }
    }

    /// Parse a lowercase or uppercase color name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name().to_ascii_uppercase())
    }
}
