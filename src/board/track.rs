//! The circular track and its cell effects.

use serde::{Deserialize, Serialize};

/// Number of cells in one lap.
pub const TRACK_LEN: usize = 32;

/// What a track cell does to the standings when the marker stops on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellEffect {
    /// Plain cell.
    None,
    Start,
    Goal,
    /// Move each target up n places.
    Up(u8),
    /// Move each target down n places.
    Down(u8),
    /// Send each target to last place.
    Crush,
    /// Send each target to first place.
    Zone,
}

impl CellEffect {
    /// Does landing here change the standings?
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, CellEffect::None | CellEffect::Start | CellEffect::Goal)
    }

    /// Effects that improve a target's standing.
    #[must_use]
    pub fn is_upward(self) -> bool {
        matches!(self, CellEffect::Up(_) | CellEffect::Zone)
    }

    /// Index a piece at `rank` moves to, on a board whose last index is `last`.
    ///
    /// Returns `None` for inactive effects.
    #[must_use]
    pub fn destination(self, rank: usize, last: usize) -> Option<usize> {
        match self {
            CellEffect::Up(n) => Some(rank.saturating_sub(n as usize)),
            CellEffect::Down(n) => Some((rank + n as usize).min(last)),
            CellEffect::Crush => Some(last),
            CellEffect::Zone => Some(0),
            CellEffect::None | CellEffect::Start | CellEffect::Goal => None,
        }
    }
}

impl std::fmt::Display for CellEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellEffect::None => write!(f, "·"),
            CellEffect::Start => write!(f, "START"),
            CellEffect::Goal => write!(f, "GOAL"),
            CellEffect::Up(n) => write!(f, "{}UP", n),
            CellEffect::Down(n) => write!(f, "{}DOWN", n),
            CellEffect::Crush => write!(f, "CRUSH"),
            CellEffect::Zone => write!(f, "ZONE"),
        }
    }
}

const STANDARD_TRACK: [CellEffect; TRACK_LEN] = {
    use CellEffect::{Crush, Down, Goal, None as Plain, Start, Up, Zone};
    [
        Start, Up(1), Down(1), Plain, Crush, Plain, Up(2), Down(2), // 0-7
        Plain, Zone, Plain, Up(1), Down(1), Plain, Up(3), Plain, // 8-15
        Crush, Up(1), Down(2), Plain, Up(1), Zone, Plain, Down(3), // 16-23
        Plain, Up(2), Plain, Crush, Plain, Crush, Zone, Goal, // 24-31
    ]
};

/// Fixed lookup from cell index to effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackMap {
    cells: [CellEffect; TRACK_LEN],
}

impl Default for TrackMap {
    fn default() -> Self {
        Self::standard()
    }
}

impl TrackMap {
    /// The standard track.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            cells: STANDARD_TRACK,
        }
    }

    /// Effect of a cell. Indices wrap around the lap.
    #[must_use]
    pub fn effect(&self, cell: usize) -> CellEffect {
        self.cells[cell % TRACK_LEN]
    }

    #[must_use]
    pub fn cells(&self) -> &[CellEffect; TRACK_LEN] {
        &self.cells
    }
}
