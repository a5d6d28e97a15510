//! The standings board: an ordered ranking of all seven pieces.
//!
//! Index 0 is first place. The board is only ever reordered by
//! remove-then-insert (cell effects) or by swapping two entries (SwapTwo),
//! so it always stays a permutation of the seven colors.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::track::CellEffect;
use crate::core::{Color, GameError};

/// One target's movement during an effect application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankChange {
    pub color: Color,
    pub before: usize,
    pub after: usize,
}

impl RankChange {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }

    /// Human-readable line with 1-based ranks, e.g. `RED: 3 -> 7 (CRUSH)`.
    #[must_use]
    pub fn describe(&self, cause: impl std::fmt::Display) -> String {
        if self.is_noop() {
            format!("{}: no change at {} ({})", self.color, self.before + 1, cause)
        } else {
            format!("{}: {} -> {} ({})", self.color, self.before + 1, self.after + 1, cause)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Standings {
    order: SmallVec<[Color; Color::COUNT]>,
}

impl Default for Standings {
    fn default() -> Self {
        Self {
            order: SmallVec::from_slice(&Color::ALL),
        }
    }
}

impl Standings {
    /// Build a board from an explicit order (first place first).
    ///
    /// The order must be a permutation of all seven colors.
    pub fn from_order(order: impl IntoIterator<Item = Color>) -> Result<Self, GameError> {
        let standings = Self {
            order: order.into_iter().collect(),
        };
        standings.verify()?;
        Ok(standings)
    }

    /// Current order, first place first.
    #[must_use]
    pub fn order(&self) -> &[Color] {
        &self.order
    }

    /// Rank (0 = first) of a color.
    #[must_use]
    pub fn rank_of(&self, color: Color) -> Option<usize> {
        self.order.iter().position(|&c| c == color)
    }

    /// Color at a rank.
    #[must_use]
    pub fn at(&self, rank: usize) -> Option<Color> {
        self.order.get(rank).copied()
    }

    #[must_use]
    pub fn first(&self) -> Color {
        self.order[0]
    }

    #[must_use]
    pub fn last(&self) -> Color {
        self.order[self.last_index()]
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.order.len() - 1
    }

    /// Exchange the positions of two colors.
    pub fn swap(&mut self, a: Color, b: Color) -> Option<(RankChange, RankChange)> {
        let ra = self.rank_of(a)?;
        let rb = self.rank_of(b)?;
        self.order.swap(ra, rb);
        Some((
            RankChange { color: a, before: ra, after: rb },
            RankChange { color: b, before: rb, after: ra },
        ))
    }

    /// Move a color to a new rank, shifting the pieces in between.
    fn relocate(&mut self, from: usize, to: usize) {
        let color = self.order.remove(from);
        self.order.insert(to, color);
    }

    /// Apply a cell effect to a set of targets.
    ///
    /// Targets are processed from the lowest current standing upwards. Each
    /// target's rank is looked up again right before it moves, since an
    /// earlier move in the same batch may have shifted it. Duplicate targets
    /// are applied once.
    pub fn apply_effect(&mut self, effect: CellEffect, targets: &[Color]) -> Vec<RankChange> {
        let mut ordered: SmallVec<[(usize, Color); Color::COUNT]> = targets
            .iter()
            .filter_map(|&c| self.rank_of(c).map(|r| (r, c)))
            .collect();
        ordered.sort_by(|a, b| b.0.cmp(&a.0));
        ordered.dedup_by_key(|(_, c)| *c);

        let mut changes = Vec::with_capacity(ordered.len());
        for (_, color) in ordered {
            let Some(before) = self.rank_of(color) else {
                continue;
            };
            let Some(after) = effect.destination(before, self.last_index()) else {
                continue;
            };
            if before == after {
                debug!(%color, %effect, rank = before + 1, "no change");
            } else {
                self.relocate(before, after);
                debug!(%color, %effect, from = before + 1, to = after + 1, "moved");
            }
            changes.push(RankChange { color, before, after });
        }
        changes
    }

    /// Check the board is a permutation of the seven colors.
    pub fn verify(&self) -> Result<(), GameError> {
        if self.order.len() != Color::COUNT {
            return Err(GameError::Invariant(format!(
                "standings hold {} pieces, expected {}",
                self.order.len(),
                Color::COUNT
            )));
        }
        if let Some(missing) = Color::ALL.into_iter().find(|c| !self.order.contains(c)) {
            return Err(GameError::Invariant(format!("standings lost {}", missing)));
        }
        Ok(())
    }
}

impl std::fmt::Display for Standings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, color) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}.{}", i + 1, color)?;
        }
        Ok(())
    }
}
