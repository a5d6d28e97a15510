//! The shared marker and its lap counting.
//!
//! Position is a single absolute distance; lap and cell are derived from it.
//! The marker advances one cell at a time. Reaching the goal threshold
//! (`laps_to_win * 32 - 1`, the GOAL cell of the final lap) pins the marker
//! on a terminal sentinel and stops the advance.

use serde::{Deserialize, Serialize};

use super::track::TRACK_LEN;

/// Result of an advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    Continue,
    GoalReached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    absolute: u32,
    laps_to_win: u32,
    finished: bool,
}

impl Marker {
    /// A marker on the START cell of lap 1.
    #[must_use]
    pub fn new(laps_to_win: u32) -> Self {
        Self {
            absolute: 0,
            laps_to_win,
            finished: false,
        }
    }

    /// A marker placed at `lap` (1-based) and `cell` (0-based).
    #[must_use]
    pub fn at(lap: u32, cell: usize, laps_to_win: u32) -> Self {
        Self {
            absolute: (lap.max(1) - 1) * TRACK_LEN as u32 + (cell % TRACK_LEN) as u32,
            laps_to_win,
            finished: false,
        }
    }

    /// Absolute distance the goal is detected at.
    #[must_use]
    pub fn goal_threshold(&self) -> u32 {
        self.laps_to_win * TRACK_LEN as u32 - 1
    }

    /// Current lap (1-based). After the goal this is `laps_to_win + 1`.
    #[must_use]
    pub fn lap(&self) -> u32 {
        if self.finished {
            self.laps_to_win + 1
        } else {
            self.absolute / TRACK_LEN as u32 + 1
        }
    }

    /// Current cell (0-based). After the goal this is the GOAL cell.
    #[must_use]
    pub fn cell(&self) -> usize {
        if self.finished {
            TRACK_LEN - 1
        } else {
            self.absolute as usize % TRACK_LEN
        }
    }

    /// Distance travelled since the start.
    #[must_use]
    pub fn absolute(&self) -> u32 {
        self.absolute
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `amount` cells, calling `on_step(lap, cell)` after each
    /// step that does not reach the goal.
    pub fn advance_with(&mut self, amount: u32, mut on_step: impl FnMut(u32, usize)) -> Advance {
        if self.finished {
            return Advance::GoalReached;
        }
        for _ in 0..amount {
            self.absolute += 1;
            if self.absolute >= self.goal_threshold() {
                self.finished = true;
                return Advance::GoalReached;
            }
            on_step(self.lap(), self.cell());
        }
        Advance::Continue
    }

    /// Advance by `amount` cells.
    pub fn advance(&mut self, amount: u32) -> Advance {
        self.advance_with(amount, |_, _| {})
    }
}
