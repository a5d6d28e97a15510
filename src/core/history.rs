//! Game history: recent turn summaries, rank snapshots and ownership changes.
//!
//! Uses `im` persistent vectors so snapshots of a session (for reporting or
//! for a front end) share structure instead of copying the logs.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::player::ParticipantId;

/// How many turn summaries the recent log keeps.
pub const RECENT_TURNS: usize = 3;

/// Summary of one resolved turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    /// Lowest movement value played, if any number card was played.
    pub min_value: Option<u8>,
    /// Participants who played the lowest value.
    pub movers: Vec<ParticipantId>,
    pub batting: bool,
    /// Lines such as `RED: 3 -> 7 (CRUSH)`.
    pub effects: Vec<String>,
}

/// Standings after a turn. Turn 0 is the starting order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankSnapshot {
    pub turn: u32,
    pub order: Vec<Color>,
}

impl RankSnapshot {
    /// 1-based rank of a color in this snapshot.
    #[must_use]
    pub fn rank_of(&self, color: Color) -> Option<usize> {
        self.order.iter().position(|&c| c == color).map(|r| r + 1)
    }
}

/// A participant's owned color changed through ReshuffleOwnership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipChange {
    pub turn: u32,
    pub participant: ParticipantId,
    pub old: Color,
    pub new: Color,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    recent: Vector<TurnRecord>,
    ranks: Vector<RankSnapshot>,
    ownership_changes: Vector<OwnershipChange>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished turn, dropping the oldest summary past the cap.
    pub fn push_turn(&mut self, record: TurnRecord) {
        self.recent.push_front(record);
        // im's truncate panics past the end
        if self.recent.len() > RECENT_TURNS {
            self.recent.truncate(RECENT_TURNS);
        }
    }

    pub fn push_ranks(&mut self, turn: u32, order: &[Color]) {
        self.ranks.push_back(RankSnapshot {
            turn,
            order: order.to_vec(),
        });
    }

    pub fn push_ownership_change(&mut self, change: OwnershipChange) {
        self.ownership_changes.push_back(change);
    }

    /// Most recent turns, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &TurnRecord> {
        self.recent.iter()
    }

    #[must_use]
    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.recent.front()
    }

    #[must_use]
    pub fn ranks(&self) -> &Vector<RankSnapshot> {
        &self.ranks
    }

    #[must_use]
    pub fn ownership_changes(&self) -> &Vector<OwnershipChange> {
        &self.ownership_changes
    }
}
