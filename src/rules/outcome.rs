//! Game outcome and end-of-game summary.

use serde::{Deserialize, Serialize};

use crate::core::{Color, Controller, GameState, OwnershipChange, ParticipantId, RankSnapshot};

/// Who the first-place piece belongs to when the game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    HumanWins,
    ComputerWins(ParticipantId),
    /// A neutral piece finished first: everyone loses.
    NeutralWins(Color),
}

impl Outcome {
    /// Decide the outcome from the current first place.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        let winner = state.standings().first();
        match state.owner_of(winner) {
            Some(id) if id.is_human() => Outcome::HumanWins,
            Some(id) => Outcome::ComputerWins(id),
            None => Outcome::NeutralWins(winner),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::HumanWins => write!(f, "you win"),
            Outcome::ComputerWins(id) => write!(f, "{} wins", id),
            Outcome::NeutralWins(color) => write!(f, "{} is neutral, everyone loses", color),
        }
    }
}

/// A participant's identity, revealed at the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub participant: ParticipantId,
    pub controller: Controller,
    pub color: Color,
    /// Whether the identity had been revealed during play.
    pub revealed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub winner: Color,
    pub outcome: Outcome,
    pub turns: u32,
    pub identities: Vec<Identity>,
    pub final_standings: Vec<Color>,
    pub rank_history: Vec<RankSnapshot>,
    pub ownership_changes: Vec<OwnershipChange>,
}

impl GameSummary {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            winner: state.standings().first(),
            outcome: Outcome::of(state),
            turns: state.turn(),
            identities: state
                .participants()
                .values()
                .map(|p| Identity {
                    participant: p.id,
                    controller: p.controller,
                    color: p.color,
                    revealed: p.revealed,
                })
                .collect(),
            final_standings: state.standings().order().to_vec(),
            rank_history: state.history().ranks().iter().cloned().collect(),
            ownership_changes: state.history().ownership_changes().iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Standings;
    use crate::core::GameConfig;
    use Color::*;

    fn staged(first: Color) -> GameState {
        let mut state = GameState::new(GameConfig::new(3).with_seed(11)).unwrap();
        state.assign_colors(&[Red, Blue, Green]).unwrap();
        let rest = Color::ALL.into_iter().filter(|&c| c != first);
        state.set_standings(Standings::from_order(std::iter::once(first).chain(rest)).unwrap());
        state
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(Outcome::of(&staged(Red)), Outcome::HumanWins);
        assert_eq!(Outcome::of(&staged(Green)), Outcome::ComputerWins(ParticipantId::new(2)));
        assert_eq!(Outcome::of(&staged(Purple)), Outcome::NeutralWins(Purple));
    }

    #[test]
    fn test_summary_lists_everyone() {
        let summary = GameSummary::from_state(&staged(Blue));
        assert_eq!(summary.winner, Blue);
        assert_eq!(summary.identities.len(), 3);
        assert_eq!(summary.identities[1].color, Blue);
        assert_eq!(summary.final_standings[0], Blue);
        assert_eq!(summary.rank_history.len(), 1);
        assert_eq!(summary.outcome.to_string(), "COM 1 wins");
    }
}
