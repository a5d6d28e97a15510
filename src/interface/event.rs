//! Outbound notifications. Fire-and-forget: nothing waits on a reply.

use serde::{Deserialize, Serialize};

use crate::board::{CellEffect, RankChange};
use crate::core::{Color, ParticipantId, TurnRecord};
use crate::rules::{Contribution, GameSummary, SpecialPhase};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    TurnStarted {
        turn: u32,
    },
    /// Everyone's card for the turn, face up.
    CardsRevealed {
        turn: u32,
        cards: Vec<Contribution>,
    },
    SpecialResolved {
        phase: SpecialPhase,
    },
    /// SwapTwo exchanged two pieces.
    PiecesSwapped {
        first: RankChange,
        second: RankChange,
    },
    /// Only the number of changed owners is public.
    OwnershipReshuffled {
        changed: usize,
    },
    /// One marker step.
    MarkerMoved {
        lap: u32,
        cell: usize,
        effect: CellEffect,
    },
    CellEffectApplied {
        effect: CellEffect,
        change: RankChange,
    },
    IdentityRevealed {
        participant: ParticipantId,
        color: Color,
    },
    TurnEnded {
        record: TurnRecord,
    },
    GameEnded {
        summary: GameSummary,
    },
}

impl GameEvent {
    /// Short name, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::TurnStarted { .. } => "turn_started",
            GameEvent::CardsRevealed { .. } => "cards_revealed",
            GameEvent::SpecialResolved { .. } => "special_resolved",
            GameEvent::PiecesSwapped { .. } => "pieces_swapped",
            GameEvent::OwnershipReshuffled { .. } => "ownership_reshuffled",
            GameEvent::MarkerMoved { .. } => "marker_moved",
            GameEvent::CellEffectApplied { .. } => "cell_effect_applied",
            GameEvent::IdentityRevealed { .. } => "identity_revealed",
            GameEvent::TurnEnded { .. } => "turn_ended",
            GameEvent::GameEnded { .. } => "game_ended",
        }
    }
}
