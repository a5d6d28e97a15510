//! Error type for the turn engine.
//!
//! Conditions the rules recover from (supply exhaustion, degenerate swap
//! pairs, targets already carried along by an earlier move) never surface
//! here. What does surface is either a rejected setup, a misuse of the
//! orchestrator, a vanished input collaborator, a session left behind by a
//! turn that broke off, or a broken invariant.

use thiserror::Error;

use super::player::ParticipantId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("the game has already ended")]
    GameOver,

    #[error("no participant {0}")]
    UnknownParticipant(ParticipantId),

    #[error("human input channel closed while a turn was waiting on it")]
    InputClosed,

    #[error("turn {0} broke off mid-resolution; the session cannot continue")]
    TurnAborted(u32),

    #[error("internal invariant violated: {0}")]
    Invariant(String),
}
