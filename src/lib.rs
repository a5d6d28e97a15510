//! # marker-race
//!
//! Turn resolution engine for a hidden-ownership party race. Two to seven
//! participants (one human, the rest computer personalities) each secretly
//! own one of seven colored pieces. Every turn they play a card at once; the
//! lowest number moves a shared marker around a 32-cell track, and the cell
//! it lands on reshuffles the standings. Whoever owns first place when the
//! marker finishes its laps wins.
//!
//! ## Design Principles
//!
//! 1. **One owned session**: all game data lives in `GameState`, owned by
//!    the `TurnOrchestrator`. No ambient state.
//!
//! 2. **Pure rules**: special resolution, movement, batting plans and
//!    pointing verdicts are plain functions over revealed cards, so a turn
//!    is reproducible from its inputs.
//!
//! 3. **Seeded randomness**: one seed, split into named streams, decides
//!    every shuffle and every random computer choice.
//!
//! 4. **Async suspension**: the human's choices are awaited through the
//!    `HumanInput` trait; computers decide synchronously through `Strategy`.
//!
//! ## Modules
//!
//! - `core`: colors, participants, configuration, errors, RNG, history, state
//! - `cards`: card faces and the fixed deck
//! - `zones`: the draw and discard piles
//! - `board`: standings, track map, marker
//! - `policy`: personalities and their decision policies
//! - `rules`: phases, batting, outcome, orchestrator
//! - `interface`: human input and outbound events

pub mod board;
pub mod cards;
pub mod core;
pub mod interface;
pub mod policy;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Color, Controller, GameConfig, GameError, GameRng, GameState, Hand, Participant, ParticipantId,
    ParticipantMap, TurnRecord,
};

pub use crate::cards::{Card, DeckComposition, SpecialEffect};

pub use crate::zones::CardSupply;

pub use crate::board::{Advance, CellEffect, Marker, RankChange, Standings, TrackMap, TRACK_LEN};

pub use crate::policy::{Personality, PersonalityChoice, PolicyView, Strategy};

pub use crate::rules::{
    Contribution, GameSummary, Outcome, SpecialPhase, TurnOrchestrator, TurnPhase, TurnResult,
};

pub use crate::interface::{
    ChannelNotifier, EventLog, GameEvent, HumanChannel, HumanHandle, HumanInput, HumanRequest,
    Notifier, TracingNotifier,
};
