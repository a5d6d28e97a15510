//! Core types: colors, participants, configuration, errors, RNG, history
//! and the owned game session.

pub mod color;
pub mod config;
pub mod error;
pub mod history;
pub mod participant;
pub mod player;
pub mod rng;
pub mod state;

pub use color::Color;
pub use config::{GameConfig, DEFAULT_HAND_SIZE, DEFAULT_LAPS_TO_WIN, MAX_PARTICIPANTS, MIN_PARTICIPANTS};
pub use error::GameError;
pub use history::{History, OwnershipChange, RankSnapshot, TurnRecord, RECENT_TURNS};
pub use participant::{Controller, Hand, Participant};
pub use player::{ParticipantId, ParticipantMap};
pub use rng::GameRng;
pub use state::{GameState, Neutral};
