//! Turn resolution.
//!
//! - `phase`: special-card phase and movement computation
//! - `batting`: tie splitting and pointing verdicts
//! - `outcome`: who won, and the end-of-game summary
//! - `turn`: the orchestrator that sequences all of it

pub mod batting;
pub mod outcome;
pub mod phase;
pub mod turn;

pub use batting::{judge_pointing, plan_batting, BattingPlan, PointingVerdict};
pub use outcome::{GameSummary, Identity, Outcome};
pub use phase::{movement, special_phase, Contribution, Movement, SpecialPhase};
pub use turn::{TurnOrchestrator, TurnPhase, TurnResult};
