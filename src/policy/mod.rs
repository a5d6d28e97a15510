//! Computer decision policies.
//!
//! Each personality maps to one `Strategy` implementation. Human
//! participants have no strategy: their choices arrive through
//! `interface::HumanInput`.

mod personality;
mod strategies;

pub use personality::{Personality, PersonalityChoice};
pub use strategies::{
    resolve_swap_pair, Attacker, Bluffer, Chaos, Logic, Opportunist, PolicyView, Safe, Strategy,
};
