//! Seams to the surrounding application.
//!
//! - `HumanInput`: where a turn suspends for the human's card, target or
//!   swap pair
//! - `Notifier`: outbound `GameEvent`s

mod event;
mod human;
mod notify;

pub use event::GameEvent;
pub use human::{HumanChannel, HumanHandle, HumanInput, HumanRequest};
pub use notify::{ChannelNotifier, EventLog, Notifier, TracingNotifier};
