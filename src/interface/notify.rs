//! Notification sinks.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::event::GameEvent;

/// Receives every outbound event. Must not block.
pub trait Notifier: Send {
    fn notify(&mut self, event: GameEvent);
}

/// Discards everything.
impl Notifier for () {
    fn notify(&mut self, _event: GameEvent) {}
}

/// Records events in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Events whose `kind()` matches.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a GameEvent> {
        self.events.iter().filter(move |e| e.kind() == kind)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Notifier for EventLog {
    fn notify(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Renders events as log lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, event: GameEvent) {
        match &event {
            GameEvent::TurnStarted { turn } => info!(turn, "turn started"),
            GameEvent::CardsRevealed { turn, cards } => {
                for c in cards {
                    info!(turn, participant = %c.participant, card = %c.card, "revealed");
                }
            }
            GameEvent::SpecialResolved { phase } => info!(%phase, "specials"),
            GameEvent::PiecesSwapped { first, second } => {
                info!(a = %first.color, b = %second.color, "pieces swapped")
            }
            GameEvent::OwnershipReshuffled { changed } => info!(changed, "ownership reshuffled"),
            GameEvent::MarkerMoved { lap, cell, effect } => debug!(lap, cell, %effect, "marker step"),
            GameEvent::CellEffectApplied { effect, change } => info!("{}", change.describe(effect)),
            GameEvent::IdentityRevealed { participant, color } => {
                info!(%participant, %color, "identity revealed")
            }
            GameEvent::TurnEnded { record } => info!(
                turn = record.turn,
                min = ?record.min_value,
                batting = record.batting,
                "turn ended"
            ),
            GameEvent::GameEnded { summary } => {
                info!(winner = %summary.winner, outcome = %summary.outcome, turns = summary.turns, "game over")
            }
        }
    }
}

/// Forwards events to an unbounded channel. A closed receiver is ignored.
#[derive(Clone, Debug)]
pub struct ChannelNotifier {
    tx: UnboundedSender<GameEvent>,
}

impl ChannelNotifier {
    #[must_use]
    pub fn new(tx: UnboundedSender<GameEvent>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&mut self, event: GameEvent) {
        let _ = self.tx.send(event);
    }
}
