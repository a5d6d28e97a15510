//! Shared fixtures: a scripted human and position staging.
#![allow(dead_code)]

use std::collections::VecDeque;

use marker_race::core::GameError;
use marker_race::{
    Card, CellEffect, Color, GameConfig, HumanInput, Marker, Personality, ParticipantId, Standings,
    TurnOrchestrator,
};

/// Answers from queues; falls back to the first card, first place, and
/// first-against-last when a queue runs dry.
#[derive(Debug, Default)]
pub struct ScriptedHuman {
    pub cards: VecDeque<usize>,
    pub targets: VecDeque<Color>,
    pub swaps: VecDeque<(Color, Color)>,
    pub card_requests: usize,
    pub target_requests: Vec<CellEffect>,
    pub swap_requests: usize,
    /// Target and swap requests fail as if the input went away.
    pub closed_after_cards: bool,
}

impl ScriptedHuman {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(mut self, cards: impl IntoIterator<Item = usize>) -> Self {
        self.cards.extend(cards);
        self
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Color>) -> Self {
        self.targets.extend(targets);
        self
    }

    pub fn closing_after_cards(mut self) -> Self {
        self.closed_after_cards = true;
        self
    }

    pub fn with_swap(mut self, a: Color, b: Color) -> Self {
        self.swaps.push_back((a, b));
        self
    }
}

#[async_trait::async_trait]
impl HumanInput for ScriptedHuman {
    async fn request_card(&mut self, _hand: &[Card]) -> Result<usize, GameError> {
        self.card_requests += 1;
        Ok(self.cards.pop_front().unwrap_or(0))
    }

    async fn request_target(&mut self, effect: CellEffect, standings: &Standings) -> Result<Color, GameError> {
        self.target_requests.push(effect);
        if self.closed_after_cards {
            return Err(GameError::InputClosed);
        }
        Ok(self.targets.pop_front().unwrap_or_else(|| standings.first()))
    }

    async fn request_swap_pair(&mut self, standings: &Standings) -> Result<(Color, Color), GameError> {
        self.swap_requests += 1;
        if self.closed_after_cards {
            return Err(GameError::InputClosed);
        }
        Ok(self
            .swaps
            .pop_front()
            .unwrap_or_else(|| (standings.first(), standings.last())))
    }
}

/// Red first, Purple last.
pub fn canonical_standings() -> Standings {
    Standings::from_order(Color::ALL).unwrap()
}

/// A game with the given computer personalities, staged with exact colors,
/// one-card hands, canonical standings, and the marker at `(lap, cell)`.
///
/// One-card hands make every computer's choice forced.
pub fn staged(
    personalities: &[Personality],
    colors: &[Color],
    hands: &[Card],
    lap: u32,
    cell: usize,
) -> TurnOrchestrator {
    let mut config = GameConfig::new(personalities.len() + 1).with_seed(99);
    for &p in personalities {
        config = config.with_personality(p);
    }
    let mut game = TurnOrchestrator::new(config).unwrap();
    let state = game.state_mut();

    let ids: Vec<ParticipantId> = state.participants().ids().collect();
    for &id in &ids {
        state.set_hand(id, &[]).unwrap();
    }
    for (&id, &card) in ids.iter().zip(hands) {
        state.set_hand(id, &[card]).unwrap();
    }
    state.assign_colors(colors).unwrap();
    state.set_standings(canonical_standings());
    state.set_marker(Marker::at(lap, cell, state.config().laps_to_win));
    state.check_invariants().unwrap();
    game
}
