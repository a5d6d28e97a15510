//! Turn Orchestrator: the state machine that plays one turn at a time.
//!
//! ## Phases
//!
//! ```text
//! AwaitingSelection -> Resolving -> AwaitingSelection
//!                               \-> GameOver
//! ```
//!
//! - **AwaitingSelection**: every participant with cards contributes one.
//!   The human's card arrives through `HumanInput`; computers ask their
//!   personality's `Strategy`.
//! - **Resolving**: cards are revealed and discarded, then Phase A
//!   (specials), Phase B (movement), batting if tied, and cell effects.
//!   Hands are replenished unless the marker reached the goal.
//!
//! The orchestrator owns the `GameState`. While a human request is
//! outstanding nothing else touches it, and every turn ends with an
//! invariant check.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::batting::{judge_pointing, plan_batting, PointingVerdict};
use super::outcome::GameSummary;
use super::phase::{movement, special_phase, Contribution, SpecialPhase};
use crate::board::{Advance, CellEffect};
use crate::cards::Card;
use crate::core::{Color, Controller, GameConfig, GameError, GameState, ParticipantId, TurnRecord};
use crate::interface::{GameEvent, HumanInput, Notifier};
use crate::policy::resolve_swap_pair;

/// Where the state machine is between calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingSelection,
    Resolving,
    GameOver,
}

/// What a played turn led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnResult {
    Continue(TurnRecord),
    Finished(GameSummary),
}

#[derive(Debug)]
pub struct TurnOrchestrator {
    state: GameState,
    phase: TurnPhase,
    pacing: Duration,
}

impl TurnOrchestrator {
    /// Set up a new game.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self::from_state(GameState::new(config)?))
    }

    /// Drive an existing session.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        let pacing = Duration::from_millis(state.config().pacing_ms);
        let phase = if state.is_finished() {
            TurnPhase::GameOver
        } else {
            TurnPhase::AwaitingSelection
        };
        Self { state, phase, pacing }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for staging a position between turns.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The final summary, once the game is over.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        (self.phase == TurnPhase::GameOver).then(|| GameSummary::from_state(&self.state))
    }

    /// Play turns until the game ends.
    pub async fn run<H, N>(&mut self, human: &mut H, notifier: &mut N) -> Result<GameSummary, GameError>
    where
        H: HumanInput + ?Sized,
        N: Notifier + ?Sized,
    {
        loop {
            if let TurnResult::Finished(summary) = self.play_turn(human, notifier).await? {
                return Ok(summary);
            }
        }
    }

    /// Play one full turn.
    pub async fn play_turn<H, N>(&mut self, human: &mut H, notifier: &mut N) -> Result<TurnResult, GameError>
    where
        H: HumanInput + ?Sized,
        N: Notifier + ?Sized,
    {
        match self.phase {
            TurnPhase::GameOver => return Err(GameError::GameOver),
            TurnPhase::Resolving => return Err(GameError::TurnAborted(self.state.turn())),
            TurnPhase::AwaitingSelection => {}
        }

        self.phase = TurnPhase::AwaitingSelection;
        notifier.notify(GameEvent::TurnStarted {
            turn: self.state.turn() + 1,
        });
        let contributions = self.collect_cards(human).await?;

        self.phase = TurnPhase::Resolving;
        let turn = self.state.begin_turn();
        for c in &contributions {
            self.state.discard(c.card);
        }
        notifier.notify(GameEvent::CardsRevealed {
            turn,
            cards: contributions.clone(),
        });
        let mut record = TurnRecord {
            turn,
            ..TurnRecord::default()
        };

        // Phase A
        let special = special_phase(&contributions);
        info!(turn, %special, "special phase");
        notifier.notify(GameEvent::SpecialResolved { phase: special });
        let multiplier = match special {
            SpecialPhase::Swap { owner } => {
                self.resolve_swap(owner, &mut record, human, notifier).await?;
                return self.end_turn(record, notifier);
            }
            SpecialPhase::Reshuffle { owner } => {
                let changes = self.state.reshuffle_ownership();
                record
                    .effects
                    .push(format!("{} reshuffled ownership", owner));
                notifier.notify(GameEvent::OwnershipReshuffled {
                    changed: changes.len(),
                });
                return self.end_turn(record, notifier);
            }
            other => other.multiplier().unwrap_or(1),
        };

        // Phase B
        let Some(movement) = movement(&contributions, multiplier) else {
            info!(turn, "no number cards, marker stays");
            return self.end_turn(record, notifier);
        };
        record.min_value = Some(movement.min_value);
        record.movers = movement.movers.iter().map(|c| c.participant).collect();
        record.batting = movement.is_batting();
        info!(
            turn,
            min = movement.min_value,
            movers = movement.movers.len(),
            distance = movement.distance,
            "movement"
        );

        if self.advance_marker(movement.distance, notifier).await == Advance::GoalReached {
            return self.finish(record, notifier);
        }

        let effect = self.state.track().effect(self.state.marker().cell());
        if effect.is_active() {
            match movement.movers.as_slice() {
                [mover] => {
                    let target = match mover.card.bound_color() {
                        Some(color) => color,
                        None => self.choose_target(mover.participant, effect, human).await?,
                    };
                    self.apply(effect, &[target], &mut record, notifier);
                }
                movers => {
                    self.resolve_batting(effect, movers, &mut record, human, notifier)
                        .await?;
                }
            }
        } else {
            debug!(%effect, "inactive cell");
        }
        self.end_turn(record, notifier)
    }

    // === Selection ===

    async fn collect_cards<H>(&mut self, human: &mut H) -> Result<Vec<Contribution>, GameError>
    where
        H: HumanInput + ?Sized,
    {
        let ids: Vec<ParticipantId> = self.state.participants().ids().collect();
        let mut contributions = Vec::with_capacity(ids.len());
        for id in ids {
            let participant = self.state.participant(id)?;
            if participant.hand.is_empty() {
                warn!(participant = %id, "empty hand, sitting this turn out");
                continue;
            }
            let controller = participant.controller;
            let card = match controller {
                Controller::Human => self.human_card(id, human).await?,
                Controller::Computer(personality) => {
                    self.pace().await;
                    let index = self
                        .state
                        .decide(id, |view, rng| personality.strategy().choose_card(view, rng))?;
                    self.computer_card(id, index)?
                }
            };
            debug!(participant = %id, %card, "card chosen");
            contributions.push(Contribution::new(id, card));
        }
        Ok(contributions)
    }

    /// Ask until the human names a card that exists.
    async fn human_card<H>(&mut self, id: ParticipantId, human: &mut H) -> Result<Card, GameError>
    where
        H: HumanInput + ?Sized,
    {
        loop {
            let hand = self.state.participant(id)?.hand.clone();
            let index = human.request_card(&hand).await?;
            if let Some(card) = self.state.take_card(id, index)? {
                return Ok(card);
            }
            warn!(index, hand = hand.len(), "card index out of range, asking again");
        }
    }

    fn computer_card(&mut self, id: ParticipantId, index: usize) -> Result<Card, GameError> {
        if let Some(card) = self.state.take_card(id, index)? {
            return Ok(card);
        }
        warn!(participant = %id, index, "policy chose a missing card, playing the first");
        self.state
            .take_card(id, 0)?
            .ok_or_else(|| GameError::Invariant(format!("{} has no card to play", id)))
    }

    async fn choose_target<H>(&mut self, id: ParticipantId, effect: CellEffect, human: &mut H) -> Result<Color, GameError>
    where
        H: HumanInput + ?Sized,
    {
        let controller = self.state.participant(id)?.controller;
        let color = match controller {
            Controller::Human => human.request_target(effect, self.state.standings()).await?,
            Controller::Computer(personality) => {
                self.pace().await;
                self.state
                    .decide(id, |view, rng| personality.strategy().choose_target(view, effect, rng))?
            }
        };
        debug!(participant = %id, %effect, target = %color, "target chosen");
        Ok(color)
    }

    // === Resolution ===

    async fn resolve_swap<H, N>(
        &mut self,
        owner: ParticipantId,
        record: &mut TurnRecord,
        human: &mut H,
        notifier: &mut N,
    ) -> Result<(), GameError>
    where
        H: HumanInput + ?Sized,
        N: Notifier + ?Sized,
    {
        let controller = self.state.participant(owner)?.controller;
        let pair = match controller {
            Controller::Human => human.request_swap_pair(self.state.standings()).await?,
            Controller::Computer(personality) => {
                self.pace().await;
                self.state
                    .decide(owner, |view, rng| personality.strategy().choose_swap_pair(view, rng))?
            }
        };
        let (a, b) = resolve_swap_pair(pair, self.state.standings());
        let (first, second) = self
            .state
            .standings_mut()
            .swap(a, b)
            .ok_or_else(|| GameError::Invariant(format!("cannot swap {} and {}", a, b)))?;
        info!(participant = %owner, %a, %b, "pieces swapped");
        record.effects.push(first.describe("SWAP"));
        record.effects.push(second.describe("SWAP"));
        notifier.notify(GameEvent::PiecesSwapped { first, second });
        Ok(())
    }

    async fn resolve_batting<H, N>(
        &mut self,
        effect: CellEffect,
        movers: &[Contribution],
        record: &mut TurnRecord,
        human: &mut H,
        notifier: &mut N,
    ) -> Result<(), GameError>
    where
        H: HumanInput + ?Sized,
        N: Notifier + ?Sized,
    {
        let plan = plan_batting(movers);
        if !plan.direct.is_empty() {
            info!(targets = ?plan.direct, "clean plus-twos hit directly");
            self.apply(effect, &plan.direct, record, notifier);
        }

        let mut points = Vec::with_capacity(plan.pointing.len());
        for c in &plan.pointing {
            let color = self.choose_target(c.participant, effect, human).await?;
            points.push((c.participant, color));
        }

        match judge_pointing(&points) {
            None => {}
            Some(PointingVerdict::Diverged { targets }) => {
                info!(?targets, "pointing diverged");
                self.apply(effect, &targets, record, notifier);
            }
            Some(PointingVerdict::Unanimous { pointed, penalized }) => {
                info!(%pointed, pointers = penalized.len(), "unanimous pointing, pointers pay");
                let mut owned: Vec<Color> = Vec::with_capacity(penalized.len());
                for id in penalized {
                    let color = self.state.participant(id)?.color;
                    if self.state.reveal(id)? {
                        record.effects.push(format!("{} revealed as {}", id, color));
                        notifier.notify(GameEvent::IdentityRevealed { participant: id, color });
                    }
                    if !owned.contains(&color) {
                        owned.push(color);
                    }
                }
                self.apply(effect, &owned, record, notifier);
            }
        }
        Ok(())
    }

    fn apply<N>(&mut self, effect: CellEffect, targets: &[Color], record: &mut TurnRecord, notifier: &mut N)
    where
        N: Notifier + ?Sized,
    {
        for change in self.state.standings_mut().apply_effect(effect, targets) {
            record.effects.push(change.describe(effect));
            notifier.notify(GameEvent::CellEffectApplied { effect, change });
        }
    }

    async fn advance_marker<N>(&mut self, distance: u32, notifier: &mut N) -> Advance
    where
        N: Notifier + ?Sized,
    {
        let mut steps = Vec::with_capacity(distance as usize);
        let result = self
            .state
            .marker_mut()
            .advance_with(distance, |lap, cell| steps.push((lap, cell)));
        for (lap, cell) in steps {
            let effect = self.state.track().effect(cell);
            debug!(lap, cell, %effect, "marker step");
            notifier.notify(GameEvent::MarkerMoved { lap, cell, effect });
            self.pace().await;
        }
        let marker = self.state.marker();
        if result == Advance::GoalReached {
            notifier.notify(GameEvent::MarkerMoved {
                lap: marker.lap(),
                cell: marker.cell(),
                effect: CellEffect::Goal,
            });
        }
        info!(lap = marker.lap(), cell = marker.cell(), ?result, "marker advanced");
        result
    }

    async fn pace(&self) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
    }

    // === Turn end ===

    fn end_turn<N>(&mut self, record: TurnRecord, notifier: &mut N) -> Result<TurnResult, GameError>
    where
        N: Notifier + ?Sized,
    {
        self.state.replenish();
        self.state.record_turn(record.clone());
        self.state.check_invariants()?;
        info!(turn = record.turn, standings = %self.state.standings(), "turn ended");
        notifier.notify(GameEvent::TurnEnded {
            record: record.clone(),
        });
        self.phase = TurnPhase::AwaitingSelection;
        Ok(TurnResult::Continue(record))
    }

    fn finish<N>(&mut self, record: TurnRecord, notifier: &mut N) -> Result<TurnResult, GameError>
    where
        N: Notifier + ?Sized,
    {
        self.state.record_turn(record.clone());
        self.phase = TurnPhase::GameOver;
        self.state.check_invariants()?;
        notifier.notify(GameEvent::TurnEnded { record });

        let summary = GameSummary::from_state(&self.state);
        info!(winner = %summary.winner, outcome = %summary.outcome, turns = summary.turns, "game over");
        notifier.notify(GameEvent::GameEnded {
            summary: summary.clone(),
        });
        Ok(TurnResult::Finished(summary))
    }
}
