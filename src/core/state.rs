//! The game session: everything one game owns.
//!
//! ## Setup
//!
//! Participant 0 is the human, the rest are computers. Each participant
//! takes one color from a shuffled copy of the seven colors; what remains is
//! neutral. The standings start as an independent shuffle. The deck is the
//! standard 55 cards, shuffled, and everyone is dealt a full hand.
//!
//! ## Randomness
//!
//! The seed is split into context streams:
//! - `"setup"`: color deal, standings order, RANDOM personality resolution
//! - `"deck"`: deck shuffle and discard recycling
//! - `"ownership"`: ReshuffleOwnership
//! - `"policy"`: computer decisions that involve chance
//!
//! ## Invariants
//!
//! `check_invariants` verifies deck conservation, the standings permutation
//! and the ownership partition. The orchestrator calls it after every turn.

use smallvec::SmallVec;
use tracing::{debug, info};

use super::color::Color;
use super::config::GameConfig;
use super::error::GameError;
use super::history::{History, OwnershipChange, TurnRecord};
use super::participant::{Controller, Participant};
use super::player::{ParticipantId, ParticipantMap};
use super::rng::GameRng;
use crate::board::{Marker, Standings, TrackMap};
use crate::cards::{census, Card, DeckComposition};
use crate::policy::PolicyView;
use crate::zones::CardSupply;

/// Colors nobody owns.
pub type Neutral = SmallVec<[Color; Color::COUNT]>;

#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    participants: ParticipantMap<Participant>,
    neutral: Neutral,
    standings: Standings,
    supply: CardSupply,
    marker: Marker,
    track: TrackMap,
    /// Turns started so far; the first turn is 1.
    turn: u32,
    history: History,
    deck_rng: GameRng,
    ownership_rng: GameRng,
    policy_rng: GameRng,
}

impl GameState {
    /// Set up a new game.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let root = GameRng::new(config.seed);
        let mut setup_rng = root.for_context("setup");
        let mut deck_rng = root.for_context("deck");

        let mut colors = Color::ALL;
        setup_rng.shuffle(&mut colors);
        let mut pool: Vec<Color> = colors.to_vec();

        let participants = ParticipantMap::new(config.participant_count, |id| {
            let color = pool.pop().unwrap_or(Color::Red);
            let controller = if id.is_human() {
                Controller::Human
            } else {
                Controller::Computer(config.choice_for(id.index()).resolve(&mut setup_rng))
            };
            Participant::new(id, color, controller)
        });
        let mut neutral: Neutral = pool.into_iter().collect();
        neutral.sort();

        let mut order = Color::ALL;
        setup_rng.shuffle(&mut order);
        let standings = Standings::from_order(order)?;

        let supply = CardSupply::new(DeckComposition::standard().build(), &mut deck_rng);

        let mut state = Self {
            marker: Marker::new(config.laps_to_win),
            track: TrackMap::standard(),
            participants,
            neutral,
            standings,
            supply,
            turn: 0,
            history: History::new(),
            deck_rng,
            ownership_rng: root.for_context("ownership"),
            policy_rng: root.for_context("policy"),
            config,
        };
        state.replenish();
        state.history.push_ranks(0, state.standings.order());

        for p in state.participants.values() {
            debug!(participant = %p.id, color = %p.color, controller = %p.controller, "seated");
        }
        info!(
            participants = state.participants.len(),
            seed = state.config.seed,
            standings = %state.standings,
            "game set up"
        );
        Ok(state)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn participants(&self) -> &ParticipantMap<Participant> {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Result<&Participant, GameError> {
        self.participants.get(id).ok_or(GameError::UnknownParticipant(id))
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> Result<&mut Participant, GameError> {
        self.participants
            .get_mut(id)
            .ok_or(GameError::UnknownParticipant(id))
    }

    #[must_use]
    pub fn human(&self) -> &Participant {
        &self.participants[ParticipantId::HUMAN]
    }

    /// Colors owned by nobody, in canonical order.
    #[must_use]
    pub fn neutral(&self) -> &[Color] {
        &self.neutral
    }

    #[must_use]
    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn standings_mut(&mut self) -> &mut Standings {
        &mut self.standings
    }

    #[must_use]
    pub fn supply(&self) -> &CardSupply {
        &self.supply
    }

    #[must_use]
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn marker_mut(&mut self) -> &mut Marker {
        &mut self.marker
    }

    #[must_use]
    pub fn track(&self) -> &TrackMap {
        &self.track
    }

    /// Number of the current (or last started) turn.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.marker.is_finished()
    }

    /// Who owns `color`, if anyone.
    #[must_use]
    pub fn owner_of(&self, color: Color) -> Option<ParticipantId> {
        self.participants
            .iter()
            .find(|(_, p)| p.color == color)
            .map(|(id, _)| id)
    }

    // === Turn bookkeeping ===

    /// Start a new turn and return its number.
    pub fn begin_turn(&mut self) -> u32 {
        self.turn += 1;
        self.turn
    }

    /// Record a finished turn along with the standings it left behind.
    pub fn record_turn(&mut self, record: TurnRecord) {
        self.history.push_turn(record);
        self.history.push_ranks(self.turn, self.standings.order());
    }

    /// Run a computer decision against the participant's view of the game.
    pub fn decide<R>(
        &mut self,
        id: ParticipantId,
        f: impl FnOnce(&PolicyView<'_>, &mut GameRng) -> R,
    ) -> Result<R, GameError> {
        let participant = self
            .participants
            .get(id)
            .ok_or(GameError::UnknownParticipant(id))?;
        let view = PolicyView {
            hand: &participant.hand,
            own_color: participant.color,
            standings: &self.standings,
            neutral: &self.neutral,
        };
        Ok(f(&view, &mut self.policy_rng))
    }

    /// Remove the card at `index` from a participant's hand.
    pub fn take_card(&mut self, id: ParticipantId, index: usize) -> Result<Option<Card>, GameError> {
        Ok(self.participant_mut(id)?.take_card(index))
    }

    pub fn discard(&mut self, card: Card) {
        self.supply.discard(card);
    }

    /// Reveal a participant's color. Returns true if it was hidden.
    pub fn reveal(&mut self, id: ParticipantId) -> Result<bool, GameError> {
        Ok(self.participant_mut(id)?.reveal())
    }

    /// Top every hand back up to the configured hand size.
    pub fn replenish(&mut self) {
        let target = self.config.hand_size;
        for (id, participant) in self.participants.iter_mut() {
            let missing = target.saturating_sub(participant.hand.len());
            if missing > 0 {
                let drawn = self.supply.draw(&mut participant.hand, missing, &mut self.deck_rng);
                debug!(participant = %id, drawn, "replenished");
            }
        }
    }

    /// Redeal the owned colors among the participants.
    ///
    /// Neutral colors stay neutral. Every identity goes back to hidden.
    /// Returns one change per participant whose color moved.
    pub fn reshuffle_ownership(&mut self) -> Vec<OwnershipChange> {
        let mut colors: Vec<Color> = self.participants.values().map(|p| p.color).collect();
        self.ownership_rng.shuffle(&mut colors);

        let mut changes = Vec::new();
        for ((id, participant), new) in self.participants.iter_mut().zip(colors) {
            let old = std::mem::replace(&mut participant.color, new);
            participant.revealed = false;
            if old != new {
                changes.push(OwnershipChange {
                    turn: self.turn,
                    participant: id,
                    old,
                    new,
                });
            }
        }
        for change in &changes {
            self.history.push_ownership_change(*change);
        }
        info!(changed = changes.len(), "ownership reshuffled");
        changes
    }

    // === Staging ===
    //
    // Place the game in a known position. Used by tests and by front ends
    // that replay a scenario.

    /// Replace the standings.
    pub fn set_standings(&mut self, standings: Standings) {
        self.standings = standings;
    }

    pub fn set_marker(&mut self, marker: Marker) {
        self.marker = marker;
    }

    /// Give a participant an exact hand.
    ///
    /// The old hand goes back on top of the draw pile and the new cards are
    /// pulled out of the supply, so the deck stays whole.
    pub fn set_hand(&mut self, id: ParticipantId, cards: &[Card]) -> Result<(), GameError> {
        let participant = self
            .participants
            .get_mut(id)
            .ok_or(GameError::UnknownParticipant(id))?;
        for card in participant.hand.drain(..) {
            self.supply.put_on_top(card);
        }
        for &card in cards {
            if !self.supply.take(card) {
                return Err(GameError::InvalidConfig(format!("no {} left in the supply", card)));
            }
            participant.hand.push(card);
        }
        Ok(())
    }

    /// Assign owned colors in participant order. The rest become neutral.
    pub fn assign_colors(&mut self, colors: &[Color]) -> Result<(), GameError> {
        if colors.len() != self.participants.len() {
            return Err(GameError::InvalidConfig(format!(
                "{} colors for {} participants",
                colors.len(),
                self.participants.len()
            )));
        }
        let mut distinct = colors.to_vec();
        distinct.sort();
        distinct.dedup();
        if distinct.len() != colors.len() {
            return Err(GameError::InvalidConfig("participants must own distinct colors".into()));
        }
        for ((_, participant), &color) in self.participants.iter_mut().zip(colors) {
            participant.color = color;
        }
        self.neutral = Color::ALL.into_iter().filter(|c| !colors.contains(c)).collect();
        Ok(())
    }

    // === Invariants ===

    /// Verify deck conservation, the standings permutation and the
    /// ownership partition.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        let expected = DeckComposition::standard();
        let held = self.supply.cards().chain(self.participants.values().flat_map(|p| p.hand.iter()));
        if census(held) != expected.census() {
            let in_hands: usize = self.participants.values().map(|p| p.hand.len()).sum();
            return Err(GameError::Invariant(format!(
                "deck not conserved: {} in supply + {} in hands, expected {}",
                self.supply.len(),
                in_hands,
                expected.total()
            )));
        }

        self.standings.verify()?;

        let mut seen: SmallVec<[Color; Color::COUNT]> = self.neutral.clone();
        for p in self.participants.values() {
            if seen.contains(&p.color) {
                return Err(GameError::Invariant(format!("{} owned twice", p.color)));
            }
            seen.push(p.color);
        }
        if seen.len() != Color::COUNT {
            return Err(GameError::Invariant(format!(
                "ownership covers {} colors, expected {}",
                seen.len(),
                Color::COUNT
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::SpecialEffect;
    use crate::policy::{Personality, PersonalityChoice};

    fn state(count: usize) -> GameState {
        GameState::new(GameConfig::new(count).with_seed(7)).unwrap()
    }

    #[test]
    fn test_setup() {
        let s = state(4);
        assert_eq!(s.participants().len(), 4);
        assert!(s.human().is_human());
        assert_eq!(s.neutral().len(), 3);
        assert_eq!(s.turn(), 0);
        assert_eq!((s.marker().lap(), s.marker().cell()), (1, 0));
        for p in s.participants().values() {
            assert_eq!(p.hand.len(), 3);
            assert!(!p.revealed);
        }
        assert_eq!(s.supply().len(), 55 - 12);
        assert_eq!(s.history().ranks().len(), 1);
        assert_eq!(s.history().ranks()[0].turn, 0);
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_setup_is_seeded() {
        let a = state(5);
        let b = state(5);
        assert_eq!(a.standings(), b.standings());
        assert_eq!(a.participants(), b.participants());
        assert_eq!(a.supply(), b.supply());
    }

    #[test]
    fn test_fixed_personalities() {
        let config = GameConfig::new(3)
            .with_personality(Personality::Logic)
            .with_personality(PersonalityChoice::Random);
        let s = GameState::new(config).unwrap();
        let p1 = s.participant(ParticipantId::new(1)).unwrap();
        assert_eq!(p1.controller, Controller::Computer(Personality::Logic));
        assert!(s.participant(ParticipantId::new(2)).unwrap().controller.personality().is_some());
        assert_eq!(
            s.participant(ParticipantId::new(3)).unwrap_err(),
            GameError::UnknownParticipant(ParticipantId::new(3))
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(GameState::new(GameConfig::new(1)), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_owner_of() {
        let s = state(3);
        for (id, p) in s.participants().iter() {
            assert_eq!(s.owner_of(p.color), Some(id));
        }
        for &c in s.neutral() {
            assert_eq!(s.owner_of(c), None);
        }
    }

    #[test]
    fn test_reshuffle_keeps_colors_and_hides_identities() {
        let mut s = state(6);
        for id in ParticipantId::all(6) {
            s.reveal(id).unwrap();
        }
        let mut before: Vec<_> = s.participants().values().map(|p| p.color).collect();
        let neutral_before = s.neutral().to_vec();

        let changes = s.reshuffle_ownership();

        let mut after: Vec<_> = s.participants().values().map(|p| p.color).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(s.neutral(), neutral_before.as_slice());
        assert!(s.participants().values().all(|p| !p.revealed));
        assert_eq!(s.history().ownership_changes().len(), changes.len());
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_set_hand_conserves_deck() {
        let mut s = state(2);
        let hand = [
            Card::Number(1),
            Card::PlusTwo(Color::Red),
            Card::Special(SpecialEffect::SwapTwo),
        ];
        s.set_hand(ParticipantId::HUMAN, &hand).unwrap();
        assert_eq!(s.human().hand.as_slice(), &hand);
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_set_hand_rejects_missing_cards() {
        let mut s = state(2);
        let too_many = [Card::Special(SpecialEffect::ReshuffleOwnership); 3];
        assert!(s.set_hand(ParticipantId::HUMAN, &too_many).is_err());
    }

    #[test]
    fn test_assign_colors() {
        let mut s = state(3);
        s.assign_colors(&[Color::Blue, Color::Red, Color::Green]).unwrap();
        assert_eq!(s.human().color, Color::Blue);
        assert_eq!(
            s.neutral(),
            &[Color::Pink, Color::Orange, Color::Yellow, Color::Purple]
        );
        s.check_invariants().unwrap();

        assert!(s.assign_colors(&[Color::Blue, Color::Blue, Color::Green]).is_err());
        assert!(s.assign_colors(&[Color::Blue]).is_err());
    }

    #[test]
    fn test_invariant_violation_detected() {
        let mut s = state(2);
        s.discard(Card::Number(1));
        assert!(matches!(s.check_invariants(), Err(GameError::Invariant(_))));
    }

    #[test]
    fn test_replenish_tops_up() {
        let mut s = state(2);
        let card = s.take_card(ParticipantId::HUMAN, 0).unwrap().unwrap();
        s.discard(card);
        assert_eq!(s.human().hand.len(), 2);
        s.replenish();
        assert_eq!(s.human().hand.len(), 3);
        s.check_invariants().unwrap();
    }
}
