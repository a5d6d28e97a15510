//! Game configuration.
//!
//! The setup screen is outside the engine; its output is a `GameConfig`.
//! Participant 0 is always the human, so `personalities` holds one entry
//! per computer participant (ids 1..participant_count).

use serde::{Deserialize, Serialize};

use super::error::GameError;
use crate::policy::PersonalityChoice;

/// Smallest supported table.
pub const MIN_PARTICIPANTS: usize = 2;

/// Largest supported table (one participant per color).
pub const MAX_PARTICIPANTS: usize = 7;

/// Cards each participant holds after replenishment.
pub const DEFAULT_HAND_SIZE: usize = 3;

/// Laps the marker must complete before the game ends.
pub const DEFAULT_LAPS_TO_WIN: u32 = 3;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of participants, human included (2-7).
    pub participant_count: usize,

    /// Personality per computer participant, in id order.
    ///
    /// Missing entries are treated as `Random`.
    pub personalities: Vec<PersonalityChoice>,

    /// Hand size for the initial deal and every replenishment.
    pub hand_size: usize,

    /// Laps to complete before the game ends.
    pub laps_to_win: u32,

    /// Seed for every random decision in the game.
    pub seed: u64,

    /// Cosmetic delay between marker steps and computer decisions.
    pub pacing_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            participant_count: 4,
            personalities: Vec::new(),
            hand_size: DEFAULT_HAND_SIZE,
            laps_to_win: DEFAULT_LAPS_TO_WIN,
            seed: 0,
            pacing_ms: 0,
        }
    }
}

impl GameConfig {
    /// Create a configuration for `participant_count` participants.
    #[must_use]
    pub fn new(participant_count: usize) -> Self {
        Self {
            participant_count,
            ..Self::default()
        }
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Append a personality for the next computer participant.
    #[must_use]
    pub fn with_personality(mut self, choice: impl Into<PersonalityChoice>) -> Self {
        self.personalities.push(choice.into());
        self
    }

    /// Replace all computer personalities.
    #[must_use]
    pub fn with_personalities(mut self, choices: impl IntoIterator<Item = PersonalityChoice>) -> Self {
        self.personalities = choices.into_iter().collect();
        self
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the laps to win.
    #[must_use]
    pub fn with_laps_to_win(mut self, laps: u32) -> Self {
        self.laps_to_win = laps;
        self
    }

    /// Set the cosmetic pacing delay in milliseconds.
    #[must_use]
    pub fn with_pacing_ms(mut self, ms: u64) -> Self {
        self.pacing_ms = ms;
        self
    }

    /// Number of computer participants.
    #[must_use]
    pub fn computer_count(&self) -> usize {
        self.participant_count.saturating_sub(1)
    }

    /// Personality choice for computer participant `n` (1-based id).
    #[must_use]
    pub fn choice_for(&self, id: usize) -> PersonalityChoice {
        id.checked_sub(1)
            .and_then(|i| self.personalities.get(i))
            .copied()
            .unwrap_or(PersonalityChoice::Random)
    }

    /// Check the configuration before a game is built from it.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&self.participant_count) {
            return Err(GameError::InvalidConfig(format!(
                "participant_count must be {}-{}, got {}",
                MIN_PARTICIPANTS, MAX_PARTICIPANTS, self.participant_count
            )));
        }
        if self.personalities.len() > self.computer_count() {
            return Err(GameError::InvalidConfig(format!(
                "{} personalities given for {} computer participants",
                self.personalities.len(),
                self.computer_count()
            )));
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfig("hand_size must be at least 1".into()));
        }
        if self.laps_to_win == 0 {
            return Err(GameError::InvalidConfig("laps_to_win must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Personality;

    #[test]
    fn test_builder() {
        let config = GameConfig::new(3)
            .with_seed(7)
            .with_personality(Personality::Attacker)
            .with_personality(PersonalityChoice::Random)
            .with_hand_size(4);

        assert_eq!(config.participant_count, 3);
        assert_eq!(config.computer_count(), 2);
        assert_eq!(config.seed, 7);
        assert_eq!(config.hand_size, 4);
        assert_eq!(config.laps_to_win, DEFAULT_LAPS_TO_WIN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_choice_defaults_to_random() {
        let config = GameConfig::new(4).with_personality(Personality::Logic);

        assert_eq!(config.choice_for(1), PersonalityChoice::Fixed(Personality::Logic));
        assert_eq!(config.choice_for(2), PersonalityChoice::Random);
        assert_eq!(config.choice_for(0), PersonalityChoice::Random);
    }

    #[test]
    fn test_validate_rejects_bad_counts() {
        assert!(GameConfig::new(1).validate().is_err());
        assert!(GameConfig::new(8).validate().is_err());
        assert!(GameConfig::new(7).validate().is_ok());

        let too_many = GameConfig::new(2)
            .with_personality(Personality::Safe)
            .with_personality(Personality::Chaos);
        assert!(matches!(too_many.validate(), Err(GameError::InvalidConfig(_))));

        assert!(GameConfig::new(3).with_hand_size(0).validate().is_err());
        assert!(GameConfig::new(3).with_laps_to_win(0).validate().is_err());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"participant_count": 5, "personalities": ["chaos", "random"]}"#)
                .unwrap();

        assert_eq!(config.participant_count, 5);
        assert_eq!(config.hand_size, DEFAULT_HAND_SIZE);
        assert_eq!(config.choice_for(1), PersonalityChoice::Fixed(Personality::Chaos));
        assert_eq!(config.choice_for(2), PersonalityChoice::Random);

        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
