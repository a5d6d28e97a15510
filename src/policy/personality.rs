//! Computer personalities and the setup-time `Random` placeholder.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Decision style of a computer participant. Fixed for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Attacker,
    Safe,
    Chaos,
    Bluffer,
    Logic,
    Opportunist,
}

impl Personality {
    pub const ALL: [Personality; 6] = [
        Personality::Attacker,
        Personality::Safe,
        Personality::Chaos,
        Personality::Bluffer,
        Personality::Logic,
        Personality::Opportunist,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Personality::Attacker => "attacker",
            Personality::Safe => "safe",
            Personality::Chaos => "chaos",
            Personality::Bluffer => "bluffer",
            Personality::Logic => "logic",
            Personality::Opportunist => "opportunist",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Personality::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Personality as chosen at setup.
///
/// Serialized as a plain lowercase string: `"random"` or a personality name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PersonalityChoice {
    /// Resolved once, uniformly among the six personalities.
    Random,
    Fixed(Personality),
}

impl PersonalityChoice {
    /// Resolve to a concrete personality.
    pub fn resolve(self, rng: &mut GameRng) -> Personality {
        match self {
            PersonalityChoice::Fixed(p) => p,
            PersonalityChoice::Random => Personality::ALL[rng.gen_range_usize(0..Personality::ALL.len())],
        }
    }
}

impl From<Personality> for PersonalityChoice {
    fn from(p: Personality) -> Self {
        PersonalityChoice::Fixed(p)
    }
}

impl TryFrom<String> for PersonalityChoice {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for PersonalityChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("random") {
            return Ok(PersonalityChoice::Random);
        }
        Personality::from_name(s)
            .map(PersonalityChoice::Fixed)
            .ok_or_else(|| format!("unknown personality `{}`", s))
    }
}

impl From<PersonalityChoice> for String {
    fn from(choice: PersonalityChoice) -> Self {
        match choice {
            PersonalityChoice::Random => "random".to_string(),
            PersonalityChoice::Fixed(p) => p.name().to_string(),
        }
    }
}
