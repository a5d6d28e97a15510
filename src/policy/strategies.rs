//! Decision policies, one per personality.
//!
//! A policy sees only its own hand, its own color, the public standings and
//! the set of neutral colors. It never sees another participant's hand.
//!
//! - `choose_card`: index into the hand of the card to play
//! - `choose_target`: a standings target for a cell effect or for pointing
//! - `choose_swap_pair`: two colors to exchange for SwapTwo

use crate::board::{CellEffect, Standings};
use crate::cards::{Card, SpecialEffect};
use crate::core::{Color, GameRng};

use super::personality::Personality;

/// Everything a computer participant may look at when deciding.
#[derive(Clone, Copy, Debug)]
pub struct PolicyView<'a> {
    pub hand: &'a [Card],
    pub own_color: Color,
    pub standings: &'a Standings,
    /// Colors owned by nobody.
    pub neutral: &'a [Color],
}

impl PolicyView<'_> {
    #[must_use]
    pub fn own_rank(&self) -> Option<usize> {
        self.standings.rank_of(self.own_color)
    }

    /// First hand index matching `pred`.
    fn find(&self, pred: impl Fn(Card) -> bool) -> Option<usize> {
        self.hand.iter().position(|&c| pred(c))
    }

    /// First hand index matching `pred` among cards `allowed` keeps.
    fn find_among(&self, allowed: impl Fn(Card) -> bool, pred: impl Fn(Card) -> bool) -> Option<usize> {
        self.hand.iter().position(|&c| allowed(c) && pred(c))
    }
}

/// A decision policy.
pub trait Strategy: Send + Sync {
    fn choose_card(&self, view: &PolicyView<'_>, rng: &mut GameRng) -> usize;

    /// Pick the color a cell effect (or a pointing finger) lands on.
    fn choose_target(&self, view: &PolicyView<'_>, effect: CellEffect, rng: &mut GameRng) -> Color;

    /// Own color against first place, or against last place when already first.
    fn choose_swap_pair(&self, view: &PolicyView<'_>, _rng: &mut GameRng) -> (Color, Color) {
        let first = view.standings.first();
        if view.own_color == first {
            (view.own_color, view.standings.last())
        } else {
            (view.own_color, first)
        }
    }
}

/// Replace a degenerate pair's second color with the first board entry
/// that differs from the first choice.
#[must_use]
pub fn resolve_swap_pair(pair: (Color, Color), standings: &Standings) -> (Color, Color) {
    let (a, b) = pair;
    if a != b {
        return pair;
    }
    let substitute = standings
        .order()
        .iter()
        .copied()
        .find(|&c| c != a)
        .unwrap_or(b);
    (a, substitute)
}

impl Personality {
    /// The policy implementing this personality.
    #[must_use]
    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Personality::Attacker => &Attacker,
            Personality::Safe => &Safe,
            Personality::Chaos => &Chaos,
            Personality::Bluffer => &Bluffer,
            Personality::Logic => &Logic,
            Personality::Opportunist => &Opportunist,
        }
    }
}

/// First neutral color in standings order, else last place.
fn weakest_neutral(view: &PolicyView<'_>) -> Color {
    view.standings
        .order()
        .iter()
        .copied()
        .find(|c| view.neutral.contains(c))
        .unwrap_or_else(|| view.standings.last())
}

/// Plain numbers of 2 or more and plus-two cards.
fn is_quiet(card: Card) -> bool {
    !card.is_special() && !card.is_number(1)
}

// =============================================================================
// Attacker
// =============================================================================

/// Plays aggressively and always hits the leader.
#[derive(Clone, Copy, Debug, Default)]
pub struct Attacker;

impl Strategy for Attacker {
    fn choose_card(&self, view: &PolicyView<'_>, _rng: &mut GameRng) -> usize {
        view.find(|c| c == Card::Special(SpecialEffect::DoubleMultiplier))
            .or_else(|| view.find(|c| c.is_number(1)))
            .or_else(|| view.find(|c| c.is_number(3)))
            .unwrap_or(0)
    }

    fn choose_target(&self, view: &PolicyView<'_>, _effect: CellEffect, _rng: &mut GameRng) -> Color {
        view.standings.first()
    }
}

// =============================================================================
// Safe
// =============================================================================

/// Avoids winning ties and pushes neutral pieces around.
#[derive(Clone, Copy, Debug, Default)]
pub struct Safe;

impl Strategy for Safe {
    fn choose_card(&self, view: &PolicyView<'_>, _rng: &mut GameRng) -> usize {
        view.find_among(is_quiet, |c| c.is_number(4))
            .or_else(|| view.find_among(is_quiet, |c| c.is_number(3)))
            .or_else(|| view.find(is_quiet))
            .unwrap_or(0)
    }

    fn choose_target(&self, view: &PolicyView<'_>, _effect: CellEffect, _rng: &mut GameRng) -> Color {
        weakest_neutral(view)
    }
}

// =============================================================================
// Chaos
// =============================================================================

/// Loves specials, otherwise plays and points at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chaos;

impl Strategy for Chaos {
    fn choose_card(&self, view: &PolicyView<'_>, rng: &mut GameRng) -> usize {
        view.find(|c| c == Card::Special(SpecialEffect::SwapTwo))
            .or_else(|| view.find(|c| c == Card::Special(SpecialEffect::ReshuffleOwnership)))
            .unwrap_or_else(|| {
                if view.hand.is_empty() {
                    0
                } else {
                    rng.gen_range_usize(0..view.hand.len())
                }
            })
    }

    fn choose_target(&self, view: &PolicyView<'_>, _effect: CellEffect, rng: &mut GameRng) -> Color {
        rng.choose(&Color::ALL).copied().unwrap_or(view.own_color)
    }

    fn choose_swap_pair(&self, view: &PolicyView<'_>, _rng: &mut GameRng) -> (Color, Color) {
        (view.standings.first(), view.standings.last())
    }
}

// =============================================================================
// Bluffer
// =============================================================================

/// Plays other colors' plus-twos to mislead, and buries the last place.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bluffer;

impl Strategy for Bluffer {
    fn choose_card(&self, view: &PolicyView<'_>, _rng: &mut GameRng) -> usize {
        let own = view.own_color;
        view.find_among(is_quiet, |c| c.bound_color().is_some_and(|b| b != own))
            .or_else(|| view.find_among(is_quiet, |c| c.is_number(4)))
            .or_else(|| view.find_among(is_quiet, |c| c.is_number(3)))
            .or_else(|| view.find(is_quiet))
            .unwrap_or(0)
    }

    fn choose_target(&self, view: &PolicyView<'_>, _effect: CellEffect, _rng: &mut GameRng) -> Color {
        let last = view.standings.last();
        if last == view.own_color {
            view.standings.at(5).unwrap_or(last)
        } else {
            last
        }
    }
}

// =============================================================================
// Logic
// =============================================================================

/// Reads the board: flees from first place, gambles from the bottom half,
/// and helps its own color with upward effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logic;

impl Strategy for Logic {
    fn choose_card(&self, view: &PolicyView<'_>, _rng: &mut GameRng) -> usize {
        let rank = view.own_rank();
        if rank == Some(0) {
            if let Some(i) = view.find(|c| c.is_number(1)) {
                return i;
            }
        }
        if rank.is_some_and(|r| r >= 4) {
            if let Some(i) = view.find(|c| c == Card::Special(SpecialEffect::ReshuffleOwnership)) {
                return i;
            }
        }
        let own = view.own_color;
        view.find(|c| c == Card::PlusTwo(own))
            .or_else(|| view.find(|c| c.is_number(3)))
            .or_else(|| view.find(|c| c.is_number(4)))
            .unwrap_or(0)
    }

    fn choose_target(&self, view: &PolicyView<'_>, effect: CellEffect, _rng: &mut GameRng) -> Color {
        if effect.is_upward() {
            return view.own_color;
        }
        let first = view.standings.first();
        if first == view.own_color {
            view.standings.at(1).unwrap_or(first)
        } else {
            first
        }
    }
}

// =============================================================================
// Opportunist
// =============================================================================

/// Waits for plus-twos and steers effects onto neutral pieces.
#[derive(Clone, Copy, Debug, Default)]
pub struct Opportunist;

impl Strategy for Opportunist {
    fn choose_card(&self, view: &PolicyView<'_>, _rng: &mut GameRng) -> usize {
        let allowed = |c: Card| !c.is_number(1) && c != Card::Special(SpecialEffect::SwapTwo);
        view.find_among(allowed, |c| c.bound_color().is_some())
            .or_else(|| view.find_among(allowed, |c| c.is_number(3)))
            .or_else(|| view.find(allowed))
            .unwrap_or(0)
    }

    fn choose_target(&self, view: &PolicyView<'_>, _effect: CellEffect, _rng: &mut GameRng) -> Color {
        weakest_neutral(view)
    }
}
