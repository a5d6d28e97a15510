//! Batting: two or more participants tied on the lowest card.
//!
//! ## Plus-two ties
//!
//! When the tie is at 2 and every tied card is a plus-two, contributions
//! are grouped by bound color. A color played once is "clean" and becomes a
//! direct target. Colors played more than once send their players into
//! pointing. Any other tie, including a mixed tie at 2, sends everyone to
//! pointing and ignores plus-two colors.
//!
//! ## Pointing
//!
//! Each tied participant names a target. If they all name the same color,
//! that color is spared and the pointers are punished instead: their own
//! colors are revealed and take the effect. Otherwise the named colors take
//! the effect.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::phase::Contribution;
use crate::cards::Card;
use crate::core::{Color, ParticipantId};

/// How a tie splits into direct targets and pointers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingPlan {
    /// Clean plus-two colors, applied before pointing.
    pub direct: Vec<Color>,
    /// Contributions that must point, in contribution order.
    pub pointing: Vec<Contribution>,
}

/// Split the tied movers.
#[must_use]
pub fn plan_batting(movers: &[Contribution]) -> BattingPlan {
    let all_plus_two = movers.iter().all(|c| matches!(c.card, Card::PlusTwo(_)));
    if !all_plus_two {
        return BattingPlan {
            direct: Vec::new(),
            pointing: movers.to_vec(),
        };
    }

    let mut counts: FxHashMap<Color, usize> = FxHashMap::default();
    for color in movers.iter().filter_map(|c| c.card.bound_color()) {
        *counts.entry(color).or_insert(0) += 1;
    }

    let mut plan = BattingPlan::default();
    for mover in movers {
        let Some(color) = mover.card.bound_color() else {
            continue;
        };
        if counts.get(&color) == Some(&1) {
            plan.direct.push(color);
        } else {
            plan.pointing.push(*mover);
        }
    }
    plan
}

/// Outcome of a pointing round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointingVerdict {
    /// The named colors take the effect.
    Diverged { targets: Vec<Color> },
    /// Everyone named `pointed`; the pointers are punished instead.
    Unanimous {
        pointed: Color,
        penalized: Vec<ParticipantId>,
    },
}

/// Judge collected points. Returns `None` if nobody pointed.
#[must_use]
pub fn judge_pointing(points: &[(ParticipantId, Color)]) -> Option<PointingVerdict> {
    let &(_, first) = points.first()?;
    if points.len() > 1 && points.iter().all(|&(_, c)| c == first) {
        return Some(PointingVerdict::Unanimous {
            pointed: first,
            penalized: points.iter().map(|&(id, _)| id).collect(),
        });
    }
    let mut targets: Vec<Color> = Vec::with_capacity(points.len());
    for &(_, color) in points {
        if !targets.contains(&color) {
            targets.push(color);
        }
    }
    Some(PointingVerdict::Diverged { targets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use Color::*;

    fn c(id: u8, card: Card) -> Contribution {
        Contribution::new(ParticipantId::new(id), card)
    }

    #[test]
    fn test_all_clean_plus_twos() {
        let movers = [c(0, Card::PlusTwo(Red)), c(2, Card::PlusTwo(Blue))];
        let plan = plan_batting(&movers);
        assert_eq!(plan.direct, vec![Red, Blue]);
        assert!(plan.pointing.is_empty());
    }

    #[test]
    fn test_dirty_plus_twos_point() {
        let movers = [
            c(0, Card::PlusTwo(Red)),
            c(1, Card::PlusTwo(Blue)),
            c(3, Card::PlusTwo(Red)),
        ];
        let plan = plan_batting(&movers);
        assert_eq!(plan.direct, vec![Blue]);
        assert_eq!(plan.pointing, vec![movers[0], movers[2]]);
    }

    #[test]
    fn test_mixed_tie_at_two_all_point() {
        let movers = [c(0, Card::PlusTwo(Red)), c(1, Card::Number(2))];
        let plan = plan_batting(&movers);
        assert!(plan.direct.is_empty());
        assert_eq!(plan.pointing, movers.to_vec());
    }

    #[test]
    fn test_number_tie_all_point() {
        let movers = [c(1, Card::Number(3)), c(2, Card::Number(3)), c(3, Card::Number(3))];
        let plan = plan_batting(&movers);
        assert!(plan.direct.is_empty());
        assert_eq!(plan.pointing.len(), 3);
    }

    #[test]
    fn test_unanimous_points() {
        let points = [(ParticipantId::new(1), Red), (ParticipantId::new(2), Red)];
        assert_eq!(
            judge_pointing(&points),
            Some(PointingVerdict::Unanimous {
                pointed: Red,
                penalized: vec![ParticipantId::new(1), ParticipantId::new(2)],
            })
        );
    }

    #[test]
    fn test_diverging_points_deduplicated() {
        let points = [
            (ParticipantId::new(0), Red),
            (ParticipantId::new(1), Green),
            (ParticipantId::new(2), Red),
        ];
        assert_eq!(
            judge_pointing(&points),
            Some(PointingVerdict::Diverged { targets: vec![Red, Green] })
        );
    }

    #[test]
    fn test_no_points() {
        assert_eq!(judge_pointing(&[]), None);
        assert_eq!(
            judge_pointing(&[(ParticipantId::HUMAN, Blue)]),
            Some(PointingVerdict::Diverged { targets: vec![Blue] })
        );
    }
}
