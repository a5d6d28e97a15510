//! Turn Orchestrator scenarios on staged positions.
//!
//! Every scenario seats computers with one-card hands so their plays are
//! forced, places the marker, and checks the standings, reveals, history
//! and events a single turn leaves behind.

mod common;

use common::{staged, ScriptedHuman};
use marker_race::core::GameError;
use marker_race::{
    Card, CellEffect, Color, EventLog, GameEvent, Personality, ParticipantId, SpecialEffect, SpecialPhase,
    TurnPhase, TurnResult,
};
use Color::*;

const DOUBLE: Card = Card::Special(SpecialEffect::DoubleMultiplier);
const SWAP: Card = Card::Special(SpecialEffect::SwapTwo);
const RESHUFFLE: Card = Card::Special(SpecialEffect::ReshuffleOwnership);

fn com(n: u8) -> ParticipantId {
    ParticipantId::new(n)
}

fn applied(log: &EventLog) -> Vec<(Color, usize, usize)> {
    log.events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::CellEffectApplied { change, .. } => Some((change.color, change.before, change.after)),
            _ => None,
        })
        .collect()
}

/// Three movers at 3 on a CRUSH cell pointing at ranks 1, 3 and 5: all three
/// go to last place, lowest standing first, and nobody is revealed.
#[tokio::test]
async fn test_diverging_pointers_crush() {
    let mut game = staged(
        &[Personality::Attacker, Personality::Safe, Personality::Safe],
        &[Red, Pink, Yellow, Blue],
        &[Card::Number(3), Card::Number(3), Card::Number(3), Card::Number(4)],
        1,
        1,
    );
    // human points at rank 5, Attacker at rank 1, Safe at the first neutral (Orange, rank 3)
    let mut human = ScriptedHuman::new().with_targets([Green]);
    let mut log = EventLog::new();

    let result = game.play_turn(&mut human, &mut log).await.unwrap();

    assert_eq!(game.state().marker().cell(), 4);
    assert_eq!(human.target_requests, vec![CellEffect::Crush]);
    assert_eq!(
        applied(&log),
        vec![(Green, 4, 6), (Orange, 2, 6), (Red, 0, 6)]
    );
    assert_eq!(
        game.state().standings().order(),
        &[Pink, Yellow, Blue, Purple, Green, Orange, Red]
    );
    assert!(game.state().participants().values().all(|p| !p.revealed));
    assert_eq!(log.of_kind("identity_revealed").count(), 0);

    let TurnResult::Continue(record) = result else {
        panic!("game should continue");
    };
    assert_eq!(record.turn, 1);
    assert_eq!(record.min_value, Some(3));
    assert_eq!(record.movers, vec![ParticipantId::HUMAN, com(1), com(2)]);
    assert!(record.batting);
    assert_eq!(
        record.effects,
        vec!["GREEN: 5 -> 7 (CRUSH)", "ORANGE: 3 -> 7 (CRUSH)", "RED: 1 -> 7 (CRUSH)"]
    );
}

/// Two movers at 1 on a ZONE cell both pointing at first place: the pointed
/// color is not targeted, both pointers are revealed, and their own colors
/// are zoned to the top.
#[tokio::test]
async fn test_unanimous_pointers_zone() {
    let mut game = staged(
        &[Personality::Attacker, Personality::Safe],
        &[Blue, Purple, Green],
        &[Card::Number(1), Card::Number(1), Card::Number(4)],
        1,
        8,
    );
    let mut human = ScriptedHuman::new().with_targets([Red]);
    let mut log = EventLog::new();

    game.play_turn(&mut human, &mut log).await.unwrap();

    assert_eq!(game.state().marker().cell(), 9);
    let state = game.state();
    assert!(state.participant(ParticipantId::HUMAN).unwrap().revealed);
    assert!(state.participant(com(1)).unwrap().revealed);
    assert!(!state.participant(com(2)).unwrap().revealed);

    let moved: Vec<Color> = applied(&log).iter().map(|&(c, _, _)| c).collect();
    assert_eq!(moved, vec![Purple, Blue]);
    assert!(!moved.contains(&Red));
    assert_eq!(&state.standings().order()[..3], &[Blue, Purple, Red]);

    let revealed: Vec<_> = log
        .of_kind("identity_revealed")
        .filter_map(|e| match e {
            GameEvent::IdentityRevealed { participant, color } => Some((*participant, *color)),
            _ => None,
        })
        .collect();
    assert_eq!(revealed, vec![(ParticipantId::HUMAN, Blue), (com(1), Purple)]);
}

/// Input that goes away while a target is pending breaks the turn off
/// mid-resolution, and the session refuses to start another on top of it.
#[tokio::test]
async fn test_broken_off_turn_blocks_later_turns() {
    let mut game = staged(
        &[Personality::Attacker, Personality::Safe],
        &[Blue, Purple, Green],
        &[Card::Number(1), Card::Number(1), Card::Number(4)],
        1,
        8,
    );
    let mut human = ScriptedHuman::new().closing_after_cards();

    let err = game.play_turn(&mut human, &mut ()).await.unwrap_err();
    assert_eq!(err, GameError::InputClosed);
    assert_eq!(human.target_requests, vec![CellEffect::Zone]);
    assert_eq!(game.phase(), TurnPhase::Resolving);
    assert_eq!(game.state().turn(), 1);
    assert!(game.state().history().last_turn().is_none());

    let again = game.play_turn(&mut ScriptedHuman::new(), &mut ()).await;
    assert_eq!(again, Err(GameError::TurnAborted(1)));
    assert_eq!(game.state().turn(), 1);
    assert!(game.state().history().last_turn().is_none());
}

/// A human swap request that fails leaves the standings untouched and the
/// session blocked.
#[tokio::test]
async fn test_broken_off_swap_blocks_later_turns() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[SWAP, Card::Number(4)],
        1,
        0,
    );
    let mut human = ScriptedHuman::new().closing_after_cards();

    assert_eq!(game.play_turn(&mut human, &mut ()).await, Err(GameError::InputClosed));
    assert_eq!(human.swap_requests, 1);
    assert_eq!(game.state().standings(), &common::canonical_standings());

    assert_eq!(
        game.play_turn(&mut ScriptedHuman::new(), &mut ()).await,
        Err(GameError::TurnAborted(1))
    );
}

/// Reveal is idempotent: an already revealed pointer is not announced again.
#[tokio::test]
async fn test_unanimous_reveal_is_idempotent() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Blue, Purple],
        &[Card::Number(1), Card::Number(1)],
        1,
        8,
    );
    game.state_mut().reveal(ParticipantId::HUMAN).unwrap();
    let mut human = ScriptedHuman::new().with_targets([Red]);
    let mut log = EventLog::new();

    game.play_turn(&mut human, &mut log).await.unwrap();

    assert_eq!(log.of_kind("identity_revealed").count(), 1);
    assert!(game.state().participants().values().all(|p| p.revealed));
}

/// RED+2 and BLUE+2 alone: both are direct targets and nobody points.
#[tokio::test]
async fn test_clean_plus_twos_skip_pointing() {
    let mut game = staged(
        &[Personality::Attacker, Personality::Safe],
        &[Pink, Yellow, Green],
        &[Card::PlusTwo(Red), Card::PlusTwo(Blue), Card::Number(4)],
        1,
        4,
    );
    let mut human = ScriptedHuman::new();
    let mut log = EventLog::new();

    let TurnResult::Continue(record) = game.play_turn(&mut human, &mut log).await.unwrap() else {
        panic!("game should continue");
    };

    assert_eq!(game.state().marker().cell(), 6);
    assert!(human.target_requests.is_empty());
    assert_eq!(applied(&log), vec![(Blue, 5, 3), (Red, 0, 0)]);
    assert_eq!(record.effects, vec!["BLUE: 6 -> 4 (2UP)", "RED: no change at 1 (2UP)"]);
    assert!(record.batting);
}

/// RED+2, RED+2, BLUE+2: BLUE is hit directly, the two RED holders point.
#[tokio::test]
async fn test_dirty_plus_twos_point() {
    let mut game = staged(
        &[Personality::Attacker, Personality::Safe, Personality::Logic],
        &[Pink, Yellow, Green, Orange],
        &[
            Card::PlusTwo(Red),
            Card::PlusTwo(Red),
            Card::PlusTwo(Blue),
            Card::Number(4),
        ],
        1,
        4,
    );
    let mut human = ScriptedHuman::new().with_targets([Purple]);
    let mut log = EventLog::new();

    game.play_turn(&mut human, &mut log).await.unwrap();

    assert_eq!(human.target_requests.len(), 1);
    // Blue first, then the diverging points on Purple and Red
    assert_eq!(applied(&log), vec![(Blue, 5, 3), (Purple, 6, 4), (Red, 0, 0)]);
    assert_eq!(
        game.state().standings().order(),
        &[Red, Pink, Orange, Blue, Purple, Yellow, Green]
    );
}

/// A lone plus-two forces the target to its own color.
#[tokio::test]
async fn test_single_plus_two_forces_target() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[Card::Number(3), Card::PlusTwo(Green)],
        1,
        2,
    );
    let mut human = ScriptedHuman::new();
    let mut log = EventLog::new();

    game.play_turn(&mut human, &mut log).await.unwrap();

    // cell 4 is CRUSH
    assert_eq!(game.state().marker().cell(), 4);
    assert_eq!(applied(&log), vec![(Green, 4, 6)]);
    assert!(human.target_requests.is_empty());
}

/// A single human mover picks the target.
#[tokio::test]
async fn test_single_human_mover_chooses() {
    let mut game = staged(
        &[Personality::Safe],
        &[Pink, Yellow],
        &[Card::Number(1), Card::Number(4)],
        1,
        8,
    );
    let mut human = ScriptedHuman::new().with_targets([Purple]);
    let mut log = EventLog::new();

    game.play_turn(&mut human, &mut log).await.unwrap();

    assert_eq!(human.target_requests, vec![CellEffect::Zone]);
    assert_eq!(game.state().standings().first(), Purple);
}

/// Landing on a plain cell changes nothing.
#[tokio::test]
async fn test_plain_cell_no_effect() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[Card::Number(3), Card::Number(4)],
        1,
        0,
    );
    let mut human = ScriptedHuman::new();
    let mut log = EventLog::new();

    game.play_turn(&mut human, &mut log).await.unwrap();

    assert_eq!(game.state().marker().cell(), 3);
    assert!(applied(&log).is_empty());
    assert_eq!(game.state().standings().order(), &Color::ALL);
}

/// A lone DoubleMultiplier doubles the distance.
#[tokio::test]
async fn test_double_multiplier() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[DOUBLE, Card::Number(3)],
        1,
        0,
    );
    let mut log = EventLog::new();

    game.play_turn(&mut ScriptedHuman::new(), &mut log).await.unwrap();

    assert_eq!(game.state().marker().cell(), 6);
    assert_eq!(log.of_kind("marker_moved").count(), 6);
}

/// Two specials void each other; movement runs at normal speed.
#[tokio::test]
async fn test_specials_void_each_other() {
    let mut game = staged(
        &[Personality::Attacker, Personality::Safe],
        &[Pink, Yellow, Green],
        &[DOUBLE, SWAP, Card::Number(3)],
        1,
        0,
    );
    let mut human = ScriptedHuman::new();
    let mut log = EventLog::new();

    game.play_turn(&mut human, &mut log).await.unwrap();

    assert!(log
        .events()
        .contains(&GameEvent::SpecialResolved { phase: SpecialPhase::Voided { count: 2 } }));
    assert_eq!(game.state().marker().cell(), 3);
    assert_eq!(human.swap_requests, 0);
}

/// No number cards at all: the marker stays.
#[tokio::test]
async fn test_no_numbers_no_movement() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[DOUBLE, DOUBLE],
        1,
        5,
    );
    let TurnResult::Continue(record) = game.play_turn(&mut ScriptedHuman::new(), &mut ()).await.unwrap() else {
        panic!("game should continue");
    };
    assert_eq!(game.state().marker().cell(), 5);
    assert_eq!(record.min_value, None);
}

/// A human SwapTwo swaps the chosen pair and ends the turn without movement.
#[tokio::test]
async fn test_human_swap_ends_turn() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[SWAP, Card::Number(1)],
        1,
        0,
    );
    let mut human = ScriptedHuman::new().with_swap(Pink, Purple);
    let mut log = EventLog::new();

    let TurnResult::Continue(record) = game.play_turn(&mut human, &mut log).await.unwrap() else {
        panic!("game should continue");
    };

    assert_eq!(human.swap_requests, 1);
    assert_eq!(game.state().marker().cell(), 0);
    assert_eq!(game.state().standings().rank_of(Pink), Some(6));
    assert_eq!(game.state().standings().rank_of(Purple), Some(1));
    assert_eq!(record.effects, vec!["PINK: 2 -> 7 (SWAP)", "PURPLE: 7 -> 2 (SWAP)"]);
    assert_eq!(log.of_kind("pieces_swapped").count(), 1);
    // replenished after the early end
    assert_eq!(game.state().human().hand.len(), 3);
}

/// A degenerate human pair is fixed up with the first board entry that differs.
#[tokio::test]
async fn test_degenerate_swap_substituted() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[SWAP, Card::Number(1)],
        1,
        0,
    );
    let mut human = ScriptedHuman::new().with_swap(Blue, Blue);

    game.play_turn(&mut human, &mut ()).await.unwrap();

    assert_eq!(game.state().standings().first(), Blue);
    assert_eq!(game.state().standings().rank_of(Red), Some(5));
}

/// A computer SwapTwo: CHAOS swaps first and last place.
#[tokio::test]
async fn test_chaos_swap() {
    let mut game = staged(
        &[Personality::Chaos],
        &[Pink, Yellow],
        &[Card::Number(3), SWAP],
        1,
        0,
    );
    game.play_turn(&mut ScriptedHuman::new(), &mut ()).await.unwrap();

    assert_eq!(game.state().standings().first(), Purple);
    assert_eq!(game.state().standings().last(), Red);
}

/// ReshuffleOwnership permutes owned colors, hides everyone, and leaves the
/// neutral pieces and the marker alone.
#[tokio::test]
async fn test_reshuffle_resets_identities() {
    let mut game = staged(
        &[Personality::Attacker, Personality::Safe, Personality::Logic],
        &[Pink, Yellow, Green, Blue],
        &[RESHUFFLE, Card::Number(1), Card::Number(3), Card::Number(4)],
        1,
        0,
    );
    for id in ParticipantId::all(4) {
        game.state_mut().reveal(id).unwrap();
    }
    let neutral = game.state().neutral().to_vec();
    let mut log = EventLog::new();

    game.play_turn(&mut ScriptedHuman::new(), &mut log).await.unwrap();

    let state = game.state();
    let mut owned: Vec<Color> = state.participants().values().map(|p| p.color).collect();
    owned.sort();
    assert_eq!(owned, vec![Pink, Yellow, Green, Blue]);
    assert_eq!(state.neutral(), neutral.as_slice());
    assert!(state.participants().values().all(|p| !p.revealed));
    assert_eq!(state.marker().cell(), 0);
    assert_eq!(log.of_kind("ownership_reshuffled").count(), 1);
    assert!(state.history().ownership_changes().iter().all(|c| c.turn == 1 && c.old != c.new));
}

/// Reaching the goal ends the game before any cell effect.
#[tokio::test]
async fn test_goal_ends_game() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[Card::Number(3), Card::Number(4)],
        3,
        28,
    );
    let mut log = EventLog::new();

    let result = game.play_turn(&mut ScriptedHuman::new(), &mut log).await.unwrap();

    let TurnResult::Finished(summary) = result else {
        panic!("goal should end the game");
    };
    assert_eq!(game.phase(), TurnPhase::GameOver);
    assert_eq!((game.state().marker().lap(), game.state().marker().cell()), (4, 31));
    assert!(applied(&log).is_empty());
    assert_eq!(summary.winner, Red);
    assert_eq!(summary.turns, 1);
    assert_eq!(summary.identities.len(), 2);
    // no replenish on the final turn
    assert!(game.state().human().hand.is_empty());
    assert_eq!(log.of_kind("game_ended").count(), 1);
    assert_eq!(game.summary(), Some(summary));

    assert_eq!(
        game.play_turn(&mut ScriptedHuman::new(), &mut ()).await,
        Err(GameError::GameOver)
    );
}

/// Two cells short of the goal: the game goes on.
#[tokio::test]
async fn test_stop_before_goal() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[Card::PlusTwo(Orange), Card::Number(4)],
        3,
        28,
    );
    let result = game.play_turn(&mut ScriptedHuman::new(), &mut ()).await.unwrap();

    assert!(matches!(result, TurnResult::Continue(_)));
    assert_eq!((game.state().marker().lap(), game.state().marker().cell()), (3, 30));
    // cell 30 is ZONE and the plus-two forces Orange
    assert_eq!(game.state().standings().first(), Orange);
}

/// Out-of-range human card choices are asked again.
#[tokio::test]
async fn test_bad_card_index_asked_again() {
    let mut game = staged(
        &[Personality::Attacker],
        &[Pink, Yellow],
        &[Card::Number(3), Card::Number(4)],
        1,
        0,
    );
    let mut human = ScriptedHuman::new().with_cards([7, 0]);

    game.play_turn(&mut human, &mut ()).await.unwrap();

    assert_eq!(human.card_requests, 2);
    assert_eq!(game.state().marker().cell(), 3);
}

/// Turn history keeps the three latest turns and every rank snapshot.
#[tokio::test]
async fn test_history_bookkeeping() {
    let mut game = staged(
        &[Personality::Safe],
        &[Pink, Yellow],
        &[Card::Number(4), Card::Number(4)],
        1,
        0,
    );
    let mut human = ScriptedHuman::new();
    for _ in 0..5 {
        if game.phase() == TurnPhase::GameOver {
            break;
        }
        game.play_turn(&mut human, &mut ()).await.unwrap();
    }
    let history = game.state().history();
    let recent: Vec<u32> = history.recent().map(|r| r.turn).collect();
    assert_eq!(recent, vec![5, 4, 3]);
    assert_eq!(history.ranks().len(), 6);
    assert_eq!(history.ranks()[0].turn, 0);
}
