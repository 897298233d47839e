//! Tests for the phase-typed match lifecycle.

use ttt_board::{BoardSize, Mark, MatchInProgress, MatchResult, MatchSetup, Move, MoveError, Outcome};

#[test]
fn test_lifecycle_alternates_turns() {
    let game = MatchSetup::new(BoardSize::Three).start(Mark::O);
    assert_eq!(game.to_move(), Mark::O);

    let game = game
        .make_move(Move::new(Mark::O, 5))
        .expect("Valid move")
        .into_in_progress()
        .expect("Match continues");

    assert_eq!(game.to_move(), Mark::X);
    assert_eq!(game.history().len(), 1);
    assert!(!game.valid_moves().contains(&5));
}

#[test]
fn test_rejected_move_returns_match_unchanged() {
    let game = MatchSetup::new(BoardSize::Three)
        .start(Mark::X)
        .make_move(Move::new(Mark::X, 5))
        .expect("Valid move")
        .into_in_progress()
        .expect("Match continues");

    let rejected = game.make_move(Move::new(Mark::O, 5)).unwrap_err();
    assert_eq!(rejected.error, MoveError::Occupied(5));
    assert_eq!(rejected.game.board().moves(), 1);
    assert_eq!(rejected.game.to_move(), Mark::O);

    let rejected = rejected.game.make_move(Move::new(Mark::O, 17)).unwrap_err();
    assert_eq!(rejected.error, MoveError::OutOfRange { position: 17, max: 9 });
}

#[test]
fn test_wrong_mark_rejected() {
    let game = MatchSetup::new(BoardSize::Four).start(Mark::X);
    let rejected = game.make_move(Move::new(Mark::O, 1)).unwrap_err();
    assert_eq!(rejected.error, MoveError::WrongMark(Mark::O));
}

#[test]
fn test_win_on_final_cell_is_not_a_draw() {
    // X takes the 1-5-9 diagonal with the ninth move
    let moves = [
        Move::new(Mark::X, 1),
        Move::new(Mark::O, 2),
        Move::new(Mark::X, 3),
        Move::new(Mark::O, 6),
        Move::new(Mark::X, 4),
        Move::new(Mark::O, 7),
        Move::new(Mark::X, 5),
        Move::new(Mark::O, 8),
        Move::new(Mark::X, 9),
    ];
    let finished = MatchInProgress::replay(BoardSize::Three, Mark::X, &moves)
        .expect("Valid replay")
        .into_finished()
        .expect("Match finished");
    assert!(finished.board().is_full());
    assert_eq!(finished.outcome(), Outcome::Winner(Mark::X));
}

#[test]
fn test_draw_detection() {
    let moves = [
        Move::new(Mark::X, 1),
        Move::new(Mark::O, 2),
        Move::new(Mark::X, 3),
        Move::new(Mark::O, 5),
        Move::new(Mark::X, 4),
        Move::new(Mark::O, 6),
        Move::new(Mark::X, 8),
        Move::new(Mark::O, 7),
        Move::new(Mark::X, 9),
    ];
    let finished = MatchInProgress::replay(BoardSize::Three, Mark::X, &moves)
        .expect("Valid replay")
        .into_finished()
        .expect("Match finished");
    assert_eq!(finished.outcome(), Outcome::Draw);
    assert!(finished.outcome().winner().is_none());
}

#[test]
fn test_replay_past_finish_fails() {
    let moves = [
        Move::new(Mark::X, 1),
        Move::new(Mark::O, 2),
        Move::new(Mark::X, 4),
        Move::new(Mark::O, 5),
        Move::new(Mark::X, 7),
        Move::new(Mark::O, 9),
    ];
    let result = MatchInProgress::replay(BoardSize::Three, Mark::X, &moves);
    assert!(matches!(result, Err(MoveError::GameOver)));
}

#[test]
fn test_restart_keeps_size() {
    let moves = [
        Move::new(Mark::X, 1),
        Move::new(Mark::O, 2),
        Move::new(Mark::X, 4),
        Move::new(Mark::O, 5),
        Move::new(Mark::X, 7),
    ];
    let result = MatchInProgress::replay(BoardSize::Three, Mark::X, &moves).unwrap();
    let MatchResult::Finished(finished) = result else {
        panic!("Match should be finished");
    };
    let setup = finished.restart();
    assert_eq!(setup.board().size(), BoardSize::Three);
    assert_eq!(setup.board().moves(), 0);
}
