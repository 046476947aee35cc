//! Tests for the human-versus-engine session.

use perfect_games::{MatchSession, PlayConfig, SessionError};
use perfect_tictactoe::{Cell, InvalidMove, Outcome, Player, Position, Score};

fn session_as(side: Player) -> MatchSession {
    MatchSession::new(&PlayConfig::default().with_human(side))
}

/// Plays the first open cell for the human until the game ends.
fn play_out(session: &mut MatchSession) -> Outcome {
    while session.outcome() == Outcome::Ongoing {
        let pos = session.state().valid_moves()[0];
        session.play_human(pos.row(), pos.col()).unwrap();
    }
    session.outcome()
}

#[test]
fn test_human_move_gets_engine_reply() {
    let mut session = session_as(Player::A);
    let report = session.play_human(0, 0).unwrap();

    assert_eq!(report.human, Position::TopLeft);
    assert_eq!(report.reply, Some(Position::Center));
    assert_eq!(report.outcome, Outcome::Ongoing);
    assert_eq!(session.state().cell(1, 1), Some(Cell::Occupied(Player::B)));
    assert_eq!(session.state().current_turn(), Player::A);
}

#[test]
fn test_rejected_move_leaves_state_unchanged() {
    let mut session = session_as(Player::A);
    session.play_human(0, 0).unwrap();
    let before = session.state().clone();

    assert_eq!(
        session.play_human(1, 1),
        Err(SessionError::InvalidMove(InvalidMove::Occupied {
            position: Position::Center
        }))
    );
    assert_eq!(
        session.play_human(5, 1),
        Err(SessionError::InvalidMove(InvalidMove::OutOfRange { row: 5, col: 1 }))
    );
    assert_eq!(session.state(), &before);
}

#[test]
fn test_naive_human_never_beats_engine() {
    let mut session = session_as(Player::A);
    let outcome = play_out(&mut session);
    assert_ne!(outcome, Outcome::Win(Player::A));
}

#[test]
fn test_no_moves_after_game_over() {
    let mut session = session_as(Player::A);
    play_out(&mut session);
    let before = session.state().clone();

    assert_eq!(session.play_human(0, 0), Err(SessionError::GameOver));
    assert_eq!(session.play_engine(), Err(SessionError::GameOver));
    assert_eq!(session.state(), &before);
}

#[test]
fn test_restart_clears_board() {
    let mut session = session_as(Player::A);
    play_out(&mut session);

    session.restart();
    assert_eq!(session.outcome(), Outcome::Ongoing);
    assert_eq!(session.state().valid_moves().len(), 9);
    assert_eq!(session.state().current_turn(), Player::A);
    assert!(session.play_human(1, 1).is_ok());
}

#[test]
fn test_engine_opens_when_human_plays_second() {
    let mut session = session_as(Player::B);
    assert!(session.engine_to_move());
    assert_eq!(session.play_human(1, 1), Err(SessionError::NotHumanTurn));

    let opening = session.play_engine().unwrap();
    assert_eq!(opening, Position::TopLeft);
    assert_eq!(session.play_engine(), Err(SessionError::NotEngineTurn));

    let report = session.play_human(1, 1).unwrap();
    assert!(report.reply.is_some());
    assert_ne!(play_out(&mut session), Outcome::Win(Player::B));
}

#[test]
fn test_hint_scores_human_options() {
    let mut session = session_as(Player::A);
    session.play_human(0, 0).unwrap();

    let hint = session.hint();
    assert_eq!(hint.len(), 7);
    assert!(hint.iter().all(|m| m.score <= Score::Draw));
}

#[test]
fn test_session_error_display() {
    assert!(SessionError::GameOver.to_string().contains("over"));
    let wrapped: SessionError = InvalidMove::GameOver.into();
    assert_eq!(wrapped, SessionError::InvalidMove(InvalidMove::GameOver));
}
