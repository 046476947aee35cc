//! Tests for the game state lifecycle.

use perfect_tictactoe::{
    Board, Cell, GameState, InvalidMove, Outcome, Player, Position, STARTING_PLAYER,
};

/// Walks every game reachable by alternating play from the empty board.
fn visit_reachable(state: &mut GameState, visit: &mut impl FnMut(&GameState)) {
    visit(state);
    if state.outcome().is_terminal() {
        return;
    }
    for pos in state.valid_moves() {
        let mut next = state.clone();
        next.place_at(pos, state.current_turn()).unwrap();
        visit_reachable(&mut next, visit);
    }
}

/// Checks every line for `player`, without the first-found shortcut.
fn owns_line(board: &Board, player: Player) -> bool {
    perfect_tictactoe::rules::LINES
        .iter()
        .any(|line| line.iter().all(|pos| board.get(*pos) == Cell::Occupied(player)))
}

#[test]
fn test_at_most_one_winner_on_reachable_boards() {
    let mut boards = 0usize;
    visit_reachable(&mut GameState::new(), &mut |state| {
        boards += 1;
        let board = state.board();
        assert!(
            !(owns_line(board, Player::A) && owns_line(board, Player::B)),
            "two winners:\n{}",
            board.display()
        );
    });
    assert_eq!(boards, 549_946);
}

#[test]
fn test_place_on_occupied_cell_changes_nothing() {
    let mut state = GameState::new();
    state.place(1, 1, Player::A).unwrap();
    let before = state.clone();

    let err = state.place(1, 1, Player::B).unwrap_err();
    assert_eq!(err, InvalidMove::Occupied { position: Position::Center });
    assert!(err.to_string().contains("occupied"));
    assert_eq!(state, before);

    // Same result no matter who tries or how often.
    assert!(state.place(1, 1, Player::A).is_err());
    assert_eq!(state, before);
    assert_eq!(state.current_turn(), Player::B);
}

#[test]
fn test_reset_restores_initial_configuration() {
    let mut state = GameState::new();
    for (row, col, player) in [(0, 0, Player::A), (1, 1, Player::B), (0, 1, Player::A)] {
        state.place(row, col, player).unwrap();
    }
    state.reset();
    assert_eq!(state, GameState::new());
    assert_eq!(state.current_turn(), STARTING_PLAYER);

    // Also from a finished game.
    let mut finished = GameState::from_parts("AAA/BB./...".parse().unwrap(), Player::B);
    assert!(finished.outcome().is_terminal());
    finished.reset();
    assert_eq!(finished.outcome(), Outcome::Ongoing);
    assert!((0..3).all(|r| (0..3).all(|c| finished.cell(r, c) == Some(Cell::Empty))));
}

#[test]
fn test_completed_top_row_wins_regardless_of_rest() {
    for rest in [".../...", "BB./...", "B.B/B.B", "BBB/..."] {
        let board: Board = format!("AAA/{rest}").parse().unwrap();
        let state = GameState::from_parts(board, Player::B);
        assert_eq!(state.outcome(), Outcome::Win(Player::A), "rest = {rest}");
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    let state = GameState::from_board("ABA/ABB/BAA".parse().unwrap());
    assert!(state.is_full());
    assert_eq!(state.winner(), None);
    assert_eq!(state.outcome(), Outcome::Draw);
}

#[test]
fn test_alternating_game_to_win() {
    let mut state = GameState::new();
    let moves = [
        (0, 0, Player::A),
        (1, 1, Player::B),
        (0, 1, Player::A),
        (2, 0, Player::B),
        (0, 2, Player::A),
    ];
    for (row, col, player) in moves {
        assert_eq!(state.outcome(), Outcome::Ongoing);
        assert_eq!(state.current_turn(), player);
        state.place(row, col, player).unwrap();
    }
    assert_eq!(state.outcome(), Outcome::Win(Player::A));
    assert_eq!(state.place(2, 2, Player::B), Err(InvalidMove::GameOver));
}

#[test]
fn test_state_serializes_cells_and_turn() {
    let mut state = GameState::new();
    state.place(2, 1, Player::A).unwrap();

    let json = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
    assert_eq!(restored.current_turn(), Player::B);
}
