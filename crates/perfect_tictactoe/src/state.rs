//! Game state: the board plus whose turn it is.

use crate::error::InvalidMove;
use crate::position::Position;
use crate::rules;
use crate::types::{Board, Cell, Outcome, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Player who moves first after construction or [`GameState::reset`].
pub const STARTING_PLAYER: Player = Player::A;

/// Complete game state.
///
/// The outcome is never stored; it is derived from the board on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player to move next.
    turn: Player,
}

impl GameState {
    /// Creates a new game with an empty board and [`STARTING_PLAYER`] to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: STARTING_PLAYER,
        }
    }

    /// Builds a state from an arbitrary board and side to move.
    pub fn from_parts(board: Board, turn: Player) -> Self {
        Self { board, turn }
    }

    /// Builds a state from a board, inferring the side to move from the
    /// mark counts: B moves when A has played more, otherwise A.
    pub fn from_board(board: Board) -> Self {
        let turn = if board.count(Player::A) > board.count(Player::B) {
            Player::B
        } else {
            Player::A
        };
        Self::from_parts(board, turn)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_turn(&self) -> Player {
        self.turn
    }

    /// Returns the cell at `row`, `col`, or `None` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        Position::from_row_col(row, col).map(|pos| self.board.get(pos))
    }

    /// Returns the cell at a position.
    pub fn cell_at(&self, pos: Position) -> Cell {
        self.board.get(pos)
    }

    /// Places `player`'s mark at `row`, `col`.
    ///
    /// On success the turn passes to `player`'s opponent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] when the coordinates are out of range, the
    /// cell is occupied, or the game is already over. The state is left
    /// untouched in every error case.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), InvalidMove> {
        let pos = Position::from_row_col(row, col).ok_or_else(|| {
            warn!(row, col, "Move out of range");
            InvalidMove::OutOfRange { row, col }
        })?;
        self.place_at(pos, player)
    }

    /// Places `player`'s mark at an already-validated position.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::Occupied`] or [`InvalidMove::GameOver`]; the
    /// state is unchanged.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn place_at(&mut self, pos: Position, player: Player) -> Result<(), InvalidMove> {
        if self.outcome().is_terminal() {
            warn!(position = %pos, "Move after game over");
            return Err(InvalidMove::GameOver);
        }

        if !self.board.is_empty(pos) {
            warn!(position = %pos, "Cell already occupied");
            return Err(InvalidMove::Occupied { position: pos });
        }

        self.board.set(pos, Cell::Occupied(player));
        self.turn = player.opponent();
        debug!(position = %pos, next = %self.turn, "Mark placed");
        Ok(())
    }

    /// Checks if no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.board)
    }

    /// Returns the owner of a complete line, if any.
    ///
    /// Lines are scanned rows first, then columns, then diagonals.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(&self.board)
    }

    /// Derives the outcome from the board.
    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(player) => Outcome::Win(player),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::Ongoing,
        }
    }

    /// Empty cells in scan order.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Clears the board and hands the move back to [`STARTING_PLAYER`].
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting game");
        self.board = Board::new();
        self.turn = STARTING_PLAYER;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_empty() {
        let state = GameState::new();
        assert!(state.board().cells().iter().all(|c| c.is_empty()));
        assert_eq!(state.current_turn(), Player::A);
        assert_eq!(state.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_place_flips_turn_to_opponent_of_mover() {
        let mut state = GameState::new();
        state.place(1, 1, Player::A).unwrap();
        assert_eq!(state.cell(1, 1), Some(Cell::Occupied(Player::A)));
        assert_eq!(state.current_turn(), Player::B);

        // The caller owns turn order; the state only records who is next.
        state.place(0, 0, Player::A).unwrap();
        assert_eq!(state.current_turn(), Player::B);
    }

    #[test]
    fn test_place_out_of_range() {
        let mut state = GameState::new();
        let before = state.clone();
        assert_eq!(
            state.place(3, 0, Player::A),
            Err(InvalidMove::OutOfRange { row: 3, col: 0 })
        );
        assert_eq!(
            state.place(0, 7, Player::A),
            Err(InvalidMove::OutOfRange { row: 0, col: 7 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_place_rejected_after_win() {
        let board: Board = "AAA/BB./...".parse().unwrap();
        let mut state = GameState::from_parts(board, Player::B);
        let before = state.clone();
        assert_eq!(state.place(2, 2, Player::B), Err(InvalidMove::GameOver));
        assert_eq!(state, before);
    }

    #[test]
    fn test_cell_out_of_range() {
        let state = GameState::new();
        assert_eq!(state.cell(0, 3), None);
        assert_eq!(state.cell(2, 2), Some(Cell::Empty));
    }

    #[test]
    fn test_from_board_infers_turn() {
        let state = GameState::from_board("A../.../...".parse().unwrap());
        assert_eq!(state.current_turn(), Player::B);

        let state = GameState::from_board("A../.B./...".parse().unwrap());
        assert_eq!(state.current_turn(), Player::A);
    }
}
