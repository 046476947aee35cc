//! Error types for game state and search.

use crate::position::Position;
use derive_more::{Display, Error};

/// A move that `GameState::place` refused.
///
/// The state is guaranteed unchanged when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidMove {
    /// Row or column is outside 0..=2.
    #[display("Cell ({row}, {col}) is out of range")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {position} is already occupied")]
    Occupied {
        /// The occupied cell.
        position: Position,
    },

    /// The match has already been won or drawn.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for InvalidMove {}

/// The solver was asked for a move on a finished board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("No move available: the game is already over")]
pub struct NoMoveAvailable;

/// Text could not be parsed as a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board: {message}")]
pub struct ParseBoardError {
    /// What went wrong.
    pub message: String,
}

impl ParseBoardError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Text could not be parsed as a player.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid player {input:?}: expected A, B, O or X")]
pub struct ParsePlayerError {
    /// The rejected input.
    pub input: String,
}

impl ParsePlayerError {
    /// Creates a new parse error.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}
