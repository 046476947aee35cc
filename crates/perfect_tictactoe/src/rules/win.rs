//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Player, Position};

/// The eight lines of three, in scan order: rows, then columns, then the
/// two diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the owner of the first complete line in [`LINES`] order. A board
/// where both players hold a line cannot arise from legal play; it still
/// yields a single, deterministic answer.
pub fn check_winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| {
        let cell = board.get(a);
        match cell {
            Cell::Occupied(player) if cell == board.get(b) && cell == board.get(c) => Some(player),
            _ => None,
        }
    })
}
