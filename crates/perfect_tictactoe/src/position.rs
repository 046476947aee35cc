//! Named cells of the 3x3 board.

use crate::types::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell position on the board, in row-major order.
///
/// Rows and columns are numbered 0-2 from the top-left corner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Row 0, column 0
    TopLeft,
    /// Row 0, column 1
    TopCenter,
    /// Row 0, column 2
    TopRight,
    /// Row 1, column 0
    MiddleLeft,
    /// Row 1, column 1
    Center,
    /// Row 1, column 2
    MiddleRight,
    /// Row 2, column 0
    BottomLeft,
    /// Row 2, column 1
    BottomCenter,
    /// Row 2, column 2
    BottomRight,
}

impl Position {
    /// All 9 positions in scan order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates position from a row and column, each 0-2.
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Self::from_index(row * 3 + col)
        } else {
            None
        }
    }

    /// Row of this position (0-2).
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column of this position (0-2).
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// Row and column as a pair.
    pub fn row_col(self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// Parses typed input: an index `"4"`, a `"row col"` pair such as
    /// `"1 2"` or `"1,2"`, or a label such as `"center"`.
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Option<Position> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(num) = s.parse::<usize>() {
            return Self::from_index(num);
        }

        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if let [row, col] = parts.as_slice()
            && let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>())
        {
            return Self::from_row_col(row, col);
        }

        let s_lower = s.to_lowercase();
        <Position as strum::IntoEnumIterator>::iter()
            .find(|pos| pos.label().to_lowercase() == s_lower)
    }

    /// Filters positions by board state - returns only empty cells, in scan order.
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::ALL
            .iter()
            .copied()
            .filter(|pos| board.is_empty(*pos))
            .collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label(), self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Player};

    #[test]
    fn test_row_col_round_trip_matches_scan_order() {
        for (index, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.to_index(), index);
            assert_eq!(Position::from_row_col(pos.row(), pos.col()), Some(*pos));
        }
    }

    #[test]
    fn test_from_row_col_out_of_range() {
        assert_eq!(Position::from_row_col(3, 0), None);
        assert_eq!(Position::from_row_col(0, 3), None);
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_parse_typed_input() {
        assert_eq!(Position::from_label_or_number("4"), Some(Position::Center));
        assert_eq!(Position::from_label_or_number("2 2"), Some(Position::BottomRight));
        assert_eq!(Position::from_label_or_number("0,1"), Some(Position::TopCenter));
        assert_eq!(Position::from_label_or_number("bottom-left"), Some(Position::BottomLeft));
        assert_eq!(Position::from_label_or_number("9"), None);
        assert_eq!(Position::from_label_or_number("3 0"), None);
        assert_eq!(Position::from_label_or_number("left"), None);
    }

    #[test]
    fn test_valid_moves_filters_occupied() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Cell::Occupied(Player::A));
        board.set(Position::Center, Cell::Occupied(Player::B));

        let valid = Position::valid_moves(&board);
        assert_eq!(valid.len(), 7);
        assert!(!valid.contains(&Position::TopLeft));
        assert!(!valid.contains(&Position::Center));
        assert_eq!(valid.first(), Some(&Position::TopCenter));
    }
}
