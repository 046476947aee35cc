//! Core domain types for tic-tac-toe.

use crate::error::{ParseBoardError, ParsePlayerError};
use crate::position::Position;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Player {
    /// Player A (moves first, drawn as `O`).
    #[display("A")]
    A,
    /// Player B (drawn as `X`).
    #[display("B")]
    B,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Mark drawn on the board for this player.
    pub fn glyph(self) -> char {
        match self {
            Player::A => 'O',
            Player::B => 'X',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' | 'O' => Some(Player::A),
            'B' | 'X' => Some(Player::B),
            _ => None,
        }
    }
}

impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Player::from_char(c).ok_or_else(|| ParsePlayerError::new(s)),
            _ => Err(ParsePlayerError::new(s)),
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a player's mark.
    Occupied(Player),
}

impl Cell {
    /// Returns the owning player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Checks if nobody has played here.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Character used when rendering the board as text.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(player) => player.glyph(),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        Cell::Occupied(player)
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Empties the cell at the given position.
    pub fn clear(&mut self, pos: Position) {
        self.set(pos, Cell::Empty);
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Checks if no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Returns the owner of the first complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// Number of cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(player))
            .count()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                result.push(self.cells[row * 3 + col].glyph());
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses a compact diagram such as `"A../.A./BB."`.
    ///
    /// Rows are separated by `/` or newlines; a single row of nine cells is
    /// also accepted. `.` and `_` are empty, `A`/`O` and `B`/`X` are marks.
    /// `|` and whitespace inside a row are ignored, as are the `-+-+-`
    /// separator lines printed by [`Board::display`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(9);
        let mut rows = 0;

        for row in s.split(['/', '\n']) {
            // `-+-+-` separator lines from `display()`
            if row.chars().all(|c| matches!(c, '-' | '+') || c.is_whitespace()) {
                continue;
            }
            let before = cells.len();
            for c in row.chars().filter(|c| *c != '|' && !c.is_whitespace()) {
                let cell = match c {
                    '.' | '_' => Cell::Empty,
                    other => Player::from_char(other)
                        .map(Cell::Occupied)
                        .ok_or_else(|| ParseBoardError::new(format!("unexpected character {other:?}")))?,
                };
                cells.push(cell);
            }
            match cells.len() - before {
                3 | 9 => rows += 1,
                n => return Err(ParseBoardError::new(format!("row {} has {n} cells", rows + 1))),
            }
        }

        let cells: [Cell; 9] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| ParseBoardError::new(format!("expected 9 cells, found {}", v.len())))?;

        Ok(Self { cells })
    }
}

/// Outcome derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves remain and nobody has a line.
    Ongoing,
    /// A player completed a line.
    Win(Player),
    /// Board is full with no line.
    Draw,
}

impl Outcome {
    /// Returns true once the match is over.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Win(player) => write!(f, "Player {} ({}) wins", player, player.glyph()),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
