//! Exhaustive minimax search.
//!
//! The solver walks the entire remaining game tree: no pruning, no depth
//! limit, no transposition table. A 3x3 board has at most 9! move orders,
//! so full search is cheap and guarantees the engine never loses.
//!
//! Every "what-if" move is made on one private working board through a
//! [`Hypothetical`] guard that empties the cell again when dropped. The
//! caller's [`GameState`] is only ever borrowed immutably.

use crate::error::NoMoveAvailable;
use crate::position::Position;
use crate::rules;
use crate::state::GameState;
use crate::types::{Board, Cell, Player};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Value of a position for the maximizing player under optimal play.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Score {
    /// The opponent can force a win.
    #[display("loss")]
    Loss = -1,
    /// Best play on both sides ends level.
    #[display("draw")]
    Draw = 0,
    /// The maximizing player can force a win.
    #[display("win")]
    Win = 1,
}

impl Score {
    /// Numeric value: -1, 0 or 1.
    pub fn value(self) -> i8 {
        self as i8
    }
}

/// Score of one candidate move, from the mover's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct MoveScore {
    /// The candidate cell.
    pub position: Position,
    /// Result of playing there, assuming optimal replies.
    pub score: Score,
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Boards evaluated, leaves included.
    pub nodes: u64,
    /// Deepest ply reached below the root.
    pub max_depth: u8,
}

/// Optimal move search for the side to move.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

impl Solver {
    /// Creates a solver.
    pub fn new() -> Self {
        Self
    }

    /// Picks the move for the side to move.
    ///
    /// Every empty cell is tried in scan order; the first one reaching the
    /// highest score wins, so ties go to the earliest cell.
    ///
    /// # Errors
    ///
    /// Returns [`NoMoveAvailable`] when the board is full or already won.
    pub fn best_move(&self, state: &GameState) -> Result<Position, NoMoveAvailable> {
        self.best_move_with_stats(state).map(|(position, _)| position)
    }

    /// Like [`Solver::best_move`], also returning search counters.
    #[instrument(skip_all, fields(turn = %state.current_turn()))]
    pub fn best_move_with_stats(
        &self,
        state: &GameState,
    ) -> Result<(Position, SearchStats), NoMoveAvailable> {
        if state.outcome().is_terminal() {
            return Err(NoMoveAvailable);
        }

        let (scores, stats) = self.search_root(state);
        let mut best: Option<MoveScore> = None;
        for candidate in scores {
            if best.is_none_or(|b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        let best = best.ok_or(NoMoveAvailable)?;
        debug!(
            position = %best.position,
            score = %best.score,
            nodes = stats.nodes,
            max_depth = stats.max_depth,
            "Best move chosen"
        );
        Ok((best.position, stats))
    }

    /// Scores every empty cell for the side to move, in scan order.
    ///
    /// Returns an empty list when the game is already over.
    #[instrument(skip_all, fields(turn = %state.current_turn()))]
    pub fn analyze(&self, state: &GameState) -> Vec<MoveScore> {
        if state.outcome().is_terminal() {
            return Vec::new();
        }
        self.search_root(state).0
    }

    /// Minimax value of `state` for `maximizer`.
    ///
    /// A board already won by `maximizer` is [`Score::Win`], one won by
    /// the opponent is [`Score::Loss`], a full board is [`Score::Draw`].
    /// Otherwise the side to move tries every empty cell and the values are
    /// combined with `max` when `maximizer` is moving and `min` otherwise.
    pub fn evaluate(&self, state: &GameState, maximizer: Player) -> Score {
        let mut board = state.board().clone();
        let mut search = Search::new(maximizer);
        search.evaluate(&mut board, state.current_turn() == maximizer, 0)
    }

    fn search_root(&self, state: &GameState) -> (Vec<MoveScore>, SearchStats) {
        let mover = state.current_turn();
        let mut board = state.board().clone();
        let mut search = Search::new(mover);
        let mut scores = Vec::with_capacity(9);

        for position in Position::ALL {
            if !board.is_empty(position) {
                continue;
            }
            let mut child = Hypothetical::place(&mut board, position, mover);
            let score = search.evaluate(&mut child, false, 1);
            scores.push(MoveScore::new(position, score));
        }

        (scores, search.stats)
    }
}

/// Recursive minimax over one working board.
struct Search {
    maximizer: Player,
    stats: SearchStats,
}

impl Search {
    fn new(maximizer: Player) -> Self {
        Self {
            maximizer,
            stats: SearchStats::default(),
        }
    }

    fn evaluate(&mut self, board: &mut Board, maximizing: bool, depth: u8) -> Score {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        match rules::check_winner(board) {
            Some(winner) if winner == self.maximizer => return Score::Win,
            Some(_) => return Score::Loss,
            None => {}
        }
        if rules::is_full(board) {
            return Score::Draw;
        }

        let mover = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };
        // Not full, so at least one child replaces these bounds.
        let mut best = if maximizing { Score::Loss } else { Score::Win };

        for position in Position::ALL {
            if !board.is_empty(position) {
                continue;
            }
            let mut child = Hypothetical::place(board, position, mover);
            let score = self.evaluate(&mut child, !maximizing, depth + 1);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }
}

/// A mark placed on a working board for the lifetime of the guard.
///
/// Dropping the guard empties the cell again, so the placement is undone
/// on every exit path.
struct Hypothetical<'a> {
    board: &'a mut Board,
    position: Position,
}

impl<'a> Hypothetical<'a> {
    fn place(board: &'a mut Board, position: Position, player: Player) -> Self {
        debug_assert!(board.is_empty(position));
        board.set(position, Cell::Occupied(player));
        Self { board, position }
    }
}

impl Deref for Hypothetical<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Hypothetical<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Hypothetical<'_> {
    fn drop(&mut self) {
        self.board.clear(self.position);
    }
}
