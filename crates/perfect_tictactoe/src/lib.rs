//! Pure tic-tac-toe logic with an engine that never loses.
//!
//! The crate holds two pieces:
//!
//! - **GameState**: the 3x3 board, whose turn it is, and the derived
//!   outcome (win, draw, or still open).
//! - **Solver**: exhaustive minimax over the remaining game tree. No
//!   pruning, no depth limit; the tree is small enough to search in full.
//!
//! Nothing here renders, reads input, or keeps global state. A caller owns
//! a [`GameState`], feeds it validated moves, and asks the [`Solver`] for
//! the automated player's reply.
//!
//! # Example
//!
//! ```
//! use perfect_tictactoe::{GameState, Outcome, Player, Solver};
//!
//! let mut state = GameState::new();
//! state.place(1, 1, Player::A)?;
//!
//! let reply = Solver::new().best_move(&state)?;
//! state.place_at(reply, Player::B)?;
//! assert_eq!(state.outcome(), Outcome::Ongoing);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod position;
pub mod rules;
mod solver;
mod state;
mod types;

pub use error::{InvalidMove, NoMoveAvailable, ParseBoardError, ParsePlayerError};
pub use position::Position;
pub use solver::{MoveScore, Score, SearchStats, Solver};
pub use state::{GameState, STARTING_PLAYER};
pub use types::{Board, Cell, Outcome, Player};
