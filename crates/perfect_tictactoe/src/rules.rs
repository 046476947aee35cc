//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Both `GameState` and the
//! solver's working board go through these, so there is a single
//! definition of a win and a draw.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner};
