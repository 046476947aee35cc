//! Perfect Games library - a human against an engine that never loses.
//!
//! # Architecture
//!
//! - **Session**: one match between the human and the engine, with turn
//!   discipline and restart
//! - **Config**: TOML settings for the terminal front-end
//! - **Console**: line-based play over any reader and writer
//!
//! Game rules and search live in the `perfect_tictactoe` crate.
//!
//! # Example
//!
//! ```
//! use perfect_games::{MatchSession, PlayConfig};
//!
//! # fn example() -> Result<(), perfect_games::SessionError> {
//! let mut session = MatchSession::new(&PlayConfig::default());
//! let report = session.play_human(1, 1)?;
//! assert!(report.reply.is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod console;
mod session;

pub use config::{ConfigError, PlayConfig};
pub use console::{ConsoleCommand, run_console};
pub use session::{MatchSession, MoveReport, SessionError};
