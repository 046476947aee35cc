//! Command-line interface for perfect_games.

use clap::{Parser, Subcommand};
use perfect_tictactoe::Player;
use std::path::PathBuf;

/// Perfect Games - tic-tac-toe against an engine that never loses
#[derive(Parser, Debug)]
#[command(name = "perfect_games")]
#[command(about = "Play tic-tac-toe against an optimal minimax engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Tracing filter, overriding the config (RUST_LOG still wins)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in the terminal
    Play {
        /// Side to play: A moves first, B moves second
        #[arg(long = "as", value_name = "SIDE")]
        side: Option<Player>,

        /// Show the engine's score for every open cell before each move
        #[arg(long)]
        scores: bool,
    },

    /// Let the engine play both sides from the empty board
    SelfPlay,

    /// Score every open cell of a position
    Analyze {
        /// Board diagram, rows separated by `/`, e.g. "A../.A./BB."
        #[arg(short, long)]
        board: String,

        /// Side to move (inferred from the mark counts if omitted)
        #[arg(short, long)]
        turn: Option<Player>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
