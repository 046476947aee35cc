//! Perfect Games - Unified CLI
//!
//! Play tic-tac-toe against an engine that never loses, watch it play
//! itself, or ask it to score a position.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use perfect_games::{MatchSession, PlayConfig, run_console};
use perfect_tictactoe::{Board, GameState, MoveScore, Outcome, Player, Position, Solver};
use serde::Serialize;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlayConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PlayConfig::default(),
    };

    let filter = cli.log_level.as_deref().unwrap_or(config.log_filter());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play { side, scores } => {
            let mut config = config;
            if let Some(side) = side {
                config = config.with_human(side);
            }
            if scores {
                config = config.with_show_scores(true);
            }
            run_play(&config)
        }
        Command::SelfPlay => run_self_play(),
        Command::Analyze { board, turn, json } => run_analyze(&board, turn, json),
    }
}

/// Run an interactive match on stdin/stdout
#[instrument(skip_all)]
fn run_play(config: &PlayConfig) -> Result<()> {
    info!(human = %config.human(), "Starting terminal match");
    let mut session = MatchSession::new(config);
    let stdin = std::io::stdin();
    run_console(&mut session, config, stdin.lock(), std::io::stdout())
        .context("Terminal session failed")?;
    Ok(())
}

/// Let the engine play against itself
#[instrument]
fn run_self_play() -> Result<()> {
    let solver = Solver::new();
    let mut state = GameState::new();

    while state.outcome() == Outcome::Ongoing {
        let turn = state.current_turn();
        let (pos, stats) = solver.best_move_with_stats(&state)?;
        state.place_at(pos, turn)?;
        println!("{} ({}) plays {} [{} nodes]", turn, turn.glyph(), pos, stats.nodes);
    }

    println!("{}", state.board().display());
    println!("{}", state.outcome());
    info!(outcome = %state.outcome(), "Self-play finished");
    Ok(())
}

/// Machine-readable result of `analyze`.
#[derive(Debug, Serialize)]
struct Analysis {
    turn: Player,
    outcome: Outcome,
    scores: Vec<MoveScore>,
    best: Option<Position>,
}

/// Score a position given as a diagram
#[instrument]
fn run_analyze(diagram: &str, turn: Option<Player>, json: bool) -> Result<()> {
    let board: Board = diagram.parse().context("Failed to parse board")?;
    let state = match turn {
        Some(turn) => GameState::from_parts(board, turn),
        None => GameState::from_board(board),
    };

    let solver = Solver::new();
    let analysis = Analysis {
        turn: state.current_turn(),
        outcome: state.outcome(),
        scores: solver.analyze(&state),
        best: solver.best_move(&state).ok(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{}", state.board().display());
    if analysis.outcome.is_terminal() {
        println!("{}", analysis.outcome);
        return Ok(());
    }

    println!("{} ({}) to move", analysis.turn, analysis.turn.glyph());
    for m in &analysis.scores {
        println!("  {}: {}", m.position, m.score);
    }
    if let Some(best) = analysis.best {
        println!("Best move: {best}");
    }
    Ok(())
}
