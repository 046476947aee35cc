//! Line-based terminal front-end for a match.
//!
//! Reads one command per line and writes the board after every accepted
//! move. Generic over the reader and writer so it can be driven from tests.

use crate::config::PlayConfig;
use crate::session::{MatchSession, SessionError};
use perfect_tictactoe::{Outcome, Position};
use std::io::{self, BufRead, Write};
use tracing::{debug, instrument};

const HELP: &str = "Enter a move as `row col` (0-2), an index 0-8 or a name like `center`.\n\
                    `?` shows the engine's view, `r` restarts, `q` quits.";

/// A parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Play at a cell.
    Move(Position),
    /// Start a new match.
    Restart,
    /// Show the engine's scores for the open cells.
    Hint,
    /// Show usage.
    Help,
    /// Leave.
    Quit,
}

impl ConsoleCommand {
    /// Parses one line of input.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "q" | "quit" | "exit" => Some(ConsoleCommand::Quit),
            "r" | "restart" => Some(ConsoleCommand::Restart),
            "?" | "hint" => Some(ConsoleCommand::Hint),
            "h" | "help" => Some(ConsoleCommand::Help),
            other => Position::from_label_or_number(other).map(ConsoleCommand::Move),
        }
    }
}

/// Runs a match until `q` or end of input.
#[instrument(skip_all, fields(human = %session.human()))]
pub fn run_console<R: BufRead, W: Write>(
    session: &mut MatchSession,
    config: &PlayConfig,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(
        output,
        "You are {} ({}). {}",
        session.human(),
        session.human().glyph(),
        HELP
    )?;
    open_match(session, &mut output)?;
    prompt(session, config, &mut output)?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = ConsoleCommand::parse(&line) else {
            if !line.trim().is_empty() {
                writeln!(output, "Unrecognized input {:?}. Type `h` for help.", line.trim())?;
            }
            continue;
        };
        debug!(?command, "Console command");

        match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => writeln!(output, "{HELP}")?,
            ConsoleCommand::Hint => write_hint(session, &mut output)?,
            ConsoleCommand::Restart => {
                session.restart();
                writeln!(output, "New game.")?;
                open_match(session, &mut output)?;
            }
            ConsoleCommand::Move(pos) => match session.play_human(pos.row(), pos.col()) {
                Ok(report) => {
                    if let Some(reply) = report.reply {
                        writeln!(output, "Engine plays {reply}.")?;
                    }
                    writeln!(output, "{}", session.state().board().display())?;
                    write_outcome(report.outcome, &mut output)?;
                }
                Err(e @ SessionError::GameOver) => writeln!(output, "{e}. Press r to play again or q to quit.")?,
                Err(e) => writeln!(output, "{e}")?,
            },
        }
        prompt(session, config, &mut output)?;
    }

    Ok(())
}

/// Prints the empty board, letting the engine open if it moves first.
fn open_match<W: Write>(session: &mut MatchSession, output: &mut W) -> io::Result<()> {
    if session.engine_to_move() {
        match session.play_engine() {
            Ok(pos) => writeln!(output, "Engine opens at {pos}.")?,
            Err(e) => writeln!(output, "{e}")?,
        }
    }
    writeln!(output, "{}", session.state().board().display())
}

fn prompt<W: Write>(session: &MatchSession, config: &PlayConfig, output: &mut W) -> io::Result<()> {
    if session.outcome() == Outcome::Ongoing {
        if *config.show_scores() {
            write_hint(session, output)?;
        }
        write!(output, "> ")?;
    }
    output.flush()
}

fn write_hint<W: Write>(session: &MatchSession, output: &mut W) -> io::Result<()> {
    let scores = session.hint();
    if scores.is_empty() {
        return writeln!(output, "No moves left.");
    }
    for m in scores {
        writeln!(output, "  {}: {}", m.position, m.score)?;
    }
    Ok(())
}

fn write_outcome<W: Write>(outcome: Outcome, output: &mut W) -> io::Result<()> {
    match outcome {
        Outcome::Ongoing => Ok(()),
        Outcome::Win(_) | Outcome::Draw => {
            writeln!(output, "{outcome}! Press r to play again or q to quit.")
        }
    }
}
