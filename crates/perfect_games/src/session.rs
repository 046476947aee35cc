//! One match between a human and the engine.

use crate::config::PlayConfig;
use perfect_tictactoe::{
    GameState, InvalidMove, MoveScore, NoMoveAvailable, Outcome, Player, Position, Solver,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Error from a session operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// The move itself was illegal.
    #[display("{}", _0)]
    InvalidMove(InvalidMove),

    /// The engine had nothing to play.
    #[display("{}", _0)]
    NoMoveAvailable(NoMoveAvailable),

    /// The match is over; restart to play again.
    #[display("Game is over. Restart to play again")]
    #[from(skip)]
    GameOver,

    /// It is the engine's move, not the human's.
    #[display("It's not your turn")]
    #[from(skip)]
    NotHumanTurn,

    /// It is the human's move, not the engine's.
    #[display("It's the human's turn")]
    #[from(skip)]
    NotEngineTurn,
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::InvalidMove(e) => Some(e),
            SessionError::NoMoveAvailable(e) => Some(e),
            SessionError::GameOver
            | SessionError::NotHumanTurn
            | SessionError::NotEngineTurn => None,
        }
    }
}

/// What happened during one accepted human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    /// Where the human played.
    pub human: Position,
    /// The engine's reply, if the game was still open.
    pub reply: Option<Position>,
    /// Outcome after both half-moves.
    pub outcome: Outcome,
}

/// A match session: owns the game state and applies the engine's replies.
#[derive(Debug, Clone)]
pub struct MatchSession {
    state: GameState,
    human: Player,
    solver: Solver,
}

impl MatchSession {
    /// Creates a session with an empty board.
    #[instrument(skip(config), fields(human = %config.human()))]
    pub fn new(config: &PlayConfig) -> Self {
        Self {
            state: GameState::new(),
            human: *config.human(),
            solver: Solver::new(),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current outcome.
    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    /// Side the human plays.
    pub fn human(&self) -> Player {
        self.human
    }

    /// Side the engine plays.
    pub fn engine(&self) -> Player {
        self.human.opponent()
    }

    /// True when the engine should move next.
    pub fn engine_to_move(&self) -> bool {
        self.outcome() == Outcome::Ongoing && self.state.current_turn() == self.engine()
    }

    /// Plays the human's mark at `row`, `col`, then the engine's reply.
    ///
    /// # Errors
    ///
    /// - [`SessionError::GameOver`] once the match has ended
    /// - [`SessionError::NotHumanTurn`] when the engine is due to move
    /// - [`SessionError::InvalidMove`] for an occupied or out-of-range cell
    ///
    /// A rejected human move leaves the state unchanged.
    #[instrument(skip(self))]
    pub fn play_human(&mut self, row: usize, col: usize) -> Result<MoveReport, SessionError> {
        if self.outcome().is_terminal() {
            warn!("Move attempted after game over");
            return Err(SessionError::GameOver);
        }
        if self.state.current_turn() != self.human {
            warn!("Move attempted out of turn");
            return Err(SessionError::NotHumanTurn);
        }

        let human = Position::from_row_col(row, col).ok_or_else(|| {
            warn!(row, col, "Move out of range");
            InvalidMove::OutOfRange { row, col }
        })?;
        self.state.place_at(human, self.human)?;
        debug!(position = %human, "Human moved");

        let reply = if self.outcome() == Outcome::Ongoing {
            Some(self.reply()?)
        } else {
            None
        };

        let outcome = self.outcome();
        if outcome.is_terminal() {
            info!(%outcome, "Game finished");
        }

        Ok(MoveReport {
            human,
            reply,
            outcome,
        })
    }

    /// Lets the engine play its move.
    ///
    /// Needed when the engine owns the opening move; after that
    /// [`MatchSession::play_human`] answers for it.
    ///
    /// # Errors
    ///
    /// [`SessionError::GameOver`] once the match has ended,
    /// [`SessionError::NotEngineTurn`] when the human is due to move.
    #[instrument(skip(self))]
    pub fn play_engine(&mut self) -> Result<Position, SessionError> {
        if self.outcome().is_terminal() {
            return Err(SessionError::GameOver);
        }
        if !self.engine_to_move() {
            return Err(SessionError::NotEngineTurn);
        }
        self.reply()
    }

    fn reply(&mut self) -> Result<Position, SessionError> {
        let position = self.solver.best_move(&self.state)?;
        self.state.place_at(position, self.engine())?;
        debug!(%position, "Engine moved");
        Ok(position)
    }

    /// Engine's view of every move open to the human right now.
    pub fn hint(&self) -> Vec<MoveScore> {
        self.solver.analyze(&self.state)
    }

    /// Clears the board for a new match. The engine does not move on its own.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Restarting match");
        self.state.reset();
    }
}
