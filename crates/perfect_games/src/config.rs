//! Settings for the terminal front-end.

use derive_getters::Getters;
use derive_more::{Display, Error};
use perfect_tictactoe::Player;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Side the human plays. `A` moves first.
    #[serde(default = "default_human")]
    human: Player,

    /// Print the engine's score for every candidate after each reply.
    #[serde(default)]
    show_scores: bool,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_human() -> Player {
    Player::A
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human: default_human(),
            show_scores: false,
            log_filter: default_log_filter(),
        }
    }
}

impl PlayConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(human = %config.human, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Returns a copy with the human on `side`.
    pub fn with_human(mut self, side: Player) -> Self {
        self.human = side;
        self
    }

    /// Returns a copy with score printing switched on or off.
    pub fn with_show_scores(mut self, show: bool) -> Self {
        self.show_scores = show;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
