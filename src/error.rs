use std::path::PathBuf;

use crate::game::Player;

/// Errors raised when a move request is rejected. The board the request was
/// made against is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("{player} may not make a move now")]
    NotYourTurn { player: Player },

    #[error("game is already over")]
    GameOver,

    #[error("pit {0} is empty")]
    EmptyPit(usize),

    #[error("pit {pit} does not belong to {player}")]
    InvalidPit { pit: usize, player: Player },

    #[error("cannot count the seeds of nobody")]
    NoSeedsForNobody,
}

impl MoveError {
    /// True for rule violations (wrong turn, game over, empty pit), false for
    /// malformed arguments.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            MoveError::NotYourTurn { .. } | MoveError::GameOver | MoveError::EmptyPit(_)
        )
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
