//! Engine error types.
//!
//! None of these are fatal. Every rejected request leaves the session exactly
//! as it was, so a host that ignores the `Err` gets the classic silent no-op.

use std::path::PathBuf;

/// Why a pour, undo or hint request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("tube {index} is out of range (board has {len} tubes)")]
    TubeOutOfRange { index: usize, len: usize },

    #[error("cannot pour tube {0} into itself")]
    SameTube(usize),

    #[error("source tube {0} is empty")]
    EmptySource(usize),

    #[error("destination tube {0} is full")]
    DestinationFull(usize),

    #[error("top colors of tubes {from} and {to} differ")]
    ColorMismatch { from: usize, to: usize },

    #[error("no moves to undo")]
    NoHistory,

    #[error("no hints remaining")]
    HintsExhausted,

    #[error("no valid move exists")]
    NoValidMove,

    #[error("session is paused")]
    Paused,

    #[error("a pour is already in flight")]
    PourInFlight,

    #[error("pour token is stale or was already committed")]
    StalePour,
}

impl MoveError {
    /// True for pour-rule violations (as opposed to history, hint or session
    /// state rejections).
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            MoveError::TubeOutOfRange { .. }
                | MoveError::SameTube(_)
                | MoveError::EmptySource(_)
                | MoveError::DestinationFull(_)
                | MoveError::ColorMismatch { .. }
        )
    }
}

/// A board fixture violated a structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("capacity must be at least 1")]
    ZeroCapacity,

    #[error("tube {index} holds {len} units but capacity is {capacity}")]
    Overfilled {
        index: usize,
        len: usize,
        capacity: usize,
    },
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

/// Errors from building a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid engine config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

/// Errors from suspending or resuming a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionCodecError {
    #[error("failed to encode session: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode session: {0}")]
    Decode(#[source] bincode::Error),

    #[error("decoded board is invalid: {0}")]
    Corrupt(#[from] BoardError),

    #[error("decoded session has an invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("decoded session is inconsistent: {0}")]
    Inconsistent(String),
}

/// Errors from the score gateway or the local score store.
///
/// The engine never returns these; `ScoreKeeper` turns them into a fallback.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("score backend unavailable: {0}")]
    Unavailable(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
