//! Core puzzle types: colors, tiers, tubes, boards, moves, RNG, configuration.
//!
//! Everything here is plain data plus structural queries. Pour legality and
//! state transitions live in [`rules`](crate::rules) and
//! [`session`](crate::session).

pub mod action;
pub mod board;
pub mod color;
pub mod config;
pub mod error;
pub mod rng;
pub mod tube;

pub use action::Move;
pub use board::{Board, DEFAULT_CAPACITY};
pub use color::{Color, Difficulty, EMPTY_TUBES};
pub use config::{EngineConfig, GeneratorConfig, HintStrategy, RestartPolicy, MAX_CAPACITY};
pub use error::{
    BoardError, ConfigError, MoveError, PersistenceError, SessionCodecError, SessionError,
};
pub use rng::{GameRng, GameRngState};
pub use tube::Tube;
