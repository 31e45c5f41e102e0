//! # water-sort
//!
//! A liquid-sorting puzzle engine: tubes hold stacks of colored units and the
//! player pours contiguous same-colored runs between them until every tube is
//! empty or full of a single color.
//!
//! ## Design Principles
//!
//! 1. **Engine Only**: No rendering, audio or timers. The host drives the
//!    clock with [`GameSession::update_elapsed_time`] and reads
//!    [`SessionSnapshot`]s and [`SessionEvent`]s.
//!
//! 2. **Never Fatal**: Every request returns a typed result; a rejected
//!    request leaves the session unchanged. Ignoring errors gives the classic
//!    silent no-op behavior.
//!
//! 3. **Deterministic**: All randomness flows through a seedable
//!    [`GameRng`], so a seed reproduces the same deals.
//!
//! ## Architecture
//!
//! - **Pure Rules**: Pour legality and transfer quantity live in `rules` as
//!   functions over a [`Board`]; the session never re-implements them.
//!
//! - **Persistent History**: Moves are kept in an `im::Vector` so snapshots
//!   share structure with the live session.
//!
//! ## Modules
//!
//! - `core`: Colors, tiers, tubes, boards, moves, RNG, configuration, errors
//! - `rules`: Pour legality, application and reversal
//! - `generator`: Procedural level deals
//! - `scoring`: Level score formula
//! - `solver`: Budgeted solver and hint selection
//! - `session`: The game state machine, snapshots and events
//! - `persistence`: Players, score records and the offline fallback

pub mod core;
pub mod generator;
pub mod persistence;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod solver;

// Re-export commonly used types
pub use crate::core::{
    Board, BoardError, Color, ConfigError, Difficulty, EngineConfig, GameRng, GameRngState,
    GeneratorConfig, HintStrategy, Move, MoveError, PersistenceError, RestartPolicy,
    SessionCodecError, SessionError, Tube, DEFAULT_CAPACITY,
};

pub use crate::generator::LevelGenerator;

pub use crate::scoring::{calculate_score, ScoreBreakdown};

pub use crate::solver::{find_hint, solve, SolveOutcome, Solver, SolverStats};

pub use crate::session::{
    GameSession, GameStatus, HintHighlight, InTransit, PourOutcome, PourToken, Selection,
    SessionEvent, SessionSnapshot,
};

pub use crate::persistence::{
    InMemoryGateway, LocalScoreStore, PersistenceGateway, Player, PlayerCache, PlayerId,
    PlayerStats, SaveOutcome, ScoreKeeper, ScoreRecord,
};
