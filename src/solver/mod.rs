//! Solver and hint search.
//!
//! - `search`: budgeted depth-first solver used for solvability checks
//! - `hint`: picks the pour suggested to the player
//! - `stats`: solver diagnostics

pub mod hint;
pub mod search;
pub mod stats;

pub use hint::find_hint;
pub use search::{solve, SolveOutcome, Solver};
pub use stats::SolverStats;
