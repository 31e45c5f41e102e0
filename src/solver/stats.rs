//! Solver statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during a solve.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SolverStats {
    /// Board states expanded.
    pub nodes_expanded: usize,

    /// States skipped because they were already visited.
    pub duplicates: usize,

    /// Pours skipped as dominated (never needed in a shortest solution).
    pub pruned: usize,

    /// Deepest search path reached.
    pub max_depth: usize,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SolverStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Expanded nodes per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
