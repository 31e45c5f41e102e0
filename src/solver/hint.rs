//! Hint selection.

use crate::core::{Board, HintStrategy};
use crate::rules::first_legal_pour;

use super::search::Solver;

/// Pick the pour to suggest for `board`.
///
/// `FirstLegal` is deterministic given the board: the first `(from, to)` pair
/// in row-major order that passes the pour rule. `Solver` suggests the first
/// step of a found solution and falls back to `FirstLegal` when the solver
/// gives up. Returns `None` only when no legal pour exists.
#[must_use]
pub fn find_hint(board: &Board, strategy: HintStrategy, node_budget: usize) -> Option<(usize, usize)> {
    match strategy {
        HintStrategy::FirstLegal => first_legal_pour(board),
        HintStrategy::Solver => Solver::new(node_budget)
            .solve(board)
            .first_move()
            .or_else(|| first_legal_pour(board)),
    }
}
