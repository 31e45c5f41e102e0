//! Depth-first puzzle solver.
//!
//! Explores pours depth-first with an explicit stack, skipping states already
//! seen. States are keyed by their sorted tube multiset, so boards that only
//! differ by tube order are explored once.
//!
//! Candidate pours are ordered and pruned:
//! - pours onto a matching color are tried before pours into empty tubes
//! - only the first empty tube is considered (all empty tubes are equivalent)
//! - a monochrome tube is never poured whole into an empty tube

use std::time::Instant;

use rustc_hash::FxHashSet;

use crate::core::{Board, Tube};
use crate::rules::{apply_pour, check_pour};

use super::stats::SolverStats;

/// Result of a solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A sequence of `(from, to)` pours reaching a complete board.
    Solved(Vec<(usize, usize)>),
    /// Every reachable state was explored without completing the board.
    Unsolvable,
    /// The node budget ran out first.
    BudgetExhausted,
}

impl SolveOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    /// First pour of the solution, if one was found and is non-empty.
    #[must_use]
    pub fn first_move(&self) -> Option<(usize, usize)> {
        match self {
            SolveOutcome::Solved(path) => path.first().copied(),
            _ => None,
        }
    }
}

struct Frame {
    board: Board,
    candidates: Vec<(usize, usize)>,
    next: usize,
}

/// Budgeted depth-first solver.
pub struct Solver {
    node_budget: usize,
    stats: SolverStats,
}

impl Solver {
    /// Create a solver that expands at most `node_budget` states per solve.
    #[must_use]
    pub fn new(node_budget: usize) -> Self {
        Self {
            node_budget,
            stats: SolverStats::default(),
        }
    }

    /// Statistics from the most recent solve.
    #[must_use]
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Search for a solution from `board`.
    pub fn solve(&mut self, board: &Board) -> SolveOutcome {
        self.stats.reset();
        let start = Instant::now();
        let outcome = self.search(board);
        self.stats.time_us = start.elapsed().as_micros() as u64;

        tracing::debug!(
            nodes = self.stats.nodes_expanded,
            duplicates = self.stats.duplicates,
            max_depth = self.stats.max_depth,
            solved = outcome.is_solved(),
            "solver finished"
        );
        outcome
    }

    fn search(&mut self, board: &Board) -> SolveOutcome {
        if board.is_complete() {
            return SolveOutcome::Solved(Vec::new());
        }

        let mut visited: FxHashSet<Vec<Tube>> = FxHashSet::default();
        visited.insert(state_key(board));

        let mut stack = vec![self.frame(board.clone())];
        let mut path: Vec<(usize, usize)> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            let Some(&(from, to)) = frame.candidates.get(frame.next) else {
                stack.pop();
                path.pop();
                continue;
            };
            frame.next += 1;

            let mut next = frame.board.clone();
            if apply_pour(&mut next, from, to).is_err() {
                continue;
            }
            if !visited.insert(state_key(&next)) {
                self.stats.duplicates += 1;
                continue;
            }
            if self.stats.nodes_expanded >= self.node_budget {
                return SolveOutcome::BudgetExhausted;
            }
            self.stats.nodes_expanded += 1;

            path.push((from, to));
            self.stats.max_depth = self.stats.max_depth.max(path.len());
            if next.is_complete() {
                return SolveOutcome::Solved(path);
            }
            let frame = self.frame(next);
            stack.push(frame);
        }

        SolveOutcome::Unsolvable
    }

    fn frame(&mut self, board: Board) -> Frame {
        let candidates = self.candidates(&board);
        Frame {
            board,
            candidates,
            next: 0,
        }
    }

    fn candidates(&mut self, board: &Board) -> Vec<(usize, usize)> {
        let first_empty = board.tubes().iter().position(Tube::is_empty);
        let mut onto_color = Vec::new();
        let mut into_empty = Vec::new();

        for (from, source) in board.tubes().iter().enumerate() {
            if source.is_empty() || source.is_complete(board.capacity()) {
                continue;
            }
            for (to, dest) in board.tubes().iter().enumerate() {
                if check_pour(board, from, to).is_err() {
                    continue;
                }
                if dest.is_empty() {
                    if Some(to) != first_empty || source.is_monochrome() {
                        self.stats.pruned += 1;
                        continue;
                    }
                    into_empty.push((from, to));
                } else {
                    onto_color.push((from, to));
                }
            }
        }

        onto_color.extend(into_empty);
        onto_color
    }
}

/// Search for a solution with the given node budget.
///
/// ```
/// use water_sort::core::{Board, Color, Tube};
/// use water_sort::solver::{solve, SolveOutcome};
///
/// let board = Board::from_tubes(
///     2,
///     vec![
///         Tube::from_units(&[Color::Red, Color::Blue]),
///         Tube::from_units(&[Color::Blue, Color::Red]),
///         Tube::new(),
///     ],
/// )
/// .unwrap();
/// assert!(solve(&board, 1_000).is_solved());
/// ```
#[must_use]
pub fn solve(board: &Board, node_budget: usize) -> SolveOutcome {
    Solver::new(node_budget).solve(board)
}

fn state_key(board: &Board) -> Vec<Tube> {
    let mut tubes = board.tubes().to_vec();
    tubes.sort_unstable_by(|a, b| a.units().cmp(b.units()));
    tubes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;
    use crate::rules::apply_pour;

    use Color::{Blue, Green, Red};

    fn board(capacity: usize, tubes: &[&[Color]]) -> Board {
        Board::from_tubes(capacity, tubes.iter().map(|t| Tube::from_units(t)).collect()).unwrap()
    }

    fn replay(board: &Board, path: &[(usize, usize)]) -> Board {
        let mut b = board.clone();
        for &(from, to) in path {
            apply_pour(&mut b, from, to).expect("solver emitted an illegal pour");
        }
        b
    }

    #[test]
    fn test_already_complete() {
        let b = board(2, &[&[Red, Red], &[]]);
        assert_eq!(solve(&b, 10), SolveOutcome::Solved(vec![]));
        assert_eq!(solve(&b, 10).first_move(), None);
    }

    #[test]
    fn test_solution_replays_to_complete() {
        let b = board(3, &[&[Red, Blue, Red], &[Blue, Red, Blue], &[]]);
        let outcome = solve(&b, 10_000);
        let SolveOutcome::Solved(path) = outcome else {
            panic!("expected a solution");
        };
        assert!(!path.is_empty());
        assert!(replay(&b, &path).is_complete());
    }

    #[test]
    fn test_three_colors_with_two_spares() {
        let b = board(
            4,
            &[
                &[Red, Blue, Green, Red],
                &[Green, Red, Blue, Blue],
                &[Blue, Green, Red, Green],
                &[],
                &[],
            ],
        );
        let mut solver = Solver::new(100_000);
        let outcome = solver.solve(&b);
        let SolveOutcome::Solved(path) = outcome else {
            panic!("expected a solution, got {outcome:?}");
        };
        assert!(replay(&b, &path).is_complete());
        assert!(solver.stats().nodes_expanded > 0);
    }

    #[test]
    fn test_stuck_board_is_unsolvable() {
        let b = board(2, &[&[Red, Blue], &[Blue, Red]]);
        assert_eq!(solve(&b, 1_000), SolveOutcome::Unsolvable);
    }

    #[test]
    fn test_budget_exhausted() {
        let b = board(3, &[&[Red, Blue, Red], &[Blue, Red, Blue], &[]]);
        assert_eq!(solve(&b, 0), SolveOutcome::BudgetExhausted);
    }

    #[test]
    fn test_state_key_ignores_tube_order() {
        let a = board(2, &[&[Red], &[Blue]]);
        let b = board(2, &[&[Blue], &[Red]]);
        assert_eq!(state_key(&a), state_key(&b));
    }
}
