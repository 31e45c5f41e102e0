//! Level generation.
//!
//! A deal for tier `d` with capacity `c`:
//! 1. take the first `d.tube_count() - 2` colors of the tier palette
//! 2. build a multiset of exactly `c` units per color
//! 3. shuffle it uniformly (Fisher-Yates)
//! 4. cut it into consecutive chunks of `c`, one per filled tube
//! 5. append the two empty tubes
//!
//! Every color can always be gathered into one tube in principle. Whether the
//! pour rule admits a full solution from the shuffled state is only checked
//! when [`GeneratorConfig::require_solvable`] is set.

use crate::core::{Board, Color, Difficulty, EngineConfig, GameRng, GeneratorConfig, Tube, EMPTY_TUBES};
use crate::solver::{SolveOutcome, Solver};

/// Deal a random board for `level` at `difficulty`.
///
/// The level number does not influence the deal; all randomness comes from
/// `rng`.
///
/// ```
/// use water_sort::core::{Difficulty, GameRng};
/// use water_sort::generator::generate;
///
/// let board = generate(1, Difficulty::Easy, 6, &mut GameRng::new(42));
/// assert_eq!(board.len(), 4);
/// assert!(board.tube(2).unwrap().is_empty());
/// assert!(board.tube(3).unwrap().is_empty());
/// ```
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[must_use]
pub fn generate(level: u32, difficulty: Difficulty, capacity: usize, rng: &mut GameRng) -> Board {
    assert!(capacity > 0, "Capacity must be at least 1");
    let colors = difficulty.colors();

    let mut units: Vec<Color> = colors
        .iter()
        .flat_map(|&color| std::iter::repeat(color).take(capacity))
        .collect();
    rng.shuffle(&mut units);

    let mut tubes: Vec<Tube> = units.chunks(capacity).map(Tube::from_units).collect();
    tubes.extend(std::iter::repeat_with(Tube::new).take(EMPTY_TUBES));
    let board = Board::from_dealt(capacity, tubes);

    tracing::debug!(
        level,
        difficulty = %difficulty,
        tubes = board.len(),
        colors = colors.len(),
        "dealt level"
    );
    board
}

/// Generator bound to an engine configuration.
#[derive(Clone, Debug)]
pub struct LevelGenerator {
    capacity: usize,
    config: GeneratorConfig,
}

impl LevelGenerator {
    /// Create a generator from engine settings.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            capacity: config.capacity,
            config: config.generator.clone(),
        }
    }

    /// Slots per tube on generated boards.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Deal a board, re-dealing until it is provably solvable when required.
    ///
    /// If no attempt is verified within `max_attempts`, the last deal is kept.
    #[must_use]
    pub fn generate(&self, level: u32, difficulty: Difficulty, rng: &mut GameRng) -> Board {
        let mut board = generate(level, difficulty, self.capacity, rng);
        if !self.config.require_solvable {
            return board;
        }

        let mut solver = Solver::new(self.config.solver_node_budget);
        for attempt in 1..=self.config.max_attempts {
            match solver.solve(&board) {
                SolveOutcome::Solved(path) => {
                    tracing::debug!(level, attempt, solution_len = path.len(), "verified deal");
                    return board;
                }
                outcome => {
                    tracing::debug!(level, attempt, ?outcome, "rejected deal");
                }
            }
            if attempt < self.config.max_attempts {
                board = generate(level, difficulty, self.capacity, rng);
            }
        }

        tracing::warn!(
            level,
            difficulty = %difficulty,
            attempts = self.config.max_attempts,
            "no verified deal found, keeping last board"
        );
        board
    }
}
