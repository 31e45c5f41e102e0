//! The board: a fixed-length row of tubes sharing one capacity.
//!
//! The number of tubes never changes for the lifetime of a level, and no tube
//! ever holds more than `capacity` units. Only the rules module mutates tubes,
//! always by moving units between two tubes, so per-color totals are conserved.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::{BoardError, MoveError};
use super::tube::Tube;

/// Default slot count per tube.
pub const DEFAULT_CAPACITY: usize = 6;

/// An ordered row of tubes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    capacity: usize,
    tubes: Vec<Tube>,
}

impl Board {
    /// Create a board of `tube_count` empty tubes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn empty(capacity: usize, tube_count: usize) -> Self {
        assert!(capacity > 0, "Capacity must be at least 1");
        Self {
            capacity,
            tubes: vec![Tube::new(); tube_count],
        }
    }

    /// Build a board from explicit tubes, validating the capacity invariant.
    ///
    /// ```
    /// use water_sort::core::{Board, Color, Tube};
    ///
    /// let board = Board::from_tubes(
    ///     6,
    ///     vec![Tube::from_units(&[Color::Red; 6]), Tube::new()],
    /// )
    /// .unwrap();
    /// assert!(board.is_complete());
    /// ```
    pub fn from_tubes(capacity: usize, tubes: Vec<Tube>) -> Result<Self, BoardError> {
        let board = Self { capacity, tubes };
        board.validate()?;
        Ok(board)
    }

    /// Build a board whose tubes are known to respect `capacity`.
    pub(crate) fn from_dealt(capacity: usize, tubes: Vec<Tube>) -> Self {
        let board = Self { capacity, tubes };
        debug_assert!(board.validate().is_ok(), "dealt board violates capacity");
        board
    }

    /// Check `capacity >= 1` and `len <= capacity` for every tube.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.capacity == 0 {
            return Err(BoardError::ZeroCapacity);
        }
        for (index, tube) in self.tubes.iter().enumerate() {
            if tube.len() > self.capacity {
                return Err(BoardError::Overfilled {
                    index,
                    len: tube.len(),
                    capacity: self.capacity,
                });
            }
        }
        Ok(())
    }

    /// Slot count shared by every tube.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tubes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tubes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tubes.is_empty()
    }

    /// All tubes, left to right.
    #[must_use]
    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    /// Get a tube by index.
    #[must_use]
    pub fn tube(&self, index: usize) -> Option<&Tube> {
        self.tubes.get(index)
    }

    /// Get a tube, or a `TubeOutOfRange` error.
    pub fn checked_tube(&self, index: usize) -> Result<&Tube, MoveError> {
        self.tubes.get(index).ok_or(MoveError::TubeOutOfRange {
            index,
            len: self.tubes.len(),
        })
    }

    /// Units per color across the whole board.
    #[must_use]
    pub fn color_counts(&self) -> FxHashMap<Color, usize> {
        let mut counts = FxHashMap::default();
        for color in self.tubes.iter().flat_map(|t| t.units().iter().copied()) {
            *counts.entry(color).or_insert(0) += 1;
        }
        counts
    }

    /// Total units on the board.
    #[must_use]
    pub fn total_units(&self) -> usize {
        self.tubes.iter().map(Tube::len).sum()
    }

    /// Tubes that are empty or full-and-monochrome.
    #[must_use]
    pub fn settled_count(&self) -> usize {
        self.tubes
            .iter()
            .filter(|t| t.is_settled(self.capacity))
            .count()
    }

    /// Tubes holding `capacity` units of a single color.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tubes
            .iter()
            .filter(|t| t.is_complete(self.capacity))
            .count()
    }

    /// True when every tube is empty or full-and-monochrome.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tubes.iter().all(|t| t.is_settled(self.capacity))
    }

    /// Move `amount` units from the top of `from` onto `to`, one at a time.
    ///
    /// Callers have already checked indices, run length and free space.
    pub(crate) fn transfer(&mut self, from: usize, to: usize, amount: usize) {
        for _ in 0..amount {
            match self.tubes[from].pop() {
                Some(color) => self.tubes[to].push(color),
                None => break,
            }
        }
    }
}
