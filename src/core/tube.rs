//! A single tube: a capacity-bounded stack of colored units.
//!
//! Index 0 is the bottom, the last index is the top (the pourable end).
//! The tube itself does not know its capacity; the owning [`Board`](super::Board)
//! holds one capacity for every tube and enforces `len <= capacity`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;

/// A stack of colored units.
///
/// SmallVec keeps the default 6-slot tube inline without heap allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tube {
    units: SmallVec<[Color; 8]>,
}

impl Tube {
    /// Create an empty tube.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tube from units listed bottom to top.
    #[must_use]
    pub fn from_units(units: &[Color]) -> Self {
        Self {
            units: SmallVec::from_slice(units),
        }
    }

    /// Units, bottom to top.
    #[must_use]
    pub fn units(&self) -> &[Color] {
        &self.units
    }

    /// Number of units in the tube.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn is_full(&self, capacity: usize) -> bool {
        self.units.len() >= capacity
    }

    /// Free slots left for the given capacity.
    #[must_use]
    pub fn space(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.units.len())
    }

    /// Top color, or `None` when empty.
    #[must_use]
    pub fn top(&self) -> Option<Color> {
        self.units.last().copied()
    }

    /// Length of the contiguous same-colored run at the top.
    ///
    /// ```
    /// use water_sort::core::{Color, Tube};
    ///
    /// let tube = Tube::from_units(&[Color::Red, Color::Blue, Color::Blue]);
    /// assert_eq!(tube.top_run_len(), 2);
    /// assert_eq!(Tube::new().top_run_len(), 0);
    /// ```
    #[must_use]
    pub fn top_run_len(&self) -> usize {
        let Some(top) = self.top() else {
            return 0;
        };
        self.units.iter().rev().take_while(|&&c| c == top).count()
    }

    /// True when every unit shares one color (vacuously true when empty).
    #[must_use]
    pub fn is_monochrome(&self) -> bool {
        self.units.windows(2).all(|w| w[0] == w[1])
    }

    /// Full and monochrome.
    #[must_use]
    pub fn is_complete(&self, capacity: usize) -> bool {
        self.units.len() == capacity && self.is_monochrome()
    }

    /// Empty, or full and monochrome.
    #[must_use]
    pub fn is_settled(&self, capacity: usize) -> bool {
        self.is_empty() || self.is_complete(capacity)
    }

    pub(crate) fn push(&mut self, color: Color) {
        self.units.push(color);
    }

    pub(crate) fn pop(&mut self) -> Option<Color> {
        self.units.pop()
    }
}
