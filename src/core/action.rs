//! Move records.
//!
//! Every committed pour appends one [`Move`] to the session history. Records
//! are immutable once created and are only ever popped from the tail (undo).

use serde::{Deserialize, Serialize};

/// A committed pour.
///
/// ## Example
///
/// ```
/// use water_sort::core::Move;
///
/// let mv = Move::new(0, 3, 2, 1500);
/// assert_eq!((mv.from, mv.to), (0, 3));
/// assert_eq!(mv.amount, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Source tube index.
    pub from: usize,

    /// Destination tube index.
    pub to: usize,

    /// Units transferred. Undo moves back exactly this many.
    pub amount: usize,

    /// Session-elapsed milliseconds when the pour was committed.
    pub timestamp_ms: u64,
}

impl Move {
    /// Create a new move record.
    #[must_use]
    pub const fn new(from: usize, to: usize, amount: usize, timestamp_ms: u64) -> Self {
        Self {
            from,
            to,
            amount,
            timestamp_ms,
        }
    }

    /// The `(from, to)` pair, as used by hints and solver output.
    #[must_use]
    pub const fn pair(&self) -> (usize, usize) {
        (self.from, self.to)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} (x{})", self.from, self.to, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_pair_and_display() {
        let mv = Move::new(2, 5, 3, 0);
        assert_eq!(mv.pair(), (2, 5));
        assert_eq!(mv.to_string(), "2 -> 5 (x3)");
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::new(1, 0, 1, 4200);
        let json = serde_json::to_string(&mv).unwrap();
        let deserialized: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, deserialized);
    }
}
