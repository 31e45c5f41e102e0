//! Level score.
//!
//! `score = base(difficulty) - 10 * moves - 2 * whole_seconds + 50 * hints_left`,
//! floored at zero. Whole seconds are `floor(elapsed_ms / 1000)`.

use serde::{Deserialize, Serialize};

use crate::core::Difficulty;

/// Points lost per move.
pub const MOVE_PENALTY: i64 = 10;

/// Points lost per whole elapsed second.
pub const SECOND_PENALTY: i64 = 2;

/// Points gained per unused hint.
pub const HINT_BONUS: i64 = 50;

/// Every term of a score, for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub move_penalty: u64,
    pub time_penalty: u64,
    pub hint_bonus: u64,
    /// Final score, never negative.
    pub total: u32,
}

/// Compute the full breakdown.
#[must_use]
pub fn score_breakdown(
    difficulty: Difficulty,
    move_count: usize,
    elapsed_ms: u64,
    hints_remaining: u32,
) -> ScoreBreakdown {
    let base = difficulty.base_score();
    let move_penalty = (move_count as u64).saturating_mul(MOVE_PENALTY as u64);
    let time_penalty = (elapsed_ms / 1000).saturating_mul(SECOND_PENALTY as u64);
    let hint_bonus = u64::from(hints_remaining) * HINT_BONUS as u64;

    let raw = i128::from(base) - i128::from(move_penalty) - i128::from(time_penalty)
        + i128::from(hint_bonus);
    let total = raw.clamp(0, i128::from(u32::MAX)) as u32;

    ScoreBreakdown {
        base,
        move_penalty,
        time_penalty,
        hint_bonus,
        total,
    }
}

/// Compute a level score.
///
/// ```
/// use water_sort::core::Difficulty;
/// use water_sort::scoring::calculate_score;
///
/// // 1000 - 10*20 - 2*30 + 50*2
/// assert_eq!(calculate_score(Difficulty::Easy, 20, 30_999, 2), 840);
/// ```
#[must_use]
pub fn calculate_score(
    difficulty: Difficulty,
    move_count: usize,
    elapsed_ms: u64,
    hints_remaining: u32,
) -> u32 {
    score_breakdown(difficulty, move_count, elapsed_ms, hints_remaining).total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_scores_with_no_penalties() {
        assert_eq!(calculate_score(Difficulty::Easy, 0, 0, 0), 1000);
        assert_eq!(calculate_score(Difficulty::Medium, 0, 0, 0), 1500);
        assert_eq!(calculate_score(Difficulty::Hard, 0, 0, 0), 2000);
        assert_eq!(calculate_score(Difficulty::ExtraHard, 0, 0, 0), 3000);
    }

    #[test]
    fn test_partial_seconds_are_floored() {
        assert_eq!(calculate_score(Difficulty::Easy, 0, 999, 0), 1000);
        assert_eq!(calculate_score(Difficulty::Easy, 0, 1000, 0), 998);
        assert_eq!(calculate_score(Difficulty::Easy, 0, 1999, 0), 998);
    }

    #[test]
    fn test_hint_bonus() {
        assert_eq!(calculate_score(Difficulty::Medium, 10, 60_000, 3), 1500 - 100 - 120 + 150);
    }

    #[test]
    fn test_floored_at_zero() {
        assert_eq!(calculate_score(Difficulty::Easy, 500, 0, 0), 0);
        assert_eq!(calculate_score(Difficulty::Easy, 0, u64::MAX, 0), 0);
    }

    #[test]
    fn test_breakdown_terms() {
        let b = score_breakdown(Difficulty::Hard, 7, 12_500, 1);
        assert_eq!(b.base, 2000);
        assert_eq!(b.move_penalty, 70);
        assert_eq!(b.time_penalty, 24);
        assert_eq!(b.hint_bonus, 50);
        assert_eq!(b.total, 2000 - 70 - 24 + 50);
    }
}
