//! Scoring: base points per tier minus move and time penalties plus a bonus
//! for unused hints.

pub mod score;

pub use score::{calculate_score, score_breakdown, ScoreBreakdown, HINT_BONUS, MOVE_PENALTY, SECOND_PENALTY};
