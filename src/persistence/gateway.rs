//! The remote score backend, as seen by the game.

use crate::core::{Difficulty, PersistenceError};

use super::record::{Player, PlayerId, ScoreRecord};

/// Default leaderboard length.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Player identity and score storage.
///
/// Any call may fail with [`PersistenceError::Unavailable`]; callers decide
/// whether to fall back (see [`ScoreKeeper`](super::ScoreKeeper)).
pub trait PersistenceGateway {
    /// Look a player up by exact name, creating one if none exists.
    fn find_or_create_player(&mut self, name: &str) -> Result<Player, PersistenceError>;

    /// Append a score and return the stored record.
    fn save_score(&mut self, record: ScoreRecord) -> Result<ScoreRecord, PersistenceError>;

    /// All players, newest first.
    fn all_players(&self) -> Result<Vec<Player>, PersistenceError>;

    /// One player's scores, newest first. Unknown ids are `NotFound`.
    fn player_scores(&self, player_id: &PlayerId) -> Result<Vec<ScoreRecord>, PersistenceError>;

    /// Highest scores across all players.
    fn leaderboard(&self, limit: usize) -> Result<Vec<ScoreRecord>, PersistenceError>;

    /// Highest scores within one difficulty.
    fn leaderboard_by_difficulty(
        &self,
        difficulty: Difficulty,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, PersistenceError>;
}
