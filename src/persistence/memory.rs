//! In-process gateway.
//!
//! Stores everything in vectors and can be switched offline to exercise the
//! fallback paths.

use crate::core::{Difficulty, PersistenceError};

use super::gateway::PersistenceGateway;
use super::record::{Player, PlayerId, ScoreRecord};

/// Gateway backed by process memory.
#[derive(Clone, Debug)]
pub struct InMemoryGateway {
    online: bool,
    /// Insertion order; newest last.
    players: Vec<Player>,
    scores: Vec<ScoreRecord>,
    next_id: u64,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self {
            online: true,
            players: Vec::new(),
            scores: Vec::new(),
            next_id: 1,
        }
    }

    /// Start disconnected.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            online: false,
            ..Self::new()
        }
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Number of stored scores, readable even while offline.
    #[must_use]
    pub fn score_count(&self) -> usize {
        self.scores.len()
    }

    fn ensure_online(&self) -> Result<(), PersistenceError> {
        if self.online {
            Ok(())
        } else {
            Err(PersistenceError::Unavailable(
                "in-memory gateway is offline".to_string(),
            ))
        }
    }

    fn top_scores<'a>(
        records: impl Iterator<Item = &'a ScoreRecord>,
        limit: usize,
    ) -> Vec<ScoreRecord> {
        let mut ranked: Vec<ScoreRecord> = records.cloned().collect();
        // Stable: equal scores keep submission order.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(limit);
        ranked
    }
}

impl PersistenceGateway for InMemoryGateway {
    fn find_or_create_player(&mut self, name: &str) -> Result<Player, PersistenceError> {
        self.ensure_online()?;
        if let Some(existing) = self.players.iter().find(|p| p.name == name) {
            return Ok(existing.clone());
        }

        let player = Player::new(PlayerId::new(format!("player_{}", self.next_id)), name);
        self.next_id += 1;
        self.players.push(player.clone());
        tracing::debug!(id = %player.id, name, "player created");
        Ok(player)
    }

    fn save_score(&mut self, record: ScoreRecord) -> Result<ScoreRecord, PersistenceError> {
        self.ensure_online()?;
        self.scores.push(record.clone());
        Ok(record)
    }

    fn all_players(&self) -> Result<Vec<Player>, PersistenceError> {
        self.ensure_online()?;
        Ok(self.players.iter().rev().cloned().collect())
    }

    fn player_scores(&self, player_id: &PlayerId) -> Result<Vec<ScoreRecord>, PersistenceError> {
        self.ensure_online()?;
        if !self.players.iter().any(|p| &p.id == player_id) {
            return Err(PersistenceError::NotFound(format!("player {player_id}")));
        }
        Ok(self
            .scores
            .iter()
            .rev()
            .filter(|r| &r.player_id == player_id)
            .cloned()
            .collect())
    }

    fn leaderboard(&self, limit: usize) -> Result<Vec<ScoreRecord>, PersistenceError> {
        self.ensure_online()?;
        Ok(Self::top_scores(self.scores.iter(), limit))
    }

    fn leaderboard_by_difficulty(
        &self,
        difficulty: Difficulty,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, PersistenceError> {
        self.ensure_online()?;
        Ok(Self::top_scores(
            self.scores.iter().filter(|r| r.difficulty == difficulty),
            limit,
        ))
    }
}
