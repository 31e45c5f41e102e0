//! Player identity and score records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Difficulty;

/// Prefix of ids minted while the gateway is unreachable.
pub const OFFLINE_PREFIX: &str = "offline_";

/// Opaque player identifier assigned by the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for ids minted locally during an outage.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.0.starts_with(OFFLINE_PREFIX)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One completed level, appended on completion and never edited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_id: PlayerId,
    /// Kept alongside the id so the local fallback list can be filtered by
    /// name.
    pub player_name: String,
    pub level: u32,
    pub difficulty: Difficulty,
    pub move_count: usize,
    pub elapsed_seconds: u64,
    pub score: u32,
    pub timestamp: DateTime<Utc>,
}
