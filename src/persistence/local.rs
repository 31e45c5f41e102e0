//! Local fallback score list.
//!
//! Append-only, keyed by nothing, and read by filtering on player name. When
//! file-backed, the whole list is rewritten as JSON after every append.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::PersistenceError;

use super::record::ScoreRecord;

/// Dashboard summary for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: usize,
    pub best_score: u32,
    pub total_moves: u64,
    /// Mean level time in seconds, rounded half up.
    pub average_seconds: u64,
}

impl PlayerStats {
    /// Summarize a set of records.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ScoreRecord>) -> Self {
        let mut stats = PlayerStats::default();
        let mut total_seconds = 0u64;
        for record in records {
            stats.games_played += 1;
            stats.best_score = stats.best_score.max(record.score);
            stats.total_moves += record.move_count as u64;
            total_seconds += record.elapsed_seconds;
        }
        if stats.games_played > 0 {
            let n = stats.games_played as u64;
            stats.average_seconds = (2 * total_seconds + n) / (2 * n);
        }
        stats
    }
}

/// Append-only list of fallback score records.
#[derive(Debug, Default)]
pub struct LocalScoreStore {
    path: Option<PathBuf>,
    records: Vec<ScoreRecord>,
}

impl LocalScoreStore {
    /// A store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed store. A missing file is an empty list.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), records = records.len(), "local score store opened");
        Ok(Self {
            path: Some(path),
            records,
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append a record and flush it to disk if file-backed.
    ///
    /// The record stays in memory even if the write fails.
    pub fn append(&mut self, record: ScoreRecord) -> Result<(), PersistenceError> {
        self.records.push(record);
        self.flush()
    }

    fn flush(&self) -> Result<(), PersistenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Every record, oldest first.
    #[must_use]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records saved under `name`, oldest first.
    pub fn scores_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ScoreRecord> + 'a {
        self.records.iter().filter(move |r| r.player_name == name)
    }

    #[must_use]
    pub fn stats_for(&self, name: &str) -> PlayerStats {
        PlayerStats::from_records(self.scores_for(name))
    }
}
