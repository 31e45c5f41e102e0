//! Cached identity of the logged-in player.
//!
//! Lets a host restart without asking for the player's name again. The file
//! holds a single JSON `Player` object and is removed on logout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::PersistenceError;

use super::record::Player;

/// Where the current player is remembered between runs.
#[derive(Debug, Default)]
pub struct PlayerCache {
    path: Option<PathBuf>,
    player: Option<Player>,
}

impl PlayerCache {
    /// A cache that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed cache. A missing or blank file caches nobody.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let player = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => None,
            Ok(content) => Some(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: Some(path),
            player,
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Remember `player`, replacing any previous entry.
    pub fn store(&mut self, player: &Player) -> Result<(), PersistenceError> {
        self.player = Some(player.clone());
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(player)?)?;
        Ok(())
    }

    /// Forget the cached player. Clearing an empty cache is not an error.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.player = None;
        match &self.path {
            Some(path) if path.exists() => fs::remove_file(path).map_err(Into::into),
            _ => Ok(()),
        }
    }
}
