//! Read-only session views for the presentation layer.
//!
//! A snapshot is a detached copy: the board is cloned and the move history is
//! an `im::Vector` sharing structure with the session, so taking one per frame
//! is cheap and nothing in it can mutate the game.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Board, Difficulty, Move};

/// Session lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Accepting moves; the clock runs.
    #[default]
    Playing,
    /// Clock stopped; moves, undo and hints are rejected.
    Paused,
    /// Every tube is empty or full-and-monochrome. Undo returns to `Playing`.
    Completed,
}

/// A hint highlight and when it expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintHighlight {
    pub from: usize,
    pub to: usize,
    /// Session-elapsed ms at which the highlight is cleared.
    pub expires_at_ms: u64,
}

/// Tubes involved in a pour that has been announced but not committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InTransit {
    /// Tube being poured from.
    pub pouring: usize,
    /// Tube being poured into.
    pub receiving: usize,
}

/// Everything the presentation layer reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub level: u32,
    pub difficulty: Difficulty,
    pub board: Board,
    pub selected_tube: Option<usize>,
    pub moves: Vector<Move>,
    pub hints_remaining: u32,
    pub elapsed_ms: u64,
    pub status: GameStatus,
    pub in_transit: Option<InTransit>,
    pub hint: Option<HintHighlight>,
    /// Tubes that are empty or complete.
    pub settled_tubes: usize,
    pub final_score: Option<u32>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Whole seconds on the clock.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// True if `index` is the source or destination of the current hint.
    #[must_use]
    pub fn is_hinted(&self, index: usize) -> bool {
        self.hint.is_some_and(|h| h.from == index || h.to == index)
    }
}
