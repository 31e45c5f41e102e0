//! Session events.
//!
//! Events are edge-triggered: each is queued exactly once, at the state
//! change that caused it, and handed out by
//! [`GameSession::drain_events`](super::GameSession::drain_events). Hosts use
//! them to cue sounds and effects without diffing snapshots.

use serde::{Deserialize, Serialize};

use crate::core::Difficulty;

/// Something the presentation layer may want to react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new board was dealt (level init or restart).
    LevelStarted { level: u32, difficulty: Difficulty },

    /// A pour was committed. Fired once per pour, keyed on the destination.
    PourCommitted { from: usize, to: usize, amount: usize },

    /// The board just became complete.
    LevelCompleted { score: u32 },

    /// A hint highlight was set.
    HintShown { from: usize, to: usize },

    /// The most recent pour was reverted.
    MoveUndone { from: usize, to: usize, amount: usize },
}

impl SessionEvent {
    /// The tube receiving liquid, for pour and undo events.
    #[must_use]
    pub fn receiving_tube(&self) -> Option<usize> {
        match self {
            SessionEvent::PourCommitted { to, .. } => Some(*to),
            SessionEvent::MoveUndone { from, .. } => Some(*from),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiving_tube() {
        let pour = SessionEvent::PourCommitted {
            from: 0,
            to: 2,
            amount: 1,
        };
        assert_eq!(pour.receiving_tube(), Some(2));

        let undo = SessionEvent::MoveUndone {
            from: 0,
            to: 2,
            amount: 1,
        };
        assert_eq!(undo.receiving_tube(), Some(0));

        assert_eq!(SessionEvent::LevelCompleted { score: 10 }.receiving_tube(), None);
    }

    #[test]
    fn test_event_serialization() {
        let event = SessionEvent::LevelStarted {
            level: 3,
            difficulty: Difficulty::Medium,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
