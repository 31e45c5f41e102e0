//! Game session: the state machine the presentation layer drives.
//!
//! - `game`: [`GameSession`] and its pour/undo/hint/clock operations
//! - `snapshot`: detached read-only views
//! - `event`: edge-triggered notifications

pub mod event;
pub mod game;
pub mod snapshot;

pub use event::SessionEvent;
pub use game::{GameSession, PourOutcome, PourToken, Selection};
pub use snapshot::{GameStatus, HintHighlight, InTransit, SessionSnapshot};
