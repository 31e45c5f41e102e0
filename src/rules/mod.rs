//! Pour rules over a board.
//!
//! The session calls into these functions but never re-implements legality
//! or transfer quantity itself.

pub mod engine;

pub use engine::{apply_pour, can_pour, check_pour, first_legal_pour, legal_pours, revert_pour};
