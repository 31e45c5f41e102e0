//! Procedural level generation.
//!
//! Deals are driven entirely by a [`GameRng`](crate::core::GameRng), so a
//! fixed seed reproduces the same sequence of boards.

pub mod level;

pub use level::{generate, LevelGenerator};
