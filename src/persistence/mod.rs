//! Player identity and score persistence.
//!
//! The engine itself never touches storage. Hosts hand a completed
//! [`GameSession`](crate::session::GameSession) to a [`ScoreKeeper`], which
//! tries the [`PersistenceGateway`] first and silently falls back to the
//! [`LocalScoreStore`]. A [`PlayerCache`] keeps the logged-in player across
//! restarts.

pub mod cache;
pub mod gateway;
pub mod keeper;
pub mod local;
pub mod memory;
pub mod record;

pub use cache::PlayerCache;
pub use gateway::{PersistenceGateway, DEFAULT_LEADERBOARD_LIMIT};
pub use keeper::{SaveOutcome, ScoreKeeper};
pub use local::{LocalScoreStore, PlayerStats};
pub use memory::InMemoryGateway;
pub use record::{Player, PlayerId, ScoreRecord, OFFLINE_PREFIX};
