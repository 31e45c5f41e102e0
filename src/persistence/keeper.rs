//! Fallback policy between the gateway and the local store.
//!
//! Persistence must never interrupt play: a failed login produces an offline
//! player, and a failed save lands in the local list. Failures are logged at
//! `warn` and otherwise swallowed.

use chrono::Utc;
use rand::Rng;

use crate::session::GameSession;

use super::cache::PlayerCache;
use super::gateway::PersistenceGateway;
use super::local::{LocalScoreStore, PlayerStats};
use super::record::{Player, PlayerId, ScoreRecord, OFFLINE_PREFIX};

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Where a score ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Accepted by the gateway.
    Remote,
    /// Gateway failed; appended to the local store.
    Local,
}

/// Owns the current player and routes scores to the gateway or the local
/// fallback.
pub struct ScoreKeeper<G> {
    gateway: G,
    local: LocalScoreStore,
    cache: PlayerCache,
    current: Option<Player>,
}

impl<G: PersistenceGateway> ScoreKeeper<G> {
    pub fn new(gateway: G, local: LocalScoreStore) -> Self {
        Self {
            gateway,
            local,
            cache: PlayerCache::in_memory(),
            current: None,
        }
    }

    /// Remember the logged-in player in `cache`, restoring whoever it holds.
    #[must_use]
    pub fn with_player_cache(mut self, cache: PlayerCache) -> Self {
        if let Some(player) = cache.player() {
            tracing::debug!(id = %player.id, name = %player.name, "restored cached player");
            self.current = Some(player.clone());
        }
        self.cache = cache;
        self
    }

    /// Log in by name. Never fails: an unreachable gateway yields an offline
    /// player.
    pub fn login(&mut self, name: &str) -> &Player {
        let player = match self.gateway.find_or_create_player(name) {
            Ok(player) => player,
            Err(error) => {
                let player = Player::new(offline_player_id(), name);
                tracing::warn!(%error, id = %player.id, "player lookup failed; playing offline");
                player
            }
        };
        if let Err(error) = self.cache.store(&player) {
            tracing::warn!(%error, "player cache write failed");
        }
        self.current.insert(player)
    }

    pub fn logout(&mut self) {
        self.current = None;
        if let Err(error) = self.cache.clear() {
            tracing::warn!(%error, "player cache delete failed");
        }
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current.as_ref()
    }

    /// Save the score of a completed level.
    ///
    /// Returns `None` when nobody is logged in or the level is not complete.
    pub fn record(&mut self, session: &GameSession) -> Option<SaveOutcome> {
        let player = self.current.as_ref()?;
        let record = session.score_record(player)?;
        Some(self.save(record))
    }

    /// Send a record to the gateway, falling back to the local store.
    pub fn save(&mut self, record: ScoreRecord) -> SaveOutcome {
        match self.gateway.save_score(record.clone()) {
            Ok(_) => SaveOutcome::Remote,
            Err(error) => {
                tracing::warn!(%error, player = %record.player_id, "score save failed; storing locally");
                if let Err(error) = self.local.append(record) {
                    tracing::warn!(%error, "local score store write failed; record kept in memory");
                }
                SaveOutcome::Local
            }
        }
    }

    /// Dashboard stats from the local fallback list.
    #[must_use]
    pub fn local_stats(&self, name: &str) -> PlayerStats {
        self.local.stats_for(name)
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    #[must_use]
    pub fn local(&self) -> &LocalScoreStore {
        &self.local
    }

    #[must_use]
    pub fn player_cache(&self) -> &PlayerCache {
        &self.cache
    }
}

/// `offline_<unix millis>_<9 base-36 chars>`
fn offline_player_id() -> PlayerId {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())]))
        .collect();
    PlayerId::new(format!(
        "{OFFLINE_PREFIX}{}_{suffix}",
        Utc::now().timestamp_millis()
    ))
}
