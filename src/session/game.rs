//! The game session: authoritative state for one level.
//!
//! ## Lifecycle
//!
//! Created for a level (or from a fixture board), mutated by pours, undo and
//! hints, re-dealt by [`GameSession::restart`] and replaced by
//! [`GameSession::initialize_level`].
//!
//! ## Pours
//!
//! [`GameSession::pour`] is one atomic commit; hosts that animate diff the
//! before/after snapshots. Hosts that want the engine to track in-flight
//! pours use the two-step [`begin_pour`](GameSession::begin_pour) /
//! [`commit_pour`](GameSession::commit_pour) protocol instead. A token commits
//! at most once, and any level change invalidates it.
//!
//! ## Rejections
//!
//! Every operation returns a typed result, but a rejected request never
//! changes state beyond what its documentation says (`select_tube` always
//! clears a pending selection on its second click).

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{
    Board, Difficulty, EngineConfig, GameRng, GameRngState, Move, MoveError, RestartPolicy,
    SessionCodecError, SessionError,
};
use crate::generator::LevelGenerator;
use crate::persistence::{Player, ScoreRecord};
use crate::rules::{apply_pour, can_pour, check_pour, revert_pour};
use crate::scoring::calculate_score;
use crate::solver::find_hint;

use super::event::SessionEvent;
use super::snapshot::{GameStatus, HintHighlight, InTransit, SessionSnapshot};

/// A committed pour and what it did to the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PourOutcome {
    /// The recorded move.
    pub mv: Move,
    /// True if this pour moved the session into `Completed`.
    pub completed: bool,
}

/// Result of a tube click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// No tube was selected; `index` is now selected.
    Selected(usize),
    /// The selected tube was clicked again and is no longer selected.
    Deselected,
    /// A second tube was clicked and the pour went through.
    Poured(PourOutcome),
    /// The click was rejected. Any pending selection has been cleared.
    Rejected(MoveError),
}

/// Handle for a pour announced with [`GameSession::begin_pour`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PourToken {
    generation: u64,
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Copy, Debug)]
struct PendingPour {
    generation: u64,
    from: usize,
    to: usize,
}

/// Serialized form of a suspended session.
#[derive(Serialize, Deserialize)]
struct SavedSession {
    config: EngineConfig,
    rng: GameRngState,
    level: u32,
    difficulty: Difficulty,
    board: Board,
    initial_board: Board,
    moves: Vector<Move>,
    status: GameStatus,
    elapsed_ms: u64,
    hints_remaining: u32,
    final_score: Option<u32>,
}

impl SavedSession {
    /// Reject payloads that decode cleanly but could not have been produced
    /// by a session. The move history must replay from `initial_board` to
    /// `board` with the recorded amounts.
    fn check(&self) -> Result<(), SessionCodecError> {
        self.config.validate()?;
        self.board.validate()?;
        self.initial_board.validate()?;

        let inconsistent = |msg: String| Err(SessionCodecError::Inconsistent(msg));
        for board in [&self.board, &self.initial_board] {
            if board.capacity() != self.config.capacity {
                return inconsistent(format!(
                    "board capacity {} differs from config capacity {}",
                    board.capacity(),
                    self.config.capacity
                ));
            }
        }
        if self.board.len() != self.initial_board.len() {
            return inconsistent(format!(
                "board has {} tubes but the initial board has {}",
                self.board.len(),
                self.initial_board.len()
            ));
        }

        let mut replay = self.initial_board.clone();
        for (i, mv) in self.moves.iter().enumerate() {
            match apply_pour(&mut replay, mv.from, mv.to) {
                Ok(amount) if amount == mv.amount => {}
                Ok(amount) => {
                    return inconsistent(format!(
                        "move {i} ({mv}) replays with amount {amount}"
                    ))
                }
                Err(e) => return inconsistent(format!("move {i} ({mv}) is illegal: {e}")),
            }
        }
        if replay != self.board {
            return inconsistent("move history does not reproduce the board".to_string());
        }

        let completed = self.status == GameStatus::Completed;
        if completed != self.final_score.is_some() {
            return inconsistent("final score does not match the status".to_string());
        }
        if completed && !self.board.is_complete() {
            return inconsistent("status is completed but the board is not".to_string());
        }
        if self.hints_remaining > self.config.hints_per_level {
            return inconsistent(format!(
                "{} hints remaining exceeds {} per level",
                self.hints_remaining, self.config.hints_per_level
            ));
        }
        Ok(())
    }
}

/// Authoritative state of one level in play.
pub struct GameSession {
    config: EngineConfig,
    generator: LevelGenerator,
    rng: GameRng,

    level: u32,
    difficulty: Difficulty,

    board: Board,
    /// Board as dealt, for `RestartPolicy::SameBoard`.
    initial_board: Board,
    moves: Vector<Move>,

    status: GameStatus,
    elapsed_ms: u64,
    hints_remaining: u32,
    final_score: Option<u32>,

    selected: Option<usize>,
    hint: Option<HintHighlight>,
    pending: Option<PendingPour>,
    pour_generation: u64,

    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Deal `level` at `difficulty` and start playing.
    ///
    /// Fails if `config` does not validate.
    pub fn new(
        config: EngineConfig,
        rng: GameRng,
        level: u32,
        difficulty: Difficulty,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self::deal(config, rng, level, difficulty))
    }

    /// Default configuration with a seeded RNG.
    #[must_use]
    pub fn seeded(level: u32, difficulty: Difficulty, seed: u64) -> Self {
        Self::deal(EngineConfig::default(), GameRng::new(seed), level, difficulty)
    }

    fn deal(config: EngineConfig, rng: GameRng, level: u32, difficulty: Difficulty) -> Self {
        let generator = LevelGenerator::new(&config);
        let capacity = config.capacity;
        let mut session = Self {
            config,
            generator,
            rng,
            level,
            difficulty,
            board: Board::empty(capacity, 0),
            initial_board: Board::empty(capacity, 0),
            moves: Vector::new(),
            status: GameStatus::Playing,
            elapsed_ms: 0,
            hints_remaining: 0,
            final_score: None,
            selected: None,
            hint: None,
            pending: None,
            pour_generation: 0,
            events: Vec::new(),
        };
        session.initialize_level(level, difficulty);
        session
    }

    /// Start from an explicit board instead of a deal.
    ///
    /// The session adopts the board's capacity, which must be within the
    /// configurable range. Restarting with `RestartPolicy::SameBoard` replays
    /// this board; `Reshuffle` deals a fresh one for `difficulty`.
    pub fn from_board(
        config: EngineConfig,
        difficulty: Difficulty,
        board: Board,
    ) -> Result<Self, SessionError> {
        board.validate()?;
        let config = config.with_capacity(board.capacity());
        config.validate()?;
        let generator = LevelGenerator::new(&config);
        let mut session = Self {
            config,
            generator,
            rng: GameRng::new(0),
            level: 1,
            difficulty,
            initial_board: board.clone(),
            board,
            moves: Vector::new(),
            status: GameStatus::Playing,
            elapsed_ms: 0,
            hints_remaining: 0,
            final_score: None,
            selected: None,
            hint: None,
            pending: None,
            pour_generation: 0,
            events: Vec::new(),
        };
        session.reset_progress();
        Ok(session)
    }

    // === Level lifecycle ===

    /// Deal a new level and reset every session field.
    pub fn initialize_level(&mut self, level: u32, difficulty: Difficulty) {
        self.level = level;
        self.difficulty = difficulty;
        self.board = self.generator.generate(level, difficulty, &mut self.rng);
        self.initial_board = self.board.clone();
        self.reset_progress();

        tracing::info!(level, difficulty = %difficulty, tubes = self.board.len(), "level initialized");
        self.events
            .push(SessionEvent::LevelStarted { level, difficulty });
    }

    /// Start the current level over.
    ///
    /// Clears moves, selection, clock, hints and completion. The board is
    /// re-dealt (`Reshuffle`) or restored to the original deal (`SameBoard`).
    pub fn restart(&mut self) {
        match self.config.restart_policy {
            RestartPolicy::Reshuffle => {
                self.board = self
                    .generator
                    .generate(self.level, self.difficulty, &mut self.rng);
                self.initial_board = self.board.clone();
            }
            RestartPolicy::SameBoard => {
                self.board = self.initial_board.clone();
            }
        }
        self.reset_progress();

        tracing::info!(
            level = self.level,
            difficulty = %self.difficulty,
            policy = ?self.config.restart_policy,
            "level restarted"
        );
        self.events.push(SessionEvent::LevelStarted {
            level: self.level,
            difficulty: self.difficulty,
        });
    }

    fn reset_progress(&mut self) {
        self.moves = Vector::new();
        self.elapsed_ms = 0;
        self.hints_remaining = self.config.hints_per_level;
        self.status = GameStatus::Playing;
        self.final_score = None;
        // A deal can come out already sorted.
        if self.board.is_complete() {
            self.status = GameStatus::Completed;
            self.final_score = Some(self.calculate_score());
        }
        self.selected = None;
        self.hint = None;
        self.invalidate_pending();
    }

    fn invalidate_pending(&mut self) {
        self.pending = None;
        self.pour_generation += 1;
    }

    // === Selection ===

    /// Handle a click on tube `index`.
    ///
    /// - nothing selected: select `index`
    /// - `index` already selected: deselect
    /// - another tube selected: pour from it into `index`, then clear the
    ///   selection whether or not the pour went through
    pub fn select_tube(&mut self, index: usize) -> Selection {
        match self.selected {
            None => {
                if let Err(err) = self.ensure_not_paused() {
                    return Selection::Rejected(err);
                }
                if let Err(err) = self.board.checked_tube(index) {
                    return Selection::Rejected(err);
                }
                self.selected = Some(index);
                Selection::Selected(index)
            }
            Some(current) if current == index => {
                self.selected = None;
                Selection::Deselected
            }
            Some(from) => {
                self.selected = None;
                match self.pour(from, index) {
                    Ok(outcome) => Selection::Poured(outcome),
                    Err(err) => Selection::Rejected(err),
                }
            }
        }
    }

    /// Drop any pending selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // === Pouring ===

    /// True if pouring `from` into `to` is legal on the current board.
    #[must_use]
    pub fn can_pour(&self, from: usize, to: usize) -> bool {
        can_pour(&self.board, from, to)
    }

    /// Pour `from` into `to` as one atomic commit.
    pub fn pour(&mut self, from: usize, to: usize) -> Result<PourOutcome, MoveError> {
        self.ensure_not_paused()?;
        if self.pending.is_some() {
            return Err(self.reject(MoveError::PourInFlight));
        }
        self.commit(from, to)
    }

    /// Announce a pour without moving anything yet.
    ///
    /// Marks `from`/`to` as in transit for the presentation layer. The pour
    /// is re-checked on commit.
    pub fn begin_pour(&mut self, from: usize, to: usize) -> Result<PourToken, MoveError> {
        self.ensure_not_paused()?;
        if self.pending.is_some() {
            return Err(self.reject(MoveError::PourInFlight));
        }
        check_pour(&self.board, from, to).map_err(|e| self.reject(e))?;

        self.pour_generation += 1;
        self.pending = Some(PendingPour {
            generation: self.pour_generation,
            from,
            to,
        });
        Ok(PourToken {
            generation: self.pour_generation,
            from,
            to,
        })
    }

    /// Commit an announced pour. A token commits at most once.
    pub fn commit_pour(&mut self, token: PourToken) -> Result<PourOutcome, MoveError> {
        match self.pending {
            Some(p) if p.generation == token.generation => {
                self.pending = None;
                self.commit(p.from, p.to)
            }
            _ => Err(self.reject(MoveError::StalePour)),
        }
    }

    /// Abandon an announced pour. Returns false if the token was stale.
    pub fn cancel_pour(&mut self, token: PourToken) -> bool {
        match self.pending {
            Some(p) if p.generation == token.generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    fn commit(&mut self, from: usize, to: usize) -> Result<PourOutcome, MoveError> {
        let amount = apply_pour(&mut self.board, from, to).map_err(|e| self.reject(e))?;
        let mv = Move::new(from, to, amount, self.elapsed_ms);
        self.moves.push_back(mv);
        self.events
            .push(SessionEvent::PourCommitted { from, to, amount });

        let completed = self.update_completion();
        tracing::debug!(from, to, amount, moves = self.moves.len(), "pour committed");
        Ok(PourOutcome { mv, completed })
    }

    /// Returns true on the transition into `Completed`.
    fn update_completion(&mut self) -> bool {
        if !self.board.is_complete() {
            self.status = GameStatus::Playing;
            self.final_score = None;
            return false;
        }
        if self.status == GameStatus::Completed {
            // Still sorted after another pour: the score reflects the extra move.
            self.final_score = Some(self.calculate_score());
            return false;
        }

        self.status = GameStatus::Completed;
        let score = self.calculate_score();
        self.final_score = Some(score);
        self.events.push(SessionEvent::LevelCompleted { score });
        tracing::info!(
            level = self.level,
            difficulty = %self.difficulty,
            moves = self.moves.len(),
            elapsed_ms = self.elapsed_ms,
            score,
            "level completed"
        );
        true
    }

    // === Undo ===

    /// Revert the most recent pour and return to `Playing`.
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        self.ensure_not_paused()?;
        if self.pending.is_some() {
            return Err(self.reject(MoveError::PourInFlight));
        }
        let Some(mv) = self.moves.pop_back() else {
            return Err(self.reject(MoveError::NoHistory));
        };

        revert_pour(&mut self.board, &mv);
        self.status = GameStatus::Playing;
        self.final_score = None;
        self.events.push(SessionEvent::MoveUndone {
            from: mv.from,
            to: mv.to,
            amount: mv.amount,
        });
        tracing::debug!(from = mv.from, to = mv.to, amount = mv.amount, "move undone");
        Ok(mv)
    }

    // === Hints ===

    /// Spend a hint to highlight a legal pour.
    ///
    /// Hints are not spent when no legal pour exists.
    pub fn use_hint(&mut self) -> Result<(usize, usize), MoveError> {
        self.ensure_not_paused()?;
        if self.hints_remaining == 0 {
            return Err(self.reject(MoveError::HintsExhausted));
        }
        let Some((from, to)) = find_hint(
            &self.board,
            self.config.hint_strategy,
            self.config.generator.solver_node_budget,
        ) else {
            return Err(self.reject(MoveError::NoValidMove));
        };

        self.hints_remaining -= 1;
        self.hint = Some(HintHighlight {
            from,
            to,
            expires_at_ms: self.elapsed_ms.saturating_add(self.config.hint_duration_ms),
        });
        self.events.push(SessionEvent::HintShown { from, to });
        tracing::debug!(from, to, remaining = self.hints_remaining, "hint shown");
        Ok((from, to))
    }

    /// Remove the hint highlight.
    pub fn clear_hint(&mut self) {
        self.hint = None;
    }

    // === Clock ===

    /// Advance the clock by `delta`. Ignored unless `Playing`.
    ///
    /// Also expires the hint highlight once its display time has passed.
    pub fn update_elapsed_time(&mut self, delta: Duration) {
        if self.status != GameStatus::Playing {
            return;
        }
        let delta_ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);

        if self
            .hint
            .is_some_and(|h| self.elapsed_ms >= h.expires_at_ms)
        {
            self.hint = None;
        }
    }

    /// Stop the clock. Returns false unless the session was `Playing`.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.status = GameStatus::Paused;
        self.selected = None;
        true
    }

    /// Restart the clock. Returns false unless the session was `Paused`.
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        true
    }

    fn ensure_not_paused(&self) -> Result<(), MoveError> {
        if self.status == GameStatus::Paused {
            return Err(self.reject(MoveError::Paused));
        }
        Ok(())
    }

    fn reject(&self, err: MoveError) -> MoveError {
        tracing::debug!(error = %err, "request rejected");
        err
    }

    // === Scoring ===

    /// Score for the current moves, clock and hints.
    #[must_use]
    pub fn calculate_score(&self) -> u32 {
        calculate_score(
            self.difficulty,
            self.moves.len(),
            self.elapsed_ms,
            self.hints_remaining,
        )
    }

    /// Score frozen when the level was completed.
    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Score record for `player`, or `None` until the level is completed.
    #[must_use]
    pub fn score_record(&self, player: &Player) -> Option<ScoreRecord> {
        let score = self.final_score?;
        Some(ScoreRecord {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            level: self.level,
            difficulty: self.difficulty,
            move_count: self.moves.len(),
            elapsed_seconds: self.elapsed_ms / 1000,
            score,
            timestamp: chrono::Utc::now(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn initial_board(&self) -> &Board {
        &self.initial_board
    }

    #[must_use]
    pub fn moves(&self) -> &Vector<Move> {
        &self.moves
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    #[must_use]
    pub fn selected_tube(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn hint(&self) -> Option<HintHighlight> {
        self.hint
    }

    #[must_use]
    pub fn in_transit(&self) -> Option<InTransit> {
        self.pending.map(|p| InTransit {
            pouring: p.from,
            receiving: p.to,
        })
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Detached read-only view of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.level,
            difficulty: self.difficulty,
            board: self.board.clone(),
            selected_tube: self.selected,
            moves: self.moves.clone(),
            hints_remaining: self.hints_remaining,
            elapsed_ms: self.elapsed_ms,
            status: self.status,
            in_transit: self.in_transit(),
            hint: self.hint,
            settled_tubes: self.board.settled_count(),
            final_score: self.final_score,
        }
    }

    // === Suspend / resume ===

    /// Encode the session's persistent state.
    ///
    /// Selection, hint highlight, in-flight pours and queued events are
    /// transient and not saved.
    pub fn suspend(&self) -> Result<Vec<u8>, SessionCodecError> {
        bincode::serialize(&self.saved()).map_err(SessionCodecError::Encode)
    }

    fn saved(&self) -> SavedSession {
        SavedSession {
            config: self.config.clone(),
            rng: self.rng.state(),
            level: self.level,
            difficulty: self.difficulty,
            board: self.board.clone(),
            initial_board: self.initial_board.clone(),
            moves: self.moves.clone(),
            status: self.status,
            elapsed_ms: self.elapsed_ms,
            hints_remaining: self.hints_remaining,
            final_score: self.final_score,
        }
    }

    /// Rebuild a session from [`suspend`](Self::suspend) output.
    pub fn resume_from(bytes: &[u8]) -> Result<Self, SessionCodecError> {
        let saved: SavedSession = bincode::deserialize(bytes).map_err(SessionCodecError::Decode)?;
        saved.check()?;

        let generator = LevelGenerator::new(&saved.config);
        Ok(Self {
            config: saved.config,
            generator,
            rng: GameRng::from_state(&saved.rng),
            level: saved.level,
            difficulty: saved.difficulty,
            board: saved.board,
            initial_board: saved.initial_board,
            moves: saved.moves,
            status: saved.status,
            elapsed_ms: saved.elapsed_ms,
            hints_remaining: saved.hints_remaining,
            final_score: saved.final_score,
            selected: None,
            hint: None,
            pending: None,
            pour_generation: 0,
            events: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color::{self, Blue, Red};
    use crate::core::Tube;

    fn fixture(capacity: usize, tubes: &[&[Color]]) -> GameSession {
        let board =
            Board::from_tubes(capacity, tubes.iter().map(|t| Tube::from_units(t)).collect())
                .unwrap();
        GameSession::from_board(EngineConfig::default(), Difficulty::Easy, board).unwrap()
    }

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::seeded(1, Difficulty::Easy, 42);
        assert_eq!(session.level(), 1);
        assert_eq!(session.board().len(), 4);
        assert_eq!(session.hints_remaining(), 3);
        assert_eq!(session.elapsed_ms(), 0);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.selected_tube(), None);
    }

    #[test]
    fn test_select_then_deselect() {
        let mut s = fixture(3, &[&[Red], &[]]);
        assert_eq!(s.select_tube(0), Selection::Selected(0));
        assert_eq!(s.selected_tube(), Some(0));
        assert_eq!(s.select_tube(0), Selection::Deselected);
        assert_eq!(s.selected_tube(), None);
    }

    #[test]
    fn test_select_two_tubes_pours() {
        let mut s = fixture(3, &[&[Blue, Red], &[]]);
        s.select_tube(0);
        let Selection::Poured(outcome) = s.select_tube(1) else {
            panic!("expected a pour");
        };
        assert_eq!(outcome.mv.pair(), (0, 1));
        assert_eq!(outcome.mv.amount, 1);
        assert_eq!(s.selected_tube(), None);
    }

    #[test]
    fn test_failed_pour_clears_selection_only() {
        let mut s = fixture(3, &[&[Red], &[Blue]]);
        let before = s.board().clone();
        s.select_tube(0);
        assert_eq!(
            s.select_tube(1),
            Selection::Rejected(MoveError::ColorMismatch { from: 0, to: 1 })
        );
        assert_eq!(s.selected_tube(), None);
        assert_eq!(s.board(), &before);
        assert_eq!(s.move_count(), 0);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut s = fixture(3, &[&[Red]]);
        assert!(matches!(
            s.select_tube(9),
            Selection::Rejected(MoveError::TubeOutOfRange { .. })
        ));
        assert_eq!(s.selected_tube(), None);
    }

    #[test]
    fn test_completion_and_undo_from_completed() {
        let mut s = fixture(2, &[&[Red, Blue], &[Red], &[Blue]]);
        s.pour(0, 2).unwrap();
        assert!(!s.is_completed());
        let outcome = s.pour(0, 1).unwrap();
        assert!(outcome.completed);
        assert!(s.is_completed());
        assert_eq!(s.final_score(), Some(1000 - 20 + 150));

        s.undo().unwrap();
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.final_score(), None);
    }

    #[test]
    fn test_undo_empty_history() {
        let mut s = fixture(3, &[&[Red]]);
        assert_eq!(s.undo(), Err(MoveError::NoHistory));
    }

    #[test]
    fn test_undo_restores_exact_board() {
        let mut s = fixture(4, &[&[Blue, Red, Red], &[Red], &[]]);
        let before = s.board().clone();
        s.pour(0, 1).unwrap();
        assert_eq!(s.board().tube(1).unwrap().units(), &[Red, Red, Red]);
        let mv = s.undo().unwrap();
        assert_eq!(mv.amount, 2);
        assert_eq!(s.board(), &before);
        assert_eq!(s.move_count(), 0);
    }

    #[test]
    fn test_hint_spends_and_expires() {
        let mut s = fixture(3, &[&[Red, Blue], &[Blue], &[]]);
        assert_eq!(s.use_hint(), Ok((0, 1)));
        assert_eq!(s.hints_remaining(), 2);
        assert!(s.hint().is_some());

        s.update_elapsed_time(Duration::from_millis(2_999));
        assert!(s.hint().is_some());
        s.update_elapsed_time(Duration::from_millis(1));
        assert!(s.hint().is_none());
    }

    #[test]
    fn test_hint_without_moves_is_free() {
        let mut s = fixture(2, &[&[Red, Blue], &[Blue, Red]]);
        assert_eq!(s.use_hint(), Err(MoveError::NoValidMove));
        assert_eq!(s.hints_remaining(), 3);
        assert!(s.hint().is_none());
    }

    #[test]
    fn test_hints_exhausted() {
        let mut s = fixture(3, &[&[Red, Blue], &[]]);
        for _ in 0..3 {
            s.use_hint().unwrap();
        }
        assert_eq!(s.use_hint(), Err(MoveError::HintsExhausted));
        assert_eq!(s.hints_remaining(), 0);
    }

    #[test]
    fn test_clock_stops_when_completed() {
        let mut s = fixture(1, &[&[Red], &[]]);
        assert!(s.is_completed());
        s.update_elapsed_time(Duration::from_secs(5));
        assert_eq!(s.elapsed_ms(), 0);
    }

    #[test]
    fn test_pause_blocks_moves_and_clock() {
        let mut s = fixture(3, &[&[Red, Blue], &[]]);
        assert!(s.pause());
        assert_eq!(s.pour(0, 1), Err(MoveError::Paused));
        assert_eq!(s.use_hint(), Err(MoveError::Paused));
        s.update_elapsed_time(Duration::from_secs(3));
        assert_eq!(s.elapsed_ms(), 0);
        assert!(!s.pause());

        assert!(s.resume());
        assert!(s.pour(0, 1).is_ok());
    }

    #[test]
    fn test_two_phase_pour() {
        let mut s = fixture(3, &[&[Blue, Red], &[]]);
        let token = s.begin_pour(0, 1).unwrap();
        assert_eq!(
            s.in_transit(),
            Some(InTransit {
                pouring: 0,
                receiving: 1
            })
        );
        assert_eq!(s.board().tube(1).unwrap().len(), 0);
        assert_eq!(s.begin_pour(0, 1), Err(MoveError::PourInFlight));
        assert_eq!(s.pour(0, 1), Err(MoveError::PourInFlight));

        let outcome = s.commit_pour(token).unwrap();
        assert_eq!(outcome.mv.amount, 1);
        assert_eq!(s.in_transit(), None);
        assert_eq!(s.commit_pour(token), Err(MoveError::StalePour));
        assert_eq!(s.move_count(), 1);
    }

    #[test]
    fn test_cancel_and_level_change_invalidate_token() {
        let mut s = GameSession::seeded(1, Difficulty::Easy, 9);
        let (from, to) = crate::rules::first_legal_pour(s.board()).unwrap();

        let token = s.begin_pour(from, to).unwrap();
        assert!(s.cancel_pour(token));
        assert!(!s.cancel_pour(token));

        let token = s.begin_pour(from, to).unwrap();
        s.restart();
        assert_eq!(s.commit_pour(token), Err(MoveError::StalePour));
        assert_eq!(s.move_count(), 0);
    }

    #[test]
    fn test_events_are_edge_triggered() {
        let mut s = fixture(2, &[&[Red, Blue], &[Red], &[Blue]]);
        s.drain_events();

        s.pour(0, 2).unwrap();
        s.pour(0, 1).unwrap();
        let events = s.drain_events();
        assert_eq!(
            events,
            vec![
                SessionEvent::PourCommitted {
                    from: 0,
                    to: 2,
                    amount: 1
                },
                SessionEvent::PourCommitted {
                    from: 0,
                    to: 1,
                    amount: 1
                },
                SessionEvent::LevelCompleted { score: 1130 },
            ]
        );
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_restart_same_board_policy() {
        let config = EngineConfig::default().with_restart_policy(RestartPolicy::SameBoard);
        let mut s = GameSession::new(config, GameRng::new(4), 2, Difficulty::Medium).unwrap();
        let dealt = s.board().clone();
        let (from, to) = crate::rules::first_legal_pour(s.board()).unwrap();
        s.pour(from, to).unwrap();
        s.use_hint().unwrap();
        s.update_elapsed_time(Duration::from_secs(10));

        s.restart();
        assert_eq!(s.board(), &dealt);
        assert_eq!(s.move_count(), 0);
        assert_eq!(s.hints_remaining(), 3);
        assert_eq!(s.elapsed_ms(), 0);
        assert!(s.hint().is_none());
    }

    #[test]
    fn test_restart_reshuffle_keeps_level() {
        let mut s = GameSession::seeded(5, Difficulty::Hard, 77);
        let dealt = s.board().clone();
        s.restart();
        assert_eq!(s.level(), 5);
        assert_eq!(s.difficulty(), Difficulty::Hard);
        assert_ne!(s.board(), &dealt);
        assert_eq!(s.board().color_counts(), dealt.color_counts());
    }

    #[test]
    fn test_suspend_resume() {
        let mut s = GameSession::seeded(3, Difficulty::Medium, 21);
        let (from, to) = crate::rules::first_legal_pour(s.board()).unwrap();
        s.pour(from, to).unwrap();
        s.update_elapsed_time(Duration::from_millis(4_321));

        let bytes = s.suspend().unwrap();
        let mut resumed = GameSession::resume_from(&bytes).unwrap();

        assert_eq!(resumed.board(), s.board());
        assert_eq!(resumed.moves(), s.moves());
        assert_eq!(resumed.elapsed_ms(), 4_321);
        assert_eq!(resumed.level(), 3);

        resumed.restart();
        s.restart();
        assert_eq!(resumed.board(), s.board());
    }

    #[test]
    fn test_score_record_only_when_completed() {
        use crate::persistence::PlayerId;

        let player = Player::new(PlayerId::new("player_1"), "ari");
        let mut s = fixture(2, &[&[Red, Blue], &[Red], &[Blue]]);
        s.update_elapsed_time(Duration::from_millis(12_400));
        assert!(s.score_record(&player).is_none());

        s.pour(0, 2).unwrap();
        s.pour(0, 1).unwrap();
        let record = s.score_record(&player).unwrap();
        assert_eq!(record.player_name, "ari");
        assert_eq!(record.move_count, 2);
        assert_eq!(record.elapsed_seconds, 12);
        assert_eq!(record.score, 1000 - 20 - 24 + 150);
    }

    #[test]
    fn test_resume_garbage_fails() {
        assert!(matches!(
            GameSession::resume_from(&[1, 2, 3]),
            Err(SessionCodecError::Decode(_))
        ));
    }

    fn resume_tampered(
        s: &GameSession,
        tamper: impl FnOnce(&mut SavedSession),
    ) -> Result<GameSession, SessionCodecError> {
        let mut saved = s.saved();
        tamper(&mut saved);
        GameSession::resume_from(&bincode::serialize(&saved).unwrap())
    }

    #[test]
    fn test_resume_rejects_unreplayable_moves() {
        let mut s = fixture(3, &[&[Red, Blue], &[Blue], &[]]);
        s.pour(0, 1).unwrap();
        assert!(resume_tampered(&s, |_| {}).is_ok());

        let err = resume_tampered(&s, |saved| {
            saved.moves = Vector::unit(Move::new(0, 99, 1, 0));
        })
        .err()
        .unwrap();
        assert!(matches!(err, SessionCodecError::Inconsistent(_)));

        let err = resume_tampered(&s, |saved| saved.moves[0].amount = 3).err().unwrap();
        assert!(matches!(err, SessionCodecError::Inconsistent(_)));

        let err = resume_tampered(&s, |saved| saved.moves.clear()).err().unwrap();
        assert!(matches!(err, SessionCodecError::Inconsistent(_)));
    }

    #[test]
    fn test_resume_rejects_bad_config() {
        let s = fixture(3, &[&[Red], &[]]);

        let err = resume_tampered(&s, |saved| saved.config.capacity = 0).err().unwrap();
        assert!(matches!(err, SessionCodecError::InvalidConfig(_)));

        let err = resume_tampered(&s, |saved| saved.config.capacity = 5).err().unwrap();
        assert!(matches!(err, SessionCodecError::Inconsistent(_)));
    }

    #[test]
    fn test_resume_rejects_status_mismatch() {
        let s = fixture(3, &[&[Red], &[]]);

        let err = resume_tampered(&s, |saved| {
            saved.status = GameStatus::Completed;
            saved.final_score = Some(1);
        })
        .err()
        .unwrap();
        assert!(matches!(err, SessionCodecError::Inconsistent(_)));

        let err = resume_tampered(&s, |saved| saved.final_score = Some(1)).err().unwrap();
        assert!(matches!(err, SessionCodecError::Inconsistent(_)));

        let err = resume_tampered(&s, |saved| saved.hints_remaining = 9).err().unwrap();
        assert!(matches!(err, SessionCodecError::Inconsistent(_)));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EngineConfig::default().with_capacity(0);
        let result = GameSession::new(config, GameRng::new(1), 1, Difficulty::Easy);
        assert!(matches!(result, Err(SessionError::Config(_))));

        let board = Board::from_tubes(20, vec![Tube::from_units(&[Red]), Tube::default()]).unwrap();
        let result = GameSession::from_board(EngineConfig::default(), Difficulty::Easy, board);
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_final_score_follows_pours_after_completion() {
        let mut s = fixture(1, &[&[Red], &[]]);
        assert!(s.is_completed());
        assert_eq!(s.final_score(), Some(1000 + 150));

        let outcome = s.pour(0, 1).unwrap();
        assert!(!outcome.completed);
        assert!(s.is_completed());
        assert_eq!(s.final_score(), Some(1000 - 10 + 150));
        assert_eq!(s.final_score(), Some(s.calculate_score()));
    }
}
