//! Engine configuration.
//!
//! Hosts build an [`EngineConfig`] at startup (in code or from TOML) and hand
//! it to every session. The difficulty tier table itself is fixed and lives on
//! [`Difficulty`](super::Difficulty); this config only covers tunables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::board::DEFAULT_CAPACITY;
use super::error::ConfigError;

/// Largest supported tube capacity.
pub const MAX_CAPACITY: usize = 16;

/// What `restart` does to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Deal a fresh random board for the same level and tier.
    #[default]
    Reshuffle,
    /// Replay the board the level started with.
    SameBoard,
}

/// How `use_hint` picks the suggested pour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintStrategy {
    /// First legal `(from, to)` pair in row-major scan order.
    #[default]
    FirstLegal,
    /// First move of a solver-found solution, falling back to `FirstLegal`.
    Solver,
}

/// Level generator settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Re-deal until the solver proves the board solvable.
    pub require_solvable: bool,

    /// Deals attempted before keeping an unverified board.
    pub max_attempts: u32,

    /// Node budget for each solvability check.
    pub solver_node_budget: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            require_solvable: false,
            max_attempts: 32,
            solver_node_budget: 200_000,
        }
    }
}

/// Top-level engine configuration, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Slots per tube.
    pub capacity: usize,

    /// Hints granted at level start and on restart.
    pub hints_per_level: u32,

    /// How long a hint highlight stays visible (session-elapsed ms).
    pub hint_duration_ms: u64,

    /// Advisory pour animation length. The engine never waits on it.
    pub pour_duration_ms: u64,

    pub restart_policy: RestartPolicy,

    pub hint_strategy: HintStrategy,

    pub generator: GeneratorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            hints_per_level: 3,
            hint_duration_ms: 3000,
            pour_duration_ms: 400,
            restart_policy: RestartPolicy::default(),
            hint_strategy: HintStrategy::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(ConfigError::Validation(format!(
                "capacity must be in 1..={MAX_CAPACITY}, got {}",
                self.capacity
            )));
        }
        if self.generator.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "generator.max_attempts must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: u32) -> Self {
        self.hints_per_level = hints;
        self
    }

    #[must_use]
    pub fn with_hint_duration_ms(mut self, ms: u64) -> Self {
        self.hint_duration_ms = ms;
        self
    }

    #[must_use]
    pub fn with_restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.restart_policy = policy;
        self
    }

    #[must_use]
    pub fn with_hint_strategy(mut self, strategy: HintStrategy) -> Self {
        self.hint_strategy = strategy;
        self
    }

    /// Only deal boards the solver can finish.
    #[must_use]
    pub fn require_solvable(mut self) -> Self {
        self.generator.require_solvable = true;
        self
    }
}
