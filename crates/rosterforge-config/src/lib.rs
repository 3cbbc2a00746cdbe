//! Configuration system for RosterForge.
//!
//! Load scheduler configuration from TOML or YAML to control the friend
//! policy, the solver time budget and the objective weights without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use rosterforge_config::{FriendMode, SchedulerConfig};
//! use std::time::Duration;
//!
//! let config = SchedulerConfig::from_toml_str(r#"
//!     friend_mode = "at_best"
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [objective]
//!     friend_reward = 5.0
//! "#).unwrap();
//!
//! assert_eq!(config.friend_mode, FriendMode::AtBest);
//! assert_eq!(config.time_limit(), Duration::from_secs(30));
//! assert_eq!(config.objective.friend_reward, 5.0);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use rosterforge_config::SchedulerConfig;
//!
//! let config = SchedulerConfig::load("scheduler.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time budget granted to the solver when none is configured.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 120;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main scheduler configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// How mutually declared friends are kept together.
    #[serde(default)]
    pub friend_mode: FriendMode,

    /// Solver termination configuration.
    #[serde(default)]
    pub termination: TerminationConfig,

    /// Objective weights.
    #[serde(default)]
    pub objective: ObjectiveConfig,
}

impl SchedulerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the friend mode.
    pub fn with_friend_mode(mut self, mode: FriendMode) -> Self {
        self.friend_mode = mode;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination.seconds_spent_limit = Some(seconds);
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination.millis_spent_limit = Some(millis);
        self.termination.seconds_spent_limit = None;
        self
    }

    /// Caps the number of search nodes.
    pub fn with_node_count_limit(mut self, nodes: u64) -> Self {
        self.termination.node_count_limit = Some(nodes);
        self
    }

    /// Returns the solver time budget.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Duration {
        self.termination.time_limit()
    }

    /// Checks the values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit().is_zero() {
            return Err(ConfigError::Invalid(
                "termination time limit must be positive".to_string(),
            ));
        }
        self.objective.validate()
    }
}

/// Policy for keeping mutually declared friends on the same role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendMode {
    /// Friends share positions 0 and 1 of a role at every common slot, or
    /// are both absent from it.
    #[default]
    Strict,

    /// Friends on the same role at the same slot earn an objective reward.
    AtBest,

    /// Friendship is ignored.
    None,
}

impl fmt::Display for FriendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FriendMode::Strict => write!(f, "strict"),
            FriendMode::AtBest => write!(f, "at_best"),
            FriendMode::None => write!(f, "none"),
        }
    }
}

impl FromStr for FriendMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(FriendMode::Strict),
            "at_best" => Ok(FriendMode::AtBest),
            "none" => Ok(FriendMode::None),
            other => Err(ConfigError::Invalid(format!("unknown friend mode: {other}"))),
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving; overrides seconds when set.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of search nodes.
    pub node_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit, falling back to [`DEFAULT_TIME_LIMIT_SECS`].
    pub fn time_limit(&self) -> Duration {
        match (self.millis_spent_limit, self.seconds_spent_limit) {
            (Some(millis), _) => Duration::from_millis(millis),
            (None, Some(seconds)) => Duration::from_secs(seconds),
            (None, None) => Duration::from_secs(DEFAULT_TIME_LIMIT_SECS),
        }
    }
}

/// Weights of the secondary objective terms.
///
/// Coverage is always rewarded by each role's own weight.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ObjectiveConfig {
    /// Cost of each distinct seat a volunteer is used on.
    #[serde(default = "default_spread_penalty")]
    pub spread_penalty: f64,

    /// Reward of each slot where a friend pair works the same role.
    #[serde(default = "default_friend_reward")]
    pub friend_reward: f64,
}

fn default_spread_penalty() -> f64 {
    1.0
}

fn default_friend_reward() -> f64 {
    3.0
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            spread_penalty: default_spread_penalty(),
            friend_reward: default_friend_reward(),
        }
    }
}

impl ObjectiveConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("spread_penalty", self.spread_penalty),
            ("friend_reward", self.friend_reward),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "objective.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
