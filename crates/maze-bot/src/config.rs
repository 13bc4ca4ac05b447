//! Configuration for the automated player.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Pause between two replayed moves.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(500);

/// How often a bot blocked on the readiness gate re-checks cancellation.
pub const DEFAULT_READY_POLL: Duration = Duration::from_millis(100);

/// Errors detected while configuring a bot, before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown algorithm {0:?} (supported: Astar)")]
    UnknownAlgorithm(String),
}

/// Search algorithm driving the bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Astar,
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Astar" | "astar" | "A*" | "a*" => Ok(Self::Astar),
            other => Err(ConfigError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Astar => f.write_str("A*"),
        }
    }
}

/// Configuration for creating a [`Bot`](crate::Bot).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotConfig {
    pub algorithm: Algorithm,
    /// Pause after each replayed move; zero replays instantly.
    pub step_delay: Duration,
    pub ready_poll: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Astar,
            step_delay: DEFAULT_STEP_DELAY,
            ready_poll: DEFAULT_READY_POLL,
        }
    }
}

impl BotConfig {
    /// Default configuration with the algorithm chosen by name.
    pub fn for_algorithm(name: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            algorithm: name.parse()?,
            ..Self::default()
        })
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }
}
