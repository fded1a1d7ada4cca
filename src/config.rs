//! Engine configuration for self-play.

use bitways_core::Board;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "bitways.toml";

/// Settings for move selection and self-play.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Seed of the random move-selection policy.
    #[serde(default)]
    seed: u64,

    /// Self-play ply cap.
    #[serde(default = "default_max_plies")]
    max_plies: u32,

    /// Whether legal moves are listed with duplicates removed.
    #[serde(default = "default_true")]
    distinct: bool,

    /// Whether the random policy plays an immediate win when one exists.
    #[serde(default = "default_true")]
    prefer_mates: bool,

    /// Position self-play starts from, with an optional `moves` clause.
    #[serde(default = "default_start")]
    start: String,
}

fn default_max_plies() -> u32 {
    200
}

fn default_true() -> bool {
    true
}

fn default_start() -> String {
    "startpos b - 1".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_plies: default_max_plies(),
            distinct: default_true(),
            prefer_mates: default_true(),
            start: default_start(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(seed = config.seed, start = %config.start, "Config loaded successfully");
        Ok(config)
    }

    /// Loads [`DEFAULT_CONFIG_FILE`] from `dir`, or the defaults when the
    /// directory has no such file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::from_file(path)
        } else {
            debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the ply cap.
    pub fn with_max_plies(mut self, max_plies: u32) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Replaces the start position.
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    /// Decodes the start position.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `start` is not a valid position.
    #[instrument(skip(self), fields(start = %self.start))]
    pub fn start_board(&self) -> Result<Board, ConfigError> {
        self.start
            .parse()
            .map_err(|e| ConfigError::new(format!("Invalid start position: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
