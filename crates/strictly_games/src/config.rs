//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_dots::{DEFAULT_GRID_SIZE, GridSize, Mode};
use tracing::{debug, info, instrument};

/// Configuration for a dots-and-boxes session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DotsConfig {
    /// Dots per side.
    #[serde(default = "default_grid_size")]
    grid_size: usize,

    /// Who plays the player 2 seat.
    #[serde(default)]
    mode: Mode,

    /// Pause before the heuristic moves, in milliseconds.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Seed for the heuristic's random fallback. Entropy when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

fn default_opponent_delay_ms() -> u64 {
    300
}

impl DotsConfig {
    /// Creates a configuration with defaults for everything but the mode.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        Self {
            grid_size: default_grid_size(),
            mode,
            opponent_delay_ms: default_opponent_delay_ms(),
            seed: None,
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(grid_size = config.grid_size, mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text and validates it.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.grid()?;
        Ok(config)
    }

    /// Validated grid size.
    pub fn grid(&self) -> Result<GridSize, ConfigError> {
        GridSize::new(self.grid_size).map_err(|e| ConfigError::new(e.message))
    }

    /// Heuristic delay as a duration.
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Overrides the grid size.
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Overrides the heuristic delay.
    pub fn with_opponent_delay_ms(mut self, delay_ms: u64) -> Self {
        self.opponent_delay_ms = delay_ms;
        self
    }

    /// Overrides the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for DotsConfig {
    fn default() -> Self {
        Self::new(Mode::default())
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
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = DotsConfig::from_toml("").unwrap();
        assert_eq!(config, DotsConfig::default());
        assert_eq!(*config.grid_size(), 5);
        assert_eq!(*config.mode(), Mode::HumanVsHeuristic);
        assert_eq!(config.opponent_delay(), Duration::from_millis(300));
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_full_toml() {
        let config = DotsConfig::from_toml(
            r#"
            grid_size = 4
            mode = "human_vs_human"
            opponent_delay_ms = 10
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.grid().unwrap().dots(), 4);
        assert_eq!(*config.mode(), Mode::HumanVsHuman);
        assert_eq!(*config.opponent_delay_ms(), 10);
        assert_eq!(*config.seed(), Some(42));
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        let err = DotsConfig::from_toml("grid_size = 1").unwrap_err();
        assert!(err.message.contains("at least 2"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = DotsConfig::from_toml(r#"mode = "online""#).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }
}
