//! Configuration system for SeatForge.
//!
//! Two kinds of configuration are loaded from TOML or YAML:
//!
//! - [`SolverConfig`]: tuning for the pairing and placement phases
//! - [`ClassroomConfig`]: a desk layout, roster, scores and constraints
//!
//! # Examples
//!
//! Load solver tuning from a TOML string:
//!
//! ```
//! use seatforge_config::SolverConfig;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     neutral_score = 4.0
//!
//!     [placement]
//!     max_iterations = 500
//!
//!     [termination]
//!     step_count_limit = 2000
//! "#).unwrap();
//!
//! assert_eq!(config.neutral_score, Some(4.0));
//! assert_eq!(config.placement.max_iterations, 500);
//! assert_eq!(config.step_limit(), Some(2000));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use seatforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("seatforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

mod classroom;

use std::path::Path;

use seatforge_core::{SeatForgeError, MAX_SCORE, MIN_SCORE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use classroom::{
    ClassroomConfig, ConstraintConfig, DeskConfig, ScoreEntryConfig, StudentConfig,
};

/// Default swap-iteration budget of the placement phase.
pub const DEFAULT_MAX_ITERATIONS: u64 = 10_000;

/// Default bound on pairing improvement passes.
pub const DEFAULT_IMPROVEMENT_PASS_LIMIT: u64 = 50;

/// Default weight of a student's own zone-preference tags.
pub const DEFAULT_ZONE_WEIGHT: f64 = 1.0;

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

    #[error("Invalid classroom: {0}")]
    Problem(#[from] SeatForgeError),
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Score for pairs absent from the compatibility matrix. `None` keeps the
    /// matrix's own default.
    #[serde(default)]
    pub neutral_score: Option<f64>,

    /// Weight applied to zone tags listed on a student.
    #[serde(default = "default_zone_weight")]
    pub default_zone_weight: f64,

    /// Pairing phase configuration.
    #[serde(default)]
    pub pairing: PairingConfig,

    /// Placement phase configuration.
    #[serde(default)]
    pub placement: PlacementConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            neutral_score: None,
            default_zone_weight: DEFAULT_ZONE_WEIGHT,
            pairing: PairingConfig::default(),
            placement: PlacementConfig::default(),
            termination: None,
        }
    }
}

fn default_zone_weight() -> f64 {
    DEFAULT_ZONE_WEIGHT
}

impl SolverConfig {
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

    /// Sets the placement swap-iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.placement.max_iterations = max_iterations;
        self
    }

    /// Sets the neutral score for missing pairs.
    pub fn with_neutral_score(mut self, score: f64) -> Self {
        self.neutral_score = Some(score);
        self
    }

    /// Sets the weight of roster zone preferences.
    pub fn with_default_zone_weight(mut self, weight: f64) -> Self {
        self.default_zone_weight = weight;
        self
    }

    /// Sets the global step budget.
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            step_count_limit: Some(steps),
        });
        self
    }

    /// Returns the global step budget, if configured.
    pub fn step_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.step_count_limit)
    }

    /// Rejects tuning values the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(score) = self.neutral_score {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(ConfigError::Invalid(format!(
                    "neutral_score {score} is outside [{MIN_SCORE}, {MAX_SCORE}]"
                )));
            }
        }
        if !self.default_zone_weight.is_finite() || self.default_zone_weight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_zone_weight {} must be finite and non-negative",
                self.default_zone_weight
            )));
        }
        Ok(())
    }
}

/// Pairing phase configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PairingConfig {
    /// Maximum number of local-improvement passes after greedy matching.
    #[serde(default = "default_improvement_pass_limit")]
    pub improvement_pass_limit: u64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            improvement_pass_limit: DEFAULT_IMPROVEMENT_PASS_LIMIT,
        }
    }
}

fn default_improvement_pass_limit() -> u64 {
    DEFAULT_IMPROVEMENT_PASS_LIMIT
}

/// Placement phase configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlacementConfig {
    /// Maximum number of accepted swaps.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

fn default_max_iterations() -> u64 {
    DEFAULT_MAX_ITERATIONS
}

/// Termination configuration.
///
/// Only step-based limits exist; wall-clock limits are left to the caller,
/// who can cancel a running solve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of steps across all phases.
    pub step_count_limit: Option<u64>,
}

#[cfg(test)]
mod tests;
