//! Engine configuration
//!
//! Defaults come from the constants in `tetrion-types`. A config can be
//! deserialized (missing fields take their defaults) or read from the
//! environment:
//!
//! - `TETRION_SEED`: piece sequence seed (default: 1)
//! - `TETRION_BASE_SPEED_MS`: fall interval at level 1 (default: 1000)
//! - `TETRION_SPEED_STEP_MS`: interval reduction per level (default: 100)
//! - `TETRION_SPEED_MULTIPLIER`: divides the fall interval (default: 1.0)
//! - `TETRION_RANDOMIZER`: `uniform` or `bag` (default: uniform)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Randomizer;
use crate::types::{BASE_SPEED_MS, SPEED_STEP_MS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub seed: u32,
    pub base_speed_ms: u32,
    pub speed_step_ms: u32,
    pub speed_multiplier: f64,
    pub randomizer: Randomizer,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            base_speed_ms: BASE_SPEED_MS,
            speed_step_ms: SPEED_STEP_MS,
            speed_multiplier: 1.0,
            randomizer: Randomizer::Uniform,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables; unset or unparseable values keep
    /// their defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let seed = env::var("TETRION_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);
        let base_speed_ms = env::var("TETRION_BASE_SPEED_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.base_speed_ms);
        let speed_step_ms = env::var("TETRION_SPEED_STEP_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.speed_step_ms);
        let speed_multiplier = env::var("TETRION_SPEED_MULTIPLIER")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.speed_multiplier);
        let randomizer = env::var("TETRION_RANDOMIZER")
            .ok()
            .and_then(|s| Randomizer::from_str(s.trim()))
            .unwrap_or(defaults.randomizer);

        Self {
            seed,
            base_speed_ms,
            speed_step_ms,
            speed_multiplier,
            randomizer,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    pub fn with_speed_multiplier(mut self, speed_multiplier: f64) -> Self {
        self.speed_multiplier = speed_multiplier;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_multiplier(self.speed_multiplier) {
            return Err(ConfigError::InvalidSpeedMultiplier);
        }
        if self.base_speed_ms == 0 {
            return Err(ConfigError::ZeroBaseSpeed);
        }
        Ok(())
    }
}

/// Positive and finite
pub(crate) fn is_valid_multiplier(multiplier: f64) -> bool {
    multiplier.is_finite() && multiplier > 0.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidSpeedMultiplier,
    ZeroBaseSpeed,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::InvalidSpeedMultiplier => "invalid_speed_multiplier",
            ConfigError::ZeroBaseSpeed => "zero_base_speed",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::InvalidSpeedMultiplier => "speed multiplier must be positive and finite",
            ConfigError::ZeroBaseSpeed => "base speed must be greater than zero",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl std::error::Error for ConfigError {}
