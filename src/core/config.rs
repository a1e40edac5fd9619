use std::path::PathBuf;

use crate::error::{Result, SawError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_LATTICE_SIZE: usize = 32;
pub const DEFAULT_STEPWISE_REWARD: f32 = 0.01;
pub const DEFAULT_FAILURE_PENALTY: f32 = -1.0;
pub const DEFAULT_COVERAGE_RATIO: f64 = 0.6;
pub const DEFAULT_LOG_FILE: &str = "walking.log";
/// Largest accepted side length; `L * L` sites are allocated up front.
pub const MAX_LATTICE_SIZE: usize = 4096;

/// Reward paid when the walk covers enough of the lattice.
pub const COMPLETION_REWARD: f32 = 1.0;

/// Parameters fixed for the lifetime of one environment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvConfig {
    /// Lattice side length `L`.
    pub lattice_size: usize,
    pub stepwise_reward: f32,
    pub failure_penalty: f32,
    /// Fraction of `L * L` the signed occupancy sum must reach to complete.
    pub coverage_ratio: f64,
    /// Optional episode length cap; `None` never truncates.
    pub max_steps: Option<u32>,
    /// PRNG seed for start sites; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Print the lattice to stdout on new depth records and completions.
    pub render_terminal: bool,
    /// Destination of the depth-record trajectory log.
    pub log_path: PathBuf,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            lattice_size: DEFAULT_LATTICE_SIZE,
            stepwise_reward: DEFAULT_STEPWISE_REWARD,
            failure_penalty: DEFAULT_FAILURE_PENALTY,
            coverage_ratio: DEFAULT_COVERAGE_RATIO,
            max_steps: None,
            seed: None,
            render_terminal: true,
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl EnvConfig {
    pub fn with_size(lattice_size: usize) -> Self {
        Self {
            lattice_size,
            ..Self::default()
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn quiet(mut self) -> Self {
        self.render_terminal = false;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Signed occupancy sum at or above which an episode completes.
    pub fn coverage_threshold(&self) -> f64 {
        let side = self.lattice_size as f64;
        self.coverage_ratio * side * side
    }

    pub fn validate(&self) -> Result<()> {
        if self.lattice_size == 0 {
            return Err(SawError::config("lattice_size", "must be at least 1"));
        }
        if self.lattice_size > MAX_LATTICE_SIZE {
            return Err(SawError::config(
                "lattice_size",
                format!("must be at most {MAX_LATTICE_SIZE}"),
            ));
        }
        if !self.stepwise_reward.is_finite() {
            return Err(SawError::config("stepwise_reward", "must be finite"));
        }
        if !self.failure_penalty.is_finite() {
            return Err(SawError::config("failure_penalty", "must be finite"));
        }
        if !self.coverage_ratio.is_finite() {
            return Err(SawError::config("coverage_ratio", "must be finite"));
        }
        if self.max_steps == Some(0) {
            return Err(SawError::config("max_steps", "must be positive when set"));
        }
        Ok(())
    }

    /// Parses a JSON document; absent fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: EnvConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
