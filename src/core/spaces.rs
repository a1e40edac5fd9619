//! Declared spaces of the walk environment.
//!
//! Observation depth and reward bounds are declared to match what the
//! environment actually emits: four stacked frames, and the closed interval
//! `[-1, 1]` (the failure penalty and the completion reward sit exactly on
//! its ends).

use crate::action::WalkAction;
use crate::config::{EnvConfig, COMPLETION_REWARD};
use crate::observation::{Observation, FRAME_DEPTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiscreteSpace {
    pub n: usize,
}

impl DiscreteSpace {
    pub fn actions() -> Self {
        Self {
            n: WalkAction::COUNT,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.n
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxSpace {
    pub low: f32,
    pub high: f32,
    pub shape: [usize; 3],
}

impl BoxSpace {
    pub fn lattice(size: usize) -> Self {
        Self {
            low: -1.0,
            high: 1.0,
            shape: [size, size, FRAME_DEPTH],
        }
    }

    pub fn contains(&self, obs: &Observation) -> bool {
        obs.shape() == self.shape
            && obs
                .as_slice()
                .iter()
                .all(|v| (self.low..=self.high).contains(v))
    }
}

/// Closed reward interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewardRange {
    pub min: f32,
    pub max: f32,
}

impl RewardRange {
    pub fn for_config(cfg: &EnvConfig) -> Self {
        let stop = cfg.failure_penalty + cfg.stepwise_reward;
        Self {
            min: cfg.failure_penalty.min(stop).min(cfg.stepwise_reward),
            max: COMPLETION_REWARD.max(cfg.stepwise_reward).max(stop),
        }
    }

    pub fn contains(&self, reward: f32) -> bool {
        (self.min..=self.max).contains(&reward)
    }
}

impl Default for RewardRange {
    fn default() -> Self {
        Self::for_config(&EnvConfig::default())
    }
}
