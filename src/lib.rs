#[path = "core/action.rs"]
pub mod action;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/env.rs"]
pub mod env;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/lattice.rs"]
pub mod lattice;

#[path = "core/observation.rs"]
pub mod observation;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/recorder.rs"]
pub mod recorder;

#[path = "core/registry.rs"]
pub mod registry;

#[path = "core/spaces.rs"]
pub mod spaces;

#[path = "core/stats.rs"]
pub mod stats;

pub use action::WalkAction;
pub use config::EnvConfig;
pub use env::{Environment, SawEnv, StepInfo, StepResult, WalkEvent};
pub use error::{Result, SawError};
pub use lattice::{Lattice, Site};
pub use observation::Observation;
pub use recorder::{EpisodeRecorder, FileRecorder, MemoryRecorder, SharedRecorder};
pub use registry::{EnvSpec, Registry, DEFAULT_ENV_ID};
