//! The self-avoiding walk environment.
//!
//! A walker starts on a random lattice site and moves with one of seven
//! actions. The episode ends when the walker re-enters a site, presses
//! stop, or the signed occupancy sum reaches the coverage threshold.

use std::io::{self, Write};

use tracing::{debug, error, info, warn};

use crate::action::WalkAction;
use crate::config::{EnvConfig, COMPLETION_REWARD};
use crate::error::{Result, SawError};
use crate::lattice::{Lattice, Site};
use crate::observation::Observation;
use crate::prng::Prng;
use crate::recorder::{format_trajectory, EpisodeRecorder, FileRecorder};
use crate::spaces::{BoxSpace, DiscreteSpace, RewardRange};

/// Host-facing environment contract.
pub trait Environment {
    type Observation;
    type Action;

    fn reset(&mut self) -> Self::Observation;
    fn step(&mut self, action: Self::Action) -> StepResult<Self::Observation>;
    fn render(&self) -> io::Result<()>;

    fn action_space(&self) -> DiscreteSpace;
    fn observation_space(&self) -> BoxSpace;
    fn reward_range(&self) -> RewardRange;
}

/// Which branch of the reward policy produced a step result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent {
    Moved,
    Collided,
    Completed,
    Stopped,
    Truncated,
    /// Lenient stepping received an index outside the action table.
    Ignored,
}

impl WalkEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            WalkEvent::Moved => "moved",
            WalkEvent::Collided => "collided",
            WalkEvent::Completed => "completed",
            WalkEvent::Stopped => "stopped",
            WalkEvent::Truncated => "truncated",
            WalkEvent::Ignored => "ignored",
        }
    }
}

/// Auxiliary step information. Intentionally carries nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInfo {}

#[derive(Debug, Clone, PartialEq)]
pub struct StepResult<O = Observation> {
    pub observation: O,
    pub reward: f32,
    pub done: bool,
    /// Set when the episode was cut by `max_steps` rather than ending on its own.
    pub truncated: bool,
    pub event: WalkEvent,
    pub info: StepInfo,
}

pub struct SawEnv {
    config: EnvConfig,
    lattice: Lattice,
    position: Site,
    visited_sites: Vec<Site>,
    visited_actions: Vec<WalkAction>,
    step_count: u32,
    rng: Prng,
    recorder: Box<dyn EpisodeRecorder + Send>,
}

impl std::fmt::Debug for SawEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SawEnv")
            .field("size", &self.lattice.size())
            .field("position", &self.position)
            .field("step_count", &self.step_count)
            .field("best_depth", &self.recorder.best_depth())
            .finish_non_exhaustive()
    }
}

impl SawEnv {
    /// Builds an environment that logs depth records to `config.log_path`.
    pub fn new(config: EnvConfig) -> Result<Self> {
        let recorder = FileRecorder::new(config.log_path.clone());
        Self::with_recorder(config, recorder)
    }

    pub fn with_recorder(
        config: EnvConfig,
        recorder: impl EpisodeRecorder + Send + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Prng::new(seed),
            None => Prng::from_clock(),
        };
        Ok(Self {
            lattice: Lattice::new(config.lattice_size),
            position: Site::default(),
            visited_sites: Vec::new(),
            visited_actions: Vec::new(),
            step_count: 0,
            rng,
            recorder: Box::new(recorder),
            config,
        })
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.lattice.size()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn position(&self) -> Site {
        self.position
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn visited_sites(&self) -> &[Site] {
        &self.visited_sites
    }

    pub fn visited_actions(&self) -> &[WalkAction] {
        &self.visited_actions
    }

    /// All-time longest depth known to this environment's recorder.
    pub fn best_depth(&self) -> u32 {
        self.recorder.best_depth()
    }

    /// Starts a new episode from a uniformly random site.
    pub fn reset(&mut self) -> Observation {
        let size = self.lattice.size();
        let start = Site::new(
            self.rng.gen_range_usize(0, size),
            self.rng.gen_range_usize(0, size),
        );
        self.start_episode(start);
        self.get_obs()
    }

    /// Starts a new episode from `site`.
    pub fn reset_at(&mut self, site: Site) -> Result<Observation> {
        if !self.lattice.contains(site) {
            return Err(SawError::SiteOutOfBounds {
                x: site.x,
                y: site.y,
                size: self.lattice.size(),
            });
        }
        self.start_episode(site);
        Ok(self.get_obs())
    }

    fn start_episode(&mut self, start: Site) {
        self.lattice.clear();
        self.visited_sites.clear();
        self.visited_actions.clear();
        self.step_count = 0;
        self.position = start;
        self.lattice.enter(start);
        debug!(size = self.lattice.size(), start = %start, "episode reset");
    }

    pub fn step(&mut self, action: WalkAction) -> StepResult {
        let intersected = action.is_move() && self.walk(action);

        let (reward, event) = if action == WalkAction::Stop {
            (
                self.config.failure_penalty + self.config.stepwise_reward,
                WalkEvent::Stopped,
            )
        } else if intersected {
            self.offer_record();
            (self.config.failure_penalty, WalkEvent::Collided)
        } else if self.coverage_reached() {
            info!("Complete SAW! with {} steps.", self.step_count);
            self.render_terminal();
            (COMPLETION_REWARD, WalkEvent::Completed)
        } else if self
            .config
            .max_steps
            .is_some_and(|cap| self.step_count >= cap)
        {
            (self.config.stepwise_reward, WalkEvent::Truncated)
        } else {
            (self.config.stepwise_reward, WalkEvent::Moved)
        };

        StepResult {
            observation: self.get_obs(),
            reward,
            done: event != WalkEvent::Moved,
            truncated: event == WalkEvent::Truncated,
            event,
            info: StepInfo::default(),
        }
    }

    /// Steps with a raw action index; indexes outside `0..=6` are rejected
    /// and leave the environment untouched.
    pub fn walk_by_index(&mut self, index: usize) -> Result<StepResult> {
        let action = WalkAction::from_index(index)?;
        Ok(self.step(action))
    }

    /// Steps with an action label such as `"up"` or `"lower_next"`.
    pub fn walk_by_name(&mut self, name: &str) -> Result<StepResult> {
        let action = WalkAction::from_action_str(name)?;
        Ok(self.step(action))
    }

    /// Like [`walk_by_index`](Self::walk_by_index), but an unknown index is a
    /// silent no-op that pays the stepwise reward and keeps the episode going.
    pub fn step_index_lenient(&mut self, index: usize) -> StepResult {
        match WalkAction::from_index(index) {
            Ok(action) => self.step(action),
            Err(e) => {
                warn!("{}; ignoring", e);
                StepResult {
                    observation: self.get_obs(),
                    reward: self.config.stepwise_reward,
                    done: false,
                    truncated: false,
                    event: WalkEvent::Ignored,
                    info: StepInfo::default(),
                }
            }
        }
    }

    /// Site the walker would occupy after `action`, without moving it.
    pub fn target_of(&self, action: WalkAction) -> Site {
        let Site { x, y } = self.position;
        let (dx, dy) = action.delta(self.position.parity_is_even());
        Site::new(
            self.lattice.clamp_axis(x, dx),
            self.lattice.clamp_axis(y, dy),
        )
    }

    /// Moves the walker and marks the new site. Returns `true` on intersection.
    fn walk(&mut self, action: WalkAction) -> bool {
        self.position = self.target_of(action);

        self.visited_sites.push(self.position);
        self.visited_actions.push(action);
        self.step_count += 1;

        self.lattice.enter(self.position)
    }

    fn coverage_reached(&self) -> bool {
        self.lattice.occupancy_sum() as f64 >= self.config.coverage_threshold()
    }

    fn offer_record(&mut self) {
        let depth = self.step_count;
        match self.recorder.record_if_new_max(depth, &self.visited_sites) {
            Ok(true) => {
                info!("Penetration depth = {}", depth);
                debug!("{}", format_trajectory(&self.visited_sites));
                self.render_terminal();
            }
            Ok(false) => {}
            Err(e) => error!("✗ Failed to record depth {}: {}", depth, e),
        }
    }

    fn render_terminal(&self) {
        if !self.config.render_terminal {
            return;
        }
        if let Err(e) = self.render() {
            warn!("Render failed: {}", e);
        }
    }

    /// Current occupancy replicated into four channels.
    pub fn get_obs(&self) -> Observation {
        Observation::from_lattice(&self.lattice)
    }

    pub fn render_to_string(&self) -> String {
        self.lattice.to_string()
    }

    pub fn render_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self.lattice)?;
        out.flush()
    }

    /// Writes the lattice snapshot to stdout.
    pub fn render(&self) -> io::Result<()> {
        self.render_to(io::stdout().lock())
    }

    pub fn action_space(&self) -> DiscreteSpace {
        DiscreteSpace::actions()
    }

    pub fn observation_space(&self) -> BoxSpace {
        BoxSpace::lattice(self.lattice.size())
    }

    pub fn reward_range(&self) -> RewardRange {
        RewardRange::for_config(&self.config)
    }
}

impl Environment for SawEnv {
    type Observation = Observation;
    type Action = WalkAction;

    fn reset(&mut self) -> Observation {
        SawEnv::reset(self)
    }

    fn step(&mut self, action: WalkAction) -> StepResult {
        SawEnv::step(self, action)
    }

    fn render(&self) -> io::Result<()> {
        SawEnv::render(self)
    }

    fn action_space(&self) -> DiscreteSpace {
        SawEnv::action_space(self)
    }

    fn observation_space(&self) -> BoxSpace {
        SawEnv::observation_space(self)
    }

    fn reward_range(&self) -> RewardRange {
        SawEnv::reward_range(self)
    }
}
