//! Runner configuration: a JSON file plus command-line overrides.

use std::path::{Path, PathBuf};

use saw::EnvConfig;
use serde::{Deserialize, Serialize};

use crate::policy::PolicyKind;
use crate::RunError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub env: EnvConfig,
    pub episodes: u32,
    pub policy: PolicyKind,
    pub epsilon: f32,
    pub policy_seed: u64,
    /// Print the final summary as JSON on stdout.
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            env: EnvConfig::default(),
            episodes: 100,
            policy: PolicyKind::Random,
            epsilon: 0.1,
            policy_seed: 0x5A57_5EED,
            json: false,
        }
    }
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self, RunError> {
        let cfg: RunConfig = serde_json::from_str(json).map_err(saw::SawError::from)?;
        cfg.env.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, RunError> {
        let text = std::fs::read_to_string(path).map_err(saw::SawError::from)?;
        Self::from_json_str(&text)
    }

    /// Applies `--flag value` overrides on top of `self`.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self, RunError> {
        let mut it = args.iter();
        while let Some(flag) = it.next() {
            if flag == "--quiet" {
                self.env.render_terminal = false;
                continue;
            }
            if flag == "--json" {
                self.json = true;
                continue;
            }
            if flag == "--config" {
                // Already consumed by `resolve`.
                it.next();
                continue;
            }

            let value = it
                .next()
                .ok_or_else(|| RunError::Usage(format!("{flag} expects a value")))?;
            match flag.as_str() {
                "--episodes" => self.episodes = parse(flag, value)?,
                "--size" => self.env.lattice_size = parse(flag, value)?,
                "--seed" => self.env.seed = Some(parse(flag, value)?),
                "--policy-seed" => self.policy_seed = parse(flag, value)?,
                "--epsilon" => self.epsilon = parse(flag, value)?,
                "--max-steps" => self.env.max_steps = Some(parse(flag, value)?),
                "--log" => self.env.log_path = PathBuf::from(value),
                "--policy" => {
                    self.policy = PolicyKind::from_arg(value).ok_or_else(|| {
                        RunError::Usage(format!("unknown policy '{value}' (random|avoid)"))
                    })?
                }
                other => return Err(RunError::Usage(format!("unknown flag '{other}'"))),
            }
        }
        self.env.validate()?;
        Ok(self)
    }

    /// Loads `--config` if given, then layers the remaining flags on top.
    pub fn resolve(args: &[String]) -> Result<Self, RunError> {
        let base = match args.iter().position(|a| a == "--config") {
            Some(i) => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| RunError::Usage("--config expects a path".to_string()))?;
                Self::load(Path::new(path))?
            }
            None => Self::default(),
        };
        base.apply_args(args)
    }
}

fn parse<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, RunError> {
    value
        .parse()
        .map_err(|_| RunError::Usage(format!("invalid value '{value}' for {flag}")))
}
