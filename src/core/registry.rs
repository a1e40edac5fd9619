//! Explicit environment factory.
//!
//! Hosts build a [`Registry`] at startup and ask it for environments by id.
//! Nothing is registered implicitly.

use crate::config::EnvConfig;
use crate::env::SawEnv;
use crate::error::{Result, SawError};
use crate::recorder::EpisodeRecorder;

pub const DEFAULT_ENV_ID: &str = "SAWGameEnv-v0";

#[derive(Debug, Clone, PartialEq)]
pub struct EnvSpec {
    pub id: String,
    pub config: EnvConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: Vec<EnvSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the stock `SAWGameEnv-v0` (L = 32).
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        reg.specs.push(EnvSpec {
            id: DEFAULT_ENV_ID.to_string(),
            config: EnvConfig::default(),
        });
        reg
    }

    pub fn register(&mut self, id: impl Into<String>, config: EnvConfig) -> Result<()> {
        let id = id.into();
        if self.spec(&id).is_some() {
            return Err(SawError::DuplicateEnvironment(id));
        }
        config.validate()?;
        self.specs.push(EnvSpec { id, config });
        Ok(())
    }

    pub fn spec(&self, id: &str) -> Option<&EnvSpec> {
        self.specs.iter().find(|s| s.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.id.as_str())
    }

    fn lookup(&self, id: &str) -> Result<&EnvSpec> {
        self.spec(id)
            .ok_or_else(|| SawError::UnknownEnvironment(id.to_string()))
    }

    pub fn make(&self, id: &str) -> Result<SawEnv> {
        SawEnv::new(self.lookup(id)?.config.clone())
    }

    pub fn make_with_recorder(
        &self,
        id: &str,
        recorder: impl EpisodeRecorder + Send + 'static,
    ) -> Result<SawEnv> {
        SawEnv::with_recorder(self.lookup(id)?.config.clone(), recorder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::MemoryRecorder;

    #[test]
    fn defaults_register_stock_environment() {
        let reg = Registry::with_defaults();
        assert_eq!(reg.ids().collect::<Vec<_>>(), vec![DEFAULT_ENV_ID]);

        let env = reg
            .make_with_recorder(DEFAULT_ENV_ID, MemoryRecorder::new())
            .unwrap();
        assert_eq!(env.size(), 32);
        assert_eq!(env.observation_space().shape, [32, 32, 4]);
    }

    #[test]
    fn new_registry_is_empty() {
        assert_eq!(Registry::new().ids().count(), 0);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let reg = Registry::with_defaults();
        assert!(matches!(
            reg.make("SAWGameEnv-v9"),
            Err(SawError::UnknownEnvironment(id)) if id == "SAWGameEnv-v9"
        ));
    }

    #[test]
    fn duplicates_and_bad_configs_are_rejected() {
        let mut reg = Registry::with_defaults();
        assert!(matches!(
            reg.register(DEFAULT_ENV_ID, EnvConfig::default()),
            Err(SawError::DuplicateEnvironment(_))
        ));
        assert!(reg.register("tiny", EnvConfig::with_size(0)).is_err());

        reg.register("small", EnvConfig::with_size(4).quiet()).unwrap();
        let env = reg
            .make_with_recorder("small", MemoryRecorder::new())
            .unwrap();
        assert_eq!(env.size(), 4);
        assert!(!env.config().render_terminal);
    }
}
