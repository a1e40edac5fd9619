//! Action selection for the runner.

use saw::prng::Prng;
use saw::{SawEnv, WalkAction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Uniform over the six moves.
    #[default]
    Random,
    /// Epsilon-greedy: prefer a move onto an unvisited site.
    Avoid,
}

impl PolicyKind {
    pub fn from_arg(s: &str) -> Option<Self> {
        match s {
            "random" => Some(PolicyKind::Random),
            "avoid" => Some(PolicyKind::Avoid),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::Avoid => "avoid",
        }
    }
}

pub trait Policy {
    fn act(&mut self, env: &SawEnv) -> WalkAction;
}

pub struct RandomPolicy {
    rng: Prng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Prng::new(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _env: &SawEnv) -> WalkAction {
        let i = self.rng.gen_range_usize(0, WalkAction::MOVES.len());
        WalkAction::MOVES[i]
    }
}

pub struct AvoidingPolicy {
    rng: Prng,
    epsilon: f32,
}

impl AvoidingPolicy {
    pub fn new(seed: u64, epsilon: f32) -> Self {
        Self {
            rng: Prng::new(seed),
            epsilon: epsilon.clamp(0.0, 1.0),
        }
    }
}

impl Policy for AvoidingPolicy {
    fn act(&mut self, env: &SawEnv) -> WalkAction {
        if self.rng.next_f32_01() < self.epsilon {
            let i = self.rng.gen_range_usize(0, WalkAction::MOVES.len());
            return WalkAction::MOVES[i];
        }

        let mut open = [WalkAction::Stop; 6];
        let mut n = 0usize;
        for action in WalkAction::MOVES {
            if env.lattice().visit_count(env.target_of(action)) == 0 {
                open[n] = action;
                n += 1;
            }
        }

        // Boxed in: stopping costs slightly less than colliding.
        if n == 0 {
            return WalkAction::Stop;
        }
        open[self.rng.gen_range_usize(0, n)]
    }
}

pub fn build(kind: PolicyKind, seed: u64, epsilon: f32) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        PolicyKind::Avoid => Box::new(AvoidingPolicy::new(seed, epsilon)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saw::{EnvConfig, MemoryRecorder, Site};

    fn env(size: usize) -> SawEnv {
        let cfg = EnvConfig::with_size(size).seeded(5).quiet();
        SawEnv::with_recorder(cfg, MemoryRecorder::new()).unwrap()
    }

    #[test]
    fn random_policy_never_stops() {
        let env = env(4);
        let mut p = RandomPolicy::new(1);
        for _ in 0..500 {
            assert!(p.act(&env).is_move());
        }
    }

    #[test]
    fn greedy_avoider_never_collides_while_it_has_room() {
        let mut env = env(6);
        let mut p = AvoidingPolicy::new(9, 0.0);
        for _ in 0..20 {
            env.reset();
            loop {
                let r = env.step(p.act(&env));
                assert_ne!(r.event, saw::WalkEvent::Collided);
                if r.done {
                    break;
                }
            }
        }
    }

    #[test]
    fn boxed_in_avoider_stops() {
        // On a 1x1 lattice every move lands back on the start site.
        let mut env = env(1);
        env.reset_at(Site::new(0, 0)).unwrap();
        let mut p = AvoidingPolicy::new(2, 0.0);
        assert_eq!(p.act(&env), WalkAction::Stop);
    }

    #[test]
    fn kinds_parse_from_args() {
        assert_eq!(PolicyKind::from_arg("avoid"), Some(PolicyKind::Avoid));
        assert_eq!(PolicyKind::from_arg("random"), Some(PolicyKind::Random));
        assert_eq!(PolicyKind::from_arg("greedy"), None);
        assert_eq!(PolicyKind::Avoid.as_str(), "avoid");
    }
}
