//! SAW runner - plays self-avoiding walk episodes with a simple policy.
//!
//! Examples:
//!   sawd --episodes 1000 --size 16 --policy avoid --quiet
//!   sawd --config run.json --json
//!
//! Log verbosity follows `RUST_LOG` (default `info`). New depth records are
//! appended to the walk log (`walking.log` unless `--log` says otherwise).

use saw::stats::EpisodeStats;
use saw::{Registry, SawEnv, SawError};
use serde::Serialize;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod policy;
mod run_config;

use policy::Policy;
use run_config::RunConfig;

const RUN_ENV_ID: &str = "SAWGameEnv-run";

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Saw(#[from] SawError),

    #[error("{0}")]
    Usage(String),
}

#[derive(Debug, Clone, Serialize)]
struct Summary {
    episodes: u32,
    completions: u32,
    collisions: u32,
    stops: u32,
    truncations: u32,
    completion_rate: f32,
    last_100_rate: f32,
    mean_length: f32,
    longest_episode: u32,
    best_depth: u32,
    first_completion_at: Option<u32>,
}

impl Summary {
    fn new(stats: &EpisodeStats, best_depth: u32) -> Self {
        Self {
            episodes: stats.episodes,
            completions: stats.completions,
            collisions: stats.collisions,
            stops: stats.stops,
            truncations: stats.truncations,
            completion_rate: stats.completion_rate(),
            last_100_rate: stats.last_100_rate(),
            mean_length: stats.mean_length(),
            longest_episode: stats.longest_episode,
            best_depth,
            first_completion_at: stats.first_completion_at,
        }
    }
}

fn usage() {
    eprintln!("sawd - self-avoiding walk runner");
    eprintln!("Usage: sawd [flags]\n");
    eprintln!("Flags:");
    eprintln!("  --config <path>        JSON run config (flags override it)");
    eprintln!("  --episodes <n>         Episodes to play (default 100)");
    eprintln!("  --size <L>             Lattice side length (default 32)");
    eprintln!("  --seed <s>             Start-site seed (default: clock)");
    eprintln!("  --policy <random|avoid>");
    eprintln!("  --epsilon <e>          Exploration rate for 'avoid' (default 0.1)");
    eprintln!("  --policy-seed <s>      Seed for the policy's own PRNG");
    eprintln!("  --max-steps <n>        Truncate episodes after n moves");
    eprintln!("  --log <path>           Walk log file (default walking.log)");
    eprintln!("  --quiet                Do not draw the lattice on records");
    eprintln!("  --json                 Print the summary as JSON");
}

/// Plays `episodes` episodes and returns the tally.
fn run_episodes(env: &mut SawEnv, policy: &mut dyn Policy, episodes: u32) -> EpisodeStats {
    let mut stats = EpisodeStats::new();
    for ep in 0..episodes {
        env.reset();
        loop {
            let action = policy.act(env);
            let r = env.step(action);
            if r.done {
                stats.record_episode(r.event, env.step_count());
                debug!(
                    "episode {} {} after {} steps (reward {:+.2})",
                    ep,
                    r.event.as_str(),
                    env.step_count(),
                    r.reward
                );
                break;
            }
        }
    }
    stats
}

fn run(cfg: RunConfig) -> Result<Summary, RunError> {
    let mut registry = Registry::with_defaults();
    registry.register(RUN_ENV_ID, cfg.env.clone())?;
    let mut env = registry.make(RUN_ENV_ID)?;

    info!(
        "Running {} episodes on a {}x{} lattice with the '{}' policy",
        cfg.episodes,
        env.size(),
        env.size(),
        cfg.policy.as_str()
    );
    info!("Walk log: {:?}", env.config().log_path);

    let mut policy = policy::build(cfg.policy, cfg.policy_seed, cfg.epsilon);
    let stats = run_episodes(&mut env, policy.as_mut(), cfg.episodes);
    Ok(Summary::new(&stats, env.best_depth()))
}

fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
        return;
    }

    let cfg = match RunConfig::resolve(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            usage();
            std::process::exit(2);
        }
    };
    let json = cfg.json;

    match run(cfg) {
        Ok(summary) => {
            info!(
                "✓ {} episodes: {} completed, {} collided, {} stopped, {} truncated; best depth {}",
                summary.episodes,
                summary.completions,
                summary.collisions,
                summary.stops,
                summary.truncations,
                summary.best_depth
            );
            if json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(text) => println!("{text}"),
                    Err(e) => error!("Failed to encode summary: {}", e),
                }
            }
        }
        Err(e) => {
            error!("✗ {}", e);
            std::process::exit(1);
        }
    }
}
