//! Criterion benchmarks for the walk environment.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use saw::{EnvConfig, MemoryRecorder, SawEnv, WalkAction};

fn make_env(size: usize) -> SawEnv {
    let cfg = EnvConfig::with_size(size).seeded(42).quiet();
    SawEnv::with_recorder(cfg, MemoryRecorder::new()).expect("valid bench config")
}

/// reset() cost grows with L^2 (grid clear + observation build).
fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("reset");
    for size in [8usize, 16, 32, 64] {
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut env = make_env(size);
            b.iter(|| black_box(env.reset()));
        });
    }
    group.finish();
}

/// Full episodes under a fixed action cycle; every step rebuilds the observation.
fn bench_episode(c: &mut Criterion) {
    let mut group = c.benchmark_group("episode");
    for size in [8usize, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut env = make_env(size);
            b.iter(|| {
                env.reset();
                for action in WalkAction::MOVES.iter().cycle().take(4 * size) {
                    let r = env.step(*action);
                    if r.done {
                        break;
                    }
                }
                black_box(env.step_count())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reset, bench_episode);
criterion_main!(benches);
