//! Cost of building the transition table and of planning to convergence

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridworld::agent::PolicyIteration;
use gridworld::env::Environment;
use gridworld::types::Coord;
use gridworld::world::{TrapSpec, World};
use rand::{rngs::StdRng, SeedableRng};

fn environment(size: usize) -> Environment {
    let mut rng = StdRng::seed_from_u64(1337);
    let traps = TrapSpec::Random { p_empty: 0.85, p_trap: 0.15 };
    let world = World::new(size, Coord::new(0, 0), None, Some(&traps), &mut rng).unwrap();
    Environment::new(world, 4 * size * size).unwrap()
}

fn bench_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_iteration");
    for size in [5usize, 10, 20] {
        let env = environment(size);
        group.bench_with_input(BenchmarkId::new("plan", size), &env, |b, env| {
            b.iter(|| {
                let mut planner = PolicyIteration::new(env.transitions(), 0.9, 0.8).unwrap();
                black_box(planner.plan(10_000))
            })
        });
        group.bench_with_input(BenchmarkId::new("transition_table", size), &size, |b, &size| {
            b.iter(|| black_box(environment(size)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_planning);
criterion_main!(benches);
