//! Benchmarks for the reduction engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dominance_solver::dominance::{
    probe, NormalFormGame, Player, ReductionConfig, ReductionEngine, SimplexSolver,
};
use dominance_solver::games::classic;

fn random_game(seed: u64, rows: usize, cols: usize) -> NormalFormGame {
    let mut rng = StdRng::seed_from_u64(seed);
    let (u1, u2) = classic::random_payoffs(&mut rng, rows, cols, -9, 9);
    let row_labels = (0..rows).map(|i| format!("1:1:R{}", i)).collect();
    let col_labels = (0..cols).map(|j| format!("2:1:C{}", j)).collect();
    NormalFormGame::from_matrices(u1, u2, row_labels, col_labels).unwrap()
}

fn single_probe_benchmark(c: &mut Criterion) {
    let game = random_game(42, 16, 16);
    let solver = SimplexSolver::default();

    c.bench_function("probe_16x16_single", |b| {
        b.iter(|| {
            black_box(probe::is_dominated(
                &game,
                Player::Row,
                black_box(0),
                &solver,
                1e-9,
            ))
        })
    });
}

fn full_reduction_benchmark(c: &mut Criterion) {
    c.bench_function("reduce_16x16_full", |b| {
        b.iter(|| {
            let game = random_game(42, 16, 16);
            let mut engine =
                ReductionEngine::new(game, SimplexSolver::default(), ReductionConfig::default());
            engine.reduce();
            black_box(engine.stats().total_removed())
        })
    });
}

fn parallel_reduction_benchmark(c: &mut Criterion) {
    c.bench_function("reduce_16x16_parallel", |b| {
        b.iter(|| {
            let game = random_game(42, 16, 16);
            let mut engine = ReductionEngine::new(
                game,
                SimplexSolver::default(),
                ReductionConfig::default().with_parallel_probes(true),
            );
            engine.reduce();
            black_box(engine.stats().total_removed())
        })
    });
}

criterion_group!(
    benches,
    single_probe_benchmark,
    full_reduction_benchmark,
    parallel_reduction_benchmark
);
criterion_main!(benches);
