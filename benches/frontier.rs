//! Benchmarks weighted frontier maintenance and selection

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rasterbloom::engine::frontier::WeightedFrontier;

fn populated_frontier(entries: i32) -> WeightedFrontier {
    let mut frontier = WeightedFrontier::new();
    for i in 0..entries {
        frontier.insert([i % 100, i / 100], f64::from(i % 17) + 0.5);
    }
    frontier
}

fn bench_frontier(c: &mut Criterion) {
    c.bench_function("frontier_insert_10k", |b| {
        b.iter(|| populated_frontier(10_000));
    });

    c.bench_function("frontier_pick_10k", |b| {
        let frontier = populated_frontier(10_000);
        let mut rng = StdRng::seed_from_u64(3);
        b.iter(|| frontier.pick(&mut rng));
    });

    c.bench_function("frontier_reweigh_10k", |b| {
        let mut frontier = populated_frontier(10_000);
        b.iter(|| {
            frontier.reweigh(|[x, y]| f64::from(x + y) + 1.0);
        });
    });

    c.bench_function("frontier_insert_remove_cycle", |b| {
        let mut frontier = populated_frontier(1_000);
        b.iter(|| {
            frontier.insert([500, 500], 1.0);
            frontier.remove([500, 500]);
        });
    });
}

criterion_group!(benches, bench_frontier);
criterion_main!(benches);
