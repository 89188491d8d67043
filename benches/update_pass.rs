//! Benchmarks the full per-frame pass at production particle counts.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use starbough::prelude::*;

fn scene(count: u32) -> Scene {
    let mut scene = Scene::builder()
        .with_particle_count(count)
        .with_seed(42)
        .build()
        .unwrap();
    scene.set_fixed_timestep(Some(1.0 / 60.0));
    scene
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_pass");

    for &count in &[10_000u32, 100_000] {
        group.bench_function(format!("tree_{}", count), |b| {
            let mut s = scene(count);
            b.iter(|| s.update());
        });

        group.bench_function(format!("scatter_{}", count), |b| {
            let mut s = scene(count);
            s.cycle_mode();
            b.iter(|| s.update());
        });
    }

    group.bench_function("recolor_100000", |b| {
        b.iter_batched(
            || scene(100_000),
            |mut s| s.set_theme(Theme::Gold),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
