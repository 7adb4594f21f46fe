// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::DVec3;
use scatter_index::Aabb3D;
use scatter_placement::{
    AssetBounds, BrushAsset, BrushParameters, CandidateGenerator, UniformAreaFalloff, UpAxis,
};

fn brush(size: f64, density: f64) -> BrushParameters {
    BrushParameters {
        size,
        density,
        assets: vec![
            BrushAsset::new("rock.usd"),
            BrushAsset::new("shrub.usd").with_weight(3.0),
        ],
        ..Default::default()
    }
}

fn bench_stamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("stamp");
    for &(size, density) in &[(200.0, 100.0), (1000.0, 500.0), (1000.0, 2000.0)] {
        let brush = brush(size, density);
        let mut generator = CandidateGenerator::with_seed(1);
        let requested = generator.predicted_count(&brush, 0.0);
        group.throughput(Throughput::Elements(requested as u64));
        group.bench_function(format!("size{size}_density{density}"), |b| {
            let mut bounds = |_: &str| Some(AssetBounds::cube(4.0, UpAxis::Y));
            b.iter(|| {
                let batch = generator
                    .stamp(&brush, 0.0, &mut bounds, &mut UniformAreaFalloff)
                    .map(|batch| batch.len());
                black_box(batch)
            });
        });
    }
    group.finish();
}

fn bench_flood(c: &mut Criterion) {
    let brush = brush(100.0, 1.0);
    let positions: Vec<DVec3> = (0..64)
        .flat_map(|x| (0..64).map(move |z| DVec3::new(x as f64 * 3.0, 0.0, z as f64 * 3.0)))
        .collect();
    let region = Aabb3D::new(-10.0, -10.0, -10.0, 200.0, 200.0, 200.0);
    let mut group = c.benchmark_group("flood");
    group.throughput(Throughput::Elements(positions.len() as u64));
    group.bench_function("grid_64x64", |b| {
        let mut generator = CandidateGenerator::with_seed(2);
        let mut bounds = |_: &str| Some(AssetBounds::cube(2.0, UpAxis::Y));
        b.iter(|| {
            let placed = generator
                .flood(&brush, region, &positions, &mut bounds)
                .map(|batch| batch.len());
            black_box(placed)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_stamp, bench_flood);
criterion_main!(benches);
