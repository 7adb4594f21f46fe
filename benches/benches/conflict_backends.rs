// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scatter_index::{Aabb2D, Aabb3D, ConflictIndex, FlatConflictSet, OcTree, QuadTree};

fn gen_disk_boxes(count: usize, radius: f64, half: f64, seed: u64) -> Vec<Aabb2D<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let r = radius * rng.random::<f64>().sqrt();
            let a = rng.random_range(0.0..core::f64::consts::TAU);
            Aabb2D::around(r * a.cos(), r * a.sin(), half)
        })
        .collect()
}

fn gen_cubes(count: usize, extent: f64, half: f64, seed: u64) -> Vec<Aabb3D<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Aabb3D::around(
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
                half,
            )
        })
        .collect()
}

fn fill(index: &mut impl ConflictIndex<Bounds = Aabb2D<f64>>, boxes: &[Aabb2D<f64>]) -> usize {
    boxes.iter().filter(|b| index.try_add(**b)).count()
}

fn bench_quadtree_vs_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("stamp_conflicts");
    for &n in &[256usize, 1024, 4096] {
        let boxes = gen_disk_boxes(n, 100.0, 1.0, 7);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("flat_try_add_n{n}"), |b| {
            b.iter_batched(
                FlatConflictSet::<Aabb2D<f64>>::new,
                |mut set| black_box(fill(&mut set, &boxes)),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("quadtree_try_add_n{n}"), |b| {
            b.iter_batched(
                || QuadTree::new(Aabb2D::around(0.0, 0.0, 100.0)),
                |mut tree| black_box(fill(&mut tree, &boxes)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_octree_flood(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_conflicts");
    let cubes = gen_cubes(8192, 500.0, 2.0, 3);
    let region = Aabb3D::around(0.0, 0.0, 0.0, 500.0);
    group.throughput(Throughput::Elements(cubes.len() as u64));
    group.bench_function("octree_try_add", |b| {
        b.iter_batched(
            || OcTree::new(region),
            |mut tree| black_box(cubes.iter().filter(|c| tree.try_add(**c)).count()),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("octree_seeded", |b| {
        b.iter(|| {
            let tree = OcTree::with_items(region, Default::default(), cubes.iter().copied());
            black_box(tree.node_count())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_quadtree_vs_flat, bench_octree_flood);
criterion_main!(benches);
