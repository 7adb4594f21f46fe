// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flood fill.
//!
//! Place one candidate per sampled surface point inside a volume, rejecting overlaps.
//!
//! Run:
//! - `cargo run -p scatter_demos --example flood_fill`

use glam::DVec3;
use scatter_index::Aabb3D;
use scatter_placement::{AssetBounds, BrushAsset, BrushParameters, CandidateGenerator, UpAxis};

fn main() {
    env_logger::init();

    let brush = BrushParameters {
        size: 50.0,
        density: 200.0,
        assets: vec![BrushAsset::new("grass.usd")],
        ..Default::default()
    };
    let region = Aabb3D::new(0.0, -5.0, 0.0, 100.0, 5.0, 100.0);

    // The host samples its surfaces at this density; a jittered grid stands in here.
    let per_unit_area = brush.flood_density_per_unit_area();
    let step = (1.0 / per_unit_area).sqrt();
    let cells = (100.0 / step) as usize;
    let positions: Vec<DVec3> = (0..cells)
        .flat_map(|i| {
            (0..cells).map(move |j| {
                let jitter = ((i * 31 + j * 17) % 7) as f64 / 7.0 - 0.5;
                DVec3::new((i as f64 + 0.5 + jitter) * step, 0.0, (j as f64 + 0.5) * step)
            })
        })
        .collect();
    println!(
        "sampling at {per_unit_area:.4}/unit², {} surface points",
        positions.len()
    );

    let mut bounds = |_: &str| Some(AssetBounds::cube(3.0, UpAxis::Y));
    let mut generator = CandidateGenerator::with_seed(7);
    let batch = generator
        .flood(&brush, region, &positions, &mut bounds)
        .expect("brush has enabled assets");
    println!(
        "kept {}/{} positions after {} conflict tests",
        batch.len(),
        batch.requested,
        batch.conflict_tests
    );
}
