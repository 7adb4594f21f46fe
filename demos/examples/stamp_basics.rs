// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stamp basics.
//!
//! Generate one stamp, paint it into an instancer, then undo the paint.
//!
//! Run:
//! - `cargo run -p scatter_demos --example stamp_basics`

use glam::{Quat, Vec3};
use scatter_erase::{InstanceArrays, PointInstancer};
use scatter_placement::{
    AssetBounds, BrushAsset, BrushParameters, CandidateGenerator, UniformAreaFalloff, UpAxis,
};

fn main() {
    env_logger::init();

    let brush = BrushParameters {
        size: 300.0,
        density: 60.0,
        assets: vec![
            BrushAsset::new("rock.usd"),
            BrushAsset::new("fern.usd").with_weight(3.0),
        ],
        ..Default::default()
    };
    let mut bounds = |url: &str| match url {
        "rock.usd" => Some(AssetBounds::cube(12.0, UpAxis::Y)),
        "fern.usd" => Some(AssetBounds::cube(6.0, UpAxis::Y)),
        _ => None,
    };

    let mut generator = CandidateGenerator::with_seed(42);
    let batch = generator
        .stamp(&brush, 0.0, &mut bounds, &mut UniformAreaFalloff)
        .expect("brush has enabled assets");
    println!(
        "placed {}/{} candidates with {} conflict tests",
        batch.len(),
        batch.requested,
        batch.conflict_tests
    );

    // Paint: brush-local x/y map onto the ground plane around a hit point.
    let hit = Vec3::new(100.0, 0.0, -50.0);
    let mut arrays = InstanceArrays::new();
    arrays.extend_placements(batch.candidates.iter().map(|c| {
        let position = hit
            + Vec3::new(
                c.position.x as f32,
                c.vertical_offset as f32,
                c.position.y as f32,
            );
        let orientation = Quat::from_rotation_y((c.rotation as f32).to_radians());
        (c.asset_index as i32, position, orientation, c.scale as f32)
    }));
    let mut instancer = PointInstancer::new();
    arrays.clone().store(&mut instancer);
    println!("instancer holds {} instances", instancer.len());

    // Undo the paint by dropping what it appended.
    arrays.truncate_last(batch.len());
    arrays.store(&mut instancer);
    assert!(instancer.is_empty(), "undo removes every painted instance");
}
