// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Erase and restore.
//!
//! Erase instances of two assets under a brush stroke, then undo it.
//!
//! Run:
//! - `cargo run -p scatter_demos --example erase_restore`

use std::collections::HashMap;

use glam::{DVec3, Quat, Vec3};
use scatter_erase::{EraseCriterion, EraseTransaction, PointInstancer};

fn grid(proto: i32, offset: f32) -> PointInstancer {
    let mut store = PointInstancer::new();
    for x in 0..10 {
        for z in 0..10 {
            store
                .positions
                .push(Vec3::new(x as f32 * 2.0 + offset, 0.0, z as f32 * 2.0));
            store.orientations.push(Quat::IDENTITY);
            store.scales.push(Vec3::ONE);
            store.proto_indices.push(proto);
        }
    }
    store
}

fn main() {
    env_logger::init();

    let mut scene = HashMap::from([
        ("rock.usd".to_string(), grid(0, 0.0)),
        ("fern.usd".to_string(), grid(1, 1.0)),
    ]);

    let brush = EraseCriterion::brush(DVec3::new(9.0, 0.0, 9.0), DVec3::Y, 1.0, 4.0);
    let mut stroke = EraseTransaction::new();
    if !stroke.prepare(&scene, ["rock.usd", "fern.usd"], &brush) {
        println!("nothing under the brush");
        return;
    }
    stroke.execute(&mut scene);
    for (url, erased) in stroke.erased() {
        println!("{url}: erased {}", erased.instance_count());
    }
    println!(
        "left: rock {} fern {}",
        scene["rock.usd"].len(),
        scene["fern.usd"].len()
    );

    stroke.undo(&mut scene);
    assert_eq!(scene["rock.usd"].len(), 100, "undo restores every rock");
    assert_eq!(scene["fern.usd"].len(), 100, "undo restores every fern");
    println!("restored");
}
