// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Scatter Index: accept non-overlapping boxes, then inspect the tree.

use scatter_index::{Aabb2D, ConflictIndex, QuadTree};

fn main() {
    let mut tree = QuadTree::new(Aabb2D::new(0_i64, 0, 100, 100));
    let mut accepted = 0;
    for y in (0..100).step_by(7) {
        for x in (0..100).step_by(5) {
            if tree.try_add(Aabb2D::around(x, y, 3)) {
                accepted += 1;
            }
        }
    }
    println!("accepted {accepted} boxes");
    println!("{tree:?}");
}
