// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Index: insert-only conflict trees for non-overlapping placement.
//!
//! A conflict index accepts an axis-aligned box only if it overlaps nothing it has
//! already accepted. Placement code feeds candidate footprints through
//! [`ConflictIndex::try_add`] and keeps the ones that come back `true`.
//!
//! - [`QuadTree`] subdivides a 2D region into quadrants.
//! - [`OcTree`] subdivides a 3D region into octants.
//! - [`FlatConflictSet`] is a linear scan with the same answers, handy for tiny sets
//!   and as a reference.
//!
//! Boxes are closed: two boxes that only share an edge or a corner overlap. There is
//! no removal; a tree lives for one batch of placements.
//!
//! # Example
//!
//! ```rust
//! use scatter_index::{Aabb2D, ConflictIndex, QuadTree};
//!
//! let mut tree = QuadTree::new(Aabb2D::new(-100.0, -100.0, 100.0, 100.0));
//! assert!(tree.try_add(Aabb2D::around(0.0, 0.0, 5.0)));
//! // Overlaps the first box.
//! assert!(!tree.try_add(Aabb2D::around(8.0, 0.0, 5.0)));
//! assert!(tree.try_add(Aabb2D::around(20.0, 0.0, 5.0)));
//! assert_eq!(tree.len(), 2);
//! ```
//!
//! ## Splitting
//!
//! Leaves split lazily: a leaf holding more than [`TreeLimits::capacity`] boxes is
//! subdivided the next time an insertion reaches it. A box touching every child of
//! a split node is stored once in that node's spanning list; a box touching only
//! some children is stored in each of them.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.

#![no_std]

extern crate alloc;

pub mod conflict;
pub mod flat;
pub mod partition;
pub mod tree;
pub mod types;

pub use conflict::ConflictIndex;
pub use flat::FlatConflictSet;
pub use partition::{BoundingBox, Octants, Partition, Quadrants};
pub use tree::{OcTree, QuadTree, RegionTree, TreeLimits};
pub use types::{Aabb2D, Aabb3D, Scalar};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_boxes_never_overlap() {
        let mut tree = QuadTree::new(Aabb2D::new(0_i64, 0, 1000, 1000));
        let mut accepted = alloc::vec::Vec::new();
        for i in 0..400_i64 {
            let x = (i * 37) % 1000;
            let y = (i * 91) % 1000;
            let b = Aabb2D::around(x, y, 12);
            if tree.try_add(b) {
                accepted.push(b);
            }
        }
        for (i, a) in accepted.iter().enumerate() {
            for b in &accepted[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
        assert_eq!(tree.len(), accepted.len());
    }

    #[test]
    fn octree_rejects_overlap() {
        let mut tree = OcTree::new(Aabb3D::new(0.0, 0.0, 0.0, 10.0, 10.0, 10.0));
        assert!(tree.try_add(Aabb3D::around(5.0, 5.0, 5.0, 1.0)));
        assert!(!tree.try_add(Aabb3D::around(6.0, 6.0, 6.0, 1.0)));
        assert!(tree.try_add(Aabb3D::around(5.0, 5.0, 8.0, 0.5)));
    }
}
