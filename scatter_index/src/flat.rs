// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector conflict set with linear scans. Small and simple; good for tiny sets
//! and as a reference for the trees.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::conflict::ConflictIndex;
use crate::partition::BoundingBox;

/// Conflict set that tests every new box against every accepted box.
#[derive(Clone)]
pub struct FlatConflictSet<B> {
    items: Vec<B>,
}

impl<B> Default for FlatConflictSet<B> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<B: BoundingBox> FlatConflictSet<B> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set seeded with already accepted boxes.
    ///
    /// Seeds are not checked against each other.
    pub fn with_items(items: impl IntoIterator<Item = B>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Accepted boxes in acceptance order.
    pub fn items(&self) -> &[B] {
        &self.items
    }
}

impl<B> Debug for FlatConflictSet<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatConflictSet")
            .field("items", &self.items.len())
            .finish_non_exhaustive()
    }
}

impl<B: BoundingBox> ConflictIndex for FlatConflictSet<B> {
    type Bounds = B;

    fn try_add(&mut self, item: B) -> bool {
        if self.items.iter().any(|b| b.overlaps(&item)) {
            return false;
        }
        self.items.push(item);
        true
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Aabb2D;

    #[test]
    fn first_claim_wins() {
        let mut set = FlatConflictSet::new();
        assert!(set.try_add(Aabb2D::new(0_i64, 0, 10, 10)));
        assert!(!set.try_add(Aabb2D::new(5, 5, 15, 15)));
        assert!(set.try_add(Aabb2D::new(11, 11, 15, 15)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.items()[1], Aabb2D::new(11, 11, 15, 15));
    }

    #[test]
    fn seeds_block_later_boxes() {
        let mut set = FlatConflictSet::with_items([Aabb2D::new(0.0, 0.0, 1.0, 1.0)]);
        assert!(!set.is_empty());
        assert!(!set.try_add(Aabb2D::new(1.0, 1.0, 2.0, 2.0)), "corner touch");
    }
}
