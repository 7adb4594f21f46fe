// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conflict index trait shared by the tree and the linear reference set.

use crate::partition::BoundingBox;

/// An insert-only set of boxes that never overlap each other.
///
/// Implementations are order dependent: the first box to claim space wins and later
/// overlapping boxes are rejected.
pub trait ConflictIndex {
    /// Box type stored by this index.
    type Bounds: BoundingBox;

    /// Add `item` if it overlaps no accepted box.
    ///
    /// Returns `true` when the box was accepted. A rejected box leaves the index unchanged.
    fn try_add(&mut self, item: Self::Bounds) -> bool;

    /// Number of accepted boxes, seeds included.
    fn len(&self) -> usize;

    /// Whether no box has been accepted yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
