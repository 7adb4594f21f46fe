// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parallel instance arrays.

use glam::{Quat, Vec3};
use thiserror::Error;

use crate::store::InstanceStore;

/// The four per-instance sequences were handed over with different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "instance arrays out of step: {positions} positions, {orientations} orientations, \
     {scales} scales, {proto_indices} prototype indices"
)]
pub struct ArrayLengthMismatch {
    /// Number of positions.
    pub positions: usize,
    /// Number of orientations.
    pub orientations: usize,
    /// Number of scales.
    pub scales: usize,
    /// Number of prototype indices.
    pub proto_indices: usize,
}

/// Positions, orientations, scales and prototype indices of a set of instances.
///
/// The four sequences always have the same length and the same order: entry `i` of
/// each describes instance `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceArrays {
    positions: Vec<Vec3>,
    orientations: Vec<Quat>,
    scales: Vec<Vec3>,
    proto_indices: Vec<i32>,
}

impl InstanceArrays {
    /// Create empty arrays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble arrays from the four sequences, checking that they line up.
    pub fn from_parts(
        positions: Vec<Vec3>,
        orientations: Vec<Quat>,
        scales: Vec<Vec3>,
        proto_indices: Vec<i32>,
    ) -> Result<Self, ArrayLengthMismatch> {
        let n = positions.len();
        if orientations.len() != n || scales.len() != n || proto_indices.len() != n {
            return Err(ArrayLengthMismatch {
                positions: n,
                orientations: orientations.len(),
                scales: scales.len(),
                proto_indices: proto_indices.len(),
            });
        }
        Ok(Self {
            positions,
            orientations,
            scales,
            proto_indices,
        })
    }

    /// Split back into `(positions, orientations, scales, proto_indices)`.
    pub fn into_parts(self) -> (Vec<Vec3>, Vec<Quat>, Vec<Vec3>, Vec<i32>) {
        (
            self.positions,
            self.orientations,
            self.scales,
            self.proto_indices,
        )
    }

    /// Read all four sequences from `store`.
    ///
    /// # Panics
    ///
    /// Panics if the store's sequences have different lengths.
    pub fn load(store: &impl InstanceStore) -> Self {
        let loaded = Self::from_parts(
            store.positions(),
            store.orientations(),
            store.scales(),
            store.proto_indices(),
        );
        match loaded {
            Ok(arrays) => arrays,
            Err(err) => panic!("{err}"),
        }
    }

    /// Write all four sequences to `store`, replacing its contents.
    pub fn store(self, store: &mut impl InstanceStore) {
        store.set_positions(self.positions);
        store.set_orientations(self.orientations);
        store.set_scales(self.scales);
        store.set_proto_indices(self.proto_indices);
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no instances.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Local positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Orientations.
    pub fn orientations(&self) -> &[Quat] {
        &self.orientations
    }

    /// Per-axis scales.
    pub fn scales(&self) -> &[Vec3] {
        &self.scales
    }

    /// Prototype index of each instance.
    pub fn proto_indices(&self) -> &[i32] {
        &self.proto_indices
    }

    /// Append one instance.
    pub fn push(&mut self, proto_index: i32, position: Vec3, orientation: Quat, scale: Vec3) {
        self.proto_indices.push(proto_index);
        self.positions.push(position);
        self.orientations.push(orientation);
        self.scales.push(scale);
    }

    /// Append freshly painted instances with uniform scales.
    pub fn extend_placements(
        &mut self,
        placements: impl IntoIterator<Item = (i32, Vec3, Quat, f32)>,
    ) {
        for (proto_index, position, orientation, scale) in placements {
            self.push(proto_index, position, orientation, Vec3::splat(scale));
        }
    }

    /// Drop the last `count` instances, undoing a paint that appended them.
    pub fn truncate_last(&mut self, count: usize) {
        let len = self.len().saturating_sub(count);
        self.positions.truncate(len);
        self.orientations.truncate(len);
        self.scales.truncate(len);
        self.proto_indices.truncate(len);
    }

    /// Append every instance of `other`, keeping its order.
    pub fn append(&mut self, other: Self) {
        self.positions.extend(other.positions);
        self.orientations.extend(other.orientations);
        self.scales.extend(other.scales);
        self.proto_indices.extend(other.proto_indices);
    }

    /// Split into `(kept, removed)`, both in original relative order.
    ///
    /// # Panics
    ///
    /// Panics if `remove` does not have one entry per instance.
    pub fn partition(self, remove: &[bool]) -> (Self, Self) {
        assert_eq!(
            remove.len(),
            self.len(),
            "erase mask does not match the instance count"
        );
        let mut kept = Self::new();
        let mut removed = Self::new();
        let rows = self
            .proto_indices
            .into_iter()
            .zip(self.positions)
            .zip(self.orientations)
            .zip(self.scales);
        for ((((proto, position), orientation), scale), &gone) in rows.zip(remove) {
            let side = if gone { &mut removed } else { &mut kept };
            side.push(proto, position, orientation, scale);
        }
        (kept, removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> InstanceArrays {
        let mut a = InstanceArrays::new();
        for i in 0..n {
            let f = i as f32;
            a.push(
                i as i32 % 3,
                Vec3::new(f, 0.0, -f),
                Quat::from_rotation_y(f),
                Vec3::splat(1.0 + f),
            );
        }
        a
    }

    #[test]
    fn from_parts_checks_lengths() {
        let err = InstanceArrays::from_parts(
            vec![Vec3::ZERO; 2],
            vec![Quat::IDENTITY; 2],
            vec![Vec3::ONE],
            vec![0; 2],
        )
        .expect_err("scales are short");
        assert_eq!(err.scales, 1);
        assert_eq!(err.positions, 2);
    }

    #[test]
    fn partition_keeps_relative_order() {
        let arrays = sample(6);
        let (kept, removed) = arrays
            .clone()
            .partition(&[false, true, false, true, true, false]);
        assert_eq!(kept.len(), 3);
        assert_eq!(removed.len(), 3);
        assert_eq!(kept.positions()[1], arrays.positions()[2]);
        assert_eq!(removed.proto_indices(), &[1, 0, 1]);
        assert_eq!(removed.scales()[2], arrays.scales()[4]);

        let mut restored = kept;
        restored.append(removed);
        assert_eq!(restored.len(), 6);
        assert_eq!(restored.orientations()[3], arrays.orientations()[1]);
    }

    #[test]
    fn paint_then_undo() {
        let mut arrays = sample(2);
        arrays.extend_placements([
            (4, Vec3::X, Quat::IDENTITY, 2.0),
            (5, Vec3::Y, Quat::IDENTITY, 0.5),
        ]);
        assert_eq!(arrays.len(), 4);
        assert_eq!(arrays.scales()[3], Vec3::splat(0.5));
        arrays.truncate_last(2);
        assert_eq!(arrays, sample(2));
        arrays.truncate_last(10);
        assert!(arrays.is_empty());
    }

    #[test]
    #[should_panic(expected = "erase mask does not match")]
    fn partition_rejects_short_mask() {
        let _ = sample(3).partition(&[true]);
    }
}
