// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region subdivision rules for the 2D and 3D trees.

use core::fmt::Debug;

use bitflags::Flags;

use crate::types::{Aabb2D, Aabb3D, Scalar, le};

/// A box type the conflict indexes can store.
pub trait BoundingBox: Copy + Debug {
    /// Whether the closed intersection with `other` is non-empty.
    fn overlaps(&self, other: &Self) -> bool;
}

/// A region that can be subdivided into a fixed number of child regions.
///
/// Child `i` corresponds to bit `i` of [`Partition::Mask`].
pub trait Partition: BoundingBox {
    /// One flag per child region.
    type Mask: Flags<Bits = u8> + Copy + Debug;

    /// Number of child regions (4 in 2D, 8 in 3D).
    const CHILDREN: usize;

    /// The `index`-th child region of `self`.
    fn child(&self, index: usize) -> Self;

    /// Child regions of `self` that `item` must be checked against and stored in.
    fn classify(&self, item: &Self) -> Self::Mask;
}

bitflags::bitflags! {
    /// Quadrants of a 2D region, in child order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Quadrants: u8 {
        /// Low x, low y.
        const SW = 0b0001;
        /// High x, low y.
        const SE = 0b0010;
        /// Low x, high y.
        const NW = 0b0100;
        /// High x, high y.
        const NE = 0b1000;
    }
}

bitflags::bitflags! {
    /// Octants of a 3D region. Bit 0 selects high x, bit 1 high y, bit 2 high z.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Octants: u8 {
        /// x-, y-, z-
        const O0 = 1 << 0;
        /// x+, y-, z-
        const O1 = 1 << 1;
        /// x-, y+, z-
        const O2 = 1 << 2;
        /// x+, y+, z-
        const O3 = 1 << 3;
        /// x-, y-, z+
        const O4 = 1 << 4;
        /// x+, y-, z+
        const O5 = 1 << 5;
        /// x-, y+, z+
        const O6 = 1 << 6;
        /// x+, y+, z+
        const O7 = 1 << 7;
    }
}

/// Pick the low or high half of `[min, max]`.
fn half<T: Scalar>(min: T, max: T, high: bool) -> (T, T) {
    let mid = T::mid(min, max);
    if high { (mid, max) } else { (min, mid) }
}

impl<T: Scalar> BoundingBox for Aabb2D<T> {
    #[inline]
    fn overlaps(&self, other: &Self) -> bool {
        Self::overlaps(self, other)
    }
}

impl<T: Scalar> Partition for Aabb2D<T> {
    type Mask = Quadrants;

    const CHILDREN: usize = 4;

    fn child(&self, index: usize) -> Self {
        let (min_x, max_x) = half(self.min_x, self.max_x, index & 1 != 0);
        let (min_y, max_y) = half(self.min_y, self.max_y, index & 2 != 0);
        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Quadrants are chosen by comparing against the region center, so every box
    /// lands in at least one quadrant even when it lies outside the region.
    fn classify(&self, item: &Self) -> Quadrants {
        let (cx, cy) = self.center();
        let west = le(item.min_x, cx);
        let east = le(cx, item.max_x);
        let south = le(item.min_y, cy);
        let north = le(cy, item.max_y);

        let mut q = Quadrants::empty();
        q.set(Quadrants::SW, west && south);
        q.set(Quadrants::SE, east && south);
        q.set(Quadrants::NW, west && north);
        q.set(Quadrants::NE, east && north);
        q
    }
}

impl<T: Scalar> BoundingBox for Aabb3D<T> {
    #[inline]
    fn overlaps(&self, other: &Self) -> bool {
        Self::overlaps(self, other)
    }
}

impl<T: Scalar> Partition for Aabb3D<T> {
    type Mask = Octants;

    const CHILDREN: usize = 8;

    fn child(&self, index: usize) -> Self {
        let (min_x, max_x) = half(self.min_x, self.max_x, index & 1 != 0);
        let (min_y, max_y) = half(self.min_y, self.max_y, index & 2 != 0);
        let (min_z, max_z) = half(self.min_z, self.max_z, index & 4 != 0);
        Self::new(min_x, min_y, min_z, max_x, max_y, max_z)
    }

    /// Octants are chosen per axis against the region center. For boxes inside the
    /// region this matches intersecting each octant region; parts lying outside are
    /// attributed to the nearest octant, so overlaps beyond the region are still found.
    fn classify(&self, item: &Self) -> Octants {
        let (cx, cy, cz) = self.center();
        let x = [le(item.min_x, cx), le(cx, item.max_x)];
        let y = [le(item.min_y, cy), le(cy, item.max_y)];
        let z = [le(item.min_z, cz), le(cz, item.max_z)];

        let mut o = Octants::empty();
        for i in 0..Self::CHILDREN {
            if x[i & 1] && y[(i >> 1) & 1] && z[(i >> 2) & 1] {
                o |= Octants::from_bits_retain(1_u8 << i);
            }
        }
        o
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_children_follow_bit_order() {
        let r = Aabb2D::new(0.0, 0.0, 4.0, 4.0);
        assert_eq!(r.child(0), Aabb2D::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(r.child(1), Aabb2D::new(2.0, 0.0, 4.0, 2.0));
        assert_eq!(r.child(2), Aabb2D::new(0.0, 2.0, 2.0, 4.0));
        assert_eq!(r.child(3), Aabb2D::new(2.0, 2.0, 4.0, 4.0));
    }

    #[test]
    fn classify_2d() {
        let r = Aabb2D::new(-10.0, -10.0, 10.0, 10.0);
        assert_eq!(
            r.classify(&Aabb2D::new(-5.0, -5.0, -1.0, -1.0)),
            Quadrants::SW
        );
        assert_eq!(
            r.classify(&Aabb2D::new(1.0, -5.0, 3.0, 5.0)),
            Quadrants::SE | Quadrants::NE
        );
        assert_eq!(
            r.classify(&Aabb2D::new(-1.0, -1.0, 1.0, 1.0)),
            Quadrants::all()
        );
        // Boxes outside the region still classify by half-plane.
        assert_eq!(
            r.classify(&Aabb2D::new(20.0, 20.0, 30.0, 30.0)),
            Quadrants::NE
        );
    }

    #[test]
    fn classify_3d() {
        let r = Aabb3D::new(0.0, 0.0, 0.0, 8.0, 8.0, 8.0);
        assert_eq!(r.child(7), Aabb3D::new(4.0, 4.0, 4.0, 8.0, 8.0, 8.0));
        assert_eq!(
            r.classify(&Aabb3D::new(1.0, 1.0, 1.0, 2.0, 2.0, 2.0)),
            Octants::O0
        );
        assert_eq!(
            r.classify(&Aabb3D::new(3.0, 3.0, 3.0, 5.0, 5.0, 5.0)),
            Octants::all()
        );
        // Spans x but stays low in y and z.
        assert_eq!(
            r.classify(&Aabb3D::new(3.0, 1.0, 1.0, 5.0, 2.0, 2.0)),
            Octants::O0 | Octants::O1
        );
        // Outside the region, but still routed to the high octant.
        assert_eq!(
            r.classify(&Aabb3D::new(20.0, 20.0, 20.0, 21.0, 21.0, 21.0)),
            Octants::O7
        );
        // Touching the center plane counts for both sides.
        assert_eq!(
            r.classify(&Aabb3D::new(1.0, 1.0, 4.0, 2.0, 2.0, 6.0)),
            Octants::O0 | Octants::O4
        );
    }
}
