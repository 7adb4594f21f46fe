// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed axis-aligned boxes and the scalar trait the trees compute with.

use core::fmt::Debug;

/// Closed axis-aligned box in 2D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Low x edge.
    pub min_x: T,
    /// Low y edge.
    pub min_y: T,
    /// High x edge.
    pub max_x: T,
    /// High y edge.
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Box spanning `min_x..=max_x` by `min_y..=max_y`.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether `(x, y)` lies inside or on the boundary.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        within(x, self.min_x, self.max_x) && within(y, self.min_y, self.max_y)
    }

    /// Whether the two boxes share at least one point.
    ///
    /// Boxes that only share an edge or a corner overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        spans_meet(self.min_x, self.max_x, other.min_x, other.max_x)
            && spans_meet(self.min_y, self.max_y, other.min_y, other.max_y)
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Square centered on `(x, y)` reaching `half` in every direction.
    pub fn around(x: T, y: T, half: T) -> Self {
        Self::new(T::sub(x, half), T::sub(y, half), T::add(x, half), T::add(y, half))
    }

    /// Center point.
    pub fn center(&self) -> (T, T) {
        (T::mid(self.min_x, self.max_x), T::mid(self.min_y, self.max_y))
    }
}

/// Closed axis-aligned box in 3D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb3D<T> {
    /// Low x edge.
    pub min_x: T,
    /// Low y edge.
    pub min_y: T,
    /// Low z edge.
    pub min_z: T,
    /// High x edge.
    pub max_x: T,
    /// High y edge.
    pub max_y: T,
    /// High z edge.
    pub max_z: T,
}

impl<T> Aabb3D<T> {
    /// Box spanning the given low and high corners.
    pub const fn new(min_x: T, min_y: T, min_z: T, max_x: T, max_y: T, max_z: T) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb3D<T> {
    /// Whether `(x, y, z)` lies inside or on the boundary.
    pub fn contains_point(&self, x: T, y: T, z: T) -> bool {
        within(x, self.min_x, self.max_x)
            && within(y, self.min_y, self.max_y)
            && within(z, self.min_z, self.max_z)
    }

    /// Whether the two boxes share at least one point.
    pub fn overlaps(&self, other: &Self) -> bool {
        spans_meet(self.min_x, self.max_x, other.min_x, other.max_x)
            && spans_meet(self.min_y, self.max_y, other.min_y, other.max_y)
            && spans_meet(self.min_z, self.max_z, other.min_z, other.max_z)
    }
}

impl<T: Scalar> Aabb3D<T> {
    /// Cube centered on `(x, y, z)` reaching `half` in every direction.
    pub fn around(x: T, y: T, z: T, half: T) -> Self {
        Self::new(
            T::sub(x, half),
            T::sub(y, half),
            T::sub(z, half),
            T::add(x, half),
            T::add(y, half),
            T::add(z, half),
        )
    }

    /// Center point.
    pub fn center(&self) -> (T, T, T) {
        (
            T::mid(self.min_x, self.max_x),
            T::mid(self.min_y, self.max_y),
            T::mid(self.min_z, self.max_z),
        )
    }
}

/// Coordinate type of the conflict trees.
///
/// Trees only need region midpoints and boxes grown around a point.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// `a + b`.
    fn add(a: Self, b: Self) -> Self;

    /// `a - b`.
    fn sub(a: Self, b: Self) -> Self;

    /// Point halfway between `a` and `b`, where regions split.
    fn mid(a: Self, b: Self) -> Self;
}

macro_rules! float_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn add(a: Self, b: Self) -> Self {
                a + b
            }

            #[inline]
            fn sub(a: Self, b: Self) -> Self {
                a - b
            }

            #[inline]
            fn mid(a: Self, b: Self) -> Self {
                0.5 * (a + b)
            }
        }
    )*};
}

float_scalar!(f32, f64);

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Floor average, no overflow.
        (a & b) + ((a ^ b) >> 1)
    }
}

/// `a <= b`, false when either is NaN.
#[inline]
pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a <= b
}

#[inline]
fn within<T: PartialOrd>(v: T, lo: T, hi: T) -> bool {
    lo <= v && v <= hi
}

/// Closed intervals `a0..=a1` and `b0..=b1` share a point.
#[inline]
fn spans_meet<T: PartialOrd>(a0: T, a1: T, b0: T, b1: T) -> bool {
    a0 <= b1 && b0 <= a1
}

#[cfg(test)]
mod tests {
    use super::{Aabb2D, Aabb3D};

    #[test]
    fn touching_boxes_overlap() {
        let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb2D::new(10.0, 0.0, 20.0, 10.0);
        let c = Aabb2D::new(10.5, 0.0, 20.0, 10.0);
        assert!(a.overlaps(&b), "shared edge counts as overlap");
        assert!(!a.overlaps(&c), "separated boxes must not overlap");
    }

    #[test]
    fn degenerate_box_still_overlaps() {
        let point = Aabb2D::new(3_i64, 3, 3, 3);
        assert!(point.contains_point(3, 3));
        assert!(point.overlaps(&Aabb2D::new(0, 0, 3, 3)));
        assert!(!point.overlaps(&Aabb2D::new(4, 0, 5, 3)));
    }

    #[test]
    fn around_and_center() {
        let b = Aabb2D::around(1.0_f64, -2.0, 0.5);
        assert_eq!(b, Aabb2D::new(0.5, -2.5, 1.5, -1.5));
        assert_eq!(b.center(), (1.0, -2.0));

        let c = Aabb3D::around(0_i64, 0, 0, 2);
        assert_eq!(c.center(), (0, 0, 0));
        assert!(c.contains_point(2, -2, 0));
        assert!(!c.contains_point(3, 0, 0));
    }

    #[test]
    fn aabb3d_overlap_needs_every_axis() {
        let a = Aabb3D::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let b = Aabb3D::new(0.5, 0.5, 2.0, 1.5, 1.5, 3.0);
        assert!(!a.overlaps(&b), "disjoint along z");
        let c = Aabb3D::new(0.5, 0.5, 1.0, 1.5, 1.5, 3.0);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }
}
