// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which instances an erase touches.

use glam::DVec3;
use scatter_index::Aabb3D;

/// Segments shorter than this are treated as a single point.
pub const ERASE_SEGMENT_EPSILON: f64 = 0.001;

/// Selection rule for an erase, evaluated on world-space positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EraseCriterion {
    /// Every instance.
    All,
    /// Instances closer than `radius` to the segment `start..end`.
    Capsule {
        /// Segment start.
        start: DVec3,
        /// Segment end.
        end: DVec3,
        /// Erase radius.
        radius: f64,
    },
    /// Instances inside a closed box.
    Volume(Aabb3D<f64>),
}

impl EraseCriterion {
    /// Capsule swept by an erase brush at `position`.
    ///
    /// The segment runs from `vertical_offset` above the surface down to `position`, so
    /// raised instances are still caught.
    pub fn brush(position: DVec3, up: DVec3, vertical_offset: f64, radius: f64) -> Self {
        Self::Capsule {
            start: position + up * vertical_offset,
            end: position,
            radius,
        }
    }

    /// Sphere of `radius` around `center`.
    pub fn sphere(center: DVec3, radius: f64) -> Self {
        Self::Capsule {
            start: center,
            end: center,
            radius,
        }
    }

    /// Whether a point instance at world position `p` is selected.
    pub fn matches(&self, p: DVec3) -> bool {
        match *self {
            Self::All => true,
            Self::Capsule { start, end, radius } => segment_distance(p, start, end) < radius,
            Self::Volume(bounds) => bounds.contains_point(p.x, p.y, p.z),
        }
    }

    /// Whether a prim instance at world position `p` is selected.
    ///
    /// Prims are measured against the segment end only.
    pub fn matches_prim(&self, p: DVec3) -> bool {
        match *self {
            Self::Capsule { end, radius, .. } => p.distance(end) < radius,
            _ => self.matches(p),
        }
    }
}

/// Distance from `p` to the segment `start..end`.
pub fn segment_distance(p: DVec3, start: DVec3, end: DVec3) -> f64 {
    let segment = end - start;
    if segment.length() < ERASE_SEGMENT_EPSILON {
        return p.distance(start);
    }
    let t = ((p - start).dot(segment) / segment.length_squared()).clamp(0.0, 1.0);
    p.distance(start + segment * t)
}
