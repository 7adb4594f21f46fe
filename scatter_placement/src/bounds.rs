// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Asset bounds and the footprints derived from them.

use std::collections::HashMap;

use glam::DVec3;

/// Up axis of an asset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum UpAxis {
    /// Y up; the footprint lies in the XZ plane.
    #[default]
    Y,
    /// Z up; the footprint lies in the XY plane.
    Z,
}

impl UpAxis {
    /// Component index of the up axis.
    pub const fn index(self) -> usize {
        match self {
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Component index of the horizontal axis paired with X.
    pub const fn right_index(self) -> usize {
        match self {
            Self::Y => 2,
            Self::Z => 1,
        }
    }

    /// Unit vector along the up axis.
    pub const fn vector(self) -> DVec3 {
        match self {
            Self::Y => DVec3::Y,
            Self::Z => DVec3::Z,
        }
    }
}

/// Unscaled bounding box of an asset in its own space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AssetBounds {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
    /// Up axis of the asset (or of its stage when the asset does not say).
    pub up: UpAxis,
}

impl AssetBounds {
    /// Create bounds from corners.
    pub fn new(min: DVec3, max: DVec3, up: UpAxis) -> Self {
        Self { min, max, up }
    }

    /// Cube of edge `edge` resting on the ground plane, centered horizontally.
    pub fn cube(edge: f64, up: UpAxis) -> Self {
        let half = DVec3::splat(edge * 0.5);
        let lift = up.vector() * (edge * 0.5);
        Self::new(lift - half, lift + half, up)
    }

    /// Footprint of the asset scaled by `scale`, each horizontal edge grown by `padding`.
    ///
    /// The radius is half the diagonal of the padded horizontal rectangle. When the
    /// padding shrinks either edge to zero or less the footprint is degenerate.
    pub fn footprint(&self, scale: f64, padding: f64) -> Footprint {
        let min = self.min * scale;
        let max = self.max * scale;
        let size = max - min;
        let a = size.x + padding;
        let b = size[self.up.right_index()] + padding;
        let radius = if a > 0.0 && b > 0.0 {
            (a * a + b * b).sqrt() * 0.5
        } else {
            -1.0
        };
        Footprint {
            radius,
            vertical_offset: min[self.up.index()],
        }
    }
}

/// Conflict radius and base height of one candidate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Footprint {
    /// Half extent of the conflict box. Non-positive means no conflict testing.
    pub radius: f64,
    /// Scaled bottom of the asset along its up axis.
    pub vertical_offset: f64,
}

impl Footprint {
    /// Footprint of an asset whose bounds are unknown.
    pub const DEGENERATE: Self = Self {
        radius: -1.0,
        vertical_offset: 0.0,
    };

    /// Whether the candidate skips conflict testing.
    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }
}

/// Host lookup of asset bounds by URL.
///
/// Results are cached by the generator until
/// [`CandidateGenerator::clear_cache`](crate::CandidateGenerator::clear_cache).
pub trait AssetBoundsProvider {
    /// Bounds of the asset at `url`, or `None` when the asset cannot be resolved.
    fn asset_bounds(&mut self, url: &str) -> Option<AssetBounds>;
}

impl<F> AssetBoundsProvider for F
where
    F: FnMut(&str) -> Option<AssetBounds>,
{
    fn asset_bounds(&mut self, url: &str) -> Option<AssetBounds> {
        self(url)
    }
}

impl AssetBoundsProvider for HashMap<String, AssetBounds> {
    fn asset_bounds(&mut self, url: &str) -> Option<AssetBounds> {
        self.get(url).copied()
    }
}
