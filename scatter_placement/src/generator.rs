// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate generation for stamps and flood fills.

use core::f64::consts::TAU;
use std::collections::HashMap;

use glam::DVec3;
use kurbo::{Point, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scatter_index::{Aabb2D, Aabb3D, ConflictIndex, OcTree, QuadTree, TreeLimits};

use crate::bounds::{AssetBounds, AssetBoundsProvider, Footprint};
use crate::brush::BrushParameters;
use crate::error::GenerateError;
use crate::falloff::FalloffSampler;
use crate::sampling::{pick_assets, sample_rotations, sample_scales};

/// Retry and size limits of a [`CandidateGenerator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlacementLimits {
    /// Positions tried per candidate before it counts as a total failure.
    pub max_conflict_tries: usize,
    /// The rest of a stamp is abandoned once more than this many candidates in a
    /// row failed every try.
    pub max_consecutive_failures: usize,
    /// Upper bound on the candidates requested by one stamp.
    pub max_assets: usize,
    /// Doubling rounds of scale rejection sampling before clamping.
    pub max_scale_rounds: usize,
    /// Splitting limits of the per-call conflict trees.
    pub tree: TreeLimits,
}

impl Default for PlacementLimits {
    fn default() -> Self {
        Self {
            max_conflict_tries: 4,
            max_consecutive_failures: 40,
            max_assets: 100_000,
            max_scale_rounds: 8,
            tree: TreeLimits::default(),
        }
    }
}

/// One accepted placement.
///
/// `P` is a brush-local [`Point`] for stamps and a world [`DVec3`] for flood fills.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementCandidate<P> {
    /// Index into the brush's asset list.
    pub asset_index: usize,
    /// Placement position.
    pub position: P,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation around the up axis, in degrees.
    pub rotation: f64,
    /// Scaled bottom of the asset along its up axis.
    pub vertical_offset: f64,
}

/// Result of one generation call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateBatch<P> {
    /// Accepted candidates, in generation order.
    pub candidates: Vec<PlacementCandidate<P>>,
    /// For each candidate, its slot among the `requested` parameter sets. For flood
    /// fills this is the index of the surface position it was placed at.
    pub sources: Vec<usize>,
    /// Number of candidates asked for.
    pub requested: usize,
    /// Number of boxes tested against the conflict tree.
    pub conflict_tests: usize,
}

impl<P> CandidateBatch<P> {
    fn with_requested(requested: usize) -> Self {
        Self {
            candidates: Vec::new(),
            sources: Vec::new(),
            requested,
            conflict_tests: 0,
        }
    }

    fn push(&mut self, slot: usize, candidate: PlacementCandidate<P>) {
        self.sources.push(slot);
        self.candidates.push(candidate);
    }

    /// Number of accepted candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether nothing was accepted.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Asset, scale and rotation of each requested candidate, before positioning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetParameters {
    /// Index into the brush's asset list.
    pub asset_indices: Vec<usize>,
    /// Uniform scales.
    pub scales: Vec<f64>,
    /// Rotations in degrees.
    pub rotations: Vec<f64>,
}

/// Produces non-overlapping placements for brush stamps and flood fills.
///
/// The generator owns its random source and a cache of asset bounds keyed by asset
/// URL. The cache is never invalidated implicitly; call
/// [`clear_cache`](Self::clear_cache) when asset geometry may have changed.
pub struct CandidateGenerator {
    rng: ChaCha8Rng,
    limits: PlacementLimits,
    bounds_cache: HashMap<String, Option<AssetBounds>>,
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CandidateGenerator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CandidateGenerator")
            .field("limits", &self.limits)
            .field("cached_assets", &self.bounds_cache.len())
            .finish_non_exhaustive()
    }
}

impl CandidateGenerator {
    /// Create a generator seeded from the thread RNG.
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Create a deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            limits: PlacementLimits::default(),
            bounds_cache: HashMap::new(),
        }
    }

    /// Replace the limits.
    pub fn with_limits(mut self, limits: PlacementLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Current limits.
    pub fn limits(&self) -> PlacementLimits {
        self.limits
    }

    /// Forget every cached asset bound.
    pub fn clear_cache(&mut self) {
        self.bounds_cache.clear();
    }

    /// Number of candidates a stamp of `radius` requests.
    pub fn predicted_count(&self, brush: &BrushParameters, radius: f64) -> usize {
        brush.predicted_count(radius, self.limits.max_assets)
    }

    /// Draw asset, scale and rotation for `count` candidates.
    pub fn asset_parameters(
        &mut self,
        brush: &BrushParameters,
        count: usize,
    ) -> Result<AssetParameters, GenerateError> {
        let params = pick_assets(&brush.assets, count, &mut self.rng).and_then(|asset_indices| {
            Ok(AssetParameters {
                asset_indices,
                scales: sample_scales(
                    &brush.scale,
                    count,
                    self.limits.max_scale_rounds,
                    &mut self.rng,
                )?,
                rotations: sample_rotations(&brush.rotation, count, &mut self.rng)?,
            })
        });
        if let Err(err) = &params {
            log::warn!("Cannot generate candidates: {err}");
        }
        params
    }

    /// Footprint of `url` at `scale`, looking bounds up through the cache.
    ///
    /// Assets the provider cannot resolve get a degenerate footprint; the miss is
    /// cached too.
    pub fn footprint(
        &mut self,
        url: &str,
        scale: f64,
        padding: f64,
        bounds: &mut impl AssetBoundsProvider,
    ) -> Footprint {
        let cached = match self.bounds_cache.get(url) {
            Some(b) => *b,
            None => {
                let b = bounds.asset_bounds(url);
                if b.is_none() {
                    log::error!("No bounds for asset {url}, placing it without conflict checks");
                }
                self.bounds_cache.insert(url.to_owned(), b);
                b
            }
        };
        cached.map_or(Footprint::DEGENERATE, |b| b.footprint(scale, padding))
    }

    /// Generate candidates for one stamp of `radius` (non-positive for a full-size stamp).
    pub fn stamp(
        &mut self,
        brush: &BrushParameters,
        radius: f64,
        bounds: &mut impl AssetBoundsProvider,
        falloff: &mut impl FalloffSampler,
    ) -> Result<CandidateBatch<Point>, GenerateError> {
        let count = self.predicted_count(brush, radius);
        let painting_radius = brush.painting_radius(radius);
        self.generate(brush, count, painting_radius, bounds, falloff)
    }

    /// Generate up to `target_count` non-overlapping candidates inside a disk of
    /// `painting_radius` around the brush center.
    ///
    /// Each candidate keeps its asset, scale, rotation and radial distance, and up
    /// to [`PlacementLimits::max_conflict_tries`] angles are tried for it. Candidates
    /// with a degenerate footprint are accepted without conflict checks.
    pub fn generate(
        &mut self,
        brush: &BrushParameters,
        target_count: usize,
        painting_radius: f64,
        bounds: &mut impl AssetBoundsProvider,
        falloff: &mut impl FalloffSampler,
    ) -> Result<CandidateBatch<Point>, GenerateError> {
        let params = self.asset_parameters(brush, target_count)?;
        let distances = falloff.sample_distances(brush.falloff, target_count, &mut self.rng);
        if distances.len() < target_count {
            log::warn!(
                "Falloff {} returned {}/{target_count} distances",
                brush.falloff,
                distances.len()
            );
        }

        let region = Aabb2D::around(0.0, 0.0, painting_radius);
        let mut tree = QuadTree::with_limits(region, self.limits.tree);
        let padding = brush.padding();
        let mut batch = CandidateBatch::with_requested(target_count);
        let mut consecutive_failures = 0;

        for (slot, &distance) in distances.iter().enumerate().take(target_count) {
            let asset_index = params.asset_indices[slot];
            let scale = params.scales[slot];
            let footprint = self.footprint(&brush.assets[asset_index].path, scale, padding, bounds);
            let candidate = |position| PlacementCandidate {
                asset_index,
                position,
                scale,
                rotation: params.rotations[slot],
                vertical_offset: footprint.vertical_offset,
            };

            if footprint.is_degenerate() {
                let position = self.radial_position(distance, painting_radius);
                batch.push(slot, candidate(position));
                continue;
            }

            let mut placed = false;
            for _ in 0..self.limits.max_conflict_tries {
                let position = self.radial_position(distance, painting_radius);
                batch.conflict_tests += 1;
                if tree.try_add(Aabb2D::around(position.x, position.y, footprint.radius)) {
                    batch.push(slot, candidate(position));
                    placed = true;
                    break;
                }
            }
            if placed {
                consecutive_failures = 0;
            } else {
                consecutive_failures += 1;
                if consecutive_failures > self.limits.max_consecutive_failures {
                    log::debug!(
                        "Stamp saturated after {consecutive_failures} failed candidates at slot {slot}"
                    );
                    break;
                }
            }
        }

        log::info!("{}/{} assets prepared", batch.len(), batch.requested);
        if batch.is_empty() {
            log::warn!(
                "No available assets, the brush size ({}) may be too small!",
                brush.size
            );
        }
        Ok(batch)
    }

    /// Place one candidate at each fixed surface position inside `region`.
    ///
    /// Positions come from the host, sampled at
    /// [`BrushParameters::flood_density_per_unit_area`]. Each position gets a single
    /// conflict test of a cube around it; rejected positions are dropped.
    pub fn flood(
        &mut self,
        brush: &BrushParameters,
        region: Aabb3D<f64>,
        positions: &[DVec3],
        bounds: &mut impl AssetBoundsProvider,
    ) -> Result<CandidateBatch<DVec3>, GenerateError> {
        let params = self.asset_parameters(brush, positions.len())?;
        let mut tree = OcTree::with_limits(region, self.limits.tree);
        let padding = brush.padding();
        let mut batch = CandidateBatch::with_requested(positions.len());

        for (slot, &position) in positions.iter().enumerate() {
            let asset_index = params.asset_indices[slot];
            let scale = params.scales[slot];
            let footprint = self.footprint(&brush.assets[asset_index].path, scale, padding, bounds);
            if !footprint.is_degenerate() {
                batch.conflict_tests += 1;
                let cube = Aabb3D::around(position.x, position.y, position.z, footprint.radius);
                if !tree.try_add(cube) {
                    continue;
                }
            }
            batch.push(
                slot,
                PlacementCandidate {
                    asset_index,
                    position,
                    scale,
                    rotation: params.rotations[slot],
                    vertical_offset: footprint.vertical_offset,
                },
            );
        }

        log::info!("{}/{} assets prepared", batch.len(), batch.requested);
        Ok(batch)
    }

    /// Brush-local position at `distance` (normalized) along a random angle.
    fn radial_position(&mut self, distance: f64, radius: f64) -> Point {
        let angle = self.rng.random::<f64>() * TAU;
        Point::ORIGIN + Vec2::from_angle(angle) * (radius * distance)
    }
}
