// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radial falloff sampling.

use rand::{Rng, RngCore};

/// Source of normalized radial distances for candidate positions.
///
/// The host owns the falloff curves; the generator only asks for `count` distances in
/// `0..=1` drawn from curve `curve`. Closures of the same shape implement this trait.
pub trait FalloffSampler {
    /// Draw `count` normalized distances from the brush center.
    fn sample_distances(&mut self, curve: u32, count: usize, rng: &mut dyn RngCore) -> Vec<f64>;
}

impl<F> FalloffSampler for F
where
    F: FnMut(u32, usize, &mut dyn RngCore) -> Vec<f64>,
{
    fn sample_distances(&mut self, curve: u32, count: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        self(curve, count, rng)
    }
}

/// Falloff with uniform density over the disk, whatever the curve id.
///
/// Distances are `sqrt(u)` for uniform `u`, so equal areas receive equal counts.
#[derive(Copy, Clone, Debug, Default)]
pub struct UniformAreaFalloff;

impl FalloffSampler for UniformAreaFalloff {
    fn sample_distances(&mut self, _curve: u32, count: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        (0..count).map(|_| rng.random::<f64>().sqrt()).collect()
    }
}
