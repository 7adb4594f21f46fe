// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Placement: candidate generation for scatter brushes.
//!
//! Given brush parameters and a footprint, [`CandidateGenerator`] produces a batch of
//! non-overlapping placements (asset, position, scale, rotation):
//!
//! - Assets are drawn with replacement from the enabled assets, by weight.
//! - Scales follow a truncated normal distribution ([`ScaleDistribution`]).
//! - Rotations are uniform inside a [`RotationRange`].
//! - Radial distances come from a host [`FalloffSampler`]; angles are uniform.
//! - Each candidate's footprint, derived from its asset's [`AssetBounds`], is tested
//!   against a [`scatter_index::QuadTree`] (stamps) or [`scatter_index::OcTree`]
//!   (flood fills). Overlapping candidates are retried a few times, then dropped.
//!
//! Under-delivery is normal at high density: the returned [`CandidateBatch`] says how
//! many candidates were requested and how many were produced. Only unusable brushes
//! (no assets, no enabled assets, invalid distributions) return a [`GenerateError`].
//!
//! ## Minimal usage
//!
//! ```
//! use scatter_placement::{
//!     AssetBounds, BrushAsset, BrushParameters, CandidateGenerator, UniformAreaFalloff, UpAxis,
//! };
//!
//! let brush = BrushParameters {
//!     assets: vec![BrushAsset::new("rock.usd")],
//!     ..Default::default()
//! };
//! let mut bounds = |_: &str| Some(AssetBounds::cube(10.0, UpAxis::Y));
//! let mut generator = CandidateGenerator::with_seed(7);
//! let batch = generator
//!     .stamp(&brush, 0.0, &mut bounds, &mut UniformAreaFalloff)
//!     .unwrap();
//! assert!(!batch.is_empty());
//! assert!(batch.len() <= batch.requested);
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to Kurbo.
//! - `serde`: (de)serialize [`BrushParameters`], accepting legacy key names.

pub mod bounds;
pub mod brush;
pub mod error;
pub mod falloff;
pub mod generator;
pub mod sampling;

pub use bounds::{AssetBounds, AssetBoundsProvider, Footprint, UpAxis};
pub use brush::{
    BRUSH_FORMAT_VERSION, BrushAsset, BrushParameters, FLOOD_REDUNDANCY, RotationRange,
    ScaleDistribution,
};
pub use error::GenerateError;
pub use falloff::{FalloffSampler, UniformAreaFalloff};
pub use generator::{
    AssetParameters, CandidateBatch, CandidateGenerator, PlacementCandidate, PlacementLimits,
};
