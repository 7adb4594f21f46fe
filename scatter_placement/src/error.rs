// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for candidate generation.

use rand::distr::weighted;
use thiserror::Error;

/// Reasons a brush cannot produce any candidate.
///
/// These describe unusable input, not saturation: a brush that is merely too dense
/// returns fewer candidates than requested instead of an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// The brush has no assets.
    #[error("brush has no assets")]
    NoAssets,

    /// The brush has assets, but none are enabled.
    #[error("brush has assets, but all disabled")]
    AllAssetsDisabled,

    /// The enabled assets' weights cannot be sampled (all zero, negative, or not finite).
    #[error("asset weights cannot be sampled: {0}")]
    InvalidAssetWeights(#[from] weighted::Error),

    /// The scale distribution has an inverted range or an unusable deviation.
    #[error("invalid scale distribution: min {min}, max {max}, weight {weight}")]
    InvalidScaleDistribution {
        /// Smallest scale.
        min: f64,
        /// Largest scale.
        max: f64,
        /// Standard deviation.
        weight: f64,
    },

    /// The rotation range has a bound that is not finite.
    #[error("invalid rotation range {min}..{max}")]
    InvalidRotationRange {
        /// Lower bound in degrees.
        min: f64,
        /// Upper bound in degrees.
        max: f64,
    },
}
