// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-candidate parameter sampling: asset choice, scale and rotation.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_distr::Normal;

use crate::brush::{BrushAsset, RotationRange, ScaleDistribution};
use crate::error::GenerateError;

/// Draw `count` asset indices with replacement, weighted, from the enabled assets.
///
/// Indices refer to positions in `assets`, disabled entries included.
pub fn pick_assets<R: Rng + ?Sized>(
    assets: &[BrushAsset],
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, GenerateError> {
    if assets.is_empty() {
        return Err(GenerateError::NoAssets);
    }
    let (population, weights): (Vec<usize>, Vec<f64>) = assets
        .iter()
        .enumerate()
        .filter(|(_, a)| a.enabled)
        .map(|(i, a)| (i, a.weight))
        .unzip();
    if population.is_empty() {
        return Err(GenerateError::AllAssetsDisabled);
    }
    let dist = WeightedIndex::new(&weights)?;
    Ok((0..count).map(|_| population[dist.sample(rng)]).collect())
}

/// Draw `count` scales.
///
/// Enabled distributions are normal around [`ScaleDistribution::mean`] with standard
/// deviation `weight`, and draws outside `[min, max]` are rejected. Each round that
/// falls short draws twice as many values as the previous one. After `max_rounds`
/// rounds the remaining scales are drawn once more and clamped into range.
pub fn sample_scales<R: Rng + ?Sized>(
    scale: &ScaleDistribution,
    count: usize,
    max_rounds: usize,
    rng: &mut R,
) -> Result<Vec<f64>, GenerateError> {
    if !scale.enabled {
        return Ok(vec![1.0; count]);
    }
    let invalid = || GenerateError::InvalidScaleDistribution {
        min: scale.min,
        max: scale.max,
        weight: scale.weight,
    };
    if scale.min.is_nan()
        || scale.max.is_nan()
        || scale.min > scale.max
        || scale.weight < 0.0
        || !scale.weight.is_finite()
    {
        return Err(invalid());
    }
    let normal = Normal::new(scale.mean(), scale.weight).map_err(|_| invalid())?;

    let mut out = Vec::with_capacity(count);
    let mut batch = count;
    for _ in 0..max_rounds {
        if out.len() >= count {
            break;
        }
        out.extend(
            normal
                .sample_iter(&mut *rng)
                .take(batch)
                .filter(|s| (scale.min..=scale.max).contains(s)),
        );
        batch = batch.saturating_mul(2);
    }
    if out.len() < count {
        log::debug!(
            "Scale distribution accepted {}/{count} draws, clamping the rest",
            out.len()
        );
        let missing = count - out.len();
        out.extend(
            normal
                .sample_iter(&mut *rng)
                .take(missing)
                .map(|s| s.clamp(scale.min, scale.max)),
        );
    }
    out.truncate(count);
    Ok(out)
}

/// Draw `count` rotations uniformly in `[min, max]` degrees.
///
/// An inverted range is swapped.
pub fn sample_rotations<R: Rng + ?Sized>(
    rotation: &RotationRange,
    count: usize,
    rng: &mut R,
) -> Result<Vec<f64>, GenerateError> {
    if !rotation.min.is_finite() || !rotation.max.is_finite() {
        return Err(GenerateError::InvalidRotationRange {
            min: rotation.min,
            max: rotation.max,
        });
    }
    let (lo, hi) = if rotation.min <= rotation.max {
        (rotation.min, rotation.max)
    } else {
        (rotation.max, rotation.min)
    };
    Ok((0..count).map(|_| rng.random_range(lo..=hi)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn weighted_one_to_three() {
        let assets = [
            BrushAsset::new("a.usd").with_weight(1.0),
            BrushAsset::new("b.usd").with_weight(3.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let picks = pick_assets(&assets, 4000, &mut rng).expect("two enabled assets");
        assert_eq!(picks.len(), 4000);
        let a = picks.iter().filter(|i| **i == 0).count();
        let b = picks.len() - a;
        let ratio = b as f64 / a as f64;
        assert!((2.6..3.4).contains(&ratio), "ratio {ratio} ({a} vs {b})");
    }

    #[test]
    fn disabled_assets_are_never_picked() {
        let assets = [
            BrushAsset::new("off.usd").with_enabled(false).with_weight(100.0),
            BrushAsset::new("on.usd"),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let picks = pick_assets(&assets, 200, &mut rng).expect("one enabled asset");
        assert!(picks.iter().all(|i| *i == 1));
    }

    #[test]
    fn asset_errors() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(pick_assets(&[], 3, &mut rng), Err(GenerateError::NoAssets));
        let off = [BrushAsset::new("x").with_enabled(false)];
        assert_eq!(
            pick_assets(&off, 3, &mut rng),
            Err(GenerateError::AllAssetsDisabled)
        );
        let zero = [BrushAsset::new("x").with_weight(0.0)];
        assert!(matches!(
            pick_assets(&zero, 3, &mut rng),
            Err(GenerateError::InvalidAssetWeights(_))
        ));
    }

    #[test]
    fn scales_stay_in_range() {
        let dist = ScaleDistribution {
            enabled: true,
            bias: 0.9,
            min: 0.5,
            max: 2.0,
            weight: 1.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let scales = sample_scales(&dist, 500, 8, &mut rng).expect("valid distribution");
        assert_eq!(scales.len(), 500);
        assert!(scales.iter().all(|s| (0.5..=2.0).contains(s)));
        let mean = scales.iter().sum::<f64>() / 500.0;
        assert!(mean > 1.25, "bias pulls the mean up, got {mean}");
    }

    #[test]
    fn scales_clamp_when_rounds_run_out() {
        // Mean far outside the range: almost nothing is ever accepted.
        let dist = ScaleDistribution {
            enabled: true,
            bias: 50.0,
            min: 1.0,
            max: 1.1,
            weight: 0.01,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let scales = sample_scales(&dist, 10, 3, &mut rng).expect("valid distribution");
        assert_eq!(scales, vec![1.1; 10]);
    }

    #[test]
    fn disabled_scale_is_one() {
        let dist = ScaleDistribution {
            enabled: false,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(sample_scales(&dist, 3, 8, &mut rng), Ok(vec![1.0; 3]));
    }

    #[test]
    fn invalid_scale_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let inverted = ScaleDistribution {
            min: 2.0,
            max: 1.0,
            ..Default::default()
        };
        assert!(sample_scales(&inverted, 3, 8, &mut rng).is_err());
        let negative = ScaleDistribution {
            weight: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            sample_scales(&negative, 3, 8, &mut rng),
            Err(GenerateError::InvalidScaleDistribution { .. })
        ));
        for weight in [f64::INFINITY, f64::NAN] {
            let unbounded = ScaleDistribution {
                weight,
                ..Default::default()
            };
            assert!(sample_scales(&unbounded, 3, 8, &mut rng).is_err());
        }
    }

    #[test]
    fn rotations_uniform_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let range = RotationRange {
            min: 30.0,
            max: -30.0,
        };
        let r = sample_rotations(&range, 1000, &mut rng).expect("finite range");
        assert!(r.iter().all(|v| (-30.0..=30.0).contains(v)));
        assert!(r.iter().any(|v| *v < -20.0) && r.iter().any(|v| *v > 20.0));

        let nan = RotationRange {
            min: f64::NAN,
            max: 1.0,
        };
        assert!(sample_rotations(&nan, 1, &mut rng).is_err());
    }
}
