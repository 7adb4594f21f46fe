// Copyright 2025 the Scatter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brush parameters read by the generator.

use core::f64::consts::PI;

/// Version stamped on brushes by [`BrushParameters::upgrade`].
pub const BRUSH_FORMAT_VERSION: &str = "104.1.0";

/// Brushes older than this stored the scale bias as an absolute scale.
const NORMALIZED_BIAS_VERSION: &str = "103.0.1";

/// Flood fills ask the host for this many more surface samples than the density
/// calls for, since some of them will be rejected as overlapping.
pub const FLOOD_REDUNDANCY: f64 = 1.2;

/// Truncated normal distribution of per-instance scales.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ScaleDistribution {
    /// When disabled every instance gets scale 1.
    pub enabled: bool,
    /// Position of the mean inside `[min, max]`, normalized to `0..=1`.
    pub bias: f64,
    /// Smallest scale drawn.
    pub min: f64,
    /// Largest scale drawn.
    pub max: f64,
    /// Standard deviation.
    pub weight: f64,
}

impl ScaleDistribution {
    /// Mean scale: `bias` mapped into `[min, max]`.
    pub fn mean(&self) -> f64 {
        self.bias * (self.max - self.min) + self.min
    }
}

impl Default for ScaleDistribution {
    fn default() -> Self {
        Self {
            enabled: true,
            bias: 0.5,
            min: 0.9,
            max: 1.1,
            weight: 0.2,
        }
    }
}

/// Uniform rotation range around the up axis, in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RotationRange {
    /// Lower bound in degrees.
    pub min: f64,
    /// Upper bound in degrees.
    pub max: f64,
}

impl Default for RotationRange {
    fn default() -> Self {
        Self {
            min: -175.0,
            max: 175.0,
        }
    }
}

/// One paintable asset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BrushAsset {
    /// Asset URL; also the key of the generator's bounds cache.
    pub path: String,
    /// Relative selection weight.
    pub weight: f64,
    /// Disabled assets are never selected.
    pub enabled: bool,
}

impl BrushAsset {
    /// An enabled asset with weight 1.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the selection weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set whether the asset can be selected.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for BrushAsset {
    fn default() -> Self {
        Self {
            path: String::new(),
            weight: 1.0,
            enabled: true,
        }
    }
}

/// Parameters of a scatter brush.
///
/// With the `serde` feature, missing keys take their default values and the legacy
/// keys `random_rotation` and `scale_distribution` are accepted. Call
/// [`upgrade`](Self::upgrade) after loading an old brush.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BrushParameters {
    /// Format version the brush was saved with.
    pub file_version: String,
    /// Brush radius.
    pub size: f64,
    /// Instances per full-size stamp.
    pub density: f64,
    /// Falloff curve id handed to the falloff sampler.
    pub falloff: u32,
    /// Whether `object_padding` applies.
    pub object_padding_enabled: bool,
    /// Added to each footprint edge. Negative values allow interpenetration.
    pub object_padding: f64,
    /// Offset of placed instances along the surface normal.
    pub vertical_offset: f64,
    /// Random rotation range.
    #[cfg_attr(feature = "serde", serde(alias = "random_rotation"))]
    pub rotation: RotationRange,
    /// Random scale distribution.
    #[cfg_attr(feature = "serde", serde(alias = "scale_distribution"))]
    pub scale: ScaleDistribution,
    /// Candidate assets.
    pub assets: Vec<BrushAsset>,
}

impl Default for BrushParameters {
    fn default() -> Self {
        Self {
            file_version: BRUSH_FORMAT_VERSION.into(),
            size: 250.0,
            density: 30.0,
            falloff: 1,
            object_padding_enabled: true,
            object_padding: -5.0,
            vertical_offset: 0.0,
            rotation: RotationRange::default(),
            scale: ScaleDistribution::default(),
            assets: Vec::new(),
        }
    }
}

impl BrushParameters {
    /// Effective padding: `object_padding` when enabled, otherwise 0.
    pub fn padding(&self) -> f64 {
        if self.object_padding_enabled {
            self.object_padding
        } else {
            0.0
        }
    }

    /// Radius candidates are spread over for a stamp of `radius`.
    ///
    /// A non-positive `radius` means a full-size stamp.
    pub fn painting_radius(&self, radius: f64) -> f64 {
        if radius > 0.0 { radius } else { self.size }
    }

    /// Number of candidates requested for a stamp of `radius`.
    ///
    /// Density scales with the stamp area relative to the brush size, capped at
    /// `max_assets`. A non-positive `radius` requests `density` candidates.
    pub fn predicted_count(&self, radius: f64, max_assets: usize) -> usize {
        let count = if radius > 0.0 {
            let scale = radius / self.size;
            self.density * scale * scale
        } else {
            self.density
        };
        if count.is_finite() && count > 0.0 {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Float to int casts saturate; the cap handles huge densities."
            )]
            let count = count as usize;
            count.min(max_assets)
        } else {
            0
        }
    }

    /// Surface sample density to request from the host for a flood fill.
    pub fn flood_density_per_unit_area(&self) -> f64 {
        self.density / (PI * self.size * self.size) * FLOOD_REDUNDANCY
    }

    /// Bring a brush saved by an older version up to [`BRUSH_FORMAT_VERSION`].
    ///
    /// Brushes older than 103.0.1 stored the scale bias as an absolute scale; it is
    /// converted to its normalized position inside `[min, max]`. Returns whether the
    /// brush changed.
    pub fn upgrade(&mut self) -> bool {
        if !version_less(&self.file_version, BRUSH_FORMAT_VERSION) {
            return false;
        }
        if version_less(&self.file_version, NORMALIZED_BIAS_VERSION) {
            let range = self.scale.max - self.scale.min;
            if range > 0.0 {
                self.scale.bias = (self.scale.bias - self.scale.min) / range;
            } else {
                log::warn!(
                    "Brush {} has an empty scale range, keeping bias {}",
                    self.file_version,
                    self.scale.bias
                );
            }
        }
        log::info!(
            "Brush upgraded from {} to {BRUSH_FORMAT_VERSION}",
            self.file_version
        );
        self.file_version = BRUSH_FORMAT_VERSION.into();
        true
    }
}

/// Compare dotted version strings numerically. Unparsable parts count as 0.
fn version_less(a: &str, b: &str) -> bool {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|p| p.trim().parse().unwrap_or(0))
            .collect()
    };
    let (mut a, mut b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    a.resize(len, 0);
    b.resize(len, 0);
    a < b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_brush() {
        let brush = BrushParameters::default();
        assert_eq!(brush.size, 250.0);
        assert_eq!(brush.density, 30.0);
        assert_eq!(brush.padding(), -5.0);
        assert!((brush.scale.mean() - 1.0).abs() < 1e-12, "bias 0.5 of 0.9..1.1");
        assert_eq!(brush.file_version, BRUSH_FORMAT_VERSION);
    }

    #[test]
    fn stamp_count_scales_with_area() {
        let brush = BrushParameters::default();
        assert_eq!(brush.predicted_count(0.0, 100_000), 30);
        assert_eq!(brush.predicted_count(250.0, 100_000), 30);
        // Half the radius, a quarter of the area: 7.5 truncated.
        assert_eq!(brush.predicted_count(125.0, 100_000), 7);
        assert_eq!(brush.predicted_count(25_000.0, 100_000), 100_000);
        assert_eq!(brush.painting_radius(-1.0), 250.0);
        assert_eq!(brush.painting_radius(40.0), 40.0);
    }

    #[test]
    fn disabled_padding_is_zero() {
        let brush = BrushParameters {
            object_padding_enabled: false,
            object_padding: 12.0,
            ..Default::default()
        };
        assert_eq!(brush.padding(), 0.0);
    }

    #[test]
    fn flood_density() {
        let brush = BrushParameters {
            size: 10.0,
            density: 100.0 * PI,
            ..Default::default()
        };
        assert!((brush.flood_density_per_unit_area() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn upgrade_normalizes_old_bias() {
        let mut brush = BrushParameters {
            file_version: "102.5.0".into(),
            scale: ScaleDistribution {
                bias: 1.5,
                min: 1.0,
                max: 3.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(brush.upgrade());
        assert_eq!(brush.scale.bias, 0.25);
        assert_eq!(brush.file_version, BRUSH_FORMAT_VERSION);
        assert!(!brush.upgrade(), "already current");
    }

    #[test]
    fn upgrade_keeps_normalized_bias() {
        let mut brush = BrushParameters {
            file_version: "103.2.0".into(),
            ..Default::default()
        };
        assert!(brush.upgrade());
        assert_eq!(brush.scale.bias, 0.5);
    }

    #[test]
    fn versions_compare_numerically() {
        assert!(version_less("103.0.0", "103.0.1"));
        assert!(version_less("99.9", "104.1.0"));
        assert!(!version_less("104.1.0", "104.1"));
        assert!(!version_less("110.0.0", "104.1.0"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn legacy_keys_deserialize() {
        let json = r#"{
            "file_version": "101.0.0",
            "size": 100,
            "random_rotation": {"min": -10, "max": 10},
            "scale_distribution": {"enabled": true, "bias": 1.0, "min": 0.5, "max": 1.5, "weight": 0.1},
            "assets": [{"path": "rock.usd", "weight": 2.0}]
        }"#;
        let mut brush: BrushParameters = serde_json::from_str(json).expect("valid brush json");
        assert_eq!(brush.rotation, RotationRange { min: -10.0, max: 10.0 });
        assert_eq!(brush.density, 30.0, "missing keys take defaults");
        assert!(brush.assets[0].enabled);
        assert!(brush.upgrade());
        assert_eq!(brush.scale.bias, 0.5);

        let saved = serde_json::to_string(&brush).expect("serializable");
        let back: BrushParameters = serde_json::from_str(&saved).expect("round trip");
        assert_eq!(back, brush);
    }
}
