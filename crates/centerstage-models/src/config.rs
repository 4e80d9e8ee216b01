//! Static parameters for framing, eye fill and detection.
//!
//! All values have defaults matching the shipped behaviour; the binary may
//! override them from the environment.

use crate::color::Rgb;
use crate::rect::FrameSize;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters of the crop controller and resampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FramingConfig {
    /// Output resolution sent to the sink (default: 680x510)
    pub output: FrameSize,

    /// Zoom used when no face is visible, and the widest crop ever chosen (default: 2.0)
    pub default_zoom_factor: f64,

    /// Fraction of the crop's linear size a face should occupy (default: 0.4)
    pub target_face_ratio: f64,

    /// EMA weight of the new target per frame (default: 0.1)
    pub smoothing_alpha: f64,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            output: FrameSize::new(680, 510),
            default_zoom_factor: 2.0,
            target_face_ratio: 0.4,
            smoothing_alpha: 0.1,
        }
    }
}

impl FramingConfig {
    /// Output width / height.
    pub fn desired_aspect(&self) -> f64 {
        self.output.aspect()
    }
}

/// Parameters of the eye occluder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EyeFillConfig {
    /// Run eye detection and fill on the output frame (default: true)
    pub enabled: bool,

    /// Fill color (default: yellow)
    pub color: Rgb,

    /// Blend strength where the mask is set, 0.0-1.0 (default: 0.5)
    pub alpha: f64,

    /// Luma at or below which a pixel belongs to the mask (default: 50)
    pub threshold: u8,
}

impl Default for EyeFillConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Rgb::YELLOW,
            alpha: 0.5,
            threshold: 50,
        }
    }
}

/// Multi-scale detector parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionParams {
    /// Scale step between pyramid levels
    pub scale_factor: f64,
    /// Overlapping candidates required to keep a detection
    pub min_neighbors: i32,
    /// Smallest object size considered
    pub min_size: FrameSize,
}

impl DetectionParams {
    /// Parameters for face detection on the full frame.
    pub const FACES: DetectionParams = DetectionParams {
        scale_factor: 1.1,
        min_neighbors: 5,
        min_size: FrameSize { width: 30, height: 30 },
    };

    /// Parameters for eye detection on the output frame.
    pub const EYES: DetectionParams = DetectionParams {
        scale_factor: 1.1,
        min_neighbors: 5,
        min_size: FrameSize { width: 20, height: 20 },
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_defaults() {
        let config = FramingConfig::default();
        assert_eq!(config.output, FrameSize::new(680, 510));
        assert!((config.desired_aspect() - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: EyeFillConfig = serde_json::from_str(r#"{"threshold": 80}"#).unwrap();
        assert_eq!(config.threshold, 80);
        assert!(config.enabled);
        assert_eq!(config.color, Rgb::YELLOW);
        assert_eq!(config.alpha, 0.5);
    }
}
