//! Eye fill: masked color blend over detected eye regions.
//!
//! For every eye rectangle on the output frame:
//! 1. Inverse-threshold the region's luma (dark pupil/iris pixels set)
//! 2. Close the mask with a 3x3 cross to drop speckle
//! 3. Blend the fill color into the masked pixels
//!
//! Rectangles are processed in detector order. Overlapping rectangles see
//! the earlier blend when computing their own mask.

pub mod mask;

use crate::frame::{frame_size, luma};
use centerstage_models::{EyeFillConfig, Rect, Rgb};
use image::{GrayImage, RgbImage};
use tracing::trace;

/// Blend `fill` into `pixel` with weight `alpha * mask`, `mask` in `[0, 1]`.
///
/// A zero mask returns the pixel unchanged.
#[inline]
pub fn blend_pixel(pixel: [u8; 3], fill: [u8; 3], alpha: f64, mask: f64) -> [u8; 3] {
    let weight = alpha * mask;
    let mut out = [0u8; 3];
    for c in 0..3 {
        let value = pixel[c] as f64 * (1.0 - weight) + fill[c] as f64 * weight;
        out[c] = value.clamp(0.0, 255.0) as u8;
    }
    out
}

/// Applies the eye fill to output frames.
#[derive(Debug, Clone)]
pub struct EyeOccluder {
    color: Rgb,
    alpha: f64,
    threshold: u8,
}

impl EyeOccluder {
    pub fn new(config: &EyeFillConfig) -> Self {
        Self {
            color: config.color,
            alpha: config.alpha,
            threshold: config.threshold,
        }
    }

    /// Fill every eye region of `frame` in place.
    ///
    /// Rectangles are clipped to the frame; empty ones are skipped.
    /// Returns the number of regions processed.
    pub fn apply(&self, frame: &mut RgbImage, eyes: &[Rect]) -> usize {
        let size = frame_size(frame);
        let mut filled = 0;

        for eye in eyes {
            let Some(region) = eye.clip_to(size) else {
                continue;
            };
            self.fill_region(frame, &region);
            filled += 1;
        }

        trace!(eyes = eyes.len(), filled, "eye fill applied");
        filled
    }

    /// Closed inverse-threshold mask of `region`.
    pub fn region_mask(&self, frame: &RgbImage, region: &Rect) -> GrayImage {
        let gray = GrayImage::from_fn(region.width as u32, region.height as u32, |x, y| {
            let pixel = frame.get_pixel(region.x as u32 + x, region.y as u32 + y);
            image::Luma([luma(pixel.0)])
        });
        mask::close(&mask::threshold_inv(&gray, self.threshold))
    }

    fn fill_region(&self, frame: &mut RgbImage, region: &Rect) {
        let mask = self.region_mask(frame, region);
        let fill = self.color.channels();

        for (x, y, m) in mask.enumerate_pixels() {
            if m.0[0] == 0 {
                continue;
            }
            let weight = m.0[0] as f64 / mask::MASK_SET as f64;
            let pixel = frame.get_pixel_mut(region.x as u32 + x, region.y as u32 + y);
            pixel.0 = blend_pixel(pixel.0, fill, self.alpha, weight);
        }
    }
}
