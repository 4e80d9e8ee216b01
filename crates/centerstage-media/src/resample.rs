//! Crop extraction and resize to the output resolution.

use crate::error::{MediaError, MediaResult};
use crate::frame::frame_size;
use centerstage_models::{CropRect, FrameSize};
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Extracts the active crop and scales it to a fixed output size.
#[derive(Debug, Clone, Copy)]
pub struct Resampler {
    output: FrameSize,
    filter: FilterType,
}

impl Resampler {
    /// Create a resampler with bilinear interpolation.
    pub fn new(output: FrameSize) -> Self {
        Self {
            output,
            filter: FilterType::Triangle,
        }
    }

    pub fn output(&self) -> FrameSize {
        self.output
    }

    /// Crop `frame` to `crop` (truncated to whole pixels) and resize.
    ///
    /// # Errors
    /// `MediaError::DegenerateCrop` when the truncated crop has no pixels
    /// inside the frame.
    pub fn resample(&self, frame: &RgbImage, crop: &CropRect) -> MediaResult<RgbImage> {
        let rect = crop.truncate();
        let region = rect
            .clip_to(frame_size(frame))
            .ok_or(MediaError::DegenerateCrop {
                width: rect.width,
                height: rect.height,
            })?;

        let cropped = imageops::crop_imm(
            frame,
            region.x as u32,
            region.y as u32,
            region.width as u32,
            region.height as u32,
        )
        .to_image();

        Ok(imageops::resize(
            &cropped,
            self.output.width,
            self.output.height,
            self.filter,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn quadrant_frame() -> RgbImage {
        // Left half red, right half blue
        RgbImage::from_fn(64, 48, |x, _| {
            if x < 32 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        })
    }

    #[test]
    fn test_output_has_fixed_size() {
        let resampler = Resampler::new(FrameSize::new(68, 51));
        let out = resampler
            .resample(&quadrant_frame(), &CropRect::new(10.7, 5.2, 30.9, 22.0))
            .unwrap();
        assert_eq!(out.dimensions(), (68, 51));
    }

    #[test]
    fn test_crop_selects_region() {
        let resampler = Resampler::new(FrameSize::new(16, 12));
        let out = resampler
            .resample(&quadrant_frame(), &CropRect::new(0.0, 0.0, 20.0, 15.0))
            .unwrap();
        assert!(out.pixels().all(|p| p.0 == [255, 0, 0]));

        let out = resampler
            .resample(&quadrant_frame(), &CropRect::new(40.0, 10.0, 20.0, 15.0))
            .unwrap();
        assert!(out.pixels().all(|p| p.0 == [0, 0, 255]));
    }

    #[test]
    fn test_sub_pixel_crop_is_degenerate() {
        let resampler = Resampler::new(FrameSize::new(16, 12));
        let err = resampler
            .resample(&quadrant_frame(), &CropRect::new(3.0, 3.0, 0.9, 10.0))
            .unwrap_err();
        assert!(matches!(err, MediaError::DegenerateCrop { width: 0, height: 10 }));
    }

    #[test]
    fn test_crop_outside_frame_is_degenerate() {
        let resampler = Resampler::new(FrameSize::new(16, 12));
        let result = resampler.resample(&quadrant_frame(), &CropRect::new(64.0, 0.0, 10.0, 10.0));
        assert!(matches!(result, Err(MediaError::DegenerateCrop { .. })));
    }
}
