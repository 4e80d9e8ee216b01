//! Per-frame processing: detect, frame, resample, fill eyes.

use crate::detection::Detector;
use crate::error::{MediaError, MediaResult};
use crate::frame::to_gray;
use crate::framing::CropController;
use crate::metrics;
use crate::occlusion::EyeOccluder;
use crate::resample::Resampler;
use centerstage_models::{CropRect, EyeFillConfig, FrameSize, FramingConfig, Rect};
use image::RgbImage;
use std::time::Instant;
use tracing::warn;

/// Result of processing one source frame.
#[derive(Debug, Clone)]
pub struct ProcessedFrame {
    /// Output-resolution RGB frame.
    pub image: RgbImage,
    /// Crop that produced it, in source coordinates.
    pub crop: CropRect,
    /// Faces found on the source frame.
    pub faces: usize,
    /// Eye regions filled on the output frame.
    pub eyes_filled: usize,
}

/// Turns source frames into output frames.
///
/// Holds the crop state, so one processor serves exactly one stream.
#[derive(Debug, Clone)]
pub struct FrameProcessor {
    controller: CropController,
    resampler: Resampler,
    occluder: Option<EyeOccluder>,
}

impl FrameProcessor {
    /// Processor for source frames of `source` size.
    pub fn new(framing: &FramingConfig, eye_fill: &EyeFillConfig, source: FrameSize) -> Self {
        Self {
            controller: CropController::new(framing, source),
            resampler: Resampler::new(framing.output),
            occluder: eye_fill.enabled.then(|| EyeOccluder::new(eye_fill)),
        }
    }

    pub fn controller(&self) -> &CropController {
        &self.controller
    }

    /// Source frame size the crop state was built for.
    pub fn source(&self) -> FrameSize {
        self.controller.frame()
    }

    pub fn output(&self) -> FrameSize {
        self.resampler.output()
    }

    /// Process one source frame.
    ///
    /// Detector errors are logged and treated as "nothing found". The crop
    /// state advances even when the frame turns out degenerate.
    ///
    /// # Errors
    /// `MediaError::DegenerateCrop` when the current crop has no pixels.
    pub fn process<D>(&mut self, frame: &RgbImage, detector: &mut D) -> MediaResult<ProcessedFrame>
    where
        D: Detector + ?Sized,
    {
        let started = Instant::now();

        let faces = detect_or_empty(detector.detect_faces(&to_gray(frame)), "faces");
        let crop = self.controller.update(&faces);

        let mut image = match self.resampler.resample(frame, &crop) {
            Ok(image) => image,
            Err(e) => {
                if matches!(e, MediaError::DegenerateCrop { .. }) {
                    metrics::record_degenerate_frame();
                }
                return Err(e);
            }
        };

        let eyes_filled = match &self.occluder {
            Some(occluder) => {
                let eyes = detect_or_empty(detector.detect_eyes(&to_gray(&image)), "eyes");
                occluder.apply(&mut image, &eyes)
            }
            None => 0,
        };

        metrics::record_frame(faces.len(), started.elapsed().as_secs_f64());

        Ok(ProcessedFrame {
            image,
            crop,
            faces: faces.len(),
            eyes_filled,
        })
    }
}

fn detect_or_empty(result: MediaResult<Vec<Rect>>, stage: &'static str) -> Vec<Rect> {
    result.unwrap_or_else(|e| {
        warn!(stage, error = %e, "Detection failed, treating frame as empty");
        metrics::record_detection_error(stage);
        Vec::new()
    })
}
