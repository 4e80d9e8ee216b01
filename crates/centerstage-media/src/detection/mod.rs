//! Face and eye detection.
//!
//! The pipeline only depends on the [`Detector`] trait. The OpenCV Haar
//! cascade backend lives in [`haar`] behind the `opencv` feature.

#[cfg(feature = "opencv")]
pub mod haar;

#[cfg(feature = "opencv")]
pub use haar::HaarCascadeDetector;

use crate::error::MediaResult;
use centerstage_models::Rect;
use image::GrayImage;

/// Multi-scale object detector over grayscale frames.
///
/// Rectangles are returned in the detector's own scan order, which the
/// crop controller relies on for tie-breaking.
pub trait Detector {
    /// Faces on a full source frame.
    fn detect_faces(&mut self, gray: &GrayImage) -> MediaResult<Vec<Rect>>;

    /// Eyes on an output frame.
    fn detect_eyes(&mut self, gray: &GrayImage) -> MediaResult<Vec<Rect>>;
}

impl<D: Detector + ?Sized> Detector for Box<D> {
    fn detect_faces(&mut self, gray: &GrayImage) -> MediaResult<Vec<Rect>> {
        (**self).detect_faces(gray)
    }

    fn detect_eyes(&mut self, gray: &GrayImage) -> MediaResult<Vec<Rect>> {
        (**self).detect_eyes(gray)
    }
}

/// Detector that never finds anything. Frames stay on the default crop.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDetector;

impl Detector for NullDetector {
    fn detect_faces(&mut self, _gray: &GrayImage) -> MediaResult<Vec<Rect>> {
        Ok(Vec::new())
    }

    fn detect_eyes(&mut self, _gray: &GrayImage) -> MediaResult<Vec<Rect>> {
        Ok(Vec::new())
    }
}
