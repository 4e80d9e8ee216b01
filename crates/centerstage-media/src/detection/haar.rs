//! Haar cascade detector backed by OpenCV's `CascadeClassifier`.

use super::Detector;
use crate::convert::gray_to_mat;
use crate::error::{MediaError, MediaResult};
use centerstage_models::{DetectionParams, Rect};
use image::GrayImage;
use opencv::core::{self, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Face and eye cascades loaded from OpenCV's XML model files.
pub struct HaarCascadeDetector {
    faces: CascadeClassifier,
    eyes: CascadeClassifier,
}

impl HaarCascadeDetector {
    /// Load both cascades.
    ///
    /// # Errors
    /// `MediaError::ModelNotFound` when a file is missing or does not load
    /// into a usable classifier.
    pub fn new(face_cascade: &str, eye_cascade: &str) -> MediaResult<Self> {
        let faces = load_cascade(face_cascade)?;
        let eyes = load_cascade(eye_cascade)?;

        info!(face_cascade, eye_cascade, "Loaded Haar cascades");
        Ok(Self { faces, eyes })
    }
}

fn load_cascade(path: &str) -> MediaResult<CascadeClassifier> {
    if !Path::new(path).exists() {
        return Err(MediaError::model_not_found(path));
    }

    let classifier = CascadeClassifier::new(path)
        .map_err(|e| MediaError::model_not_found(format!("{path}: {e}")))?;
    if classifier.empty().unwrap_or(true) {
        return Err(MediaError::model_not_found(format!("{path}: empty cascade")));
    }
    Ok(classifier)
}

fn detect(
    classifier: &mut CascadeClassifier,
    gray: &GrayImage,
    params: &DetectionParams,
) -> MediaResult<Vec<Rect>> {
    let mat = gray_to_mat(gray)?;
    let mut found = Vector::<core::Rect>::new();

    classifier
        .detect_multi_scale(
            &mat,
            &mut found,
            params.scale_factor,
            params.min_neighbors,
            0,
            Size::new(params.min_size.width as i32, params.min_size.height as i32),
            Size::default(),
        )
        .map_err(|e| MediaError::detection_failed(format!("detectMultiScale: {e}")))?;

    let rects: Vec<Rect> = found
        .iter()
        .map(|r| Rect::new(r.x, r.y, r.width, r.height))
        .collect();
    debug!(count = rects.len(), width = gray.width(), height = gray.height(), "Cascade pass");
    Ok(rects)
}

impl Detector for HaarCascadeDetector {
    fn detect_faces(&mut self, gray: &GrayImage) -> MediaResult<Vec<Rect>> {
        detect(&mut self.faces, gray, &DetectionParams::FACES)
    }

    fn detect_eyes(&mut self, gray: &GrayImage) -> MediaResult<Vec<Rect>> {
        detect(&mut self.eyes, gray, &DetectionParams::EYES)
    }
}
