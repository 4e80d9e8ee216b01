//! Binary masks: inverse threshold and morphological closing.
//!
//! Masks are `GrayImage`s holding `0` or `255`.

use image::imageops;
use image::GrayImage;
use imageproc::contrast;
use imageproc::distance_transform::Norm;
use imageproc::morphology;

pub const MASK_SET: u8 = 255;

/// Set where `gray <= threshold`, clear elsewhere.
pub fn threshold_inv(gray: &GrayImage, threshold: u8) -> GrayImage {
    let mut mask = contrast::threshold(gray, threshold);
    imageops::invert(&mut mask);
    mask
}

/// Morphological closing with the 3x3 elliptical element (the L1 unit cross).
///
/// Fills pinholes and one-pixel gaps without growing the mask outline.
pub fn close(mask: &GrayImage) -> GrayImage {
    morphology::close(mask, Norm::L1, 1)
}
