//! Conversions between OpenCV `Mat`s and `image` buffers.
//!
//! OpenCV hands out BGR frames; the pipeline works on RGB. Conversion
//! happens once on capture and once on output.

use crate::error::{MediaError, MediaResult};
use image::{GrayImage, RgbImage};
use opencv::core::{Mat, Scalar, CV_8UC1, CV_8UC3};
use opencv::prelude::*;

/// Copy a continuous 8-bit BGR `Mat` into an RGB image.
pub fn bgr_mat_to_rgb(mat: &Mat) -> MediaResult<RgbImage> {
    if mat.typ() != CV_8UC3 {
        return Err(MediaError::read_error(format!(
            "Expected 8-bit BGR frame, got Mat type {}",
            mat.typ()
        )));
    }

    let owned;
    let mat = if mat.is_continuous() {
        mat
    } else {
        owned = mat
            .try_clone()
            .map_err(|e| MediaError::read_error(format!("Mat clone: {e}")))?;
        &owned
    };

    let (width, height) = (mat.cols() as u32, mat.rows() as u32);
    let data = mat
        .data_bytes()
        .map_err(|e| MediaError::read_error(format!("Mat data: {e}")))?;

    let mut rgb = Vec::with_capacity(data.len());
    for bgr in data.chunks_exact(3) {
        rgb.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
    }

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| MediaError::read_error(format!("Short frame buffer for {width}x{height}")))
}

/// Packed 3-channel bytes (already in the target channel order) as a `Mat`.
pub fn packed_to_mat(bytes: &[u8], width: u32, height: u32) -> MediaResult<Mat> {
    bytes_to_mat(bytes, width, height, CV_8UC3, 3)
}

/// Grayscale image as a single-channel `Mat`.
pub fn gray_to_mat(gray: &GrayImage) -> MediaResult<Mat> {
    bytes_to_mat(gray.as_raw(), gray.width(), gray.height(), CV_8UC1, 1)
}

fn bytes_to_mat(
    bytes: &[u8],
    width: u32,
    height: u32,
    typ: i32,
    channels: usize,
) -> MediaResult<Mat> {
    let expected = width as usize * height as usize * channels;
    if bytes.len() != expected {
        return Err(MediaError::internal(format!(
            "Buffer of {} bytes does not match {width}x{height}x{channels}",
            bytes.len()
        )));
    }

    let mut mat =
        Mat::new_rows_cols_with_default(height as i32, width as i32, typ, Scalar::all(0.0))
            .map_err(|e| MediaError::internal(format!("Mat alloc: {e}")))?;
    mat.data_bytes_mut()
        .map_err(|e| MediaError::internal(format!("Mat data: {e}")))?
        .copy_from_slice(bytes);
    Ok(mat)
}
