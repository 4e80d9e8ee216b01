//! Frame helpers: grayscale derivation and sink channel-order conversion.
//!
//! Frames are `image::RgbImage` (RGB byte order) everywhere inside the
//! pipeline. Grayscale uses BT.601 weights in the same 14-bit fixed point
//! as OpenCV's `BGR2GRAY`, so thresholds behave the same as on the capture
//! side.

use centerstage_models::{ChannelOrder, FrameSize};
use image::{GrayImage, RgbImage};

const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// BT.601 luma of an RGB pixel, rounded.
#[inline]
pub fn luma([r, g, b]: [u8; 3]) -> u8 {
    ((r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + (1 << (LUMA_SHIFT - 1)))
        >> LUMA_SHIFT) as u8
}

/// Grayscale copy of an RGB frame.
pub fn to_gray(frame: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(frame.width(), frame.height());
    for (src, dst) in frame.pixels().zip(gray.pixels_mut()) {
        dst.0[0] = luma(src.0);
    }
    gray
}

/// Dimensions of a frame.
pub fn frame_size(frame: &RgbImage) -> FrameSize {
    FrameSize::new(frame.width(), frame.height())
}

/// Packed bytes of `frame` in the channel order a sink expects.
pub fn to_channel_order(frame: &RgbImage, order: ChannelOrder) -> Vec<u8> {
    match order {
        ChannelOrder::Rgb => frame.as_raw().clone(),
        ChannelOrder::Bgr => {
            let mut bytes = Vec::with_capacity(frame.as_raw().len());
            for pixel in frame.pixels() {
                let [r, g, b] = pixel.0;
                bytes.extend_from_slice(&[b, g, r]);
            }
            bytes
        }
    }
}
