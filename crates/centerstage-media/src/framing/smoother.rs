//! Exponential smoothing of the crop rectangle and bounds enforcement.

use centerstage_models::{CropRect, FrameSize};

/// One step of an exponential moving average.
#[inline]
pub fn ema(previous: f64, target: f64, alpha: f64) -> f64 {
    (1.0 - alpha) * previous + alpha * target
}

/// Per-coordinate EMA smoother for crop rectangles.
#[derive(Debug, Clone, Copy)]
pub struct CropSmoother {
    alpha: f64,
}

impl CropSmoother {
    /// Create a smoother. `alpha` is the weight of the new target, in `(0, 1]`.
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Move `state` toward `target`, each coordinate independently.
    pub fn step(&self, state: &CropRect, target: &CropRect) -> CropRect {
        CropRect::new(
            ema(state.x, target.x, self.alpha),
            ema(state.y, target.y, self.alpha),
            ema(state.width, target.width, self.alpha),
            ema(state.height, target.height, self.alpha),
        )
    }
}

/// Clamp a crop rectangle inside the frame.
///
/// The size is limited to the frame first so the position range
/// `[0, frame - size]` is never inverted, then the origin is clamped.
pub fn clamp_to_frame(crop: &CropRect, frame: FrameSize) -> CropRect {
    let frame_width = frame.width as f64;
    let frame_height = frame.height as f64;

    let width = crop.width.max(0.0).min(frame_width);
    let height = crop.height.max(0.0).min(frame_height);

    let x = crop.x.min(frame_width - width).max(0.0);
    let y = crop.y.min(frame_height - height).max(0.0);

    CropRect::new(x, y, width, height)
}
