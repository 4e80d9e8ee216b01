//! Rectangle and frame dimension types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    /// Create a new frame size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns width/height as float.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Detection rectangle in integer pixel coordinates.
///
/// Coordinates are relative to the frame or sub-image the detector ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub struct Rect {
    /// Left edge x-coordinate
    pub x: i32,
    /// Top edge y-coordinate
    pub y: i32,
    /// Rectangle width
    pub width: i32,
    /// Rectangle height
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Area in pixels. Non-positive extents count as zero.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.width as i64 * self.height as i64
    }

    /// True if the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Integer center, using floor halves of the extent.
    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Intersect with a frame of the given size.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the frame.
    pub fn clip_to(&self, frame: FrameSize) -> Option<Rect> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x.saturating_add(self.width)).min(frame.width as i32);
        let y2 = (self.y.saturating_add(self.height)).min(frame.height as i32);

        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
    }
}

/// Crop rectangle with continuous coordinates in source-frame pixels.
///
/// Used for both the smoothed crop state and the per-frame target.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Create a new crop rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Center x-coordinate.
    #[inline]
    pub fn cx(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center y-coordinate.
    #[inline]
    pub fn cy(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Truncate toward zero into an integer pixel rectangle.
    ///
    /// Truncation (not rounding) biases origin and extent down by up to 1px.
    pub fn truncate(&self) -> Rect {
        Rect::new(
            self.x as i32,
            self.y as i32,
            self.width as i32,
            self.height as i32,
        )
    }

    /// True if the rectangle lies entirely inside the frame.
    pub fn fits_within(&self, frame: FrameSize) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= frame.width as f64
            && self.y + self.height <= frame.height as f64
    }
}
