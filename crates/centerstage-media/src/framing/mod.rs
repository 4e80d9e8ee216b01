//! Face-centered crop control.
//!
//! Each frame the controller:
//! 1. Picks the largest face (or none)
//! 2. Plans a target crop sized so the face fills a fixed fraction of it
//! 3. Moves the active crop toward the target with an EMA
//! 4. Clamps the result inside the source frame
//!
//! The active crop is the only state carried between frames.

pub mod crop_planner;
pub mod smoother;

pub use crop_planner::{select_primary, CropPlanner};
pub use smoother::{clamp_to_frame, ema, CropSmoother};

use centerstage_models::{CropRect, FrameSize, FramingConfig, Rect};
use tracing::trace;

/// Smoothed, bounds-safe crop window over the source frame.
#[derive(Debug, Clone)]
pub struct CropController {
    planner: CropPlanner,
    smoother: CropSmoother,
    state: CropRect,
}

impl CropController {
    /// Create a controller whose crop starts at the default centered rectangle.
    pub fn new(config: &FramingConfig, frame: FrameSize) -> Self {
        let planner = CropPlanner::new(config, frame);
        let state = clamp_to_frame(&planner.default_crop(), frame);

        Self {
            planner,
            smoother: CropSmoother::new(config.smoothing_alpha),
            state,
        }
    }

    /// The active crop in source-frame coordinates.
    pub fn state(&self) -> CropRect {
        self.state
    }

    /// The centered no-detection crop.
    pub fn default_crop(&self) -> CropRect {
        self.planner.default_crop()
    }

    pub fn frame(&self) -> FrameSize {
        self.planner.frame()
    }

    /// Advance one frame given this frame's face detections.
    ///
    /// Returns the updated crop.
    pub fn update(&mut self, faces: &[Rect]) -> CropRect {
        let primary = select_primary(faces);
        let target = self.planner.plan(primary.as_ref());
        self.advance_toward(&target)
    }

    /// Advance one frame toward an explicit target.
    pub fn advance_toward(&mut self, target: &CropRect) -> CropRect {
        let smoothed = self.smoother.step(&self.state, target);
        self.state = clamp_to_frame(&smoothed, self.planner.frame());

        trace!(
            x = self.state.x,
            y = self.state.y,
            width = self.state.width,
            height = self.state.height,
            "crop updated"
        );

        self.state
    }

    /// Jump back to the default crop.
    pub fn reset(&mut self) {
        self.state = clamp_to_frame(&self.planner.default_crop(), self.planner.frame());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(width: u32, height: u32) -> CropController {
        CropController::new(&FramingConfig::default(), FrameSize::new(width, height))
    }

    #[test]
    fn test_starts_at_default() {
        let controller = controller(640, 480);
        assert_eq!(controller.state(), CropRect::new(160.0, 120.0, 320.0, 240.0));
    }

    #[test]
    fn test_single_update_moves_ten_percent() {
        let mut controller = controller(640, 480);
        let crop = controller.update(&[Rect::new(100, 100, 60, 60)]);

        // default (160,120,320,240) toward target (55,74,150,112)
        assert!((crop.x - 149.5).abs() < 1e-9);
        assert!((crop.y - 115.4).abs() < 1e-9);
        assert!((crop.width - 303.0).abs() < 1e-9);
        assert!((crop.height - 227.2).abs() < 1e-9);
    }

    #[test]
    fn test_no_faces_converges_to_default() {
        let mut controller = controller(640, 480);
        controller.advance_toward(&CropRect::new(0.0, 0.0, 100.0, 75.0));
        for _ in 0..100 {
            controller.advance_toward(&CropRect::new(0.0, 0.0, 100.0, 75.0));
        }
        assert!(controller.state().width < 110.0);

        for _ in 0..50 {
            controller.update(&[]);
        }

        let state = controller.state();
        let default = controller.default_crop();
        assert!((state.x - default.x).abs() < 1.0, "{:?}", state);
        assert!((state.y - default.y).abs() < 1.0, "{:?}", state);
        assert!((state.width - default.width).abs() < 1.5, "{:?}", state);
        assert!((state.height - default.height).abs() < 1.5, "{:?}", state);
    }

    #[test]
    fn test_state_stays_in_bounds_while_tracking() {
        let frame = FrameSize::new(640, 480);
        let mut controller = controller(640, 480);

        let faces = [
            Rect::new(0, 0, 40, 40),
            Rect::new(600, 440, 40, 40),
            Rect::new(-30, 200, 80, 80),
            Rect::new(620, -10, 30, 30),
            Rect::new(100, 100, 400, 300),
        ];

        for i in 0..300 {
            let face = faces[(i / 20) % faces.len()];
            let crop = controller.update(&[face]);
            assert!(crop.fits_within(frame), "frame {}: {:?}", i, crop);
        }
    }

    #[test]
    fn test_frame_smaller_than_default_crop() {
        // 640 / 2 = 320 wide default needs 240 rows; the frame has 100
        let frame = FrameSize::new(640, 100);
        let mut controller = controller(640, 100);
        assert!(controller.state().fits_within(frame));

        for _ in 0..20 {
            let crop = controller.update(&[]);
            assert!(crop.fits_within(frame));
            assert_eq!(crop.height, 100.0);
            assert_eq!(crop.y, 0.0);
        }
    }

    #[test]
    fn test_reset_returns_to_default() {
        let mut controller = controller(640, 480);
        for _ in 0..30 {
            controller.update(&[Rect::new(400, 300, 50, 50)]);
        }
        controller.reset();
        assert_eq!(controller.state(), controller.default_crop());
    }
}
