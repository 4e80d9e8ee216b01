//! Target crop computation.
//!
//! Converts the primary face of a frame (or its absence) into the crop
//! rectangle the camera should move toward. All sizes are whole pixels,
//! derived with floor arithmetic so the target is stable frame to frame.

use centerstage_models::{CropRect, FrameSize, FramingConfig, Rect};

/// Absorbs float noise such as `1599.9999999999998` before flooring.
const FLOOR_EPSILON: f64 = 1e-9;

#[inline]
fn floor_px(value: f64) -> f64 {
    (value + FLOOR_EPSILON).floor()
}

/// Pick the detection that drives framing.
///
/// The largest area wins; on a tie the earliest detection in the detector's
/// output order is kept. Empty rectangles are ignored.
pub fn select_primary(detections: &[Rect]) -> Option<Rect> {
    detections
        .iter()
        .filter(|r| !r.is_empty())
        .fold(None, |best: Option<Rect>, r| match best {
            Some(b) if b.area() >= r.area() => Some(b),
            _ => Some(*r),
        })
}

/// Crop planner for computing per-frame target rectangles.
#[derive(Debug, Clone)]
pub struct CropPlanner {
    frame: FrameSize,
    desired_aspect: f64,
    target_face_ratio: f64,
    default_crop: CropRect,
}

impl CropPlanner {
    /// Create a new crop planner for frames of the given size.
    pub fn new(config: &FramingConfig, frame: FrameSize) -> Self {
        let desired_aspect = config.desired_aspect();
        let default_crop = default_crop(frame, desired_aspect, config.default_zoom_factor);

        Self {
            frame,
            desired_aspect,
            target_face_ratio: config.target_face_ratio,
            default_crop,
        }
    }

    /// The centered no-detection rectangle.
    pub fn default_crop(&self) -> CropRect {
        self.default_crop
    }

    /// Source frame size this planner was built for.
    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    /// Compute the target crop for this frame.
    ///
    /// # Arguments
    /// * `face` - Primary face of the frame, if any
    pub fn plan(&self, face: Option<&Rect>) -> CropRect {
        let Some(face) = face.filter(|f| !f.is_empty()) else {
            return self.default_crop;
        };

        let (dynamic_width, dynamic_height) = self.dynamic_size(face);

        // Never zoom out past the default framing.
        let (width, height) = if dynamic_width < self.default_crop.width
            && dynamic_width > 0.0
            && dynamic_height > 0.0
        {
            (dynamic_width, dynamic_height)
        } else {
            (self.default_crop.width, self.default_crop.height)
        };

        let (cx, cy) = face.center();
        CropRect::new(
            cx as f64 - floor_px(width / 2.0),
            cy as f64 - floor_px(height / 2.0),
            width,
            height,
        )
    }

    /// Crop size at which `face` fills `target_face_ratio` of the crop,
    /// fitted to the output aspect ratio.
    pub fn dynamic_size(&self, face: &Rect) -> (f64, f64) {
        let mut width = floor_px(face.width as f64 / self.target_face_ratio);
        let mut height = floor_px(face.height as f64 / self.target_face_ratio);

        if height <= 0.0 {
            return (width, height);
        }

        if width / height < self.desired_aspect {
            height = floor_px(width / self.desired_aspect);
        } else {
            width = floor_px(height * self.desired_aspect);
        }

        (width, height)
    }
}

/// Centered crop at `zoom_factor`, sized to the output aspect ratio.
fn default_crop(frame: FrameSize, desired_aspect: f64, zoom_factor: f64) -> CropRect {
    let width = floor_px(frame.width as f64 / zoom_factor);
    let height = floor_px(width / desired_aspect);

    let x = (frame.width / 2) as f64 - floor_px(width / 2.0);
    let y = (frame.height / 2) as f64 - floor_px(height / 2.0);

    CropRect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner(width: u32, height: u32) -> CropPlanner {
        CropPlanner::new(&FramingConfig::default(), FrameSize::new(width, height))
    }

    #[test]
    fn test_default_crop_is_centered() {
        let crop = planner(640, 480).default_crop();
        assert_eq!(crop, CropRect::new(160.0, 120.0, 320.0, 240.0));
        assert_eq!(crop.cx(), 320.0);
        assert_eq!(crop.cy(), 240.0);
    }

    #[test]
    fn test_no_detection_targets_default() {
        let planner = planner(640, 480);
        assert_eq!(planner.plan(None), planner.default_crop());
    }

    #[test]
    fn test_small_face_zooms_in() {
        let planner = planner(640, 480);
        let face = Rect::new(100, 100, 60, 60);

        assert_eq!(planner.dynamic_size(&face), (150.0, 112.0));

        let target = planner.plan(Some(&face));
        assert_eq!(target, CropRect::new(55.0, 74.0, 150.0, 112.0));
    }

    #[test]
    fn test_large_face_is_capped_at_default() {
        let planner = planner(640, 480);
        let face = Rect::new(200, 100, 200, 200);

        let target = planner.plan(Some(&face));
        assert_eq!(target.width, 320.0);
        assert_eq!(target.height, 240.0);
        // Centered on the face, not the frame
        assert_eq!(target.x, 300.0 - 160.0);
        assert_eq!(target.y, 200.0 - 120.0);
    }

    #[test]
    fn test_full_frame_detection_matches_aspect() {
        for (w, h) in [(640, 480), (1280, 720), (1920, 1080), (480, 640), (1000, 1000)] {
            let planner = planner(w, h);
            let face = Rect::new(0, 0, w as i32, h as i32);
            let (dw, dh) = planner.dynamic_size(&face);

            // Floor arithmetic keeps the ratio within one pixel of exact
            let aspect = 680.0 / 510.0;
            assert!(
                (dw - dh * aspect).abs() <= aspect + 1e-6,
                "{}x{}: {}x{} is not {:.4}",
                w,
                h,
                dw,
                dh,
                aspect
            );
        }
    }

    #[test]
    fn test_target_never_wider_than_default() {
        let planner = planner(1280, 720);
        let default_width = planner.default_crop().width;

        for size in (1..400).step_by(7) {
            for height in [size / 2 + 1, size, size * 2] {
                let face = Rect::new(10, 10, size, height);
                let target = planner.plan(Some(&face));
                assert!(target.width <= default_width);
            }
        }
    }

    #[test]
    fn test_select_primary_prefers_largest() {
        let detections = vec![
            Rect::new(0, 0, 40, 40),
            Rect::new(300, 0, 90, 90),
            Rect::new(500, 0, 60, 60),
        ];
        assert_eq!(select_primary(&detections), Some(Rect::new(300, 0, 90, 90)));
    }

    #[test]
    fn test_select_primary_tie_keeps_first() {
        let detections = vec![Rect::new(10, 0, 50, 50), Rect::new(400, 0, 50, 50)];
        assert_eq!(select_primary(&detections), Some(Rect::new(10, 0, 50, 50)));
    }

    #[test]
    fn test_select_primary_skips_empty() {
        assert_eq!(select_primary(&[]), None);
        assert_eq!(select_primary(&[Rect::new(5, 5, 0, 30)]), None);
        assert_eq!(
            select_primary(&[Rect::new(5, 5, 0, 30), Rect::new(1, 1, 2, 2)]),
            Some(Rect::new(1, 1, 2, 2))
        );
    }

    #[test]
    fn test_zero_size_face_falls_back_to_default() {
        let planner = planner(640, 480);
        let target = planner.plan(Some(&Rect::new(100, 100, 0, 0)));
        assert_eq!(target, planner.default_crop());
    }
}
