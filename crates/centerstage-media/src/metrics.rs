//! Stream metrics.
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! host process installs a recorder.

use metrics::{counter, gauge, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_TOTAL: &str = "centerstage_frames_total";
    pub const DEGENERATE_FRAMES_TOTAL: &str = "centerstage_degenerate_frames_total";
    pub const DETECTION_ERRORS_TOTAL: &str = "centerstage_detection_errors_total";
    pub const FACES_DETECTED: &str = "centerstage_faces_detected";
    pub const FRAME_PROCESSING_SECONDS: &str = "centerstage_frame_processing_seconds";
}

/// Record one processed frame.
pub fn record_frame(faces: usize, duration_secs: f64) {
    counter!(names::FRAMES_TOTAL).increment(1);
    gauge!(names::FACES_DETECTED).set(faces as f64);
    histogram!(names::FRAME_PROCESSING_SECONDS).record(duration_secs);
}

/// Record a frame whose crop had no pixels.
pub fn record_degenerate_frame() {
    counter!(names::DEGENERATE_FRAMES_TOTAL).increment(1);
}

/// Record a detector failure. `stage` is `faces` or `eyes`.
pub fn record_detection_error(stage: &'static str) {
    counter!(names::DETECTION_ERRORS_TOTAL, "stage" => stage).increment(1);
}
