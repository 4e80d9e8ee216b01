//! Structured stream logging.
//!
//! Lifecycle events of one virtual camera stream carry the same device and
//! output context so they can be correlated in JSON logs.

use centerstage_models::{ChannelOrder, FrameSize};
use tracing::{error, info, warn, Span};

/// Logger for one capture-to-virtual-camera stream.
#[derive(Debug, Clone)]
pub struct StreamLogger {
    camera: i32,
    device: String,
    output: FrameSize,
}

impl StreamLogger {
    /// # Arguments
    /// * `camera` - Capture device index
    /// * `device` - Virtual camera device node
    /// * `output` - Output resolution
    pub fn new(camera: i32, device: &str, output: FrameSize) -> Self {
        Self {
            camera,
            device: device.to_string(),
            output,
        }
    }

    pub fn log_start(&self, source: FrameSize, order: ChannelOrder) {
        info!(
            camera = self.camera,
            device = %self.device,
            output = %self.output,
            source = %source,
            order = %order,
            "Stream started"
        );
    }

    pub fn log_warning(&self, frame: u64, message: &str) {
        warn!(
            camera = self.camera,
            device = %self.device,
            frame,
            "Stream warning: {}", message
        );
    }

    pub fn log_error(&self, frame: u64, message: &str) {
        error!(
            camera = self.camera,
            device = %self.device,
            frame,
            "Stream error: {}", message
        );
    }

    /// Log the end of the stream.
    pub fn log_stop(&self, reason: &str, frames_sent: u64) {
        info!(
            camera = self.camera,
            device = %self.device,
            reason,
            frames_sent,
            "Stream stopped"
        );
    }

    pub fn camera(&self) -> i32 {
        self.camera
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// Tracing span covering the stream.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "stream",
            camera = self.camera,
            device = %self.device,
            output = %self.output
        )
    }
}
