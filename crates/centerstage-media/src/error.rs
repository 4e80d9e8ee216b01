//! Error types for capture, framing and output.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while producing the virtual camera stream.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to read frame: {0}")]
    ReadError(String),

    #[error("Virtual camera unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Failed to send frame: {0}")]
    SendFailed(String),

    #[error("Degenerate crop {width}x{height}")]
    DegenerateCrop { width: i32, height: i32 },

    #[error("Detection failed: {0}")]
    DetectionFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Preview failed: {0}")]
    PreviewFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MediaError {
    /// Create a device unavailable error.
    pub fn device_unavailable(message: impl Into<String>) -> Self {
        Self::DeviceUnavailable(message.into())
    }

    /// Create a frame read error.
    pub fn read_error(message: impl Into<String>) -> Self {
        Self::ReadError(message.into())
    }

    /// Create a virtual camera unavailable error.
    pub fn sink_unavailable(message: impl Into<String>) -> Self {
        Self::SinkUnavailable(message.into())
    }

    /// Create a send failure error.
    pub fn send_failed(message: impl Into<String>) -> Self {
        Self::SendFailed(message.into())
    }

    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create a model not found error.
    pub fn model_not_found(path: impl Into<String>) -> Self {
        Self::ModelNotFound(path.into())
    }

    /// Create a preview failure error.
    pub fn preview_failed(message: impl Into<String>) -> Self {
        Self::PreviewFailed(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Errors the stream absorbs for a single frame instead of stopping.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateCrop { .. } | Self::DetectionFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(MediaError::DegenerateCrop { width: 0, height: 4 }.is_recoverable());
        assert!(MediaError::detection_failed("cascade").is_recoverable());
        assert!(!MediaError::read_error("eof").is_recoverable());
        assert!(!MediaError::sink_unavailable("/dev/video10").is_recoverable());
    }

    #[test]
    fn test_degenerate_crop_message() {
        let err = MediaError::DegenerateCrop { width: 0, height: 12 };
        assert_eq!(err.to_string(), "Degenerate crop 0x12");
    }
}
