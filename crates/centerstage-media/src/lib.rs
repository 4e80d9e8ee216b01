//! Frame processing for the Center Stage virtual camera.
//!
//! This crate provides:
//! - Face-centered crop control with EMA smoothing and bounds clamping
//! - Crop extraction and resize to the output resolution
//! - Eye fill (threshold mask, closing, color blend)
//! - Collaborator traits for capture, detection, output and preview
//! - OpenCV-backed collaborators behind the `opencv` feature

pub mod capture;
#[cfg(feature = "opencv")]
pub mod convert;
pub mod detection;
pub mod error;
pub mod frame;
pub mod framing;
pub mod metrics;
pub mod occlusion;
pub mod pacing;
pub mod pipeline;
pub mod preview;
pub mod resample;
pub mod sink;

pub use capture::FrameSource;
pub use detection::{Detector, NullDetector};
pub use error::{MediaError, MediaResult};
pub use framing::CropController;
pub use occlusion::EyeOccluder;
pub use pacing::FramePacer;
pub use pipeline::{FrameProcessor, ProcessedFrame};
pub use preview::{NoPreview, Preview};
pub use resample::Resampler;
pub use sink::FrameSink;

#[cfg(feature = "opencv")]
pub use capture::OpenCvCamera;
#[cfg(feature = "opencv")]
pub use detection::HaarCascadeDetector;
#[cfg(feature = "opencv")]
pub use preview::HighGuiPreview;
#[cfg(feature = "opencv")]
pub use sink::VirtualCamera;
