//! Frame sources.

use crate::error::MediaResult;
use image::RgbImage;

/// Supplies successive frames of fixed dimensions.
///
/// Opening happens in the implementor's constructor and closing in `Drop`.
pub trait FrameSource {
    /// Block until the next frame is available.
    fn read(&mut self) -> MediaResult<RgbImage>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read(&mut self) -> MediaResult<RgbImage> {
        (**self).read()
    }
}

#[cfg(feature = "opencv")]
pub use self::opencv_camera::OpenCvCamera;

#[cfg(feature = "opencv")]
mod opencv_camera {
    use super::FrameSource;
    use crate::convert::bgr_mat_to_rgb;
    use crate::error::{MediaError, MediaResult};
    use image::RgbImage;
    use opencv::core::Mat;
    use opencv::prelude::*;
    use opencv::videoio::{self, VideoCapture};
    use tracing::{debug, info, warn};

    /// Local webcam opened through `videoio::VideoCapture`.
    pub struct OpenCvCamera {
        capture: VideoCapture,
        index: i32,
        frame: Mat,
    }

    impl OpenCvCamera {
        /// Open capture device `index`.
        ///
        /// # Errors
        /// `MediaError::DeviceUnavailable` when the device cannot be opened.
        pub fn open(index: i32) -> MediaResult<Self> {
            let capture = VideoCapture::new(index, videoio::CAP_ANY).map_err(|e| {
                MediaError::device_unavailable(format!("Open camera {index}: {e}"))
            })?;
            if !capture.is_opened().unwrap_or(false) {
                return Err(MediaError::device_unavailable(format!(
                    "Camera {index} could not be opened"
                )));
            }

            info!(index, "Opened capture device");
            Ok(Self {
                capture,
                index,
                frame: Mat::default(),
            })
        }
    }

    impl FrameSource for OpenCvCamera {
        fn read(&mut self) -> MediaResult<RgbImage> {
            let grabbed = self
                .capture
                .read(&mut self.frame)
                .map_err(|e| MediaError::read_error(format!("Camera {}: {e}", self.index)))?;
            if !grabbed || self.frame.rows() == 0 || self.frame.cols() == 0 {
                return Err(MediaError::read_error(format!(
                    "Camera {} returned no frame",
                    self.index
                )));
            }
            bgr_mat_to_rgb(&self.frame)
        }
    }

    impl Drop for OpenCvCamera {
        fn drop(&mut self) {
            if let Err(e) = self.capture.release() {
                warn!(index = self.index, error = %e, "Failed to release capture device");
            } else {
                debug!(index = self.index, "Released capture device");
            }
        }
    }
}
