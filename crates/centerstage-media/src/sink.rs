//! Virtual camera output.

use crate::error::{MediaError, MediaResult};
use crate::frame::{frame_size, to_channel_order};
use centerstage_models::{ChannelOrder, FrameSize};
use image::RgbImage;

/// Consumer of finished output frames.
pub trait FrameSink {
    /// Byte order the device expects.
    fn channel_order(&self) -> ChannelOrder;

    /// Resolution the device was opened with.
    fn size(&self) -> FrameSize;

    /// Push one packed frame, already in [`FrameSink::channel_order`].
    fn send(&mut self, bytes: &[u8]) -> MediaResult<()>;

    /// Block until the next frame slot.
    fn pace(&mut self) {}

    /// Convert `frame` to the device's channel order and send it.
    fn send_frame(&mut self, frame: &RgbImage) -> MediaResult<()> {
        let size = frame_size(frame);
        if size != self.size() {
            return Err(MediaError::send_failed(format!(
                "Frame is {size}, device expects {}",
                self.size()
            )));
        }
        let bytes = to_channel_order(frame, self.channel_order());
        self.send(&bytes)
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn channel_order(&self) -> ChannelOrder {
        (**self).channel_order()
    }

    fn size(&self) -> FrameSize {
        (**self).size()
    }

    fn send(&mut self, bytes: &[u8]) -> MediaResult<()> {
        (**self).send(bytes)
    }

    fn pace(&mut self) {
        (**self).pace()
    }
}

#[cfg(feature = "opencv")]
pub use self::v4l2::VirtualCamera;

#[cfg(feature = "opencv")]
mod v4l2 {
    use super::FrameSink;
    use crate::convert::packed_to_mat;
    use crate::error::{MediaError, MediaResult};
    use crate::pacing::FramePacer;
    use centerstage_models::{ChannelOrder, FrameSize};
    use opencv::core::Size;
    use opencv::prelude::*;
    use opencv::videoio::{self, VideoWriter};
    use tracing::{debug, info, warn};

    /// v4l2loopback device fed through a GStreamer `VideoWriter`.
    pub struct VirtualCamera {
        writer: VideoWriter,
        device: String,
        size: FrameSize,
        pacer: FramePacer,
    }

    impl VirtualCamera {
        /// Open `device` at `size` and `fps`.
        ///
        /// # Errors
        /// `MediaError::SinkUnavailable` when the pipeline does not open.
        pub fn open(device: &str, size: FrameSize, fps: u32) -> MediaResult<Self> {
            let pipeline = gst_pipeline(device);
            let writer = VideoWriter::new_with_backend(
                &pipeline,
                videoio::CAP_GSTREAMER,
                0,
                fps as f64,
                Size::new(size.width as i32, size.height as i32),
                true,
            )
            .map_err(|e| MediaError::sink_unavailable(format!("{device}: {e}")))?;

            if !writer.is_opened().unwrap_or(false) {
                return Err(MediaError::sink_unavailable(format!(
                    "{device}: GStreamer pipeline did not open"
                )));
            }

            info!(device, %size, fps, "Opened virtual camera");
            Ok(Self {
                writer,
                device: device.to_string(),
                size,
                pacer: FramePacer::new(fps),
            })
        }

        pub fn device(&self) -> &str {
            &self.device
        }
    }

    fn gst_pipeline(device: &str) -> String {
        format!(
            "appsrc ! videoconvert ! video/x-raw,format=YUY2 \
             ! v4l2sink device={device} sync=false"
        )
    }

    impl FrameSink for VirtualCamera {
        fn channel_order(&self) -> ChannelOrder {
            ChannelOrder::Bgr
        }

        fn size(&self) -> FrameSize {
            self.size
        }

        fn send(&mut self, bytes: &[u8]) -> MediaResult<()> {
            let mat = packed_to_mat(bytes, self.size.width, self.size.height)?;
            self.writer
                .write(&mat)
                .map_err(|e| MediaError::send_failed(format!("{}: {e}", self.device)))
        }

        fn pace(&mut self) {
            self.pacer.pace();
        }
    }

    impl Drop for VirtualCamera {
        fn drop(&mut self) {
            if let Err(e) = self.writer.release() {
                warn!(device = %self.device, error = %e, "Failed to release virtual camera");
            } else {
                debug!(device = %self.device, "Released virtual camera");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    struct Recorder {
        order: ChannelOrder,
        size: FrameSize,
        sent: Vec<Vec<u8>>,
    }

    impl FrameSink for Recorder {
        fn channel_order(&self) -> ChannelOrder {
            self.order
        }

        fn size(&self) -> FrameSize {
            self.size
        }

        fn send(&mut self, bytes: &[u8]) -> MediaResult<()> {
            self.sent.push(bytes.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_send_frame_converts_channel_order() {
        let mut sink = Recorder {
            order: ChannelOrder::Bgr,
            size: FrameSize::new(1, 1),
            sent: Vec::new(),
        };

        sink.send_frame(&RgbImage::from_pixel(1, 1, Rgb([255, 255, 0]))).unwrap();

        assert_eq!(sink.sent, vec![vec![0, 255, 255]]);
    }

    #[test]
    fn test_send_frame_rejects_wrong_size() {
        let mut sink = Recorder {
            order: ChannelOrder::Rgb,
            size: FrameSize::new(4, 4),
            sent: Vec::new(),
        };

        let err = sink.send_frame(&RgbImage::new(2, 2)).unwrap_err();
        assert!(matches!(err, MediaError::SendFailed(_)));
        assert!(sink.sent.is_empty());
    }
}
