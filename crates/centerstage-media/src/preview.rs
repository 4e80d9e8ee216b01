//! On-screen preview window.

use crate::error::MediaResult;
use image::RgbImage;

/// Local preview of the output stream with a quit key.
pub trait Preview {
    fn show(&mut self, frame: &RgbImage) -> MediaResult<()>;

    /// Poll the window's keyboard once. `true` when the quit key was pressed.
    fn poll_quit(&mut self) -> MediaResult<bool>;
}

impl<P: Preview + ?Sized> Preview for Box<P> {
    fn show(&mut self, frame: &RgbImage) -> MediaResult<()> {
        (**self).show(frame)
    }

    fn poll_quit(&mut self) -> MediaResult<bool> {
        (**self).poll_quit()
    }
}

/// Headless runs: shows nothing and never quits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPreview;

impl Preview for NoPreview {
    fn show(&mut self, _frame: &RgbImage) -> MediaResult<()> {
        Ok(())
    }

    fn poll_quit(&mut self) -> MediaResult<bool> {
        Ok(false)
    }
}

#[cfg(feature = "opencv")]
pub use self::highgui_window::HighGuiPreview;

#[cfg(feature = "opencv")]
mod highgui_window {
    use super::Preview;
    use crate::convert::packed_to_mat;
    use crate::error::{MediaError, MediaResult};
    use crate::frame::to_channel_order;
    use centerstage_models::ChannelOrder;
    use image::RgbImage;
    use opencv::highgui;
    use tracing::{debug, warn};

    /// `highgui` window. Frames are shown in true color.
    pub struct HighGuiPreview {
        window: String,
        quit_key: char,
    }

    impl HighGuiPreview {
        pub fn open(window: &str, quit_key: char) -> MediaResult<Self> {
            highgui::named_window(window, highgui::WINDOW_AUTOSIZE)
                .map_err(|e| MediaError::preview_failed(format!("Open window: {e}")))?;
            debug!(window, %quit_key, "Opened preview window");
            Ok(Self {
                window: window.to_string(),
                quit_key,
            })
        }
    }

    impl Preview for HighGuiPreview {
        fn show(&mut self, frame: &RgbImage) -> MediaResult<()> {
            let bgr = to_channel_order(frame, ChannelOrder::Bgr);
            let mat = packed_to_mat(&bgr, frame.width(), frame.height())?;
            highgui::imshow(&self.window, &mat)
                .map_err(|e| MediaError::preview_failed(format!("imshow: {e}")))
        }

        fn poll_quit(&mut self) -> MediaResult<bool> {
            let key = highgui::wait_key(1)
                .map_err(|e| MediaError::preview_failed(format!("waitKey: {e}")))?;
            Ok(key >= 0 && (key & 0xFF) as u32 == self.quit_key as u32)
        }
    }

    impl Drop for HighGuiPreview {
        fn drop(&mut self) {
            if let Err(e) = highgui::destroy_window(&self.window) {
                warn!(window = %self.window, error = %e, "Failed to close preview window");
            }
        }
    }
}
