//! Frame pipeline driver.
//!
//! Owns the collaborators for one stream and runs the per-frame loop:
//! read, process, send, pace, preview, poll quit. The stream is `Running`
//! until one of the stop conditions fires, after which it stays `Stopped`.

use crate::config::AppConfig;
use crate::logging::StreamLogger;
use centerstage_media::frame::frame_size;
use centerstage_media::{
    Detector, FrameProcessor, FrameSink, FrameSource, MediaError, MediaResult, NoPreview, Preview,
};
use image::RgbImage;
use std::fmt;

/// Why a stream stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The frame source failed to deliver a frame.
    SourceFailed,
    /// The quit key was pressed in the preview window.
    UserQuit,
    /// The virtual camera rejected a frame.
    SinkFailed,
    /// The configured frame limit was reached.
    FrameLimit,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::SourceFailed => "source_failed",
            StopReason::UserQuit => "user_quit",
            StopReason::SinkFailed => "sink_failed",
            StopReason::FrameLimit => "frame_limit",
        }
    }

    /// Whether this stop should be reported as a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, StopReason::SourceFailed | StopReason::SinkFailed)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Running,
    Stopped(StopReason),
}

/// Frame counters for one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub frames_read: u64,
    pub frames_sent: u64,
    pub degenerate_frames: u64,
}

/// Outcome of [`StreamDriver::run`].
#[derive(Debug)]
pub struct StreamReport {
    pub reason: StopReason,
    pub stats: StreamStats,
    /// The error behind a failure stop.
    pub error: Option<MediaError>,
}

/// Drives one capture-to-virtual-camera stream.
pub struct StreamDriver<S, D, K, P = NoPreview> {
    source: S,
    detector: D,
    sink: K,
    preview: P,
    processor: FrameProcessor,
    logger: StreamLogger,
    max_frames: Option<u64>,
    pending: Option<RgbImage>,
    last_output: Option<RgbImage>,
    state: StreamState,
    stats: StreamStats,
    error: Option<MediaError>,
}

impl<S, D, K> StreamDriver<S, D, K, NoPreview>
where
    S: FrameSource,
    D: Detector,
    K: FrameSink,
{
    /// Start a stream on an opened source.
    ///
    /// Reads the first frame to learn the source size, builds the crop
    /// state, then opens the virtual camera with `open_sink`.
    ///
    /// # Errors
    /// `ReadError` when the first frame cannot be read, `SinkUnavailable`
    /// when the virtual camera cannot be opened or its resolution does not
    /// match the configured output.
    pub fn start<F>(
        mut source: S,
        detector: D,
        config: &AppConfig,
        open_sink: F,
    ) -> MediaResult<Self>
    where
        F: FnOnce() -> MediaResult<K>,
    {
        let first = source.read()?;
        let size = frame_size(&first);
        let processor = FrameProcessor::new(&config.framing, &config.eye_fill, size);

        let sink = open_sink()?;
        if sink.size() != processor.output() {
            return Err(MediaError::sink_unavailable(format!(
                "device opened at {}, output is {}",
                sink.size(),
                processor.output()
            )));
        }

        let logger =
            StreamLogger::new(config.camera_index, &config.virtual_device, processor.output());
        logger.log_start(size, sink.channel_order());

        Ok(Self {
            source,
            detector,
            sink,
            preview: NoPreview,
            processor,
            logger,
            max_frames: config.max_frames,
            pending: Some(first),
            last_output: None,
            state: StreamState::Running,
            stats: StreamStats::default(),
            error: None,
        })
    }
}

impl<S, D, K, P> StreamDriver<S, D, K, P>
where
    S: FrameSource,
    D: Detector,
    K: FrameSink,
    P: Preview,
{
    /// Show output frames in `preview` and stop on its quit key.
    pub fn with_preview<Q: Preview>(self, preview: Q) -> StreamDriver<S, D, K, Q> {
        StreamDriver {
            source: self.source,
            detector: self.detector,
            sink: self.sink,
            preview,
            processor: self.processor,
            logger: self.logger,
            max_frames: self.max_frames,
            pending: self.pending,
            last_output: self.last_output,
            state: self.state,
            stats: self.stats,
            error: self.error,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn preview(&self) -> &P {
        &self.preview
    }

    pub fn processor(&self) -> &FrameProcessor {
        &self.processor
    }

    /// Run until the stream stops.
    pub fn run(&mut self) -> StreamReport {
        let span = self.logger.create_span();
        let _guard = span.enter();

        let reason = loop {
            if let StreamState::Stopped(reason) = self.step() {
                break reason;
            }
        };

        self.logger.log_stop(reason.as_str(), self.stats.frames_sent);
        StreamReport {
            reason,
            stats: self.stats,
            error: self.error.take(),
        }
    }

    /// Run one iteration. Does nothing once stopped.
    pub fn step(&mut self) -> StreamState {
        if let StreamState::Stopped(_) = self.state {
            return self.state;
        }

        if self.max_frames.is_some_and(|max| self.stats.frames_read >= max) {
            return self.stop(StopReason::FrameLimit, None);
        }

        let frame = match self.next_frame() {
            Ok(frame) => frame,
            Err(e) => return self.stop(StopReason::SourceFailed, Some(e)),
        };
        self.stats.frames_read += 1;
        let index = self.stats.frames_read;

        match self.processor.process(&frame, &mut self.detector) {
            Ok(processed) => self.last_output = Some(processed.image),
            Err(e) if e.is_recoverable() => {
                if matches!(e, MediaError::DegenerateCrop { .. }) {
                    self.stats.degenerate_frames += 1;
                }
                let action = if self.last_output.is_some() {
                    "re-sending previous frame"
                } else {
                    "skipping send"
                };
                self.logger.log_warning(index, &format!("{e}, {action}"));
            }
            Err(e) => return self.stop(StopReason::SourceFailed, Some(e)),
        }

        let Some(output) = self.last_output.as_ref() else {
            return self.poll_quit(index);
        };

        if let Err(e) = self.sink.send_frame(output) {
            return self.stop(StopReason::SinkFailed, Some(e));
        }
        self.stats.frames_sent += 1;
        self.sink.pace();

        if let Err(e) = self.preview.show(output) {
            self.logger.log_warning(index, &e.to_string());
        }

        self.poll_quit(index)
    }

    fn next_frame(&mut self) -> MediaResult<RgbImage> {
        let frame = match self.pending.take() {
            Some(frame) => frame,
            None => self.source.read()?,
        };

        let size = frame_size(&frame);
        if size != self.processor.source() {
            return Err(MediaError::read_error(format!(
                "frame size changed from {} to {size}",
                self.processor.source()
            )));
        }
        Ok(frame)
    }

    fn poll_quit(&mut self, index: u64) -> StreamState {
        match self.preview.poll_quit() {
            Ok(true) => self.stop(StopReason::UserQuit, None),
            Ok(false) => self.state,
            Err(e) => {
                self.logger.log_warning(index, &e.to_string());
                self.state
            }
        }
    }

    fn stop(&mut self, reason: StopReason, error: Option<MediaError>) -> StreamState {
        if let Some(e) = &error {
            self.logger.log_error(self.stats.frames_read, &e.to_string());
        }
        self.error = error;
        self.state = StreamState::Stopped(reason);
        self.state
    }
}
