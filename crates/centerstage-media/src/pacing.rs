//! Fixed-rate frame pacing.

use std::time::{Duration, Instant};

/// Sleeps the caller onto a fixed frame grid.
///
/// The deadline advances by one interval per frame. When the caller falls
/// more than one interval behind, the grid restarts from the current
/// instant instead of sending a burst of catch-up frames.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl FramePacer {
    /// Pacer for `fps` frames per second. `fps` must be positive.
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            next_deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long to wait at `now`, advancing the deadline.
    ///
    /// Returns `None` when no wait is needed.
    pub fn wait_time(&mut self, now: Instant) -> Option<Duration> {
        let deadline = match self.next_deadline {
            None => {
                // First frame goes out immediately
                self.next_deadline = Some(now + self.interval);
                return None;
            }
            Some(deadline) => deadline,
        };

        if now > deadline + self.interval {
            self.next_deadline = Some(now + self.interval);
            return None;
        }

        self.next_deadline = Some(deadline + self.interval);
        deadline.checked_duration_since(now)
    }

    /// Sleep until the next frame slot.
    pub fn pace(&mut self) {
        if let Some(wait) = self.wait_time(Instant::now()) {
            std::thread::sleep(wait);
        }
    }
}
