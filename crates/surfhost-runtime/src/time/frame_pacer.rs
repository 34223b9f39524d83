use std::time::{Duration, Instant};

/// Paces continuous-mode frames on the rendering thread.
///
/// Only tracks when the last frame started; the next one is due one
/// `interval` later.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last: Instant,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// Restarts timing for a new surface generation.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// When the next frame should run.
    pub fn next_deadline(&self) -> Instant {
        self.last + self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline()
    }

    /// Marks a frame as started at `now`.
    pub fn tick(&mut self, now: Instant) {
        self.last = now;
    }
}
