// Turn window timing
//
// A turn is a fixed wall-clock window. The clock is polled by the scanning
// loop rather than firing on its own, so frame arrival rate has no effect on
// when a window closes.

use std::time::{Duration, Instant};

/// Shortest window a clock will accept, keeps zero-length turns well defined
const MIN_WINDOW: Duration = Duration::from_millis(1);

/// Deadline and frame statistics for one turn window
#[derive(Debug, Clone)]
pub struct TurnClock {
    /// When the window opened
    started: Instant,

    /// Window length
    duration: Duration,

    /// Frames delivered during the window
    frame_count: u64,
}

impl TurnClock {
    /// Open a window of the given length, starting now
    pub fn start(duration: Duration) -> Self {
        Self {
            started: Instant::now(),
            duration: duration.max(MIN_WINDOW),
            frame_count: 0,
        }
    }

    /// Time since the window opened
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left before the deadline, zero once it has passed
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed())
    }

    /// Whether the deadline has passed
    pub fn is_expired(&self) -> bool {
        self.elapsed() >= self.duration
    }

    /// Record that a frame arrived
    pub fn mark_frame(&mut self) {
        self.frame_count += 1;
    }

    /// Frames delivered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second over the window so far
    pub fn observed_fps(&self) -> f32 {
        let secs = self.elapsed().as_secs_f32();
        if secs > 0.0 {
            self.frame_count as f32 / secs
        } else {
            0.0
        }
    }
}
