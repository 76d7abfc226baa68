//! Blocking frame pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps away whatever is left of each frame's time slot
pub struct FrameLimiter {
    frame_duration: Duration,
    last_tick: Instant,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            last_tick: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Block until one frame duration has passed since the previous tick.
    ///
    /// Returns the full frame time (work + sleep). A frame that already ran
    /// long does not sleep.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last_tick.elapsed();
        if let Some(remaining) = self.frame_duration.checked_sub(elapsed) {
            thread::sleep(remaining);
        }

        let now = Instant::now();
        let frame_time = now - self.last_tick;
        self.last_tick = now;
        frame_time
    }
}
