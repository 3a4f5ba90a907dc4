//! Platform abstraction layer
//!
//! Handles frame timing for the loop thread. Deltas come from the monotonic
//! `Instant` clock and are capped so a stalled thread does not launch the
//! ball across the whole canvas in one step.

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self::starting_at(Instant::now(), max_dt)
    }

    pub fn starting_at(start: Instant, max_dt: f32) -> Self {
        Self {
            last: start,
            max_dt: max_dt.max(0.0),
        }
    }

    /// Seconds since the previous tick
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(self.max_dt)
    }
}
