//! Fixed-timestep clock.
//!
//! Updates run at a fixed rate. When the loop falls behind, every missed
//! step is still run (catch-up), but the caller renders only once.

use std::time::{Duration, Instant};

/// Tracks the time of the last fixed update.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    interval: Duration,
    last_update: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            // A zero interval would never let `due_steps` finish.
            interval: interval.max(Duration::from_micros(1)),
            last_update: start,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of whole steps due at `now`; advances the clock past them.
    pub fn due_steps(&mut self, now: Instant) -> u32 {
        let mut steps = 0;
        while now.saturating_duration_since(self.last_update) >= self.interval {
            self.last_update += self.interval;
            steps += 1;
        }
        steps
    }

    /// When the next step becomes due.
    pub fn next_due(&self) -> Instant {
        self.last_update + self.interval
    }
}
