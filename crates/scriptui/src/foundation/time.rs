//! Frame clock driving the resource heartbeat
//!
//! Resource collection is counted in frames, not wall time, so the clock is
//! advanced explicitly by whoever owns the frame loop. Tests drive it by hand.

use std::time::{Duration, Instant};

/// Frame counter with wall-clock bookkeeping for diagnostics
pub struct FrameClock {
    frame: u64,
    started: Instant,
    last_frame: Instant,
    delta_time: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock at frame zero
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame: 0,
            started: now,
            last_frame: now,
            delta_time: 0.0,
        }
    }

    /// Advance to the next frame and return its number
    pub fn tick(&mut self) -> u64 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame += 1;
        self.frame
    }

    /// Current frame number (number of ticks so far)
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Time between the two most recent ticks in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Wall time since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f32 {
        let total = self.elapsed().as_secs_f32();
        if total > 0.0 {
            self.frame as f32 / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.delta_time(), 0.0);
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.frame(), 2);
        assert!(clock.delta_time() >= 0.0);
    }
}
