//! Liveness timer
//!
//! Tracks whether a resource has been used recently. Each heartbeat counts
//! down; every use re-arms the countdown. A timer that reaches zero expires
//! and its resource is collected.

/// State of a liveness timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Recently used; `remaining` heartbeats until expiry
    Armed {
        /// Heartbeats left before expiry
        remaining: u32,
    },
    /// Not used for the whole window; the owner is due for collection
    Expired,
    /// Owner destroyed (terminal)
    Destroyed,
}

/// Per-resource idle countdown
#[derive(Debug, Clone)]
pub struct LivenessTimer {
    state: TimerState,
    window: u32,
}

impl LivenessTimer {
    /// Create a timer armed for `window` heartbeats
    pub fn new(window: u32) -> Self {
        let window = window.max(1);
        Self {
            state: TimerState::Armed { remaining: window },
            window,
        }
    }

    /// Current state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Idle window in heartbeats
    pub fn window(&self) -> u32 {
        self.window
    }

    /// Re-arm the countdown. No effect once destroyed.
    pub fn keep_alive(&mut self) {
        if self.state != TimerState::Destroyed {
            self.state = TimerState::Armed { remaining: self.window };
        }
    }

    /// Count one heartbeat. Returns `true` if this tick expired the timer.
    pub fn tick(&mut self) -> bool {
        match self.state {
            TimerState::Armed { remaining } if remaining <= 1 => {
                self.state = TimerState::Expired;
                true
            }
            TimerState::Armed { remaining } => {
                self.state = TimerState::Armed { remaining: remaining - 1 };
                false
            }
            TimerState::Expired | TimerState::Destroyed => false,
        }
    }

    /// Mark the owner as destroyed
    pub fn destroy(&mut self) {
        self.state = TimerState::Destroyed;
    }

    /// Whether the timer is still armed
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_window() {
        let mut timer = LivenessTimer::new(3);
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[test]
    fn test_keep_alive_rearms() {
        let mut timer = LivenessTimer::new(2);
        timer.tick();
        timer.keep_alive();
        assert_eq!(timer.state(), TimerState::Armed { remaining: 2 });
        assert!(!timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn test_expired_does_not_tick_again() {
        let mut timer = LivenessTimer::new(1);
        assert!(timer.tick());
        assert!(!timer.tick());
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[test]
    fn test_destroyed_is_terminal() {
        let mut timer = LivenessTimer::new(2);
        timer.destroy();
        timer.keep_alive();
        assert!(!timer.tick());
        assert_eq!(timer.state(), TimerState::Destroyed);
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_zero_window_is_clamped() {
        let timer = LivenessTimer::new(0);
        assert_eq!(timer.window(), 1);
    }
}
