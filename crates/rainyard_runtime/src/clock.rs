//! Frame clock

use std::time::{Duration, Instant};

/// Monotonic elapsed-time source for the frame loop
///
/// Starts on the first query if not started explicitly.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    started: Option<Instant>,
    last_delta: Option<Instant>,
}

impl FrameClock {
    /// A clock that starts on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the clock now
    pub fn start(&mut self) {
        let now = Instant::now();
        self.started = Some(now);
        self.last_delta = Some(now);
    }

    /// Time since the clock started
    pub fn elapsed(&mut self) -> Duration {
        match self.started {
            Some(started) => started.elapsed(),
            None => {
                self.start();
                Duration::ZERO
            }
        }
    }

    /// Time since the previous `delta` call (or since start)
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        match self.last_delta.replace(now) {
            Some(last) => now.duration_since(last),
            None => {
                self.started = Some(now);
                Duration::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autostart_on_first_query() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert!(clock.started.is_some());
        std::thread::sleep(Duration::from_millis(2));
        assert!(clock.elapsed() >= Duration::from_millis(2));
    }

    #[test]
    fn test_elapsed_is_non_decreasing() {
        let mut clock = FrameClock::new();
        clock.start();
        let mut last = Duration::ZERO;
        for _ in 0..1000 {
            let now = clock.elapsed();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_delta_starts_at_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(), Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert!(clock.delta() >= Duration::from_millis(2));
    }
}
