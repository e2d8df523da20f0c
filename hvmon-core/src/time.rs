//! Time management for the control loop
//!
//! Provides the timestamp type, a tick scheduler and clock implementations:
//! - [`FixedTime`]: manually driven clock for tests and simulations
//! - [`SystemTime`] / [`SystemDelay`]: host clock and sleep (requires `std`)

use crate::traits::{Delay, TimeSource};

/// Timestamp in milliseconds since device boot
pub type Timestamp = u64;

/// Fixed-period tick scheduler
///
/// Fires when at least `period_ms` has elapsed since the last firing. The
/// next deadline is measured from the moment the tick was observed, so a
/// late poll delays later ticks instead of bunching them up.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period_ms: u32,
    last: Timestamp,
}

impl Interval {
    /// Scheduler whose first tick is due `period_ms` after `start`
    pub const fn new(period_ms: u32, start: Timestamp) -> Self {
        Self { period_ms, last: start }
    }

    /// Returns true (and re-arms) when a tick is due at `now`
    pub fn poll(&mut self, now: Timestamp) -> bool {
        if now.saturating_sub(self.last) >= self.period_ms as u64 {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Restart the period from `now`
    pub fn reset(&mut self, now: Timestamp) {
        self.last = now;
    }

    /// Configured period
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Move forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Delaying a fixed clock just moves it forward
impl Delay for FixedTime {
    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms as u64);
    }
}

/// Host monotonic clock, zero at construction (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemTime {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemTime {
    /// Clock starting at zero now
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for SystemTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        self.start.elapsed().as_millis() as Timestamp
    }
}

/// Thread-sleep delay (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDelay;

#[cfg(feature = "std")]
impl Delay for SystemDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);

        time.delay_ms(50);
        assert_eq!(time.now(), 1550);
    }

    #[test]
    fn interval_fires_after_period() {
        let mut tick = Interval::new(100, 0);

        assert!(!tick.poll(0));
        assert!(!tick.poll(99));
        assert!(tick.poll(100));

        // Re-armed from the observed time
        assert!(!tick.poll(150));
        assert!(tick.poll(200));
    }

    #[test]
    fn late_poll_does_not_bunch_ticks() {
        let mut tick = Interval::new(100, 0);

        assert!(tick.poll(350));
        assert!(!tick.poll(360));
        assert!(tick.poll(450));
    }

    #[test]
    fn reset_restarts_period() {
        let mut tick = Interval::new(100, 0);
        tick.reset(1000);
        assert!(!tick.poll(1050));
        assert!(tick.poll(1100));
        assert_eq!(tick.period_ms(), 100);
    }
}
