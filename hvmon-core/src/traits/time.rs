//! Time Source and Delay Abstractions
//!
//! The control loop needs two things from the platform: a monotonic
//! millisecond clock to schedule acquisition ticks, and a blocking delay for
//! the calibration sampler's settling wait.
//!
//! ## Common Implementations
//!
//! - [`FixedTime`](crate::time::FixedTime): manually advanced clock for tests
//! - [`SystemTime`](crate::time::SystemTime): host clock (requires `std`)
//! - Board support: a SysTick/RTC counter and the HAL's delay provider

use crate::time::Timestamp;

/// Monotonic source of time for the control loop
///
/// ## Implementation Requirements
///
/// - `now()` must never go backwards
/// - Counter wraparound must be hidden from callers (extend to 64 bits)
///
/// ## Example Implementation
///
/// ```rust
/// use hvmon_core::traits::TimeSource;
/// use hvmon_core::time::Timestamp;
///
/// struct SysTickClock {
///     // ... millisecond counter incremented from the SysTick handler
/// }
///
/// impl TimeSource for SysTickClock {
///     fn now(&self) -> Timestamp {
///         // Read the tick counter
///         0 // placeholder
///     }
/// }
/// ```
pub trait TimeSource {
    /// Milliseconds since an arbitrary, fixed epoch (usually boot)
    fn now(&self) -> Timestamp;
}

/// Blocking delay provider
///
/// Used only by the calibration sampler. The wait is deliberate: it lets the
/// front end settle between samples and spreads the capture over a fixed
/// window so mains-frequency noise averages out.
pub trait Delay {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
