//! Time-Related Constants
//!
//! Scheduling intervals for the control loop and the calibration sampler.

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

// ===== CONTROL LOOP =====

/// Interval between acquisition ticks (milliseconds).
///
/// One pipeline read and one output line per tick (10 Hz).
pub const TICK_INTERVAL_MS: u32 = 100;

/// Interval between repeated diagnostics while halted (milliseconds).
///
/// A halted monitor keeps re-printing its fault so an operator who attaches
/// a terminal late still sees why the device stopped.
pub const HALT_REPORT_INTERVAL_MS: u32 = 5 * MS_PER_SECOND as u32;

// ===== CALIBRATION SAMPLING =====

/// Settling delay between two calibration samples (milliseconds).
///
/// 20 samples × 50 ms gives a ~1 s capture window.
pub const CALIBRATION_SETTLE_MS: u32 = 50;
