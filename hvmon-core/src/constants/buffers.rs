//! Buffer Sizes and Memory Constraints
//!
//! Fixed capacities for the moving-average window and the serial line
//! buffers. Everything is sized at compile time, the core never allocates.

// ===== FILTER =====

/// Moving-average window length (samples).
///
/// 8 samples at the 100 ms tick rate is 800 ms of smoothing latency.
/// Power of two keeps the wrap-around modulo cheap.
pub const FILTER_WINDOW: usize = 8;

/// Number of samples averaged per calibration point.
pub const CALIBRATION_SAMPLES: u16 = 20;

// ===== SERIAL OUTPUT =====

/// Capacity of a single rendered output line (bytes).
///
/// Longest line is the calibration result with two coefficients,
/// well under 96 characters including the `\r\n` terminator.
pub const LINE_CAPACITY: usize = 96;
