//! Calibration Reference Points
//!
//! Known voltages an operator applies while capturing calibration points.

/// Low calibration reference (V), captured with command `1`.
pub const LOW_REFERENCE_V: f32 = 400.0;

/// High calibration reference (V), captured with command `2`.
///
/// The reference bench supply tops out at 600 V, so the high point sits
/// inside the measurement range rather than at its 800 V end.
pub const HIGH_REFERENCE_V: f32 = 600.0;

/// Identity scale.
pub const IDENTITY_SCALE: f32 = 1.0;

/// Identity offset (V).
pub const IDENTITY_OFFSET: f32 = 0.0;
