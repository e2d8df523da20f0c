//! Linear range mapping
//!
//! Affine transform from one bounded range onto another, the same shape as
//! Arduino's `map()` but in floating point and without truncation.
//!
//! Two entry points:
//! - [`map_range`]: the bare formula. A degenerate input range (`in_min ==
//!   in_max`) divides by zero, so the result is NaN or infinite. Debug builds
//!   assert on it.
//! - [`LinearMap`]: a pre-validated mapping. Construction rejects degenerate
//!   and non-finite ranges, so a `LinearMap` always yields finite output for
//!   finite input. The acquisition pipeline only uses this form.

use crate::errors::{MonitorError, MonitorResult};

/// Map `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// No clamping: values outside the input range extrapolate linearly.
#[inline]
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    debug_assert!(in_max != in_min, "map_range called with an empty input range");
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Validated affine mapping between two ranges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMap {
    in_min: f32,
    in_max: f32,
    out_min: f32,
    out_max: f32,
}

impl LinearMap {
    /// Build a mapping, rejecting empty or non-finite ranges
    pub fn new(in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> MonitorResult<Self> {
        if !(in_min.is_finite() && in_max.is_finite() && out_min.is_finite() && out_max.is_finite()) {
            return Err(MonitorError::InvalidConfig {
                reason: "mapping bounds must be finite",
            });
        }

        if in_min == in_max {
            return Err(MonitorError::InvalidConfig {
                reason: "mapping input range is empty",
            });
        }

        Ok(Self { in_min, in_max, out_min, out_max })
    }

    /// Apply the mapping
    #[inline]
    pub fn map(&self, x: f32) -> f32 {
        map_range(x, self.in_min, self.in_max, self.out_min, self.out_max)
    }

    /// Input bounds `(min, max)`
    pub fn input(&self) -> (f32, f32) {
        (self.in_min, self.in_max)
    }

    /// Output bounds `(min, max)`
    pub fn output(&self) -> (f32, f32) {
        (self.out_min, self.out_max)
    }
}
