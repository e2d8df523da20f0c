//! Calibration coefficients and their store
//!
//! Correction model: `calibrated = raw * scale + offset`. Two known voltages
//! measured through the uncorrected chain pin down both coefficients.

use crate::{
    constants::calibration::{IDENTITY_OFFSET, IDENTITY_SCALE},
    errors::{MonitorError, MonitorResult},
};

/// Linear correction applied to every mapped voltage
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationCoefficients {
    /// Gain correction, never zero
    pub scale: f32,
    /// Offset correction in volts
    pub offset: f32,
}

impl CalibrationCoefficients {
    /// No correction
    pub const IDENTITY: Self = Self {
        scale: IDENTITY_SCALE,
        offset: IDENTITY_OFFSET,
    };

    /// Correct one voltage
    #[inline]
    pub fn apply(&self, voltage: f32) -> f32 {
        voltage * self.scale + self.offset
    }

    /// True when no correction is applied
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `self` followed by `next`: `next.apply(self.apply(v))`
    pub fn then(&self, next: &Self) -> Self {
        Self {
            scale: next.scale * self.scale,
            offset: next.scale * self.offset + next.offset,
        }
    }
}

impl Default for CalibrationCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Owner of the active coefficients
///
/// Coefficients only change through [`derive`](Self::derive) (second
/// calibration point) or [`reset`](Self::reset). A rejected derivation
/// leaves them untouched.
#[derive(Debug, Clone, Default)]
pub struct CalibrationStore {
    coefficients: CalibrationCoefficients,
}

impl CalibrationStore {
    /// Store with identity coefficients
    pub const fn new() -> Self {
        Self {
            coefficients: CalibrationCoefficients::IDENTITY,
        }
    }

    /// Correct one voltage with the active coefficients
    #[inline]
    pub fn apply(&self, voltage: f32) -> f32 {
        self.coefficients.apply(voltage)
    }

    /// Derive and adopt coefficients from two `(known, measured)` pairs
    ///
    /// `measured` values are uncorrected mapped voltages; the result replaces
    /// the active coefficients.
    ///
    /// ```text
    /// scale  = (known2 - known1) / (measured2 - measured1)
    /// offset = known1 - scale * measured1
    /// ```
    ///
    /// Rejects coincident measured values (the slope would be infinite) and
    /// any result whose scale is zero or not finite.
    pub fn derive(
        &mut self,
        known1: f32,
        measured1: f32,
        known2: f32,
        measured2: f32,
    ) -> MonitorResult<CalibrationCoefficients> {
        let solved = solve(known1, measured1, known2, measured2)?;
        self.adopt(solved)
    }

    /// Correct the active coefficients from two `(known, measured)` pairs
    ///
    /// `measured` values were read through the active coefficients, so the
    /// solved line is applied on top of them. With identity active this is
    /// [`derive`](Self::derive).
    pub fn refine(
        &mut self,
        known1: f32,
        measured1: f32,
        known2: f32,
        measured2: f32,
    ) -> MonitorResult<CalibrationCoefficients> {
        let correction = solve(known1, measured1, known2, measured2)?;
        self.adopt(self.coefficients.then(&correction))
    }

    fn adopt(&mut self, coefficients: CalibrationCoefficients) -> MonitorResult<CalibrationCoefficients> {
        let CalibrationCoefficients { scale, offset } = coefficients;

        if !scale.is_finite() || scale == 0.0 || !offset.is_finite() {
            log_warn!("Calibration rejected: scale {} offset {}", scale, offset);
            return Err(MonitorError::InvalidCoefficients { scale });
        }

        self.coefficients = coefficients;
        log_info!("Calibration adopted: scale {} offset {}", scale, offset);

        Ok(coefficients)
    }

    /// Return to identity
    pub fn reset(&mut self) {
        self.coefficients = CalibrationCoefficients::IDENTITY;
    }

    /// Active coefficients
    pub fn coefficients(&self) -> CalibrationCoefficients {
        self.coefficients
    }
}

/// Line through two `(known, measured)` pairs
fn solve(
    known1: f32,
    measured1: f32,
    known2: f32,
    measured2: f32,
) -> MonitorResult<CalibrationCoefficients> {
    let span = measured2 - measured1;

    // Coincident within one ulp of the larger magnitude counts as equal
    let resolution = f32::EPSILON * libm::fmaxf(libm::fabsf(measured1), libm::fabsf(measured2));
    if libm::fabsf(span) <= resolution {
        log_warn!("Calibration rejected: both points measured {} V", measured1);
        return Err(MonitorError::DegenerateCalibration { measured: measured1 });
    }

    let scale = (known2 - known1) / span;
    Ok(CalibrationCoefficients {
        scale,
        offset: known1 - scale * measured1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-3;

    fn close(a: f32, b: f32) -> bool {
        libm::fabsf(a - b) <= TOLERANCE
    }

    #[test]
    fn identity_by_default() {
        let store = CalibrationStore::default();
        for v in [-5.0, 0.0, 400.0, 612.3, 800.0] {
            assert_eq!(store.apply(v), v);
        }
        assert!(store.coefficients().is_identity());
    }

    #[test]
    fn two_point_scenario() {
        let mut store = CalibrationStore::new();
        let coeffs = store.derive(400.0, 395.0, 600.0, 590.0).unwrap();

        assert!(close(coeffs.scale, 200.0 / 195.0));
        assert!(close(coeffs.offset, 400.0 - (200.0 / 195.0) * 395.0));
        assert!(close(coeffs.offset, -5.128));

        assert!(close(store.apply(395.0), 400.0));
        assert!(close(store.apply(590.0), 600.0));
    }

    #[test]
    fn degenerate_points_keep_prior_coefficients() {
        let mut store = CalibrationStore::new();
        store.derive(400.0, 395.0, 600.0, 590.0).unwrap();
        let before = store.coefficients();

        let result = store.derive(400.0, 500.0, 600.0, 500.0);
        assert_eq!(
            result,
            Err(MonitorError::DegenerateCalibration { measured: 500.0 })
        );
        assert_eq!(store.coefficients(), before);
    }

    #[test]
    fn zero_measured_points_are_degenerate() {
        let mut store = CalibrationStore::new();
        let result = store.derive(400.0, 0.0, 600.0, 0.0);
        assert!(matches!(result, Err(MonitorError::DegenerateCalibration { .. })));
        assert!(store.coefficients().is_identity());
    }

    #[test]
    fn equal_known_values_give_zero_scale() {
        let mut store = CalibrationStore::new();
        let result = store.derive(400.0, 395.0, 400.0, 590.0);
        assert_eq!(result, Err(MonitorError::InvalidCoefficients { scale: 0.0 }));
        assert!(store.coefficients().is_identity());
    }

    #[test]
    fn non_finite_inputs_rejected() {
        let mut store = CalibrationStore::new();
        assert!(store.derive(400.0, f32::NAN, 600.0, 590.0).is_err());
        assert!(store.derive(f32::INFINITY, 395.0, 600.0, 590.0).is_err());
        assert!(store.coefficients().is_identity());
    }

    #[test]
    fn refine_on_identity_matches_derive() {
        let mut refined = CalibrationStore::new();
        let mut derived = CalibrationStore::new();

        refined.refine(400.0, 395.0, 600.0, 590.0).unwrap();
        derived.derive(400.0, 395.0, 600.0, 590.0).unwrap();

        assert_eq!(refined.coefficients(), derived.coefficients());
    }

    #[test]
    fn refine_stacks_on_active_coefficients() {
        let mut store = CalibrationStore::new();
        store.derive(400.0, 395.0, 600.0, 590.0).unwrap();

        // Readings already corrected come back on target: nothing changes
        let before = store.coefficients();
        store.refine(400.0, store.apply(395.0), 600.0, store.apply(590.0)).unwrap();
        assert!(close(store.coefficients().scale, before.scale));
        assert!(close(store.coefficients().offset, before.offset));

        // A 1% drift on corrected readings is folded in
        store.refine(400.0, 404.0, 600.0, 606.0).unwrap();
        assert!(close(store.apply(395.0), 400.0 / 1.01));
        assert!(close(store.apply(590.0), 600.0 / 1.01));
    }

    #[test]
    fn composition_order() {
        let first = CalibrationCoefficients { scale: 2.0, offset: 1.0 };
        let second = CalibrationCoefficients { scale: 3.0, offset: -4.0 };

        let both = first.then(&second);
        assert_eq!(both.apply(5.0), second.apply(first.apply(5.0)));
        assert_eq!(CalibrationCoefficients::IDENTITY.then(&second), second);
    }

    #[test]
    fn reset_restores_identity() {
        let mut store = CalibrationStore::new();
        store.derive(400.0, 395.0, 600.0, 590.0).unwrap();
        assert!(!store.coefficients().is_identity());

        store.reset();
        assert_eq!(store.coefficients(), CalibrationCoefficients::IDENTITY);
        assert_eq!(store.apply(512.0), 512.0);
    }
}
