//! Error Types for the Monitor
//!
//! ## Design Philosophy
//!
//! Errors are returned from the acquisition hot path and from operator
//! commands on a device with no allocator, so they follow the same rules:
//!
//! 1. **No Heap Allocation**: reasons are `&'static str`, numeric context is
//!    stored inline.
//! 2. **Copy Semantics**: errors are small and `Copy`, they can be printed to
//!    the serial port and logged without ownership juggling.
//!
//! ## Error Categories
//!
//! ### Hardware
//! - `FrontEndInit`: converter not detected at startup (fatal, the monitor
//!   halts with a diagnostic)
//! - `FrontEndFault`: a single sample could not be read (reported, the loop
//!   carries on with the next tick)
//!
//! ### Calibration
//! - `DegenerateCalibration`: both points measured the same voltage, the
//!   slope would be infinite
//! - `InvalidCoefficients`: the derived scale is zero or not a finite number
//!
//! ### Setup and Output
//! - `InvalidConfig`: rejected configuration value
//! - `Output`: serial write failed or a line did not fit its buffer
//!
//! Out-of-range analog readings are not errors: the pipeline saturates them.
//! Unknown command bytes are not errors either: they are ignored.
//!
//! ```rust
//! use hvmon_core::{CalibrationStore, MonitorError};
//!
//! let mut store = CalibrationStore::default();
//! match store.derive(400.0, 395.0, 600.0, 395.0) {
//!     Ok(_) => unreachable!(),
//!     Err(MonitorError::DegenerateCalibration { measured }) => {
//!         assert_eq!(measured, 395.0);
//!     }
//!     Err(_) => unreachable!(),
//! }
//! // Prior coefficients survive a rejected calibration
//! assert_eq!(store.apply(500.0), 500.0);
//! ```

use thiserror_no_std::Error;

/// Result type for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Monitor errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MonitorError {
    /// Analog converter did not answer during startup
    #[error("Analog front end not detected: {reason}")]
    FrontEndInit {
        /// What the probe observed
        reason: &'static str,
    },

    /// A single converter read failed
    #[error("Analog front end read failed: {reason}")]
    FrontEndFault {
        /// What went wrong on the bus
        reason: &'static str,
    },

    /// Two calibration points produced the same measured voltage
    #[error("Degenerate calibration: both points measured {measured} V")]
    DegenerateCalibration {
        /// The coinciding measured voltage
        measured: f32,
    },

    /// Derived scale would break the `scale != 0` invariant
    #[error("Invalid calibration coefficients: scale {scale}")]
    InvalidCoefficients {
        /// The rejected scale
        scale: f32,
    },

    /// Configuration value out of its allowed domain
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which constraint was violated
        reason: &'static str,
    },

    /// Serial output failed or a line overflowed its buffer
    #[error("Serial output failed")]
    Output,
}

impl From<core::fmt::Error> for MonitorError {
    fn from(_: core::fmt::Error) -> Self {
        Self::Output
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MonitorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::FrontEndInit { reason } =>
                defmt::write!(fmt, "Front end not detected: {}", reason),
            Self::FrontEndFault { reason } =>
                defmt::write!(fmt, "Front end read failed: {}", reason),
            Self::DegenerateCalibration { measured } =>
                defmt::write!(fmt, "Degenerate calibration at {} V", measured),
            Self::InvalidCoefficients { scale } =>
                defmt::write!(fmt, "Invalid scale {}", scale),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::Output =>
                defmt::write!(fmt, "Serial output failed"),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = MonitorError::DegenerateCalibration { measured: 395.0 };
        assert_eq!(
            err.to_string(),
            "Degenerate calibration: both points measured 395 V"
        );

        let err = MonitorError::FrontEndInit { reason: "no ACK at 0x48" };
        assert!(err.to_string().contains("no ACK at 0x48"));
    }

    #[test]
    fn fmt_error_maps_to_output() {
        let err: MonitorError = core::fmt::Error.into();
        assert_eq!(err, MonitorError::Output);
    }
}
