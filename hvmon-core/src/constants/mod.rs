//! Constants for hvmon Core
//!
//! Centralized, documented defaults used by the configuration layer. Any
//! value here can be overridden at runtime through [`crate::config`].
//!
//! ## Organization
//!
//! - **Sensors**: converter reference, code range, physical voltage range
//! - **Time**: tick interval, calibration settling delay
//! - **Calibration**: reference voltages and identity coefficients
//! - **Buffers**: filter window and line buffer capacities

/// Converter and front-end conversion constants.
pub mod sensors;

/// Time-related constants for the control loop and calibration sampler.
pub mod time;

/// Calibration reference voltages and identity coefficients.
pub mod calibration;

/// Buffer sizes for the filter window and serial output.
pub mod buffers;

pub use sensors::{ADC_MAX_CODE, ADC_REF_V, MAX_ADC_V, MAX_VOLTAGE, MIN_VOLTAGE};

pub use time::{CALIBRATION_SETTLE_MS, HALT_REPORT_INTERVAL_MS, TICK_INTERVAL_MS};

pub use calibration::{HIGH_REFERENCE_V, IDENTITY_OFFSET, IDENTITY_SCALE, LOW_REFERENCE_V};

pub use buffers::{CALIBRATION_SAMPLES, FILTER_WINDOW, LINE_CAPACITY};
