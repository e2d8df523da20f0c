//! Core of the hvmon high-voltage sense monitor
//!
//! Turns raw converter codes into a calibrated, smoothed physical voltage
//! and drives the serial operator interface around it.
//! Designed for small microcontrollers:
//!
//! - `no_std`, no allocator, no `unsafe`
//! - All state owned by one [`Monitor`], no globals
//! - Hardware behind four small traits, so the whole loop runs on a host
//!   against mocks
//!
//! ## Data Flow
//!
//! ```text
//! AnalogFrontEnd ─→ AcquisitionPipeline ─→ MovingAverage ─→ report ─→ serial
//!                      │   clamp, map,
//!                      │   calibrate
//!                      └── CalibrationStore ←── CalibrationSession ←── commands
//! ```
//!
//! ```no_run
//! use hvmon_core::{AcquisitionPipeline, SensorConfig, traits::AnalogFrontEnd};
//!
//! struct Adc;
//! impl AnalogFrontEnd for Adc {
//!     type Error = ();
//!     fn read_raw(&mut self) -> Result<i16, ()> { Ok(16000) }
//! }
//!
//! let mut pipeline: AcquisitionPipeline<Adc, 8> =
//!     AcquisitionPipeline::new(Adc, SensorConfig::default())?;
//!
//! let instant = pipeline.acquire()?;
//! match pipeline.filter().filtered() {
//!     Some(smoothed) => {}, // Display both
//!     None => {},           // Still stabilizing
//! }
//! # Ok::<(), hvmon_core::MonitorError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod acquisition;
pub mod calibration;
pub mod command;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filter;
pub mod mapping;
pub mod monitor;
pub mod report;
pub mod time;
pub mod traits;

// Public API
pub use acquisition::{AcquisitionPipeline, Sample};
pub use calibration::{
    CalibrationCoefficients, CalibrationSession, CalibrationStore, CaptureOutcome,
};
pub use command::{Command, OperatingMode};
pub use config::{MonitorConfig, SensorConfig};
pub use errors::{MonitorError, MonitorResult};
pub use filter::MovingAverage;
pub use mapping::{map_range, LinearMap};
pub use monitor::Monitor;

/// Crate version, printed in the banner
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
