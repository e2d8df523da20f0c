//! Two-Point Calibration
//!
//! ## Overview
//!
//! The divider and isolation amplifier in front of the converter carry gain
//! and offset tolerances of a few percent. A two-point calibration removes
//! both: the operator applies two known voltages, the monitor measures each
//! one, and a straight line through the pairs becomes the correction.
//!
//! ```text
//!  known ▲
//!   600 ─┤                 ● (590, 600)
//!        │              ╱
//!        │           ╱        scale  = Δknown / Δmeasured
//!        │        ╱           offset = known1 - scale · measured1
//!   400 ─┤  ● (395, 400)
//!        └──┴──────────────┴──→ measured
//! ```
//!
//! ## Parts
//!
//! - [`store`]: the active coefficients, derivation and reset
//! - [`session`]: the two-step capture state machine and the averaging
//!   sampler that feeds it
//!
//! ## Usage Example
//!
//! ```rust
//! use hvmon_core::calibration::{CalibrationSession, CalibrationStore, CaptureOutcome};
//!
//! let mut store = CalibrationStore::default();
//! let mut session = CalibrationSession::new();
//!
//! session.record(400.0, 395.0, &mut store)?;
//! let outcome = session.record(600.0, 590.0, &mut store)?;
//!
//! assert!(matches!(outcome, CaptureOutcome::Calibrated(_)));
//! assert!((store.apply(590.0) - 600.0).abs() < 1e-3);
//! # Ok::<(), hvmon_core::MonitorError>(())
//! ```

pub mod session;
pub mod store;

pub use session::{
    sample_average, CalibrationPoint, CalibrationSession, CaptureOutcome, CaptureReport,
    SampleStats, SamplingPlan,
};
pub use store::{CalibrationCoefficients, CalibrationStore};
