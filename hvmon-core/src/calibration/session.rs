//! Two-point calibration procedure
//!
//! ## State Machine
//!
//! ```text
//!            capture(k1)                 capture(k2 != k1)
//!   Idle ───────────────→ Point1Captured ─────────────────→ Idle
//!                           │       ↑      refine(), success or not
//!                           └───────┘
//!                         capture(k1) overwrites point 1
//! ```
//!
//! The session only remembers point 1. The second capture completes it:
//! the line through both points is stacked on the active coefficients and
//! the session returns to idle whether or not the store accepted the result.
//!
//! Points are averages of corrected readings. Both points of a session are
//! always read through the same coefficients (any change to them clears the
//! session), so recalibrating on top of an earlier calibration converges
//! instead of undoing it.
//!
//! ## Sampling
//!
//! A capture averages `samples` pipeline reads, waiting `settle_ms` after
//! each. With the defaults (20 × 50 ms) a capture blocks for about a second;
//! the control loop does not poll commands meanwhile, so a capture is atomic
//! from the operator's point of view.

use crate::{
    acquisition::AcquisitionPipeline,
    calibration::{CalibrationCoefficients, CalibrationStore},
    errors::{MonitorError, MonitorResult},
    traits::{AnalogFrontEnd, Delay},
};

/// A known voltage and what the monitor measured for it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationPoint {
    /// Voltage applied by the operator
    pub known: f32,
    /// Averaged calibrated reading
    pub measured: f32,
}

/// How a capture samples the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPlan {
    /// Number of reads to average, at least 1
    pub samples: u16,
    /// Delay after each read (ms)
    pub settle_ms: u32,
    /// Push the reads into the live filter as well
    pub feed_filter: bool,
}

/// Summary of one averaged capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    /// Arithmetic mean of the reads
    pub mean: f32,
    /// Smallest read
    pub min: f32,
    /// Largest read
    pub max: f32,
    /// Number of reads
    pub count: u16,
}

impl SampleStats {
    /// Peak-to-peak noise over the capture window
    pub fn spread(&self) -> f32 {
        self.max - self.min
    }
}

/// Result of feeding one point into the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureOutcome {
    /// First point stored, waiting for the second
    FirstPoint(CalibrationPoint),
    /// Same known voltage captured again, point 1 replaced
    FirstPointReplaced(CalibrationPoint),
    /// Second point completed the session
    Calibrated(CalibrationCoefficients),
}

/// Outcome plus the sampling statistics behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureReport {
    /// What the session did with the point
    pub outcome: CaptureOutcome,
    /// Statistics of the averaged reads
    pub stats: SampleStats,
}

/// Average `plan.samples` calibrated reads
///
/// Stops at the first front-end fault; a partial average is never returned.
pub fn sample_average<A, D, const N: usize>(
    pipeline: &mut AcquisitionPipeline<A, N>,
    delay: &mut D,
    plan: &SamplingPlan,
) -> MonitorResult<SampleStats>
where
    A: AnalogFrontEnd,
    D: Delay,
{
    if plan.samples == 0 {
        return Err(MonitorError::InvalidConfig {
            reason: "calibration needs at least one sample",
        });
    }

    let mut sum = 0.0f32;
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;

    for _ in 0..plan.samples {
        let voltage = if plan.feed_filter {
            pipeline.acquire()?
        } else {
            pipeline.read_calibrated()?
        };

        sum += voltage;
        min = libm::fminf(min, voltage);
        max = libm::fmaxf(max, voltage);

        delay.delay_ms(plan.settle_ms);
    }

    Ok(SampleStats {
        mean: sum / plan.samples as f32,
        min,
        max,
        count: plan.samples,
    })
}

/// Transient state of a two-point calibration
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalibrationSession {
    point1: Option<CalibrationPoint>,
}

impl CalibrationSession {
    /// Idle session
    pub const fn new() -> Self {
        Self { point1: None }
    }

    /// Point 1, if captured
    pub fn point1(&self) -> Option<CalibrationPoint> {
        self.point1
    }

    /// True when no point is pending
    pub fn is_idle(&self) -> bool {
        self.point1.is_none()
    }

    /// Abandon a half-finished session
    pub fn clear(&mut self) {
        self.point1 = None;
    }

    /// Feed one averaged point into the state machine
    ///
    /// `measured` is read through the store's active coefficients.
    /// Completing the session returns the store's verdict; the session is
    /// back to idle either way.
    pub fn record(
        &mut self,
        known: f32,
        measured: f32,
        store: &mut CalibrationStore,
    ) -> MonitorResult<CaptureOutcome> {
        let point = CalibrationPoint { known, measured };

        match self.point1 {
            None => {
                self.point1 = Some(point);
                log_info!("Calibration point 1: {} V measured as {} V", known, measured);
                Ok(CaptureOutcome::FirstPoint(point))
            }
            Some(first) if first.known == known => {
                self.point1 = Some(point);
                log_info!("Calibration point 1 replaced: {} V measured as {} V", known, measured);
                Ok(CaptureOutcome::FirstPointReplaced(point))
            }
            Some(first) => {
                self.point1 = None;
                store
                    .refine(first.known, first.measured, known, measured)
                    .map(CaptureOutcome::Calibrated)
            }
        }
    }

    /// Sample the pipeline and record the averaged point
    pub fn capture_point<A, D, const N: usize>(
        &mut self,
        known: f32,
        pipeline: &mut AcquisitionPipeline<A, N>,
        delay: &mut D,
        plan: &SamplingPlan,
    ) -> MonitorResult<CaptureReport>
    where
        A: AnalogFrontEnd,
        D: Delay,
    {
        let stats = sample_average(pipeline, delay, plan)?;
        let outcome = self.record(known, stats.mean, pipeline.calibration_mut())?;

        Ok(CaptureReport { outcome, stats })
    }
}
