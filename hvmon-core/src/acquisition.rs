//! Voltage Acquisition Pipeline
//!
//! The single path from a raw converter code to a calibrated voltage:
//!
//! ```text
//! read_raw ─→ code→volts ─→ clamp [0, MAX_ADC_V] ─→ map → [MIN_V, MAX_V]
//!                                                        │
//!                         filter.push ←─ calibration.apply
//! ```
//!
//! Every consumer (normal display, calibration display, calibration capture)
//! goes through [`AcquisitionPipeline::read_calibrated`], so the value shown
//! and the value filtered always saw the same coefficients.
//!
//! ## Saturation
//!
//! Converter voltages outside `[0, MAX_ADC_V]` are clamped, not reported.
//! The analog design guarantees the linear region; anything outside is
//! transient (negative noise around 0 V, overshoot on connection).

use crate::{
    calibration::CalibrationStore,
    config::SensorConfig,
    errors::{MonitorError, MonitorResult},
    filter::MovingAverage,
    mapping::LinearMap,
    traits::AnalogFrontEnd,
};

/// One converted sample at every stage of the chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Raw converter code
    pub raw: i16,
    /// Converter input voltage after clamping
    pub adc_v: f32,
    /// Physical voltage before calibration
    pub mapped_v: f32,
    /// Physical voltage after calibration
    pub calibrated_v: f32,
}

/// Front end + conversion + calibration + filter
///
/// Owns the converter and all per-channel state. `N` is the filter window.
pub struct AcquisitionPipeline<A, const N: usize> {
    frontend: A,
    sensor: SensorConfig,
    mapping: LinearMap,
    calibration: CalibrationStore,
    filter: MovingAverage<N>,
}

impl<A: AnalogFrontEnd, const N: usize> AcquisitionPipeline<A, N> {
    /// Build a pipeline, validating the sensor configuration
    pub fn new(frontend: A, sensor: SensorConfig) -> MonitorResult<Self> {
        sensor.validate()?;
        let mapping = LinearMap::new(0.0, sensor.max_adc_v, sensor.min_voltage, sensor.max_voltage)?;

        Ok(Self {
            frontend,
            sensor,
            mapping,
            calibration: CalibrationStore::new(),
            filter: MovingAverage::new(),
        })
    }

    /// Check the converter answers
    pub fn probe(&mut self) -> MonitorResult<()> {
        self.frontend.probe().map_err(|_e| {
            log_error!("Front end probe failed");
            MonitorError::FrontEndInit {
                reason: "converter did not respond to probe",
            }
        })
    }

    /// Read and convert one sample without touching the filter
    pub fn sample(&mut self) -> MonitorResult<Sample> {
        let raw = self.frontend.read_raw().map_err(|_e| {
            log_warn!("Front end read failed");
            MonitorError::FrontEndFault {
                reason: "conversion read failed",
            }
        })?;

        Ok(self.convert(raw))
    }

    /// Calibrated voltage of one fresh sample, filter untouched
    pub fn read_calibrated(&mut self) -> MonitorResult<f32> {
        self.sample().map(|s| s.calibrated_v)
    }

    /// Calibrated voltage of one fresh sample, also pushed into the filter
    ///
    /// Returns the unfiltered value; the smoothed value is
    /// [`filter().filtered()`](MovingAverage::filtered).
    pub fn acquire(&mut self) -> MonitorResult<f32> {
        let voltage = self.read_calibrated()?;
        self.filter.push(voltage);
        Ok(voltage)
    }

    /// Pure conversion of a raw code with the active coefficients
    pub fn convert(&self, raw: i16) -> Sample {
        let adc_v = raw as f32 * self.sensor.adc_ref_v / self.sensor.adc_max_code;
        let adc_v = adc_v.clamp(0.0, self.sensor.max_adc_v);
        let mapped_v = self.mapping.map(adc_v);
        let calibrated_v = self.calibration.apply(mapped_v);

        Sample { raw, adc_v, mapped_v, calibrated_v }
    }

    /// Moving-average state
    pub fn filter(&self) -> &MovingAverage<N> {
        &self.filter
    }

    /// Active calibration
    pub fn calibration(&self) -> &CalibrationStore {
        &self.calibration
    }

    /// Mutable calibration, for the calibration procedure and reset
    pub fn calibration_mut(&mut self) -> &mut CalibrationStore {
        &mut self.calibration
    }

    /// Conversion constants in use
    pub fn sensor(&self) -> &SensorConfig {
        &self.sensor
    }
}
