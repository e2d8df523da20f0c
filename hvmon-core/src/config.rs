//! Runtime configuration
//!
//! Every tunable of the monitor, defaulting to the values in
//! [`crate::constants`]. Builders follow the `with_*` pattern and
//! [`MonitorConfig::validate`] rejects values that would break an invariant
//! further down (empty mapping range, zero sample count, ...).
//!
//! With the `serde` feature the structs (de)serialize, so host tools can
//! keep a board profile in a JSON file.
//!
//! ```rust
//! use hvmon_core::config::{MonitorConfig, SensorConfig};
//!
//! let config = MonitorConfig::default()
//!     .with_sensor(SensorConfig::default().with_voltage_range(0.0, 1000.0))
//!     .with_tick_interval_ms(250);
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::{
    calibration::SamplingPlan,
    constants::{
        ADC_MAX_CODE, ADC_REF_V, CALIBRATION_SAMPLES, CALIBRATION_SETTLE_MS, HIGH_REFERENCE_V,
        LOW_REFERENCE_V, MAX_ADC_V, MAX_VOLTAGE, MIN_VOLTAGE, TICK_INTERVAL_MS,
    },
    errors::{MonitorError, MonitorResult},
};

/// Converter and front-end conversion constants
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorConfig {
    /// Converter full-scale reference (V)
    pub adc_ref_v: f32,
    /// Code corresponding to `adc_ref_v`
    pub adc_max_code: f32,
    /// Upper end of the front-end linear region (V)
    pub max_adc_v: f32,
    /// Physical voltage at 0 V converter input
    pub min_voltage: f32,
    /// Physical voltage at `max_adc_v` converter input
    pub max_voltage: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            adc_ref_v: ADC_REF_V,
            adc_max_code: ADC_MAX_CODE,
            max_adc_v: MAX_ADC_V,
            min_voltage: MIN_VOLTAGE,
            max_voltage: MAX_VOLTAGE,
        }
    }
}

impl SensorConfig {
    /// Converter reference and maximum code
    pub fn with_converter(mut self, adc_ref_v: f32, adc_max_code: f32) -> Self {
        self.adc_ref_v = adc_ref_v;
        self.adc_max_code = adc_max_code;
        self
    }

    /// Front-end linear limit
    pub fn with_max_adc_v(mut self, max_adc_v: f32) -> Self {
        self.max_adc_v = max_adc_v;
        self
    }

    /// Physical voltage range
    pub fn with_voltage_range(mut self, min_voltage: f32, max_voltage: f32) -> Self {
        self.min_voltage = min_voltage;
        self.max_voltage = max_voltage;
        self
    }

    /// Check conversion constants
    pub fn validate(&self) -> MonitorResult<()> {
        let all_finite = self.adc_ref_v.is_finite()
            && self.adc_max_code.is_finite()
            && self.max_adc_v.is_finite()
            && self.min_voltage.is_finite()
            && self.max_voltage.is_finite();
        if !all_finite {
            return Err(MonitorError::InvalidConfig {
                reason: "sensor constants must be finite",
            });
        }

        if self.adc_ref_v <= 0.0 || self.adc_max_code <= 0.0 {
            return Err(MonitorError::InvalidConfig {
                reason: "converter reference and max code must be positive",
            });
        }

        if self.max_adc_v <= 0.0 {
            return Err(MonitorError::InvalidConfig {
                reason: "front-end linear limit must be positive",
            });
        }

        if self.min_voltage == self.max_voltage {
            return Err(MonitorError::InvalidConfig {
                reason: "physical voltage range is empty",
            });
        }

        Ok(())
    }
}

/// Full monitor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonitorConfig {
    /// Conversion constants
    pub sensor: SensorConfig,
    /// Period of the acquisition tick (ms)
    pub tick_interval_ms: u32,
    /// Samples averaged per calibration point
    pub calibration_samples: u16,
    /// Delay after each calibration sample (ms)
    pub calibration_settle_ms: u32,
    /// Known voltage for command `1` (V)
    pub low_reference_v: f32,
    /// Known voltage for command `2` (V)
    pub high_reference_v: f32,
    /// Push calibration samples into the live filter
    pub calibration_feeds_filter: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            tick_interval_ms: TICK_INTERVAL_MS,
            calibration_samples: CALIBRATION_SAMPLES,
            calibration_settle_ms: CALIBRATION_SETTLE_MS,
            low_reference_v: LOW_REFERENCE_V,
            high_reference_v: HIGH_REFERENCE_V,
            calibration_feeds_filter: false,
        }
    }
}

impl MonitorConfig {
    /// Front-end conversion constants
    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    /// Period of the output tick
    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u32) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Calibration sample count and settling delay
    pub fn with_calibration_sampling(mut self, samples: u16, settle_ms: u32) -> Self {
        self.calibration_samples = samples;
        self.calibration_settle_ms = settle_ms;
        self
    }

    /// Known voltages wired to commands `1` and `2`
    pub fn with_references(mut self, low_v: f32, high_v: f32) -> Self {
        self.low_reference_v = low_v;
        self.high_reference_v = high_v;
        self
    }

    /// Let calibration captures feed the display filter
    pub fn with_calibration_feeding_filter(mut self, feeds: bool) -> Self {
        self.calibration_feeds_filter = feeds;
        self
    }

    /// Sampling parameters for the calibration procedure
    pub fn sampling_plan(&self) -> SamplingPlan {
        SamplingPlan {
            samples: self.calibration_samples,
            settle_ms: self.calibration_settle_ms,
            feed_filter: self.calibration_feeds_filter,
        }
    }

    /// Check every constraint
    pub fn validate(&self) -> MonitorResult<()> {
        self.sensor.validate()?;

        if self.tick_interval_ms == 0 {
            return Err(MonitorError::InvalidConfig {
                reason: "tick interval must be non-zero",
            });
        }

        if self.calibration_samples == 0 {
            return Err(MonitorError::InvalidConfig {
                reason: "calibration needs at least one sample",
            });
        }

        if !(self.low_reference_v.is_finite() && self.high_reference_v.is_finite()) {
            return Err(MonitorError::InvalidConfig {
                reason: "calibration references must be finite",
            });
        }

        // Equal references can never complete a session
        if self.low_reference_v == self.high_reference_v {
            return Err(MonitorError::InvalidConfig {
                reason: "calibration references must differ",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MonitorConfig::default().validate().is_ok());
    }

    #[test]
    fn default_references() {
        let config = MonitorConfig::default();
        assert_eq!(config.low_reference_v, 400.0);
        assert_eq!(config.high_reference_v, 600.0);
        assert!(!config.calibration_feeds_filter);
    }

    #[test]
    fn rejects_zero_samples() {
        let config = MonitorConfig::default().with_calibration_sampling(0, 50);
        assert!(matches!(config.validate(), Err(MonitorError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_zero_tick() {
        let config = MonitorConfig::default().with_tick_interval_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_equal_references() {
        let config = MonitorConfig::default().with_references(500.0, 500.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_sensor() {
        let sensor = SensorConfig::default().with_voltage_range(400.0, 400.0);
        assert!(MonitorConfig::default().with_sensor(sensor).validate().is_err());

        let sensor = SensorConfig::default().with_converter(0.0, 32767.0);
        assert!(sensor.validate().is_err());

        let sensor = SensorConfig::default().with_max_adc_v(f32::NAN);
        assert!(sensor.validate().is_err());
    }

    #[test]
    fn sampling_plan_mirrors_config() {
        let plan = MonitorConfig::default()
            .with_calibration_sampling(5, 10)
            .with_calibration_feeding_filter(true)
            .sampling_plan();

        assert_eq!(plan.samples, 5);
        assert_eq!(plan.settle_ms, 10);
        assert!(plan.feed_filter);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip() {
        let config = MonitorConfig::default().with_references(350.0, 650.0);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MonitorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
