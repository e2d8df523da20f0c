//! Front-End Conversion Constants
//!
//! This module defines the conversion chain from raw converter codes to the
//! physical high-voltage reading. Defaults describe an ADS1115 running at
//! gain 1 (±4.096 V full scale) in front of a divider/isolation amplifier whose
//! linear region is 0-4 V for a 400-800 V bus.

// ===== ANALOG-TO-DIGITAL CONVERTER =====

/// Full-scale reference voltage of the converter (V).
///
/// A raw code equal to [`ADC_MAX_CODE`] corresponds to this voltage.
///
/// Source: ADS1115 datasheet, PGA setting FSR = ±4.096 V
pub const ADC_REF_V: f32 = 4.096;

/// Maximum positive code of the converter.
///
/// 16-bit signed converter, single-ended reads land in `0..=32767`.
pub const ADC_MAX_CODE: f32 = 32767.0;

/// Upper end of the front-end's linear output region (V).
///
/// Converter voltages above this value are saturated, not reported.
pub const MAX_ADC_V: f32 = 4.0;

// ===== PHYSICAL VOLTAGE RANGE =====

/// Physical voltage reported for a front-end output of 0 V.
pub const MIN_VOLTAGE: f32 = 400.0;

/// Physical voltage reported for a front-end output of [`MAX_ADC_V`].
pub const MAX_VOLTAGE: f32 = 800.0;
