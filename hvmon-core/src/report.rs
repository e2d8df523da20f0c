//! Serial text output
//!
//! Every line is rendered into a fixed-capacity [`Line`] first and written
//! in one `write_str` call, so a UART driver never sees half a line and an
//! over-long line fails as [`MonitorError::Output`] instead of truncating
//! silently. Lines end in `\r\n` for terminal emulators.
//!
//! Only formatting lives here; the values come from the monitor.

use core::fmt::{self, Write};

use crate::{
    calibration::{CalibrationCoefficients, CalibrationPoint, CaptureOutcome, CaptureReport},
    command::OperatingMode,
    config::MonitorConfig,
    constants::LINE_CAPACITY,
    errors::{MonitorError, MonitorResult},
    time::Timestamp,
};

/// One rendered output line, terminator included
pub type Line = heapless::String<LINE_CAPACITY>;

const LINE_END: &str = "\r\n";

/// Render formatted text plus terminator into a [`Line`]
pub fn render(args: fmt::Arguments<'_>) -> MonitorResult<Line> {
    let mut line = Line::new();
    line.write_fmt(args)?;
    line.push_str(LINE_END).map_err(|_| MonitorError::Output)?;
    Ok(line)
}

/// Render and write one line
pub fn emit<W: Write>(out: &mut W, args: fmt::Arguments<'_>) -> MonitorResult<()> {
    let line = render(args)?;
    out.write_str(&line)?;
    Ok(())
}

/// Normal-mode tick line
///
/// `<millis>\t<voltage>\t<filtered>`, or `Stabilizing` in the last column
/// until the filter is warm.
pub fn normal_line(now: Timestamp, voltage: f32, filtered: Option<f32>) -> MonitorResult<Line> {
    match filtered {
        Some(filtered) => render(format_args!("{}\t{:.1}\t{:.1}", now, voltage, filtered)),
        None => render(format_args!("{}\t{:.1}\tStabilizing", now, voltage)),
    }
}

/// Calibrate-mode tick line
pub fn calibrate_line(voltage: f32) -> MonitorResult<Line> {
    render(format_args!("Current: {:.2}V", voltage))
}

/// Startup banner
pub fn write_banner<W: Write>(out: &mut W, config: &MonitorConfig) -> MonitorResult<()> {
    emit(out, format_args!("High Voltage Monitor v{}", crate::VERSION))?;
    emit(
        out,
        format_args!(
            "Range: {:.1} - {:.1} V",
            config.sensor.min_voltage, config.sensor.max_voltage
        ),
    )?;
    emit(out, format_args!("Commands: N=normal C=calibrate I=info R=reset"))
}

/// Normal-mode table header
pub fn write_header<W: Write>(out: &mut W) -> MonitorResult<()> {
    emit(out, format_args!("Time(ms)\tVoltage(V)\tFiltered(V)"))
}

/// Calibrate-mode instructions
pub fn write_instructions<W: Write>(out: &mut W, config: &MonitorConfig) -> MonitorResult<()> {
    emit(out, format_args!("=== Calibration mode ==="))?;
    emit(out, format_args!("Apply {:.1} V and press 1", config.low_reference_v))?;
    emit(out, format_args!("Apply {:.1} V and press 2", config.high_reference_v))?;
    emit(out, format_args!("Press N to return to normal mode"))
}

/// Everything the diagnostics command prints
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    /// Active coefficients
    pub coefficients: CalibrationCoefficients,
    /// Current mode
    pub mode: OperatingMode,
    /// Pending calibration point
    pub pending: Option<CalibrationPoint>,
    /// Samples in the filter window
    pub filter_len: usize,
    /// Filter window length
    pub filter_capacity: usize,
}

/// Diagnostics block
pub fn write_info<W: Write>(
    out: &mut W,
    config: &MonitorConfig,
    diagnostics: &Diagnostics,
) -> MonitorResult<()> {
    let sensor = &config.sensor;

    emit(out, format_args!("=== High Voltage Monitor v{} ===", crate::VERSION))?;
    emit(
        out,
        format_args!(
            "Front end: {:.3} V full scale / {:.0} codes, linear to {:.2} V",
            sensor.adc_ref_v, sensor.adc_max_code, sensor.max_adc_v
        ),
    )?;
    emit(
        out,
        format_args!("Range: {:.1} - {:.1} V", sensor.min_voltage, sensor.max_voltage),
    )?;
    emit(
        out,
        format_args!(
            "Calibration points: {:.1} V / {:.1} V",
            config.low_reference_v, config.high_reference_v
        ),
    )?;
    emit(out, format_args!("Scale: {:.6}", diagnostics.coefficients.scale))?;
    emit(out, format_args!("Offset: {:.6}", diagnostics.coefficients.offset))?;
    emit(out, format_args!("Mode: {}", diagnostics.mode.as_str()))?;

    match diagnostics.pending {
        Some(point) => emit(
            out,
            format_args!(
                "Session: point 1 at {:.1} V (measured {:.2} V)",
                point.known, point.measured
            ),
        )?,
        None => emit(out, format_args!("Session: idle"))?,
    }

    if diagnostics.filter_len == diagnostics.filter_capacity {
        emit(out, format_args!("Filter: ready ({} samples)", diagnostics.filter_capacity))
    } else {
        emit(
            out,
            format_args!(
                "Filter: stabilizing ({}/{})",
                diagnostics.filter_len, diagnostics.filter_capacity
            ),
        )
    }
}

/// Announce a blocking capture
pub fn write_capture_start<W: Write>(out: &mut W, known: f32, samples: u16) -> MonitorResult<()> {
    emit(out, format_args!("Capturing {:.1} V point ({} samples)...", known, samples))
}

/// Result of a successful capture
pub fn write_capture<W: Write>(out: &mut W, report: &CaptureReport) -> MonitorResult<()> {
    match report.outcome {
        CaptureOutcome::FirstPoint(point) => emit(
            out,
            format_args!(
                "Point 1 set: {:.1} V measured as {:.2} V (spread {:.2} V)",
                point.known,
                point.measured,
                report.stats.spread()
            ),
        ),
        CaptureOutcome::FirstPointReplaced(point) => emit(
            out,
            format_args!(
                "Point 1 replaced: {:.1} V measured as {:.2} V (spread {:.2} V)",
                point.known,
                point.measured,
                report.stats.spread()
            ),
        ),
        CaptureOutcome::Calibrated(coefficients) => emit(
            out,
            format_args!(
                "Calibration complete: scale={:.6} offset={:.6}",
                coefficients.scale, coefficients.offset
            ),
        ),
    }
}

/// A capture or derivation failed
pub fn write_capture_error<W: Write>(out: &mut W, error: &MonitorError) -> MonitorResult<()> {
    emit(out, format_args!("Calibration failed: {}", error))
}

/// Coefficients back to identity
pub fn write_reset<W: Write>(out: &mut W) -> MonitorResult<()> {
    emit(out, format_args!("Calibration reset: scale=1.000000 offset=0.000000"))
}

/// Non-fatal runtime error
pub fn write_fault<W: Write>(out: &mut W, error: &MonitorError) -> MonitorResult<()> {
    emit(out, format_args!("Error: {}", error))
}

/// Fatal error, the monitor is halting
pub fn write_halt<W: Write>(out: &mut W, error: &MonitorError) -> MonitorResult<()> {
    emit(out, format_args!("FATAL: {}", error))?;
    emit(out, format_args!("Monitor halted, check wiring and reset the board"))
}
