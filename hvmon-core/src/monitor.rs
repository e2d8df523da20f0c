//! Control loop
//!
//! [`Monitor`] owns every piece of state (pipeline, calibration session,
//! mode) plus the four hardware collaborators, and runs the cooperative
//! single-threaded loop:
//!
//! ```text
//! loop {
//!     command byte pending? ─→ parse ─→ dispatch (may block for a capture)
//!     tick interval elapsed? ─→ one pipeline read ─→ one output line
//! }
//! ```
//!
//! Nothing is shared across threads or interrupts, so nothing is locked.
//!
//! ## Example
//!
//! ```rust
//! use hvmon_core::{Command, Monitor, MonitorConfig, time::FixedTime, traits::{AnalogFrontEnd, CommandInput}};
//!
//! struct Adc;
//! impl AnalogFrontEnd for Adc {
//!     type Error = ();
//!     fn read_raw(&mut self) -> Result<i16, ()> { Ok(0) }
//! }
//!
//! struct NoInput;
//! impl CommandInput for NoInput {
//!     type Error = ();
//!     fn read_byte(&mut self) -> nb::Result<u8, ()> { Err(nb::Error::WouldBlock) }
//! }
//!
//! let mut monitor: Monitor<_, _, _, _, _> = Monitor::new(
//!     MonitorConfig::default(),
//!     Adc,
//!     NoInput,
//!     String::new(),
//!     FixedTime::new(100),
//!     FixedTime::new(0),
//! )?;
//!
//! monitor.start()?;
//! monitor.handle_command(Command::Info)?;
//! assert!(monitor.output().contains("Scale: 1.000000"));
//! # Ok::<(), hvmon_core::MonitorError>(())
//! ```

use core::fmt::Write;

use crate::{
    acquisition::AcquisitionPipeline,
    calibration::CalibrationSession,
    command::{Command, OperatingMode},
    config::MonitorConfig,
    constants::{FILTER_WINDOW, HALT_REPORT_INTERVAL_MS},
    errors::{MonitorError, MonitorResult},
    report::{self, Diagnostics},
    time::{Interval, Timestamp},
    traits::{AnalogFrontEnd, CommandInput, Delay, TimeSource},
};

/// The monitor firmware core
///
/// - `A`: analog front end
/// - `I`: command byte input
/// - `W`: text output
/// - `T`: monotonic clock
/// - `D`: blocking delay
/// - `N`: moving-average window
pub struct Monitor<A, I, W, T, D, const N: usize = FILTER_WINDOW> {
    config: MonitorConfig,
    pipeline: AcquisitionPipeline<A, N>,
    session: CalibrationSession,
    mode: OperatingMode,
    tick: Interval,
    input: I,
    output: W,
    clock: T,
    delay: D,
}

impl<A, I, W, T, D, const N: usize> Monitor<A, I, W, T, D, N>
where
    A: AnalogFrontEnd,
    I: CommandInput,
    W: Write,
    T: TimeSource,
    D: Delay,
{
    /// Assemble a monitor, validating the configuration
    pub fn new(
        config: MonitorConfig,
        frontend: A,
        input: I,
        output: W,
        clock: T,
        delay: D,
    ) -> MonitorResult<Self> {
        config.validate()?;
        let pipeline = AcquisitionPipeline::new(frontend, config.sensor)?;
        let tick = Interval::new(config.tick_interval_ms, clock.now());

        Ok(Self {
            config,
            pipeline,
            session: CalibrationSession::new(),
            mode: OperatingMode::Normal,
            tick,
            input,
            output,
            clock,
            delay,
        })
    }

    /// Probe the converter and print the banner
    ///
    /// A missing converter is reported on the serial port before
    /// [`MonitorError::FrontEndInit`] is returned, even if that report cannot
    /// be written. A failed banner write returns [`MonitorError::Output`];
    /// the monitor is still ready to run.
    pub fn start(&mut self) -> MonitorResult<()> {
        if let Err(error) = self.pipeline.probe() {
            if let Err(_write_error) = report::write_halt(&mut self.output, &error) {
                log_warn!("Could not report missing front end: {}", _write_error);
            }
            return Err(error);
        }

        let shown = report::write_banner(&mut self.output, &self.config)
            .and_then(|()| report::write_header(&mut self.output));

        self.tick.reset(self.clock.now());
        log_info!("Monitor started");
        shown
    }

    /// Run forever
    ///
    /// A missing converter ends in [`halt`](Self::halt). Any other startup
    /// error is logged and the loop runs anyway.
    pub fn run(mut self) -> ! {
        match self.start() {
            Ok(()) => {}
            Err(error @ MonitorError::FrontEndInit { .. }) => self.halt(error),
            Err(_error) => log_warn!("Startup output failed: {}", _error),
        }

        loop {
            if let Err(_error) = self.poll() {
                log_error!("Loop iteration failed: {}", _error);
            }
        }
    }

    /// Safe halted state: re-print the fault periodically, never return
    pub fn halt(&mut self, error: MonitorError) -> ! {
        log_error!("Halting: {}", error);
        loop {
            self.delay.delay_ms(HALT_REPORT_INTERVAL_MS);
            if let Err(_write_error) = report::write_halt(&mut self.output, &error) {
                log_warn!("Halt report not written: {}", _write_error);
            }
        }
    }

    /// One loop iteration: at most one command, at most one tick
    pub fn poll(&mut self) -> MonitorResult<()> {
        match self.input.read_byte() {
            Ok(byte) => match Command::parse(byte) {
                Some(command) => self.handle_command(command)?,
                None => log_debug!("Ignoring byte {}", byte),
            },
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_)) => log_warn!("Serial input error"),
        }

        let now = self.clock.now();
        if self.tick.poll(now) {
            self.on_tick(now)?;
        }

        Ok(())
    }

    /// Dispatch one operator command
    pub fn handle_command(&mut self, command: Command) -> MonitorResult<()> {
        if command.requires_calibrate_mode() && self.mode != OperatingMode::Calibrate {
            log_debug!("Capture ignored outside calibrate mode");
            return Ok(());
        }

        match command {
            Command::Normal => {
                self.set_mode(OperatingMode::Normal);
                report::write_header(&mut self.output)
            }
            Command::Calibrate => {
                self.set_mode(OperatingMode::Calibrate);
                report::write_instructions(&mut self.output, &self.config)
            }
            Command::Info => {
                let diagnostics = self.diagnostics();
                report::write_info(&mut self.output, &self.config, &diagnostics)
            }
            Command::CaptureLow => self.capture(self.config.low_reference_v),
            Command::CaptureHigh => self.capture(self.config.high_reference_v),
            Command::Reset => {
                self.pipeline.calibration_mut().reset();
                self.session.clear();
                log_info!("Calibration reset to identity");
                report::write_reset(&mut self.output)
            }
        }
    }

    fn set_mode(&mut self, mode: OperatingMode) {
        if self.mode != mode {
            log_info!("Mode: {}", mode.as_str());
        }
        self.mode = mode;
    }

    /// Capture one calibration point (blocks for the sampling window)
    fn capture(&mut self, known: f32) -> MonitorResult<()> {
        let plan = self.config.sampling_plan();
        report::write_capture_start(&mut self.output, known, plan.samples)?;

        let result = self
            .session
            .capture_point(known, &mut self.pipeline, &mut self.delay, &plan);

        // The capture window counts as the wait for the next tick
        self.tick.reset(self.clock.now());

        match result {
            Ok(capture) => report::write_capture(&mut self.output, &capture),
            Err(error) => {
                log_warn!("Calibration capture failed: {}", error);
                report::write_capture_error(&mut self.output, &error)
            }
        }
    }

    fn on_tick(&mut self, now: Timestamp) -> MonitorResult<()> {
        let line = match self.mode {
            OperatingMode::Normal => match self.pipeline.acquire() {
                Ok(voltage) => report::normal_line(now, voltage, self.pipeline.filter().filtered()),
                Err(error) => return report::write_fault(&mut self.output, &error),
            },
            OperatingMode::Calibrate => {
                let reading = if self.config.calibration_feeds_filter {
                    self.pipeline.acquire()
                } else {
                    self.pipeline.read_calibrated()
                };
                match reading {
                    Ok(voltage) => report::calibrate_line(voltage),
                    Err(error) => return report::write_fault(&mut self.output, &error),
                }
            }
        }?;

        self.output.write_str(&line)?;
        Ok(())
    }

    /// Snapshot for the diagnostics command
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            coefficients: self.pipeline.calibration().coefficients(),
            mode: self.mode,
            pending: self.session.point1(),
            filter_len: self.pipeline.filter().len(),
            filter_capacity: self.pipeline.filter().capacity(),
        }
    }

    /// Current operating mode
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Acquisition pipeline
    pub fn pipeline(&self) -> &AcquisitionPipeline<A, N> {
        &self.pipeline
    }

    /// Calibration session
    pub fn session(&self) -> &CalibrationSession {
        &self.session
    }

    /// Text output
    pub fn output(&self) -> &W {
        &self.output
    }
}
