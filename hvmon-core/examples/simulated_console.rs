//! Simulated Monitor Console
//!
//! Runs the complete monitor on a host, with a simulated front end standing
//! in for the converter and the terminal standing in for the serial port.
//!
//! The simulated divider reads 2% high with a +3 V offset plus a little
//! noise, so a two-point calibration has something to correct.
//!
//! ## Try It
//!
//! ```bash
//! cargo run --example simulated_console
//! ```
//!
//! Then type a command letter and press Enter:
//!
//! - `c` calibrate mode, `1` capture the 400 V point
//! - `+` / `-` move the simulated bus by 50 V (demo only)
//! - `2` capture the 600 V point, `n` back to the table
//! - `i` diagnostics, `r` reset the calibration

use std::{
    cell::Cell,
    io::{self, Read, Write as _},
    rc::Rc,
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
    time::Duration,
};

use hvmon_core::{
    constants::{ADC_MAX_CODE, ADC_REF_V, MAX_ADC_V, MAX_VOLTAGE, MIN_VOLTAGE},
    time::{SystemDelay, SystemTime},
    traits::{AnalogFrontEnd, CommandInput},
    Monitor, MonitorConfig,
};

const GAIN_ERROR: f32 = 1.02;
const OFFSET_ERROR_V: f32 = 3.0;
const NOISE_V: f32 = 0.8;
const STEP_V: f32 = 50.0;

/// High-voltage bus behind a slightly wrong divider
struct SimulatedBus {
    volts: Rc<Cell<f32>>,
    seed: u32,
}

impl SimulatedBus {
    /// Uniform noise in `[-amplitude, amplitude]`
    fn noise(&mut self, amplitude: f32) -> f32 {
        // Linear congruential generator, deterministic across runs
        self.seed = self.seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let unit = ((self.seed >> 16) & 0x7fff) as f32 / 32767.0;
        (unit * 2.0 - 1.0) * amplitude
    }
}

impl AnalogFrontEnd for SimulatedBus {
    type Error = ();

    fn read_raw(&mut self) -> Result<i16, ()> {
        let seen = self.volts.get() * GAIN_ERROR + OFFSET_ERROR_V + self.noise(NOISE_V);
        let adc_v = (seen - MIN_VOLTAGE) * MAX_ADC_V / (MAX_VOLTAGE - MIN_VOLTAGE);
        let code = (adc_v * ADC_MAX_CODE / ADC_REF_V).round();

        Ok(code.clamp(i16::MIN as f32, i16::MAX as f32) as i16)
    }
}

/// Terminal keystrokes, read on a helper thread
///
/// `+` and `-` are consumed here to move the simulated bus; everything else
/// reaches the monitor.
struct Keyboard {
    keys: Receiver<u8>,
    volts: Rc<Cell<f32>>,
}

impl Keyboard {
    fn spawn(volts: Rc<Cell<f32>>) -> Self {
        let (tx, keys) = mpsc::channel();

        thread::spawn(move || {
            for byte in io::stdin().bytes() {
                let Ok(byte) = byte else { break };
                if tx.send(byte).is_err() {
                    break;
                }
            }
        });

        Self { keys, volts }
    }
}

impl CommandInput for Keyboard {
    type Error = ();

    fn read_byte(&mut self) -> nb::Result<u8, ()> {
        match self.keys.try_recv() {
            Ok(b'+') => {
                self.volts.set(self.volts.get() + STEP_V);
                Err(nb::Error::WouldBlock)
            }
            Ok(b'-') => {
                self.volts.set(self.volts.get() - STEP_V);
                Err(nb::Error::WouldBlock)
            }
            Ok(byte) => Ok(byte),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                // Keep the host loop from spinning a core
                thread::sleep(Duration::from_millis(1));
                Err(nb::Error::WouldBlock)
            }
        }
    }
}

/// Stdout as a serial port
struct Console;

impl core::fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut stdout = io::stdout();
        stdout.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)?;
        stdout.flush().map_err(|_| core::fmt::Error)
    }
}

fn main() {
    println!("hvmon simulated console");
    println!("=======================");
    println!("Bus starts at 400 V; '+'/'-' move it by {} V\n", STEP_V);

    let volts = Rc::new(Cell::new(MIN_VOLTAGE));
    let bus = SimulatedBus { volts: Rc::clone(&volts), seed: 42 };
    let keyboard = Keyboard::spawn(volts);

    let monitor: Monitor<_, _, _, _, _> = match Monitor::new(
        MonitorConfig::default(),
        bus,
        keyboard,
        Console,
        SystemTime::new(),
        SystemDelay,
    ) {
        Ok(monitor) => monitor,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    monitor.run()
}
