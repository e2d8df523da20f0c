//! Monitor test rig
//!
//! Clock, keyboard and serial capture are shared handles: the monitor owns
//! one clone, the test drives the other.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt,
    rc::Rc,
};

use hvmon_core::{
    time::Timestamp,
    traits::{CommandInput, Delay, TimeSource},
    Monitor, MonitorConfig, MonitorResult,
};

use super::generators::SimulatedSensor;

/// Manual clock; delays advance it
#[derive(Clone, Default)]
pub struct SharedClock(Rc<Cell<Timestamp>>);

impl SharedClock {
    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl TimeSource for SharedClock {
    fn now(&self) -> Timestamp {
        self.0.get()
    }
}

impl Delay for SharedClock {
    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms as u64);
    }
}

/// Scripted serial input
#[derive(Clone, Default)]
pub struct SharedKeys(Rc<RefCell<VecDeque<u8>>>);

impl SharedKeys {
    pub fn type_str(&self, keys: &str) {
        self.0.borrow_mut().extend(keys.bytes());
    }

    pub fn pending(&self) -> usize {
        self.0.borrow().len()
    }
}

impl CommandInput for SharedKeys {
    type Error = ();

    fn read_byte(&mut self) -> nb::Result<u8, ()> {
        self.0.borrow_mut().pop_front().ok_or(nb::Error::WouldBlock)
    }
}

/// Captured serial output
#[derive(Clone, Default)]
pub struct SharedOutput {
    text: Rc<RefCell<String>>,
    failures: Rc<Cell<u32>>,
}

impl SharedOutput {
    /// The next `count` writes fail and write nothing
    pub fn fail_next(&self, count: u32) {
        self.failures.set(count);
    }

    /// Everything written since the last [`take`](Self::take)
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.text.borrow_mut())
    }

    /// Lines written since the last take, terminators stripped
    pub fn take_lines(&self) -> Vec<String> {
        self.take()
            .split("\r\n")
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

impl fmt::Write for SharedOutput {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let failures = self.failures.get();
        if failures > 0 {
            self.failures.set(failures - 1);
            return Err(fmt::Error);
        }

        self.text.borrow_mut().push_str(s);
        Ok(())
    }
}

/// Delay that records its calls and panics on the second one
///
/// `Monitor::run` never returns; the panic is how a test gets back out of
/// the halt loop after one full report cycle.
#[derive(Clone, Default)]
pub struct HaltTrap(Rc<RefCell<Vec<u32>>>);

impl HaltTrap {
    pub const MESSAGE: &'static str = "halt loop reached its second delay";

    pub fn delays(&self) -> Vec<u32> {
        self.0.borrow().clone()
    }
}

impl Delay for HaltTrap {
    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(ms);
        if self.0.borrow().len() == 2 {
            panic!("{}", Self::MESSAGE);
        }
    }
}

/// Command input that panics on its first poll
///
/// Reaching it proves the main loop is running.
pub struct StopOnPoll;

impl StopOnPoll {
    pub const MESSAGE: &'static str = "main loop polled for commands";
}

impl CommandInput for StopOnPoll {
    type Error = ();

    fn read_byte(&mut self) -> nb::Result<u8, ()> {
        panic!("{}", Self::MESSAGE);
    }
}

/// Panic message of a `run()` that was stopped by a trap
pub fn stopped_by(run: impl FnOnce()) -> String {
    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(run))
        .expect_err("run() only leaves by panicking");

    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default()
}

pub type TestMonitor = Monitor<SimulatedSensor, SharedKeys, SharedOutput, SharedClock, SharedClock>;

/// A monitor plus handles to everything around it
pub struct Rig {
    pub monitor: TestMonitor,
    pub sensor: SimulatedSensor,
    pub clock: SharedClock,
    pub keys: SharedKeys,
    pub output: SharedOutput,
}

impl Rig {
    pub fn new(config: MonitorConfig, sensor: SimulatedSensor) -> MonitorResult<Self> {
        let clock = SharedClock::default();
        let keys = SharedKeys::default();
        let output = SharedOutput::default();

        let monitor = Monitor::new(
            config,
            sensor.clone(),
            keys.clone(),
            output.clone(),
            clock.clone(),
            clock.clone(),
        )?;

        Ok(Self { monitor, sensor, clock, keys, output })
    }

    /// Started monitor with the default configuration, startup text discarded
    pub fn started(volts: f32) -> Self {
        Self::started_with(MonitorConfig::default(), volts)
    }

    pub fn started_with(config: MonitorConfig, volts: f32) -> Self {
        let mut rig = Self::new(config, SimulatedSensor::at(volts)).expect("valid config");
        rig.monitor.start().expect("sensor present");
        rig.output.take();
        rig
    }

    /// Poll in 10 ms steps for `ms` milliseconds
    pub fn run_for(&mut self, ms: u64) {
        for _ in 0..ms / 10 {
            self.clock.advance(10);
            self.monitor.poll().expect("poll");
        }
    }

    /// Feed keys and poll until all of them are consumed, without advancing time
    pub fn press(&mut self, keys: &str) {
        self.keys.type_str(keys);
        while self.keys.pending() > 0 {
            self.monitor.poll().expect("poll");
        }
    }
}
