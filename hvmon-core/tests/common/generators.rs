//! Simulated analog front end
//!
//! The sensor is handed to the monitor by value, so its knobs live behind
//! `Rc` handles the test keeps a clone of.

use std::{cell::Cell, rc::Rc};

use hvmon_core::{
    constants::{ADC_MAX_CODE, ADC_REF_V, MAX_ADC_V, MAX_VOLTAGE, MIN_VOLTAGE},
    traits::AnalogFrontEnd,
};

/// Raw code the default front end produces for a physical voltage
///
/// Inverse of the default conversion chain, rounded to the nearest code.
pub fn code_for(volts: f32) -> i16 {
    let adc_v = (volts - MIN_VOLTAGE) * MAX_ADC_V / (MAX_VOLTAGE - MIN_VOLTAGE);
    (adc_v * ADC_MAX_CODE / ADC_REF_V).round() as i16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

/// Front end reading a settable level
#[derive(Clone)]
pub struct SimulatedSensor {
    code: Rc<Cell<i16>>,
    pending_faults: Rc<Cell<u32>>,
    reads: Rc<Cell<u32>>,
    present: bool,
}

impl SimulatedSensor {
    /// Sensor sitting at `volts`
    pub fn at(volts: f32) -> Self {
        Self {
            code: Rc::new(Cell::new(code_for(volts))),
            pending_faults: Rc::new(Cell::new(0)),
            reads: Rc::new(Cell::new(0)),
            present: true,
        }
    }

    /// Sensor that fails its startup probe
    pub fn missing() -> Self {
        Self {
            present: false,
            ..Self::at(MIN_VOLTAGE)
        }
    }

    pub fn set_volts(&self, volts: f32) {
        self.code.set(code_for(volts));
    }

    pub fn set_code(&self, code: i16) {
        self.code.set(code);
    }

    /// The next `count` reads fail
    pub fn fail_next(&self, count: u32) {
        self.pending_faults.set(count);
    }

    /// Successful and failed reads so far
    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl AnalogFrontEnd for SimulatedSensor {
    type Error = BusError;

    fn read_raw(&mut self) -> Result<i16, BusError> {
        self.reads.set(self.reads.get() + 1);

        let faults = self.pending_faults.get();
        if faults > 0 {
            self.pending_faults.set(faults - 1);
            return Err(BusError);
        }

        Ok(self.code.get())
    }

    fn probe(&mut self) -> Result<(), BusError> {
        if self.present {
            Ok(())
        } else {
            Err(BusError)
        }
    }
}
