//! Mock peripherals shared by the unit tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use hotend_hal::{AnalogInput, Clock, OutputPin, UartTx};

use crate::thermal::ThermalTable;
use crate::traits::{ControlLaw, Direction, Endstop, HeaterOutput, StepperDriver};

/// 100k thermistor table at 16-bit scale
pub static TEST_TABLE: ThermalTable = ThermalTable::new(&[
    (64, 841),
    (3456, 255),
    (6848, 209),
    (10240, 184),
    (13632, 166),
    (17024, 153),
    (20416, 142),
    (23808, 132),
    (27200, 124),
    (30592, 116),
    (33984, 108),
    (37376, 101),
    (40768, 93),
    (44160, 86),
    (47552, 78),
    (50944, 70),
    (54336, 61),
    (57728, 50),
    (61120, 34),
    (64512, 3),
]);

/// Simulated time; delays advance it
#[derive(Clone, Default)]
pub struct MockClock {
    now_us: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_us.set(self.now_us.get() + ms * 1000);
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        self.now_us.get()
    }

    fn delay_us(&mut self, us: u32) {
        self.now_us.set(self.now_us.get() + u64::from(us));
    }
}

#[derive(Debug, Default)]
pub struct MockStepper {
    pub pulses: u32,
    high: bool,
    direction: Direction,
    enabled: bool,
}

impl MockStepper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepperDriver for MockStepper {
    fn step_high(&mut self) {
        assert!(!self.high, "step raised twice");
        self.high = true;
    }

    fn step_low(&mut self) {
        assert!(self.high, "step lowered without pulse");
        self.high = false;
        self.pulses += 1;
    }

    fn set_direction(&mut self, dir: Direction) {
        self.direction = dir;
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Endstop that closes on the n-th read
pub struct MockEndstop {
    reads_left: Cell<Option<u32>>,
}

impl MockEndstop {
    pub fn open() -> Self {
        Self {
            reads_left: Cell::new(None),
        }
    }

    pub fn closed() -> Self {
        Self::after_reads(1)
    }

    pub fn after_reads(n: u32) -> Self {
        Self {
            reads_left: Cell::new(Some(n)),
        }
    }
}

impl Endstop for MockEndstop {
    fn is_triggered(&self) -> bool {
        match self.reads_left.get() {
            None => false,
            Some(0) | Some(1) => {
                self.reads_left.set(Some(0));
                true
            }
            Some(n) => {
                self.reads_left.set(Some(n - 1));
                false
            }
        }
    }
}

/// Analog input with a scripted prefix, then a settable value that
/// drifts by a fixed amount per read
#[derive(Clone)]
pub struct MockAdc {
    script: Rc<RefCell<VecDeque<u16>>>,
    value: Rc<Cell<u16>>,
    drift: i16,
}

impl MockAdc {
    pub fn constant(value: u16) -> Self {
        Self::shared(value)
    }

    pub fn shared(value: u16) -> Self {
        Self {
            script: Rc::default(),
            value: Rc::new(Cell::new(value)),
            drift: 0,
        }
    }

    pub fn sequence(values: &[u16]) -> Self {
        let last = values.last().copied().unwrap_or(0);
        let adc = Self::shared(last);
        adc.script.borrow_mut().extend(values.iter().copied());
        adc
    }

    /// Each read moves the value by `per_read` (negative heats up)
    pub fn drifting(start: u16, per_read: i16) -> Self {
        Self {
            drift: per_read,
            ..Self::shared(start)
        }
    }

    pub fn set(&self, value: u16) {
        self.value.set(value);
    }
}

impl AnalogInput for MockAdc {
    fn read_u16(&mut self) -> u16 {
        if let Some(v) = self.script.borrow_mut().pop_front() {
            return v;
        }
        let v = self.value.get();
        self.value.set(v.saturating_add_signed(self.drift));
        v
    }
}

#[derive(Debug, Default)]
pub struct MockHeater {
    on: bool,
}

impl HeaterOutput for MockHeater {
    fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

/// Heats whenever colder than target
pub struct ThresholdLaw;

impl ControlLaw for ThresholdLaw {
    fn output(&mut self, current_raw: u16, target_raw: u16) -> bool {
        current_raw > target_raw
    }
}

#[derive(Debug, Default)]
pub struct MockPin {
    high: bool,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Captures everything written to the host
#[derive(Clone, Default)]
pub struct MockSerial {
    out: Rc<RefCell<String>>,
}

impl MockSerial {
    /// Drain the complete lines written so far
    pub fn take_lines(&self) -> Vec<String> {
        let mut out = self.out.borrow_mut();
        let lines = out.lines().map(String::from).collect();
        out.clear();
        lines
    }
}

impl UartTx for MockSerial {
    type Error = core::convert::Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.out
            .borrow_mut()
            .push_str(core::str::from_utf8(data).unwrap_or("<bad utf8>"));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
