//! Board description

use hotend_hal::{AnalogInput, Clock, OutputPin, UartTx};

use crate::motion::{AxisArray, LINEAR_AXIS_COUNT};
use crate::traits::{ControlLaw, Endstop, HeaterOutput, StepperDriver};

/// Concrete peripheral types of one board
///
/// Implemented by a zero-sized marker type in the firmware and in tests.
pub trait Board {
    type Stepper: StepperDriver;
    type Endstop: Endstop;
    type Thermistor: AnalogInput;
    type Heater: HeaterOutput;
    type Control: ControlLaw;
    type Fan: OutputPin;
    /// ATX power-supply enable; use [`hotend_hal::NoPin`] if not fitted
    type Power: OutputPin;
    type Clock: Clock;
    type Serial: UartTx;
}

/// Initialized peripherals handed to [`Machine::new`](super::Machine::new)
pub struct Peripherals<B: Board> {
    /// Drivers in X, Y, Z, E order
    pub steppers: AxisArray<B::Stepper>,
    /// Min endstops for X, Y, Z
    pub min_endstops: [Option<B::Endstop>; LINEAR_AXIS_COUNT],
    pub thermistor: B::Thermistor,
    pub heater: B::Heater,
    pub control: B::Control,
    pub fan: B::Fan,
    pub power: Option<B::Power>,
    pub clock: B::Clock,
    pub serial: B::Serial,
}
