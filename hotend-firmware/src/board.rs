//! BTT SKR Pico wiring
//!
//! | Function       | GPIO |
//! |----------------|------|
//! | Host UART TX   | 0    |
//! | Host UART RX   | 1    |
//! | X STEP/DIR/EN  | 11 / 10 / 12 |
//! | Y STEP/DIR/EN  | 6 / 5 / 7    |
//! | Z STEP/DIR/EN  | 19 / 28 / 2  |
//! | E STEP/DIR/EN  | 14 / 13 / 15 |
//! | X/Y/Z min stop | 4 / 3 / 25   |
//! | Hotend heater  | 23   |
//! | Thermistor TH0 | 27   |
//! | Part fan       | 17   |
//!
//! The board has no PSU control line, so M80/M81 only acknowledge.

use core::marker::PhantomData;

use hotend_core::machine::Board;
use hotend_drivers::{EndstopSwitch, GpioHeater, StepDirDriver, ThresholdControl};
use hotend_hal::{NoPin, UartTx};
use hotend_hal_rp2040::{AdcInput, EmbassyClock, RpInput, RpOutput};

/// Capability set of the SKR Pico, generic over the host link transmitter
pub struct SkrPico<S>(PhantomData<S>);

impl<S: UartTx> Board for SkrPico<S> {
    type Stepper = StepDirDriver<RpOutput>;
    type Endstop = EndstopSwitch<RpInput>;
    type Thermistor = AdcInput;
    type Heater = GpioHeater<RpOutput>;
    type Control = ThresholdControl;
    type Fan = RpOutput;
    type Power = NoPin;
    type Clock = EmbassyClock;
    type Serial = S;
}
