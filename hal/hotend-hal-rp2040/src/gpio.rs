//! GPIO wrappers

use embassy_rp::gpio::{Input, Output};
use hotend_hal::{InputPin, OutputPin};

/// Push-pull output
pub struct RpOutput(Output<'static>);

impl RpOutput {
    pub fn new(pin: Output<'static>) -> Self {
        Self(pin)
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input
pub struct RpInput(Input<'static>);

impl RpInput {
    pub fn new(pin: Input<'static>) -> Self {
        Self(pin)
    }
}

impl InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
