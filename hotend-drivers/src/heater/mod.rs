//! Heater outputs and control laws

pub mod gpio;
pub mod threshold;

pub use gpio::GpioHeater;
pub use threshold::ThresholdControl;
