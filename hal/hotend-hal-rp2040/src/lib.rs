//! RP2040 HAL for the hotend controller firmware
//!
//! Implements the `hotend-hal` capability traits on embassy-rp
//! peripherals:
//!
//! - GPIO outputs and inputs
//! - Blocking ADC channel, rescaled to 16 bits
//! - Serial halves over any `embedded-io` byte stream
//! - Monotonic clock and busy-wait delays from embassy-time

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod time;
pub mod uart;

pub use adc::AdcInput;
pub use gpio::{RpInput, RpOutput};
pub use time::EmbassyClock;
pub use uart::{SerialRx, SerialTx};

// Re-export shared traits from hotend-hal for convenience
pub use hotend_hal::{AnalogInput, Clock, InputPin, OutputPin, UartRx, UartTx};
