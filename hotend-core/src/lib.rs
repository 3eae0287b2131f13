//! Board-agnostic core logic for the hotend controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (stepper, endstop, heater, control law)
//! - Machine configuration and its TOML loader
//! - Motion: modal resolution, move planning, pulse generation
//! - Thermistor translation and heater supervision
//! - Safety supervision (inactivity watchdog, kill latch)
//! - The command dispatcher tying it together

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod machine;
pub mod motion;
pub mod safety;
pub mod thermal;
pub mod traits;

#[cfg(test)]
mod testing;
