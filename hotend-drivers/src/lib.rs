//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in hotend-core, written against the pin and analog traits of
//! hotend-hal so they work on any board:
//!
//! - Step/direction/enable stepper drivers (A4988, DRV8825 and friends)
//! - Mechanical and optical endstop switches
//! - GPIO heater output and the threshold control law
//! - Thermistor lookup tables

#![no_std]
#![deny(unsafe_code)]

pub mod endstop;
pub mod heater;
pub mod sensor;
pub mod stepper;

pub use endstop::EndstopSwitch;
pub use heater::{GpioHeater, ThresholdControl};
pub use sensor::THERMISTOR_100K;
pub use stepper::StepDirDriver;
