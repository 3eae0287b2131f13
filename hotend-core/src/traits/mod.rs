//! Hardware abstraction traits
//!
//! These traits define the interface between the motion core and the
//! driver implementations in `hotend-drivers`.

pub mod heater;
pub mod stepper;

pub use heater::{ControlLaw, HeaterOutput, SensorError};
pub use stepper::{Direction, Endstop, StepperDriver};
