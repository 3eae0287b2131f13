//! Hotend temperature sensing and regulation

pub mod supervisor;
pub mod table;

pub use supervisor::{HeaterSupervisor, WaitDirection, SAMPLES_PER_READING};
pub use table::ThermalTable;
