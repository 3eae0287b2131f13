//! Temperature sensor tables

pub mod thermistor;

pub use thermistor::{THERMISTOR_100K, THERMISTOR_100K_ENTRIES};
