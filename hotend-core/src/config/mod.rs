//! Machine configuration
//!
//! Calibration, inversion and limits for one machine. The firmware embeds
//! a `machine.toml` and parses it at boot with [`parse_config`].

pub mod toml;
pub mod types;

pub use toml::{parse_config, ConfigError};
pub use types::{AxisConfig, MachineConfig, DEFAULT_BAUD_RATE, DEFAULT_MAX_INACTIVE_MS};
