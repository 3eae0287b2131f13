//! Command dispatch
//!
//! [`Machine`] owns every peripheral and every piece of state, and turns
//! host bytes into motion, heater and safety actions. The concrete
//! peripheral types come from a [`Board`].

pub mod board;
pub mod dispatcher;
pub mod host;

pub use board::{Board, Peripherals};
pub use dispatcher::{Machine, PROGRESS_INTERVAL_MS, WAIT_POLL_MS};
pub use host::HostLink;
