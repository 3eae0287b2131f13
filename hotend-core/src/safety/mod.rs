//! Safety supervision
//!
//! Tracks host activity and latches the terminal killed state.

pub mod supervisor;

pub use supervisor::{
    KillReason, MinEndstop, SafetyState, SafetySupervisor, HALT_REPORT_INTERVAL_MS,
};
