//! Safety supervisor implementation
//!
//! Once killed, the machine stays killed until power-cycled. The kill
//! reason travels up from whatever loop detected it as an `Err`, and the
//! dispatcher performs the actual shutdown.

use crate::motion::Axis;

/// Period of the halted message while killed
pub const HALT_REPORT_INTERVAL_MS: u64 = 5_000;

/// Axis that carries a min endstop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MinEndstop {
    X,
    Y,
    Z,
}

impl MinEndstop {
    /// X, Y, Z order
    pub const ALL: [MinEndstop; 3] = [MinEndstop::X, MinEndstop::Y, MinEndstop::Z];

    /// Motion axis the switch sits on
    pub const fn axis(self) -> Axis {
        match self {
            MinEndstop::X => Axis::X,
            MinEndstop::Y => Axis::Y,
            MinEndstop::Z => Axis::Z,
        }
    }
}

/// Why the machine was killed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KillReason {
    /// No accepted command within the timeout while idle or waiting
    Inactivity,
    /// Inactivity timeout expired during a move
    MoveAborted,
    /// M86 found the min endstop of this axis open
    EndstopNotTriggered(MinEndstop),
}

impl KillReason {
    /// Host-facing description
    pub fn description(&self) -> &'static str {
        match self {
            KillReason::Inactivity => "Inactivity Shutdown",
            KillReason::MoveAborted => "Linear Move Abort",
            KillReason::EndstopNotTriggered(MinEndstop::X) => "Homing X Min Stop Fail",
            KillReason::EndstopNotTriggered(MinEndstop::Y) => "Homing Y Min Stop Fail",
            KillReason::EndstopNotTriggered(MinEndstop::Z) => "Homing Z Min Stop Fail",
        }
    }
}

impl core::fmt::Display for KillReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

/// Supervisor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyState {
    /// Normal operation
    Armed,
    /// Terminal; only a power cycle leaves this state
    Killed(KillReason),
}

/// Inactivity watchdog and kill latch
#[derive(Debug, Clone)]
pub struct SafetySupervisor {
    last_activity_ms: u64,
    max_inactive_ms: u32,
    state: SafetyState,
}

impl SafetySupervisor {
    /// Create an armed supervisor
    ///
    /// A timeout of 0 disables the watchdog.
    pub const fn new(max_inactive_ms: u32) -> Self {
        Self {
            last_activity_ms: 0,
            max_inactive_ms,
            state: SafetyState::Armed,
        }
    }

    /// Restart the inactivity window
    pub fn note_activity(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
    }

    /// Set the inactivity timeout (0 disables)
    pub fn set_max_inactive(&mut self, max_inactive_ms: u32) {
        self.max_inactive_ms = max_inactive_ms;
    }

    /// Current inactivity timeout
    pub fn max_inactive_ms(&self) -> u32 {
        self.max_inactive_ms
    }

    /// Kill with `reason` if the inactivity window has expired
    pub fn check_inactivity(&mut self, now_ms: u64, reason: KillReason) -> Result<(), KillReason> {
        if let SafetyState::Killed(existing) = self.state {
            return Err(existing);
        }
        if self.max_inactive_ms == 0 {
            return Ok(());
        }
        let idle = now_ms.saturating_sub(self.last_activity_ms);
        if idle > u64::from(self.max_inactive_ms) {
            self.kill(reason);
            return Err(reason);
        }
        Ok(())
    }

    /// Latch the killed state; the first reason wins
    pub fn kill(&mut self, reason: KillReason) {
        if self.state == SafetyState::Armed {
            self.state = SafetyState::Killed(reason);
        }
    }

    /// Current state
    pub fn state(&self) -> SafetyState {
        self.state
    }

    /// True once killed
    pub fn is_killed(&self) -> bool {
        matches!(self.state, SafetyState::Killed(_))
    }

    /// Reason for the kill, if killed
    pub fn kill_reason(&self) -> Option<KillReason> {
        match self.state {
            SafetyState::Killed(reason) => Some(reason),
            SafetyState::Armed => None,
        }
    }
}
