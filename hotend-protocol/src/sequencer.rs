//! Line numbering and checksum framing.
//!
//! Applied to every assembled line before it is interpreted:
//! - `N<n>` must be exactly one past the last accepted number, unless the
//!   line carries the `M110` reset. A gap resets the counter to 0 and the
//!   line is dropped after a bare acknowledgement (resync).
//! - A numbered line must carry `*<checksum>`, the XOR of every byte
//!   before the `*`.
//! - A checksum without a line number is rejected.
//! - A line with neither is accepted as-is.

use crate::command::Command;

/// Line-number reset command, exempt from the sequence check
pub const LINE_NUMBER_RESET: &str = "M110";

/// Checksum marker
pub const CHECKSUM_MARKER: u8 = b'*';

/// Line number marker
pub const LINE_NUMBER_MARKER: u8 = b'N';

/// Why a line was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Checksum did not match the line contents
    ChecksumMismatch { expected: i32, computed: u8 },
    /// Numbered line without a checksum
    MissingChecksum,
    /// Checksum without a line number
    MissingLineNumber,
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ChecksumMismatch { expected, computed } => {
                write!(f, "checksum mismatch (got {}, computed {})", expected, computed)
            }
            Self::MissingChecksum => f.write_str("no checksum with line number"),
            Self::MissingLineNumber => f.write_str("no line number with checksum"),
        }
    }
}

/// Outcome of sequencing one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Pass the line on for interpretation
    Accept,
    /// Line number out of sequence: counter reset, acknowledge and drop
    Resync { received: i32 },
    /// Framing error: drop the line
    Reject(ProtocolError),
}

/// XOR of every byte before the checksum marker
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .take_while(|&&b| b != CHECKSUM_MARKER)
        .fold(0u8, |acc, &b| acc ^ b)
}

/// Tracks the last accepted line number
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequencer {
    last_accepted: i32,
}

impl Sequencer {
    /// Create a sequencer expecting line 1 next
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted line number
    pub fn last_accepted(&self) -> i32 {
        self.last_accepted
    }

    /// Line number a host should resend from
    pub fn next_expected(&self) -> i32 {
        self.last_accepted.saturating_add(1)
    }

    /// Validate one line, updating the counter on acceptance
    pub fn check(&mut self, cmd: &Command<'_>) -> Verdict {
        let Some(number) = cmd.value_int(LINE_NUMBER_MARKER) else {
            if cmd.has(CHECKSUM_MARKER) {
                return Verdict::Reject(ProtocolError::MissingLineNumber);
            }
            return Verdict::Accept;
        };

        if number != self.next_expected() && !cmd.contains(LINE_NUMBER_RESET) {
            self.last_accepted = 0;
            return Verdict::Resync { received: number };
        }

        let Some(expected) = cmd.value_int(CHECKSUM_MARKER) else {
            return Verdict::Reject(ProtocolError::MissingChecksum);
        };

        let computed = checksum(cmd.as_bytes());
        if expected != i32::from(computed) {
            return Verdict::Reject(ProtocolError::ChecksumMismatch { expected, computed });
        }

        self.last_accepted = number;
        Verdict::Accept
    }
}
