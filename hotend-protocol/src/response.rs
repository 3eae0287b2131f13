//! Replies sent back to the host.
//!
//! Every reply is a single text line. The host's flow control counts the
//! lines that start with `ok`.

use core::fmt::{self, Write};

use heapless::String;

/// Longest reply line, excluding the terminating newline
pub const MAX_RESPONSE_LEN: usize = 96;

/// Rendered reply line
pub type ResponseLine = String<MAX_RESPONSE_LEN>;

/// A reply to the host
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response<'a> {
    /// Sent once after boot
    Start,
    /// Command processed
    Ok,
    /// Temperature report that also acknowledges the command (`M105`)
    Temperature { celsius: f32 },
    /// Temperature progress while waiting for a heater (`M109`)
    HeatingProgress { celsius: f32 },
    /// Ask the host to resend from `line`
    Resend { line: i32 },
    /// Non-fatal fault notice
    Warning(&'a str),
    /// Periodic report from the halted state
    Halted { reason: &'a str, last_line: i32 },
    /// Diagnostic counter (`G93`)
    Counter { name: &'a str, value: u64 },
}

impl Response<'_> {
    /// Render into a fixed-capacity line
    ///
    /// Output longer than [`MAX_RESPONSE_LEN`] is cut short.
    pub fn render(&self) -> ResponseLine {
        let mut line = ResponseLine::new();
        let _ = write!(Truncating(&mut line), "{}", self);
        line
    }
}

impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Ok => f.write_str("ok"),
            Self::Temperature { celsius } => write!(f, "ok T:{:.1}", celsius),
            Self::HeatingProgress { celsius } => write!(f, "T:{:.1}", celsius),
            Self::Resend { line } => write!(f, "Resend: {}", line),
            Self::Warning(msg) => write!(f, "warning: {}", msg),
            Self::Halted { reason, last_line } => {
                write!(f, "{}, Last Line: {}", reason, last_line)
            }
            Self::Counter { name, value } => write!(f, "{}:{}", name, value),
        }
    }
}

/// Writer that keeps as much as fits instead of failing outright
struct Truncating<'a>(&'a mut ResponseLine);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
