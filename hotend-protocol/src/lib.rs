//! RepRap-style command protocol
//!
//! This crate turns the raw byte stream from the host into accepted
//! command lines and formats the replies that go back.
//!
//! # Protocol Overview
//!
//! One command per line:
//! ```text
//! N<line> <G/M code> <letter><number>... *<checksum> ; comment
//! ```
//!
//! - Lines end at `\n`, `\r` or `:` and hold at most 255 payload bytes.
//! - Everything from `;` to the end of the line is dropped.
//! - `N` and `*` are optional but must appear together; the checksum is
//!   the XOR of every byte before the `*`.
//! - Every processed command is acknowledged with a line containing `ok`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod line;
pub mod response;
pub mod sequencer;

pub use command::Command;
pub use line::{Line, LineAssembler, COMMENT_START, MAX_LINE_LEN};
pub use response::{Response, ResponseLine, MAX_RESPONSE_LEN};
pub use sequencer::{checksum, ProtocolError, Sequencer, Verdict};
