//! Command line assembly.
//!
//! Bytes arrive one at a time from the transport. A line ends at:
//! - `\n`, `\r` or `:` (the terminator itself is not stored)
//! - the buffer reaching [`MAX_LINE_LEN`] payload bytes
//!
//! A `;` starts a comment that swallows everything up to the terminator.
//! Lines with no payload (blank lines, comment-only lines) are dropped.

use heapless::Vec;

/// Maximum payload bytes in one command line
pub const MAX_LINE_LEN: usize = 255;

/// Start of a comment
pub const COMMENT_START: u8 = b';';

/// A complete command line, comments removed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    bytes: Vec<u8, MAX_LINE_LEN>,
}

impl Line {
    /// Payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the line holds no payload
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Accumulates transport bytes into [`Line`]s
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    buffer: Vec<u8, MAX_LINE_LEN>,
    in_comment: bool,
}

impl LineAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.in_comment = false;
    }

    /// Bytes accumulated for the current line so far
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte
    ///
    /// Returns `Some(line)` when a non-empty line is complete.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if is_terminator(byte) {
            return self.finish();
        }

        if byte == COMMENT_START {
            self.in_comment = true;
        }
        if self.in_comment {
            return None;
        }

        // Capacity is checked below, so the push always fits
        let _ = self.buffer.push(byte);
        if self.buffer.len() >= MAX_LINE_LEN {
            return self.finish();
        }
        None
    }

    /// Feed several bytes, returning the first completed line
    ///
    /// Bytes after the completed line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (Option<Line>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(line) = self.feed(byte) {
                return (Some(line), i + 1);
            }
        }
        (None, bytes.len())
    }

    fn finish(&mut self) -> Option<Line> {
        self.in_comment = false;
        if self.buffer.is_empty() {
            return None;
        }
        let line = Line {
            bytes: self.buffer.clone(),
        };
        self.buffer.clear();
        Some(line)
    }
}

fn is_terminator(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r' | b':')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn collect(input: &[u8]) -> std::vec::Vec<std::vec::Vec<u8>> {
        let mut assembler = LineAssembler::new();
        input
            .iter()
            .filter_map(|&b| assembler.feed(b))
            .map(|line| line.as_bytes().to_vec())
            .collect()
    }

    #[test]
    fn test_newline_terminates() {
        assert_eq!(collect(b"G1 X10\n"), [b"G1 X10".to_vec()]);
    }

    #[test]
    fn test_all_terminators() {
        let lines = collect(b"G90\rG91:M84\n");
        assert_eq!(lines, [b"G90".to_vec(), b"G91".to_vec(), b"M84".to_vec()]);
    }

    #[test]
    fn test_empty_lines_dropped() {
        assert!(collect(b"\n\r\n::").is_empty());
    }

    #[test]
    fn test_comment_stripped() {
        assert_eq!(collect(b"G1 X5 ; move right\n"), [b"G1 X5 ".to_vec()]);
    }

    #[test]
    fn test_comment_only_line_dropped() {
        assert!(collect(b"; just a comment\n").is_empty());
    }

    #[test]
    fn test_comment_mode_resets_per_line() {
        let lines = collect(b";skip\nG92 X0\n");
        assert_eq!(lines, [b"G92 X0".to_vec()]);
    }

    #[test]
    fn test_cap_dispatches_without_loss() {
        let mut input = std::vec![b'X'; MAX_LINE_LEN + 3];
        input.push(b'\n');
        let lines = collect(&input);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), MAX_LINE_LEN);
        assert_eq!(lines[1].len(), 3);
    }

    #[test]
    fn test_feed_bytes_stops_after_line() {
        let mut assembler = LineAssembler::new();
        let (line, used) = assembler.feed_bytes(b"M105\nM104 S200\n");
        assert_eq!(line.unwrap().as_bytes(), b"M105");
        assert_eq!(used, 5);
    }

    proptest! {
        #[test]
        fn prop_payload_never_lost(input in proptest::collection::vec(
            any::<u8>().prop_filter("no comments", |b| *b != COMMENT_START),
            0..800,
        )) {
            let mut assembler = LineAssembler::new();
            let mut emitted = 0usize;
            for &byte in &input {
                if let Some(line) = assembler.feed(byte) {
                    prop_assert!(line.len() <= MAX_LINE_LEN);
                    prop_assert!(!line.is_empty());
                    emitted += line.len();
                }
            }
            let payload = input.iter().filter(|&&b| !is_terminator(b)).count();
            prop_assert_eq!(emitted + assembler.pending(), payload);
        }
    }

    #[test]
    fn test_reset_discards_partial() {
        let mut assembler = LineAssembler::new();
        assembler.feed(b'G');
        assembler.feed(b'1');
        assert_eq!(assembler.pending(), 2);
        assembler.reset();
        assert_eq!(assembler.feed(b'\n'), None);
    }
}
