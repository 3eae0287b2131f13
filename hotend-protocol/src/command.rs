//! Parameter access on a single command line.
//!
//! Parameters are read lazily: each query scans the line for the first
//! occurrence of the letter, anywhere in the line, and parses the number
//! that follows it. There is no up-front tokenisation, so callers should
//! only query letters that cannot appear elsewhere in the command.

/// View over one command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    bytes: &'a [u8],
}

impl<'a> Command<'a> {
    /// Wrap raw line bytes
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Raw line bytes
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// True if `letter` occurs anywhere in the line
    pub fn has(&self, letter: u8) -> bool {
        self.locate(letter).is_some()
    }

    /// True if `needle` occurs anywhere in the line
    pub fn contains(&self, needle: &str) -> bool {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return true;
        }
        self.bytes.windows(needle.len()).any(|w| w == needle)
    }

    /// Decimal or scientific value following `letter`
    ///
    /// Returns `None` when the letter is absent. A letter with no number
    /// after it reads as `0.0`.
    pub fn value(&self, letter: u8) -> Option<f32> {
        let start = self.locate(letter)?;
        Some(parse_float(&self.bytes[start..]))
    }

    /// Base-10 integer following `letter`
    ///
    /// Parsing stops at the first non-digit, so `G1.5` reads as `1`.
    pub fn value_int(&self, letter: u8) -> Option<i32> {
        let start = self.locate(letter)?;
        Some(parse_int(&self.bytes[start..]))
    }

    /// Index just past the first occurrence of `letter`
    fn locate(&self, letter: u8) -> Option<usize> {
        self.bytes
            .iter()
            .position(|&b| b == letter)
            .map(|i| i + 1)
    }
}

fn skip_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the longest numeric prefix: `[+-]digits[.digits][e[+-]digits]`
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    end
}

fn parse_float(bytes: &[u8]) -> f32 {
    let bytes = skip_whitespace(bytes);
    let len = float_prefix_len(bytes);
    core::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(0.0)
}

fn parse_int(bytes: &[u8]) -> i32 {
    let bytes = skip_whitespace(bytes);
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let magnitude = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, &b| {
            (acc * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1)
        });

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
