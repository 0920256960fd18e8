//! Bounded display text

use core::fmt::{self, Write};

use heapless::String;

use crate::config::TEXT_BUF_SIZE;

/// Formatted text with a fixed capacity of [`TEXT_BUF_SIZE`] bytes.
///
/// Writes past the capacity are dropped at a character boundary and mark
/// the text as truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayText {
    buf: String<TEXT_BUF_SIZE>,
    truncated: bool,
}

impl DisplayText {
    pub const CAPACITY: usize = TEXT_BUF_SIZE;

    pub fn new() -> Self {
        Self::default()
    }

    /// Format into a fresh text.
    pub fn from_fmt(args: fmt::Arguments<'_>) -> Self {
        let mut text = Self::new();
        // Writing never fails, overflow only sets `truncated`
        let _ = text.write_fmt(args);
        text
    }

    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether some of the written text did not fit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Write for DisplayText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        if self.buf.push_str(s).is_ok() {
            return Ok(());
        }
        for c in s.chars() {
            if self.buf.push(c).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for DisplayText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_kept() {
        let text = DisplayText::from_fmt(format_args!("{:02}:{:02}", 7, 5));
        assert_eq!(text.as_str(), "07:05");
        assert!(!text.is_truncated());
    }

    #[test]
    fn overflow_truncates_to_capacity() {
        let mut text = DisplayText::new();
        for _ in 0..100 {
            write!(text, "abcdefg").unwrap();
        }
        assert_eq!(text.len(), DisplayText::CAPACITY);
        assert!(text.is_truncated());
        assert!(text.as_str().chars().all(|c| "abcdefg".contains(c)));
    }

    #[test]
    fn truncation_stops_at_char_boundary() {
        let mut text = DisplayText::new();
        write!(text, "{}", "a".repeat(DisplayText::CAPACITY - 1)).unwrap();
        // Two-byte character does not fit in the last byte
        write!(text, "é").unwrap();
        // Later writes are dropped even if they would fit
        write!(text, "b").unwrap();

        assert_eq!(text.len(), DisplayText::CAPACITY - 1);
        assert!(text.is_truncated());
        assert!(!text.as_str().contains('b'));
    }
}
