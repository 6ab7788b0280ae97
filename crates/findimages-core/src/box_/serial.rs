//! Word-box list files
//!
//! OCR front ends hand word boxes over in the Boxa Version 2 text layout:
//!
//! ```text
//!
//! Boxa Version 2
//! Number of boxes = 2
//!   Box[0]: x = 12, y = 30, w = 48, h = 11
//!   Box[1]: x = 70, y = 30, w = 25, h = 11
//! ```
//!
//! Blank lines are skipped anywhere. Box lines must be numbered in order.
//! Degenerate boxes (zero or negative size) are kept as written; the
//! segmenter decides what to do with them.

use std::io::Write;
use std::path::Path;

use crate::box_::{Box, Boxa};
use crate::error::{Error, Result};

const VERSION: i32 = 2;

/// Upper bound on the declared box count, to reject corrupt headers
/// before allocating.
const MAX_BOXES: usize = 10_000_000;

/// Boxes reserved up front; the declared count is not trusted until the
/// box lines are actually read.
const INITIAL_CAPACITY: usize = 4096;

impl Boxa {
    /// Read a word-box file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::DecodeError`] if its contents are malformed.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::read_from_bytes(&data)
    }

    /// Parse a word-box list from memory.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::DecodeError(format!("word boxes are not UTF-8: {e}")))?;
        Parser::new(text).boxa()
    }

    /// Write in the same layout [`read_from_bytes`](Self::read_from_bytes)
    /// accepts.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        writeln!(writer, "\nBoxa Version {VERSION}")?;
        writeln!(writer, "Number of boxes = {}", self.len())?;
        for (i, b) in self.iter().enumerate() {
            writeln!(
                writer,
                "  Box[{i}]: x = {}, y = {}, w = {}, h = {}",
                b.x, b.y, b.w, b.h
            )?;
        }
        Ok(())
    }

    /// Serialize to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

/// Reads non-blank lines, remembering the 1-based line number for errors.
struct Parser<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    line_no: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            line_no: 0,
        }
    }

    fn boxa(mut self) -> Result<Boxa> {
        let version = self.header_value("Boxa Version")?;
        if version != VERSION {
            return Err(self.error(format!("unsupported Boxa version {version}")));
        }
        let count = self.header_value("Number of boxes =")?;
        let count = usize::try_from(count)
            .ok()
            .filter(|&n| n <= MAX_BOXES)
            .ok_or_else(|| self.error(format!("bad box count {count}")))?;

        let mut boxa = Boxa::with_capacity(count.min(INITIAL_CAPACITY));
        for index in 0..count {
            boxa.push(self.box_line(index)?);
        }
        Ok(boxa)
    }

    fn next_line(&mut self) -> Option<&'a str> {
        for (i, line) in self.lines.by_ref() {
            let line = line.trim();
            if !line.is_empty() {
                self.line_no = i + 1;
                return Some(line);
            }
        }
        None
    }

    fn error(&self, msg: String) -> Error {
        Error::DecodeError(format!("line {}: {msg}", self.line_no))
    }

    /// Parse `<label> <int>` from the next line.
    fn header_value(&mut self, label: &str) -> Result<i32> {
        let line = self
            .next_line()
            .ok_or_else(|| self.error(format!("missing '{label}' line")))?;
        let value = line
            .strip_prefix(label)
            .ok_or_else(|| self.error(format!("expected '{label}', got '{line}'")))?;
        value
            .trim()
            .parse()
            .map_err(|_| self.error(format!("bad integer in '{line}'")))
    }

    /// Parse `Box[index]: x = X, y = Y, w = W, h = H` from the next line.
    fn box_line(&mut self, index: usize) -> Result<Box> {
        let line = self
            .next_line()
            .ok_or_else(|| self.error(format!("missing Box[{index}]")))?;
        let fields = line
            .strip_prefix(&format!("Box[{index}]:"))
            .ok_or_else(|| self.error(format!("expected Box[{index}], got '{line}'")))?;

        let mut values = [0i32; 4];
        let mut parts = fields.split(',');
        for (slot, key) in values.iter_mut().zip(["x", "y", "w", "h"]) {
            let part = parts
                .next()
                .ok_or_else(|| self.error(format!("missing field '{key}'")))?;
            let (k, v) = part
                .split_once('=')
                .ok_or_else(|| self.error(format!("bad field '{}'", part.trim())))?;
            if k.trim() != key {
                return Err(self.error(format!("expected field '{key}', got '{}'", k.trim())));
            }
            *slot = v
                .trim()
                .parse()
                .map_err(|_| self.error(format!("bad value for '{key}': '{}'", v.trim())))?;
        }
        if parts.next().is_some() {
            return Err(self.error(format!("extra fields in '{line}'")));
        }

        let [x, y, w, h] = values;
        Ok(Box::new_unchecked(x, y, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_layout() {
        let boxa: Boxa = std::iter::once(Box::new_unchecked(10, 20, 30, 40)).collect();
        let text = String::from_utf8(boxa.write_to_bytes().unwrap()).unwrap();
        assert_eq!(
            text,
            "\nBoxa Version 2\nNumber of boxes = 1\n  Box[0]: x = 10, y = 20, w = 30, h = 40\n"
        );
        assert_eq!(Boxa::read_from_bytes(text.as_bytes()).unwrap(), boxa);
    }

    #[test]
    fn test_degenerate_boxes_kept() {
        let input = b"Boxa Version 2\nNumber of boxes = 2\n\n  Box[0]: x = 10, y = 20, w = -5, h = 30\n  Box[1]: x = 1, y = 2, w = 0, h = 0\n";
        let boxa = Boxa::read_from_bytes(input).unwrap();
        assert_eq!(boxa.len(), 2);
        assert!(boxa.iter().all(|b| b.is_empty()));
    }

    #[test]
    fn test_header_errors() {
        assert!(Boxa::read_from_bytes(b"garbage data").is_err());
        assert!(Boxa::read_from_bytes(b"").is_err());
        assert!(Boxa::read_from_bytes(b"Boxa Version 3\nNumber of boxes = 0\n").is_err());
        assert!(Boxa::read_from_bytes(b"Boxa Version 2\nNumber of boxes = -1\n").is_err());
        assert!(Boxa::read_from_bytes(b"Boxa Version 2\nNumber of boxes = 0\n").unwrap().is_empty());
    }

    #[test]
    fn test_box_line_errors() {
        let cases: [(&[u8], &str); 4] = [
            (
                b"Boxa Version 2\nNumber of boxes = 2\n  Box[0]: x = 1, y = 2, w = 3, h = 4\n",
                "missing Box[1]",
            ),
            (
                b"Boxa Version 2\nNumber of boxes = 1\n  Box[0]: x = 10, y = 20, w = 30, z = 40\n",
                "expected field 'h'",
            ),
            (
                b"Boxa Version 2\nNumber of boxes = 1\n  Box[1]: x = 1, y = 2, w = 3, h = 4\n",
                "expected Box[0]",
            ),
            (
                b"Boxa Version 2\nNumber of boxes = 1\n  Box[0]: x = 1, y = 2, w = 3\n",
                "missing field 'h'",
            ),
        ];
        for (input, expected) in cases {
            let err = Boxa::read_from_bytes(input).unwrap_err().to_string();
            assert!(err.contains(expected), "{err}");
        }
    }

    #[test]
    fn test_error_reports_line() {
        let input = b"\nBoxa Version 2\nNumber of boxes = 1\n  Box[0]: x = 1, y = two, w = 3, h = 4\n";
        let err = Boxa::read_from_bytes(input).unwrap_err().to_string();
        assert!(err.contains("line 4"), "{err}");
    }

    #[test]
    fn test_huge_declared_count_without_boxes() {
        let input = format!("Boxa Version 2\nNumber of boxes = {MAX_BOXES}\n");
        let err = Boxa::read_from_bytes(input.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("missing Box[0]"), "{err}");

        let over = format!("Boxa Version 2\nNumber of boxes = {}\n", MAX_BOXES + 1);
        let err = Boxa::read_from_bytes(over.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("bad box count"), "{err}");
    }

    #[test]
    fn test_count_above_initial_capacity() {
        let count = INITIAL_CAPACITY + 3;
        let mut input = format!("Boxa Version 2\nNumber of boxes = {count}\n");
        for i in 0..count {
            input.push_str(&format!("  Box[{i}]: x = {i}, y = 0, w = 1, h = 1\n"));
        }
        let boxa = Boxa::read_from_bytes(input.as_bytes()).unwrap();
        assert_eq!(boxa.len(), count);
        assert_eq!(boxa.get(count - 1).unwrap().x, (count - 1) as i32);
    }
}
