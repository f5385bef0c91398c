// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar writer path.
//!
//! [`Formatter`] wraps any `io::Write` and folds content lines at the
//! configured octet width, never splitting a UTF-8 codepoint. [`Writer`] is
//! the calendar-level surface: serialize a tree to a string or a file.

mod component;
mod property;
mod value;

use std::io::{self, Write};
use std::path::Path;

use crate::component::Calendar;
use crate::error::{WriteError, codes};

pub(crate) use self::component::write_component;

/// Default fold width in octets.
pub const DEFAULT_FOLD_WIDTH: usize = 75;

/// Smallest workable fold width; below this a single escape or codepoint
/// could never make progress.
const MIN_FOLD_WIDTH: usize = 8;

/// Formatting options.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Maximum content octets per physical line; `None` disables folding.
    pub folding: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(DEFAULT_FOLD_WIDTH),
        }
    }
}

impl FormatOptions {
    /// Set the folding width (`None` disables folding).
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding.map(|w| w.max(MIN_FOLD_WIDTH));
        self
    }
}

/// Streaming formatter: counts content octets per line and inserts
/// CRLF + SPACE folds at the configured width.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    writer: W,
    options: FormatOptions,
    line_length: usize,
}

impl<W: Write> Formatter<W> {
    /// Wrap a sink with the given options.
    #[must_use]
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
        }
    }

    /// Consume the formatter, returning the underlying sink.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Terminate the current content line with CRLF.
    pub(crate) fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        Ok(())
    }

    /// Insert the fold sequence: CRLF plus one SPACE. The continuation space
    /// is not counted against the next segment's width.
    fn insert_fold(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n ")?;
        self.line_length = 0;
        Ok(())
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max) = self.options.folding else {
            self.writer.write_all(buf)?;
            return Ok(buf.len());
        };

        let mut remaining = buf;
        while !remaining.is_empty() {
            let available = max.saturating_sub(self.line_length);
            if available == 0 {
                self.insert_fold()?;
                continue;
            }

            let mut take = available.min(remaining.len());
            take = codepoint_boundary(remaining, take);
            if take == 0 {
                // The next codepoint is wider than the space left on this
                // line. Fold mid-line; at line start, emit it whole.
                if self.line_length > 0 {
                    self.insert_fold()?;
                    continue;
                }
                take = remaining.len().min(4);
                take = codepoint_boundary(remaining, take).max(1);
            }

            let chunk = remaining.get(..take).unwrap_or(remaining);

            // An embedded newline starts a fresh physical line.
            if let Some(pos) = chunk.iter().position(|&b| b == b'\n') {
                let through = remaining.get(..=pos).unwrap_or(chunk);
                self.writer.write_all(through)?;
                self.line_length = 0;
                remaining = remaining.get(pos + 1..).unwrap_or(&[]);
                continue;
            }

            self.writer.write_all(chunk)?;
            self.line_length += take;
            remaining = remaining.get(take..).unwrap_or(&[]);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Largest prefix of `buf` not longer than `max_bytes` that ends on a UTF-8
/// codepoint boundary.
fn codepoint_boundary(buf: &[u8], max_bytes: usize) -> usize {
    if max_bytes >= buf.len() {
        return buf.len();
    }
    let mut pos = max_bytes;
    while pos > 0 && buf.get(pos).is_some_and(|b| b & 0xC0 == 0x80) {
        pos -= 1;
    }
    pos
}

/// RFC 5545 writer.
///
/// # Example
///
/// ```
/// use vical::{Parser, Writer};
///
/// let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\nEND:VCALENDAR\r\n";
/// let calendar = Parser::new().parse(src).unwrap();
/// let text = Writer::new().write(&calendar).unwrap();
/// assert!(text.starts_with("BEGIN:VCALENDAR\r\n"));
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    options: FormatOptions,
}

impl Writer {
    /// A writer folding at the RFC 5545 width of 75 octets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable line folding, with the width to fold at.
    pub fn set_line_folding(&mut self, enabled: bool, max_length: usize) {
        self.options = self
            .options
            .folding(enabled.then_some(max_length));
    }

    /// Serialize a calendar to a CRLF-terminated string.
    ///
    /// # Errors
    ///
    /// `ICAL-WRITE-*` on an invalid tree, `ICAL-WRITE-001` on sink failure.
    pub fn write(&self, calendar: &Calendar) -> Result<String, WriteError> {
        tracing::debug!(components = calendar.root.components.len(), "writing calendar");
        let mut buffer = Vec::new();
        let mut formatter = Formatter::new(&mut buffer, self.options);
        write_component(&mut formatter, &calendar.root)?;
        String::from_utf8(buffer)
            .map_err(|e| WriteError::invalid(codes::WRITE_NON_UTF8, e.to_string()))
    }

    /// Serialize a calendar to a file.
    ///
    /// # Errors
    ///
    /// As [`Writer::write`], plus I/O failures creating or writing the file.
    pub fn write_to_file(
        &self,
        calendar: &Calendar,
        path: impl AsRef<Path>,
    ) -> Result<(), WriteError> {
        let text = self.write(calendar)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
