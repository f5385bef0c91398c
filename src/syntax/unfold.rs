// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line-ending normalization and unfolding (RFC 5545 §3.1).
//!
//! Any mix of CRLF, CR and LF terminators is accepted; a physical line
//! beginning with exactly one SPACE or TAB continues the preceding logical
//! line with that one byte stripped. The stream path reads fixed-size chunks
//! and keeps only a remainder buffer, so a file parse runs in constant
//! memory.

use std::io::Read;

/// One unfolded logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// The unfolded text, terminator stripped.
    pub text: String,
    /// 1-based ordinal of the line's first physical line.
    pub number: usize,
}

/// Events produced by the unfolder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A complete logical line.
    Line(LogicalLine),
    /// A continuation with no preceding logical line to attach to.
    Orphan(LogicalLine),
}

/// Failures below the lexer: I/O and encoding.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Read failure from the underlying source.
    #[error("read failure: {0}")]
    Io(#[from] std::io::Error),

    /// A physical line holding invalid UTF-8.
    #[error("invalid UTF-8 on line {number}")]
    Utf8 {
        /// 1-based physical line number.
        number: usize,
    },
}

const CHUNK_SIZE: usize = 8 * 1024;

/// Chunked reader producing unfolded logical lines with line numbers.
#[derive(Debug)]
pub struct LineStream<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    eof: bool,
    physical: usize,
    pending: Option<(String, usize)>,
    exhausted: bool,
}

impl<R: Read> LineStream<R> {
    /// Wrap a byte source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            eof: false,
            physical: 0,
            pending: None,
            exhausted: false,
        }
    }

    fn fill(&mut self) -> std::io::Result<()> {
        let mut chunk = [0_u8; CHUNK_SIZE];
        let n = self.reader.read(&mut chunk)?;
        if n == 0 {
            self.eof = true;
        } else {
            self.buffer.extend_from_slice(chunk.get(..n).unwrap_or(&chunk));
        }
        Ok(())
    }

    /// Extract the next physical line, reading more chunks as needed. The
    /// terminator (CRLF, CR, or LF) is consumed but not returned.
    fn next_physical(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        loop {
            let mut split = None;
            for (i, &b) in self.buffer.iter().enumerate() {
                if b == b'\n' {
                    split = Some((i, i + 1));
                    break;
                }
                if b == b'\r' {
                    match self.buffer.get(i + 1) {
                        Some(b'\n') => split = Some((i, i + 2)),
                        Some(_) => split = Some((i, i + 1)),
                        // A CR on the buffer edge needs one more byte to
                        // decide whether it heads a CRLF pair.
                        None if self.eof => split = Some((i, i + 1)),
                        None => {}
                    }
                    if split.is_some() {
                        break;
                    }
                }
            }

            if let Some((end, consumed)) = split {
                let line = self.buffer.drain(..consumed).take(end).collect();
                self.physical += 1;
                return Ok(Some(line));
            }

            if self.eof {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let line = std::mem::take(&mut self.buffer);
                self.physical += 1;
                return Ok(Some(line));
            }

            self.fill()?;
        }
    }

    /// Produce the next unfolded event, or `None` at end of input.
    pub fn next_logical(&mut self) -> Result<Option<LineEvent>, StreamError> {
        if self.exhausted {
            return Ok(None);
        }

        loop {
            let Some(bytes) = self.next_physical()? else {
                self.exhausted = true;
                // Flush the trailing accumulator, skipping an empty one.
                return Ok(match self.pending.take() {
                    Some((text, number)) if !text.is_empty() => {
                        Some(LineEvent::Line(LogicalLine { text, number }))
                    }
                    _ => None,
                });
            };

            let number = self.physical;
            let text = String::from_utf8(bytes).map_err(|_| StreamError::Utf8 { number })?;

            if text.starts_with(' ') || text.starts_with('\t') {
                match self.pending.as_mut() {
                    Some((acc, _)) => {
                        acc.push_str(text.get(1..).unwrap_or(""));
                        continue;
                    }
                    None => {
                        return Ok(Some(LineEvent::Orphan(LogicalLine {
                            text: text.get(1..).unwrap_or("").to_string(),
                            number,
                        })));
                    }
                }
            }

            match self.pending.replace((text, number)) {
                // Empty unfolded lines are skipped.
                Some((done, done_number)) if !done.is_empty() => {
                    return Ok(Some(LineEvent::Line(LogicalLine {
                        text: done,
                        number: done_number,
                    })));
                }
                _ => {}
            }
        }
    }
}
