// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parser facade: strict/lenient policy, warning accumulation, the in-memory
//! and streaming entry points, and the pre-parse security checks.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::component::Calendar;
use crate::error::{Diagnostics, ParseError, Severity, ValidationError, codes};
use crate::syntax::tree::Assembler;
use crate::syntax::unfold::{LineEvent, LineStream, StreamError};
use crate::syntax::scanner::scan_line;
use crate::validate;

/// Default component nesting bound.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// RFC 5545 parser.
///
/// A parser instance is single-threaded per-run state: diagnostics accumulate
/// on the instance and are reset at the start of each `parse*` call. Strict
/// mode (the default) raises on the first deviation; lenient mode collects
/// warnings and produces a best-effort tree.
///
/// # Example
///
/// ```
/// use vical::Parser;
///
/// let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\n\
///            BEGIN:VEVENT\r\nUID:1@example.com\r\nDTSTART:20260206T093000Z\r\n\
///            SUMMARY:Planning\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
/// let mut parser = Parser::new();
/// let calendar = parser.parse(src).unwrap();
/// assert_eq!(calendar.version(), Some("2.0"));
/// assert_eq!(calendar.events().count(), 1);
/// ```
#[derive(Debug)]
pub struct Parser {
    strict: bool,
    max_depth: usize,
    diags: Diagnostics,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// A strict parser with the default depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strict: true,
            max_depth: DEFAULT_MAX_DEPTH,
            diags: Diagnostics::new(true),
        }
    }

    /// Switch between strict (fatal on any deviation) and lenient (collect
    /// and continue) modes.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Whether the parser is in strict mode.
    #[must_use]
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Configure the component nesting bound.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);
    }

    /// The configured nesting bound.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Diagnostics accumulated by the most recent run.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationError] {
        &self.diags.entries
    }

    /// Alias of [`Parser::warnings`].
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        self.warnings()
    }

    /// Parse an in-memory iCalendar text.
    ///
    /// # Errors
    ///
    /// The first `Error` in strict mode, or any `Fatal` deviation (depth
    /// overflow, security violation, no calendar data) in either mode.
    pub fn parse(&mut self, input: &str) -> Result<Calendar, ParseError> {
        tracing::debug!(bytes = input.len(), strict = self.strict, "parsing calendar text");
        self.diags = Diagnostics::new(self.strict);
        check_suspicious(input)?;
        self.run(LineStream::new(input.as_bytes()), false)
    }

    /// Parse an iCalendar file, reading in fixed-size chunks.
    ///
    /// # Errors
    ///
    /// As [`Parser::parse`], plus `ICAL-SEC-002` for paths carrying a URI
    /// scheme and `ICAL-IO-*` for open/read/encoding failures.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<Calendar, ParseError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), strict = self.strict, "parsing calendar file");
        self.diags = Diagnostics::new(self.strict);
        check_path(path)?;

        let file = File::open(path).map_err(|e| {
            ParseError::new(codes::IO_OPEN, format!("cannot open {}", path.display()))
                .with_source(e)
        })?;
        self.run(LineStream::new(file), true)
    }

    fn run<R: Read>(
        &mut self,
        mut stream: LineStream<R>,
        check_lines: bool,
    ) -> Result<Calendar, ParseError> {
        let mut assembler = Assembler::new(self.max_depth);

        loop {
            let event = stream.next_logical().map_err(|e| match e {
                StreamError::Io(io) => {
                    ParseError::new(codes::IO_READ, "read failure").with_source(io)
                }
                StreamError::Utf8 { number } => {
                    let mut err =
                        ParseError::new(codes::IO_READ, format!("invalid UTF-8 on line {number}"));
                    err.line_number = Some(number);
                    err
                }
            })?;

            let Some(event) = event else { break };

            let line = match event {
                LineEvent::Orphan(orphan) => {
                    self.diags.report(
                        ValidationError::new(
                            codes::PARSE_MALFORMED_FOLDING,
                            "continuation line with no preceding content line",
                            Severity::Error,
                        )
                        .at_line(orphan.text, orphan.number),
                    )?;
                    continue;
                }
                LineEvent::Line(line) => line,
            };

            // The streaming path cannot pre-scan the whole input, so the
            // content check runs per logical line.
            if check_lines {
                check_suspicious(&line.text)?;
            }

            match scan_line(&line.text, line.number, self.strict) {
                Ok(scanned) => {
                    self.diags.report_all(scanned.warnings)?;
                    assembler.feed(scanned.line, &mut self.diags)?;
                }
                Err(err) => self.diags.report(err)?,
            }
        }

        let root = assembler.finish(&mut self.diags)?;
        validate::validate(&root, &mut self.diags.entries);

        tracing::debug!(
            components = root.components.len(),
            diagnostics = self.diags.entries.len(),
            "parse complete"
        );
        Ok(Calendar::new(root))
    }
}

static URI_SCHEME_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9+.-]*://").unwrap_or_else(|_| unreachable!()));

/// Reject filesystem paths that carry a URI scheme.
fn check_path(path: &Path) -> Result<(), ParseError> {
    let text = path.to_string_lossy();
    if URI_SCHEME_PATH.is_match(&text) {
        return Err(ParseError::new(
            codes::SEC_URI_SCHEME_PATH,
            format!("path {text:?} carries a URI scheme"),
        ));
    }
    Ok(())
}

/// Defense in depth for downstream XML consumers: reject entity and doctype
/// declarations outright.
fn check_suspicious(text: &str) -> Result<(), ParseError> {
    if text.contains("<!ENTITY") || text.contains("<!DOCTYPE") {
        return Err(ParseError::new(
            codes::SEC_SUSPICIOUS_CONTENT,
            "input contains an XML entity or doctype declaration",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MINIMAL: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\n\
                           BEGIN:VEVENT\r\nUID:1@example.com\r\nDTSTART:20260206T093000Z\r\n\
                           END:VEVENT\r\nEND:VCALENDAR\r\n";

    #[test]
    fn parses_minimal_calendar() {
        let mut parser = Parser::new();
        let calendar = parser.parse(MINIMAL).unwrap();
        assert_eq!(calendar.version(), Some("2.0"));
        assert_eq!(calendar.prod_id(), Some("-//Example//EN"));
        assert_eq!(calendar.events().count(), 1);
        assert!(parser.warnings().is_empty());
    }

    #[test]
    fn diagnostics_reset_between_runs() {
        let mut parser = Parser::new();
        parser.set_strict(false);
        parser.parse("BEGIN:VCALENDAR\r\nSUMMARY:nope\r\nEND:VCALENDAR\r\n").unwrap();
        assert!(!parser.warnings().is_empty());

        parser.parse(MINIMAL).unwrap();
        assert!(parser.warnings().is_empty());
    }

    #[test]
    fn orphan_continuation_fails_strict_warns_lenient() {
        let input = " orphan\r\nBEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";

        let mut parser = Parser::new();
        let err = parser.parse(input).unwrap_err();
        assert_eq!(err.code, "ICAL-PARSE-003");

        parser.set_strict(false);
        let calendar = parser.parse(input).unwrap();
        assert_eq!(calendar.version(), Some("2.0"));
        assert!(parser.warnings().iter().any(|w| w.code == "ICAL-PARSE-003"));
    }

    #[test]
    fn suspicious_content_is_fatal_in_both_modes() {
        let input = "BEGIN:VCALENDAR\r\nX-EVIL:<!ENTITY xxe SYSTEM \"file:///etc/passwd\">\r\nEND:VCALENDAR\r\n";
        for strict in [true, false] {
            let mut parser = Parser::new();
            parser.set_strict(strict);
            let err = parser.parse(input).unwrap_err();
            assert_eq!(err.code, "ICAL-SEC-003");
        }
    }

    #[test]
    fn uri_scheme_path_is_rejected() {
        let mut parser = Parser::new();
        let err = parser.parse_file("https://example.com/cal.ics").unwrap_err();
        assert_eq!(err.code, "ICAL-SEC-002");
    }

    #[test]
    fn missing_file_reports_open_failure() {
        let mut parser = Parser::new();
        let err = parser.parse_file("/nonexistent/vical-test.ics").unwrap_err();
        assert_eq!(err.code, "ICAL-IO-001");
    }

    #[test]
    fn empty_input_is_fatal() {
        let mut parser = Parser::new();
        parser.set_strict(false);
        let err = parser.parse("").unwrap_err();
        assert_eq!(err.code, "ICAL-PARSE-010");
    }

    #[test]
    fn folded_lines_carry_their_first_physical_line_number() {
        let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
                     DTSTART:not\r\n -a-date\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
        let mut parser = Parser::new();
        parser.set_strict(false);
        parser.parse(input).unwrap();
        let warning = parser
            .warnings()
            .iter()
            .find(|w| w.code == "ICAL-TYPE-005")
            .expect("date-time warning");
        assert_eq!(warning.line_number, Some(5));
        assert_eq!(warning.property.as_deref(), Some("DTSTART"));
    }

    #[test]
    fn lenient_mode_never_escalates_dates_times_or_summary() {
        let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
                     DTSTART:99999999\r\nSUMMARY:bad\\escape\\x\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
        let mut parser = Parser::new();
        parser.set_strict(false);
        let calendar = parser.parse(input).unwrap();
        let event = calendar.events().next().unwrap();
        assert!(event.property("DTSTART").is_none());
        assert!(event.property("SUMMARY").is_none());
        assert!(parser.warnings().iter().any(|w| w.code == "ICAL-TYPE-005"));
        assert!(parser.warnings().iter().any(|w| w.code == "ICAL-TYPE-011"));
    }
}
