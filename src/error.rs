// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics: severities, recoverable validation errors, fatal parse and
//! write errors, and the stable error-code registry.

use std::fmt::{self, Display};
use std::io;

/// How serious a recorded deviation is.
///
/// `Warning` is informational, `Error` drops the offending property in
/// lenient mode (and aborts in strict mode), `Fatal` aborts in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    /// Informational; parsing is unaffected.
    Warning,
    /// Recoverable; the property is dropped in lenient mode.
    Error,
    /// Unrecoverable; aborts even in lenient mode.
    Fatal,
}

/// A non-fatal diagnostic accumulated on the [`crate::Parser`] during a run.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Stable error-code tag, one of the [`codes`] constants.
    pub code: &'static str,
    /// Human-readable description of the deviation.
    pub message: String,
    /// Name of the component the deviation was found in.
    pub component: String,
    /// Property name, when the deviation is property-scoped.
    pub property: Option<String>,
    /// The offending raw content line, when available.
    pub line: Option<String>,
    /// 1-based physical line number of the offending line.
    pub line_number: Option<usize>,
    /// Diagnostic severity.
    pub severity: Severity,
}

impl ValidationError {
    /// Create a diagnostic with the given code, message and severity; the
    /// location fields start empty and are filled in via the builder methods.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            code,
            message: message.into(),
            component: String::new(),
            property: None,
            line: None,
            line_number: None,
            severity,
        }
    }

    /// Attach the name of the enclosing component.
    #[must_use]
    pub fn in_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Attach the name of the offending property.
    #[must_use]
    pub fn on_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Attach the offending raw line and its physical line number.
    #[must_use]
    pub fn at_line(mut self, line: impl Into<String>, line_number: usize) -> Self {
        self.line = Some(line.into());
        self.line_number = Some(line_number);
        self
    }

    /// Attach a physical line number without the raw line content.
    #[must_use]
    pub fn at_line_number(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)?;
        if let Some(n) = self.line_number {
            write!(f, " (line {n})")?;
        }
        Ok(())
    }
}

/// Fatal parse failure.
///
/// Raised for the first `Error` in strict mode and for `Fatal` deviations in
/// both modes. Carries the stable code, source location, and a cause chain so
/// callers can tell type errors apart from structural errors.
#[derive(Debug, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ParseError {
    /// Stable error-code tag.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
    /// 1-based physical line number, when known.
    pub line_number: Option<usize>,
    /// The offending raw line, when known.
    pub line: Option<String>,
    /// Underlying cause (e.g. a value-parser failure re-wrapped under a
    /// structural code).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ParseError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            line_number: None,
            line: None,
            source: None,
        }
    }

    pub(crate) fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl From<ValidationError> for ParseError {
    fn from(err: ValidationError) -> Self {
        Self {
            code: err.code,
            message: err.message,
            line_number: err.line_number,
            line: err.line,
            source: None,
        }
    }
}

/// Failure on the writer path.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Underlying I/O failure while emitting the calendar stream.
    #[error("{}: {source}", codes::WRITE_IO)]
    Io {
        /// The I/O error reported by the sink.
        #[from]
        source: io::Error,
    },

    /// The in-memory tree violates a writer invariant.
    #[error("{code}: {message}")]
    Invalid {
        /// Stable error-code tag, one of the `ICAL-WRITE-*` constants.
        code: &'static str,
        /// Human-readable description.
        message: String,
    },
}

impl WriteError {
    pub(crate) fn invalid(code: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            code,
            message: message.into(),
        }
    }
}

/// Failure of a single typed value parser.
///
/// Internal currency between the value registry and the assembler; surfaced
/// either as a lenient-mode [`ValidationError`] or chained under
/// [`codes::PARSE_VALUE`] in strict mode.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ValueError {
    /// Stable `ICAL-TYPE-*` (or `ICAL-RRULE-*`) code.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ValueError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Per-run diagnostic sink implementing the strict/lenient propagation
/// policy: warnings accumulate, errors escalate in strict mode and accumulate
/// otherwise, fatals always escalate.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    pub strict: bool,
    pub entries: Vec<ValidationError>,
}

impl Diagnostics {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            entries: Vec::new(),
        }
    }

    /// Record or escalate one diagnostic according to its severity and mode.
    pub fn report(&mut self, err: ValidationError) -> Result<(), ParseError> {
        match err.severity {
            Severity::Fatal => Err(ParseError::from(err)),
            Severity::Error if self.strict => Err(ParseError::from(err)),
            Severity::Error => {
                tracing::warn!(code = err.code, line = ?err.line_number, "recovered: {}", err.message);
                self.entries.push(err);
                Ok(())
            }
            Severity::Warning => {
                tracing::debug!(code = err.code, line = ?err.line_number, "{}", err.message);
                self.entries.push(err);
                Ok(())
            }
        }
    }

    /// Record a batch, stopping at the first escalation.
    pub fn report_all(
        &mut self,
        errs: impl IntoIterator<Item = ValidationError>,
    ) -> Result<(), ParseError> {
        for err in errs {
            self.report(err)?;
        }
        Ok(())
    }
}

/// The stable error-code registry.
///
/// These tags are part of the wire-level contract: they never change meaning
/// between releases and are safe to match on.
pub mod codes {
    // Structural parse errors
    /// Content line without a `:` separator.
    pub const PARSE_INVALID_PROPERTY_FORMAT: &str = "ICAL-PARSE-001";
    /// Empty or malformed property/component name.
    pub const PARSE_INVALID_PROPERTY_NAME: &str = "ICAL-PARSE-002";
    /// Continuation line with no preceding logical line.
    pub const PARSE_MALFORMED_FOLDING: &str = "ICAL-PARSE-003";
    /// Quoted parameter value missing its closing quote.
    pub const PARSE_UNCLOSED_QUOTED_STRING: &str = "ICAL-PARSE-004";
    /// Parameter name or pair shape outside the grammar.
    pub const PARSE_INVALID_PARAMETER_FORMAT: &str = "ICAL-PARSE-005";
    /// END names a different component than the open one.
    pub const PARSE_MISMATCHED_END: &str = "ICAL-PARSE-006";
    /// Caret escape other than `^n`, `^^`, `^'` (RFC 6868).
    pub const PARSE_INVALID_RFC6868: &str = "ICAL-PARSE-007";
    /// END without a matching BEGIN.
    pub const PARSE_UNMATCHED_END: &str = "ICAL-PARSE-008";
    /// Component still open at end of input.
    pub const PARSE_UNTERMINATED_COMPONENT: &str = "ICAL-PARSE-009";
    /// No VCALENDAR in the input.
    pub const PARSE_MISSING_CALENDAR: &str = "ICAL-PARSE-010";
    /// Wrapper for a value-parser failure (cause chain holds the type code).
    pub const PARSE_VALUE: &str = "ICAL-PARSE-011";
    /// Property line outside any component.
    pub const PARSE_PROPERTY_OUTSIDE_COMPONENT: &str = "ICAL-PARSE-012";

    // Typed value errors, one per value type (alphabetical)
    /// BINARY: not valid base64.
    pub const TYPE_BINARY: &str = "ICAL-TYPE-001";
    /// BOOLEAN: not TRUE/FALSE.
    pub const TYPE_BOOLEAN: &str = "ICAL-TYPE-002";
    /// CAL-ADDRESS: not a URI.
    pub const TYPE_CAL_ADDRESS: &str = "ICAL-TYPE-003";
    /// DATE: not `YYYYMMDD`.
    pub const TYPE_DATE: &str = "ICAL-TYPE-004";
    /// DATE-TIME: not `YYYYMMDDTHHMMSS[Z]`.
    pub const TYPE_DATE_TIME: &str = "ICAL-TYPE-005";
    /// DURATION: not an ISO-8601-style duration.
    pub const TYPE_DURATION: &str = "ICAL-TYPE-006";
    /// FLOAT: not a decimal number.
    pub const TYPE_FLOAT: &str = "ICAL-TYPE-007";
    /// INTEGER: not a signed 64-bit decimal.
    pub const TYPE_INTEGER: &str = "ICAL-TYPE-008";
    /// PERIOD: not `start/end` or `start/duration`.
    pub const TYPE_PERIOD: &str = "ICAL-TYPE-009";
    /// RECUR: recurrence rule outside the grammar.
    pub const TYPE_RECUR: &str = "ICAL-TYPE-010";
    /// TEXT: bad escape or trailing backslash.
    pub const TYPE_TEXT: &str = "ICAL-TYPE-011";
    /// TIME: not `HHMMSS[Z]`.
    pub const TYPE_TIME: &str = "ICAL-TYPE-012";
    /// URI: no scheme or illegal characters.
    pub const TYPE_URI: &str = "ICAL-TYPE-013";
    /// UTC-OFFSET: outside `[+-]HHMM(SS)?` or `-0000`.
    pub const TYPE_UTC_OFFSET: &str = "ICAL-TYPE-014";

    // Recurrence rule errors
    /// Part is not `KEY=VALUE`, or unknown key in strict mode.
    pub const RRULE_INVALID_FORMAT: &str = "ICAL-RRULE-001";
    /// FREQ part missing.
    pub const RRULE_FREQ_REQUIRED: &str = "ICAL-RRULE-002";
    /// FREQ value outside the seven frequencies.
    pub const RRULE_INVALID_FREQ: &str = "ICAL-RRULE-003";
    /// COUNT and UNTIL both present.
    pub const RRULE_UNTIL_COUNT_EXCLUSIVE: &str = "ICAL-RRULE-004";
    /// INTERVAL not a positive integer.
    pub const RRULE_INVALID_INTERVAL: &str = "ICAL-RRULE-005";
    /// BY* numeric outside its RFC range.
    pub const RRULE_BY_OUT_OF_RANGE: &str = "ICAL-RRULE-006";
    /// BYDAY entry malformed or zero ordinal.
    pub const RRULE_INVALID_BYDAY: &str = "ICAL-RRULE-007";
    /// UNTIL not a DATE or DATE-TIME.
    pub const RRULE_INVALID_UNTIL: &str = "ICAL-RRULE-008";

    // Component-level diagnostics
    /// Unknown component name.
    pub const COMP_UNKNOWN: &str = "ICAL-COMP-001";
    /// VCALENDAR missing VERSION.
    pub const COMP_MISSING_VERSION: &str = "ICAL-COMP-002";
    /// VCALENDAR missing PRODID.
    pub const COMP_MISSING_PRODID: &str = "ICAL-COMP-003";
    /// VCALENDAR contains no components.
    pub const COMP_EMPTY_CALENDAR: &str = "ICAL-COMP-004";
    /// Non-whitelisted top-level property dropped.
    pub const COMP_TOP_LEVEL_DROPPED: &str = "ICAL-COMP-005";

    // VEVENT diagnostics
    /// VEVENT missing UID.
    pub const VEVENT_MISSING_UID: &str = "ICAL-VEVENT-001";
    /// VEVENT missing DTSTART.
    pub const VEVENT_MISSING_DTSTART: &str = "ICAL-VEVENT-002";
    /// DTEND earlier than DTSTART.
    pub const VEVENT_END_BEFORE_START: &str = "ICAL-VEVENT-VAL-001";
    /// DTEND and DURATION both present.
    pub const VEVENT_END_DURATION_CONFLICT: &str = "ICAL-VEVENT-VAL-002";
    /// STATUS value not valid for VEVENT.
    pub const VEVENT_INVALID_STATUS: &str = "ICAL-VEVENT-VAL-003";

    // VTIMEZONE diagnostics
    /// VTIMEZONE missing TZID.
    pub const TZ_MISSING_TZID: &str = "ICAL-TZ-001";
    /// VTIMEZONE without STANDARD or DAYLIGHT observances.
    pub const TZ_NO_OBSERVANCES: &str = "ICAL-TZ-002";

    // VALARM diagnostics
    /// VALARM missing ACTION.
    pub const ALARM_MISSING_ACTION: &str = "ICAL-ALARM-001";
    /// VALARM missing TRIGGER.
    pub const ALARM_MISSING_TRIGGER: &str = "ICAL-ALARM-002";
    /// VALARM DURATION without REPEAT (or vice versa).
    pub const ALARM_DURATION_WITHOUT_REPEAT: &str = "ICAL-ALARM-003";
    /// VALARM ACTION value unknown.
    pub const ALARM_INVALID_ACTION: &str = "ICAL-ALARM-004";

    // Writer errors
    /// I/O failure while writing.
    pub const WRITE_IO: &str = "ICAL-WRITE-001";
    /// Calendar has no root component.
    pub const WRITE_EMPTY_CALENDAR: &str = "ICAL-WRITE-002";
    /// Component name not a valid IANA token.
    pub const WRITE_INVALID_COMPONENT_NAME: &str = "ICAL-WRITE-003";
    /// Property name not a valid IANA token.
    pub const WRITE_INVALID_PROPERTY_NAME: &str = "ICAL-WRITE-004";
    /// Parameter name not a valid IANA token.
    pub const WRITE_INVALID_PARAMETER_NAME: &str = "ICAL-WRITE-005";
    /// Parameter value cannot be carried by RFC 6868 (e.g. NUL).
    pub const WRITE_UNENCODABLE_PARAMETER: &str = "ICAL-WRITE-006";
    /// DATE value outside 0000-9999.
    pub const WRITE_INVALID_DATE: &str = "ICAL-WRITE-007";
    /// TIME value outside its field ranges.
    pub const WRITE_INVALID_TIME: &str = "ICAL-WRITE-008";
    /// DURATION with contradictory fields.
    pub const WRITE_INVALID_DURATION: &str = "ICAL-WRITE-009";
    /// UTC-OFFSET outside its field ranges.
    pub const WRITE_INVALID_OFFSET: &str = "ICAL-WRITE-010";
    /// RRULE violating COUNT/UNTIL exclusivity.
    pub const WRITE_INVALID_RRULE: &str = "ICAL-WRITE-011";
    /// Configured folding width too small to make progress.
    pub const WRITE_INVALID_FOLD_WIDTH: &str = "ICAL-WRITE-012";
    /// Emitted stream is not valid UTF-8.
    pub const WRITE_NON_UTF8: &str = "ICAL-WRITE-013";

    // Security violations (always fatal)
    /// Component nesting deeper than `max_depth`.
    pub const SEC_DEPTH_EXCEEDED: &str = "ICAL-SEC-001";
    /// Filesystem path carrying a URI scheme.
    pub const SEC_URI_SCHEME_PATH: &str = "ICAL-SEC-002";
    /// Input containing `<!ENTITY` or `<!DOCTYPE`.
    pub const SEC_SUSPICIOUS_CONTENT: &str = "ICAL-SEC-003";

    // I/O errors
    /// Cannot open the input file.
    pub const IO_OPEN: &str = "ICAL-IO-001";
    /// Read failure or invalid UTF-8 in the input.
    pub const IO_READ: &str = "ICAL-IO-002";
    /// Write failure on the output file.
    pub const IO_WRITE: &str = "ICAL-IO-003";
}
