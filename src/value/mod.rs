// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed property values (RFC 5545 §3.3) and the parser registry that
//! dispatches a raw wire string to one of the fourteen value types.

pub mod datetime;
pub mod duration;
pub mod misc;
pub mod numeric;
pub mod period;
pub mod rrule;
pub mod text;

use std::str::FromStr;

use crate::component::Parameter;
use crate::error::{ValueError, codes};
use crate::keyword::{
    KW_ATTACH, KW_ATTENDEE, KW_COMPLETED, KW_CREATED, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE,
    KW_DURATION, KW_ENCODING, KW_ENCODING_BASE64, KW_EXDATE, KW_EXRULE, KW_FREEBUSY,
    KW_LAST_MODIFIED, KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PRIORITY, KW_RDATE, KW_RECURRENCE_ID,
    KW_REFRESH_INTERVAL, KW_REPEAT, KW_RRULE, KW_SEQUENCE, KW_TRIGGER, KW_TZOFFSETFROM,
    KW_TZOFFSETTO, KW_TZURL, KW_URL, KW_VALUE,
};

pub use self::datetime::{Date, DateTime, Time, UtcOffset};
pub use self::duration::Duration;
pub use self::period::Period;
pub use self::rrule::{ByDay, Frequency, RRule, Weekday};

/// Error/extra type shared by the chumsky value grammars.
pub(crate) type Extra<'src> = chumsky::extra::Err<chumsky::error::Rich<'src, char>>;

/// The fourteen RFC 5545 value types.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING-KEBAB-CASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum ValueKind {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
}

impl ValueKind {
    /// The wire name of this type (e.g. `DATE-TIME`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The stable error code of this type's parser.
    #[must_use]
    pub fn error_code(self) -> &'static str {
        match self {
            ValueKind::Binary => codes::TYPE_BINARY,
            ValueKind::Boolean => codes::TYPE_BOOLEAN,
            ValueKind::CalAddress => codes::TYPE_CAL_ADDRESS,
            ValueKind::Date => codes::TYPE_DATE,
            ValueKind::DateTime => codes::TYPE_DATE_TIME,
            ValueKind::Duration => codes::TYPE_DURATION,
            ValueKind::Float => codes::TYPE_FLOAT,
            ValueKind::Integer => codes::TYPE_INTEGER,
            ValueKind::Period => codes::TYPE_PERIOD,
            ValueKind::Recur => codes::TYPE_RECUR,
            ValueKind::Text => codes::TYPE_TEXT,
            ValueKind::Time => codes::TYPE_TIME,
            ValueKind::Uri => codes::TYPE_URI,
            ValueKind::UtcOffset => codes::TYPE_UTC_OFFSET,
        }
    }

    /// Whether a raw wire string parses as this type under strict rules.
    #[must_use]
    pub fn can_parse(self, raw: &str) -> bool {
        parse_typed(self, raw, true).is_ok()
    }
}

/// The typed payload of a property value.
///
/// Types that the RFC allows as comma-separated lists carry a `Vec`; the
/// single-element case is simply a one-element list.
#[derive(Debug, Clone, PartialEq)]
#[expect(missing_docs)]
pub enum ValueData {
    Binary(String),
    Boolean(bool),
    CalAddress(String),
    Date(Vec<Date>),
    DateTime(Vec<DateTime>),
    Duration(Vec<Duration>),
    Float(Vec<f64>),
    Integer(Vec<i64>),
    Period(Vec<Period>),
    Recur(RRule),
    Text(Vec<String>),
    Time(Vec<Time>),
    Uri(String),
    UtcOffset(UtcOffset),
}

impl ValueData {
    /// The kind tag of this payload.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            ValueData::Binary(_) => ValueKind::Binary,
            ValueData::Boolean(_) => ValueKind::Boolean,
            ValueData::CalAddress(_) => ValueKind::CalAddress,
            ValueData::Date(_) => ValueKind::Date,
            ValueData::DateTime(_) => ValueKind::DateTime,
            ValueData::Duration(_) => ValueKind::Duration,
            ValueData::Float(_) => ValueKind::Float,
            ValueData::Integer(_) => ValueKind::Integer,
            ValueData::Period(_) => ValueKind::Period,
            ValueData::Recur(_) => ValueKind::Recur,
            ValueData::Text(_) => ValueKind::Text,
            ValueData::Time(_) => ValueKind::Time,
            ValueData::Uri(_) => ValueKind::Uri,
            ValueData::UtcOffset(_) => ValueKind::UtcOffset,
        }
    }
}

/// A typed property value: declared kind, cached raw wire form, payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// The declared value type (the parser that produced `data`).
    pub kind: ValueKind,
    /// The raw wire form the value was parsed from.
    pub raw: String,
    /// The typed payload.
    pub data: ValueData,
}

impl Value {
    /// A TEXT value, the fallback type of unknown properties.
    #[must_use]
    pub fn text(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let data = ValueData::Text(
            text::parse_texts(&raw).unwrap_or_else(|_| vec![raw.clone()]),
        );
        Self {
            kind: ValueKind::Text,
            raw,
            data,
        }
    }

    /// Parse a raw wire string as the given kind.
    ///
    /// On success the returned warnings carry any lenient-mode acceptances
    /// (hyphenated dates, out-of-range recurrence values, bad base64).
    pub fn parse(
        kind: ValueKind,
        raw: &str,
        strict: bool,
    ) -> Result<(Self, Vec<ValueError>), ValueError> {
        let (data, warnings) = parse_typed_with_warnings(kind, raw, strict)?;
        Ok((
            Self {
                kind,
                raw: raw.to_string(),
                data,
            },
            warnings,
        ))
    }
}

/// Determine the value kind a property's raw value should be parsed as:
/// an explicit `VALUE=` parameter wins, otherwise the per-property default.
///
/// An unrecognized `VALUE=` parameter is an error in strict mode; lenient
/// mode records it and falls back to the default.
pub fn declared_kind(
    property: &str,
    parameters: &[Parameter],
    strict: bool,
) -> Result<(ValueKind, Option<ValueError>), ValueError> {
    let explicit = parameters
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(KW_VALUE));

    if let Some(param) = explicit {
        let name = param.first();
        match ValueKind::from_str(name) {
            Ok(kind) => return Ok((kind, None)),
            Err(_) => {
                let err = ValueError::new(
                    codes::PARSE_INVALID_PARAMETER_FORMAT,
                    format!("unknown VALUE type {name:?}"),
                );
                if strict {
                    return Err(err);
                }
                return Ok((default_kind(property, parameters), Some(err)));
            }
        }
    }

    Ok((default_kind(property, parameters), None))
}

/// The per-property default value type. Unknown properties default to TEXT.
#[must_use]
pub fn default_kind(property: &str, parameters: &[Parameter]) -> ValueKind {
    let upper = property.to_ascii_uppercase();
    match upper.as_str() {
        KW_DTSTART | KW_DTEND | KW_DTSTAMP | KW_DUE | KW_COMPLETED | KW_CREATED
        | KW_LAST_MODIFIED | KW_RECURRENCE_ID | KW_EXDATE | KW_RDATE => ValueKind::DateTime,
        KW_DURATION | KW_TRIGGER | KW_REFRESH_INTERVAL => ValueKind::Duration,
        KW_RRULE | KW_EXRULE => ValueKind::Recur,
        KW_SEQUENCE | KW_PRIORITY | KW_REPEAT | KW_PERCENT_COMPLETE => ValueKind::Integer,
        KW_URL | KW_TZURL => ValueKind::Uri,
        KW_ATTENDEE | KW_ORGANIZER => ValueKind::CalAddress,
        KW_TZOFFSETFROM | KW_TZOFFSETTO => ValueKind::UtcOffset,
        KW_FREEBUSY => ValueKind::Period,
        KW_ATTACH => {
            let base64 = parameters.iter().any(|p| {
                p.name.eq_ignore_ascii_case(KW_ENCODING)
                    && p.first().eq_ignore_ascii_case(KW_ENCODING_BASE64)
            });
            if base64 { ValueKind::Binary } else { ValueKind::Uri }
        }
        _ => ValueKind::Text,
    }
}

/// Parse a raw string as the given kind, discarding lenient-mode warnings.
pub fn parse_typed(kind: ValueKind, raw: &str, strict: bool) -> Result<ValueData, ValueError> {
    parse_typed_with_warnings(kind, raw, strict).map(|(data, _)| data)
}

fn parse_typed_with_warnings(
    kind: ValueKind,
    raw: &str,
    strict: bool,
) -> Result<(ValueData, Vec<ValueError>), ValueError> {
    let mut warnings = Vec::new();

    let data = match kind {
        ValueKind::Binary => match misc::parse_binary(raw, true) {
            Ok(b) => ValueData::Binary(b),
            Err(err) if strict => return Err(err),
            Err(err) => {
                warnings.push(err);
                ValueData::Binary(raw.to_string())
            }
        },
        ValueKind::Boolean => ValueData::Boolean(misc::parse_boolean(raw)?),
        ValueKind::CalAddress => ValueData::CalAddress(misc::parse_cal_address(raw)?),
        ValueKind::Date => match datetime::parse_dates(raw) {
            Ok(dates) => ValueData::Date(dates),
            Err(err) => {
                // Lenient mode tolerates the common hyphenated variant.
                if !strict && raw.contains('-') {
                    let stripped = raw.replace('-', "");
                    if let Ok(dates) = datetime::parse_dates(&stripped) {
                        warnings.push(ValueError::new(
                            codes::TYPE_DATE,
                            format!("hyphenated date {raw:?} accepted"),
                        ));
                        return Ok((ValueData::Date(dates), warnings));
                    }
                }
                return Err(err);
            }
        },
        ValueKind::DateTime => ValueData::DateTime(datetime::parse_date_times(raw)?),
        ValueKind::Duration => ValueData::Duration(duration::parse_durations(raw)?),
        ValueKind::Float => ValueData::Float(numeric::parse_floats(raw)?),
        ValueKind::Integer => ValueData::Integer(numeric::parse_integers(raw)?),
        ValueKind::Period => ValueData::Period(period::parse_periods(raw)?),
        ValueKind::Recur => {
            let (rule, rule_warnings) = rrule::parse_rrule(raw, strict)?;
            warnings.extend(rule_warnings);
            ValueData::Recur(rule)
        }
        ValueKind::Text => ValueData::Text(text::parse_texts(raw)?),
        ValueKind::Time => ValueData::Time(datetime::parse_times(raw)?),
        ValueKind::Uri => ValueData::Uri(misc::parse_uri(raw)?),
        ValueKind::UtcOffset => ValueData::UtcOffset(datetime::parse_utc_offset(raw)?),
    };

    Ok((data, warnings))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn kind_names_use_wire_spelling() {
        assert_eq!(ValueKind::DateTime.as_str(), "DATE-TIME");
        assert_eq!(ValueKind::CalAddress.as_str(), "CAL-ADDRESS");
        assert_eq!(ValueKind::UtcOffset.as_str(), "UTC-OFFSET");
        assert_eq!(ValueKind::Recur.as_str(), "RECUR");
        assert_eq!("date-time".parse::<ValueKind>().unwrap(), ValueKind::DateTime);
        assert!("BOGUS".parse::<ValueKind>().is_err());
    }

    #[test]
    fn defaults_follow_the_property_table() {
        assert_eq!(default_kind("DTSTART", &[]), ValueKind::DateTime);
        assert_eq!(default_kind("dtstart", &[]), ValueKind::DateTime);
        assert_eq!(default_kind("SEQUENCE", &[]), ValueKind::Integer);
        assert_eq!(default_kind("URL", &[]), ValueKind::Uri);
        assert_eq!(default_kind("DURATION", &[]), ValueKind::Duration);
        assert_eq!(default_kind("RRULE", &[]), ValueKind::Recur);
        assert_eq!(default_kind("TZOFFSETTO", &[]), ValueKind::UtcOffset);
        assert_eq!(default_kind("X-UNKNOWN", &[]), ValueKind::Text);
        assert_eq!(default_kind("ATTACH", &[]), ValueKind::Uri);

        let params = [Parameter::new("ENCODING", "BASE64")];
        assert_eq!(default_kind("ATTACH", &params), ValueKind::Binary);
    }

    #[test]
    fn explicit_value_parameter_overrides_default() {
        let params = [Parameter::new("VALUE", "DATE")];
        let (kind, note) = declared_kind("DTSTART", &params, true).unwrap();
        assert_eq!(kind, ValueKind::Date);
        assert!(note.is_none());
    }

    #[test]
    fn unknown_value_parameter_is_strict_error_lenient_fallback() {
        let params = [Parameter::new("VALUE", "GIBBERISH")];
        assert!(declared_kind("DTSTART", &params, true).is_err());

        let (kind, note) = declared_kind("DTSTART", &params, false).unwrap();
        assert_eq!(kind, ValueKind::DateTime);
        assert_eq!(note.unwrap().code, "ICAL-PARSE-005");
    }

    #[test]
    fn lenient_mode_accepts_hyphenated_dates_with_warning() {
        assert!(parse_typed(ValueKind::Date, "2026-02-06", true).is_err());

        let (value, warnings) = Value::parse(ValueKind::Date, "2026-02-06", false).unwrap();
        assert_eq!(
            value.data,
            ValueData::Date(vec![Date { year: 2026, month: 2, day: 6 }])
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "ICAL-TYPE-004");
    }

    #[test]
    fn declared_kind_is_recorded_on_the_value() {
        let (value, _) = Value::parse(ValueKind::Integer, "42", true).unwrap();
        assert_eq!(value.kind, ValueKind::Integer);
        assert_eq!(value.raw, "42");
        assert_eq!(value.data.kind(), ValueKind::Integer);
    }

    #[test]
    fn can_parse_probes_the_grammar() {
        assert!(ValueKind::Date.can_parse("20260206"));
        assert!(!ValueKind::Date.can_parse("2026-02-06"));
        assert!(ValueKind::Duration.can_parse("P1DT2H3M4S"));
        assert!(!ValueKind::Duration.can_parse("P"));
    }
}
