// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! RECUR value type (RFC 5545 §3.3.10): the recurrence-rule model, its
//! parser, range validation, and canonical serialization.
//!
//! The surface syntax is `KEY=VALUE` parts joined by `;`. Shape errors and
//! range errors are kept apart so lenient mode can accept an out-of-range
//! value while still recording the deviation.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::{ValueError, codes};
use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{DateTime, Time, parse_date, parse_date_time};

/// Recurrence frequency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week, using the RFC 5545 two-letter codes on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Weekday {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

impl Weekday {
    /// Convert to the jiff weekday.
    #[must_use]
    pub fn to_jiff(self) -> jiff::civil::Weekday {
        match self {
            Weekday::Sunday => jiff::civil::Weekday::Sunday,
            Weekday::Monday => jiff::civil::Weekday::Monday,
            Weekday::Tuesday => jiff::civil::Weekday::Tuesday,
            Weekday::Wednesday => jiff::civil::Weekday::Wednesday,
            Weekday::Thursday => jiff::civil::Weekday::Thursday,
            Weekday::Friday => jiff::civil::Weekday::Friday,
            Weekday::Saturday => jiff::civil::Weekday::Saturday,
        }
    }
}

/// One BYDAY entry: a weekday with an optional signed ordinal (`2MO`, `-1FR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByDay {
    /// Week-of-period ordinal; `None` means every matching weekday.
    pub ordinal: Option<i32>,
    /// The weekday.
    pub weekday: Weekday,
}

impl Display for ByDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ord) = self.ordinal {
            write!(f, "{ord}")?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// Immutable recurrence descriptor.
///
/// `count` and `until` are never both set; `until_is_date` records whether
/// UNTIL was given as a bare DATE so serialization can reproduce it.
#[derive(Debug, Clone, PartialEq)]
pub struct RRule {
    /// Recurrence frequency (the only required part).
    pub freq: Frequency,
    /// Interval between periods; 1 unless given.
    pub interval: u32,
    /// Maximum number of occurrences; exclusive with `until`.
    pub count: Option<u32>,
    /// Last instant of the series; exclusive with `count`.
    pub until: Option<DateTime>,
    /// Whether UNTIL was a DATE rather than a DATE-TIME.
    pub until_is_date: bool,
    /// BYSECOND list, 0-60.
    pub by_second: Vec<u8>,
    /// BYMINUTE list, 0-59.
    pub by_minute: Vec<u8>,
    /// BYHOUR list, 0-23.
    pub by_hour: Vec<u8>,
    /// BYDAY list.
    pub by_day: Vec<ByDay>,
    /// BYMONTHDAY list, ±1-31.
    pub by_month_day: Vec<i8>,
    /// BYYEARDAY list, ±1-366.
    pub by_year_day: Vec<i16>,
    /// BYWEEKNO list, ±1-53.
    pub by_week_no: Vec<i8>,
    /// BYMONTH list, 1-12.
    pub by_month: Vec<u8>,
    /// BYSETPOS list, ±1-366.
    pub by_set_pos: Vec<i16>,
    /// Week start for WEEKLY/BYWEEKNO arithmetic; MO unless given.
    pub wkst: Weekday,
}

impl RRule {
    /// A rule with the given frequency and every optional part at its
    /// default.
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            count: None,
            until: None,
            until_is_date: false,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
            wkst: Weekday::Monday,
        }
    }
}

impl FromStr for RRule {
    type Err = ValueError;

    /// Strict-mode parse; lenient callers go through [`parse_rrule`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rrule(s, true).map(|(rule, _)| rule)
    }
}

impl Display for RRule {
    /// Canonical part order: FREQ, INTERVAL (only if ≠1), COUNT, UNTIL,
    /// BYSECOND, BYMINUTE, BYHOUR, BYDAY, BYMONTHDAY, BYYEARDAY, BYWEEKNO,
    /// BYMONTH, BYSETPOS, WKST (only if ≠MO).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;
        if self.interval != 1 {
            write!(f, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }
        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        if let Some(until) = &self.until {
            write!(f, ";{KW_RRULE_UNTIL}=")?;
            if self.until_is_date {
                write!(f, "{}", until.date)?;
            } else {
                write!(f, "{until}")?;
            }
        }
        write_list(f, KW_RRULE_BYSECOND, &self.by_second)?;
        write_list(f, KW_RRULE_BYMINUTE, &self.by_minute)?;
        write_list(f, KW_RRULE_BYHOUR, &self.by_hour)?;
        write_list(f, KW_RRULE_BYDAY, &self.by_day)?;
        write_list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        write_list(f, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        write_list(f, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        write_list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        write_list(f, KW_RRULE_BYSETPOS, &self.by_set_pos)?;
        if self.wkst != Weekday::Monday {
            write!(f, ";{KW_RRULE_WKST}={}", self.wkst)?;
        }
        Ok(())
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, key: &str, list: &[T]) -> fmt::Result {
    if list.is_empty() {
        return Ok(());
    }
    write!(f, ";{key}=")?;
    for (i, item) in list.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn parse_int(s: &str) -> Option<i64> {
    match lexical::parse_partial::<i64, _>(s) {
        Ok((v, n)) if n == s.len() && !s.is_empty() => Some(v),
        _ => None,
    }
}

/// Numeric BY* range description: inclusive magnitude bounds plus whether
/// negative values carry meaning.
struct ByRange {
    key: &'static str,
    min: i64,
    max: i64,
    signed: bool,
}

impl ByRange {
    fn check(&self, v: i64) -> Result<(), String> {
        let ok = if self.signed {
            v != 0 && (self.min..=self.max).contains(&v.abs())
        } else {
            (self.min..=self.max).contains(&v)
        };
        if ok {
            Ok(())
        } else {
            Err(format!("{}={v} outside its valid range", self.key))
        }
    }
}

const BYSECOND_RANGE: ByRange = ByRange { key: KW_RRULE_BYSECOND, min: 0, max: 60, signed: false };
const BYMINUTE_RANGE: ByRange = ByRange { key: KW_RRULE_BYMINUTE, min: 0, max: 59, signed: false };
const BYHOUR_RANGE: ByRange = ByRange { key: KW_RRULE_BYHOUR, min: 0, max: 23, signed: false };
const BYMONTHDAY_RANGE: ByRange = ByRange { key: KW_RRULE_BYMONTHDAY, min: 1, max: 31, signed: true };
const BYYEARDAY_RANGE: ByRange = ByRange { key: KW_RRULE_BYYEARDAY, min: 1, max: 366, signed: true };
const BYWEEKNO_RANGE: ByRange = ByRange { key: KW_RRULE_BYWEEKNO, min: 1, max: 53, signed: true };
const BYMONTH_RANGE: ByRange = ByRange { key: KW_RRULE_BYMONTH, min: 1, max: 12, signed: false };
const BYSETPOS_RANGE: ByRange = ByRange { key: KW_RRULE_BYSETPOS, min: 1, max: 366, signed: true };

/// Shared state while folding parts into the rule.
struct PartsAccumulator {
    rule: RRule,
    seen_freq: bool,
    strict: bool,
    warnings: Vec<ValueError>,
}

impl PartsAccumulator {
    /// Record a recoverable deviation: strict mode escalates it, lenient
    /// mode stores it and lets the caller continue.
    fn deviate(&mut self, code: &'static str, message: String) -> Result<(), ValueError> {
        let err = ValueError::new(code, message);
        if self.strict {
            return Err(err);
        }
        self.warnings.push(err);
        Ok(())
    }

    /// Parse one numeric BY* list, range-checking each element. Shape
    /// failures skip the element; range failures keep it (lenient).
    fn numeric_list<T: TryFrom<i64>>(
        &mut self,
        value: &str,
        range: &ByRange,
    ) -> Result<Vec<T>, ValueError> {
        let mut out = Vec::new();
        for item in value.split(',') {
            let Some(v) = parse_int(item) else {
                self.deviate(
                    codes::RRULE_INVALID_FORMAT,
                    format!("{}: {item:?} is not an integer", range.key),
                )?;
                continue;
            };
            if let Err(msg) = range.check(v) {
                self.deviate(codes::RRULE_BY_OUT_OF_RANGE, msg)?;
            }
            // Out-of-range survivors are kept in lenient mode when they fit
            // the storage width; anything wider is dropped.
            match T::try_from(v) {
                Ok(v) => out.push(v),
                Err(_) => {
                    self.deviate(
                        codes::RRULE_BY_OUT_OF_RANGE,
                        format!("{}={v} does not fit its field", range.key),
                    )?;
                }
            }
        }
        Ok(out)
    }
}

/// Parse a RECUR value.
///
/// Returns the rule plus any lenient-mode warnings. In strict mode the first
/// deviation is returned as the error; unknown keys are a strict failure but
/// are skipped silently in lenient mode, as the original wire format allows
/// extension parts.
pub fn parse_rrule(raw: &str, strict: bool) -> Result<(RRule, Vec<ValueError>), ValueError> {
    let mut acc = PartsAccumulator {
        rule: RRule::new(Frequency::Daily),
        seen_freq: false,
        strict,
        warnings: Vec::new(),
    };

    for part in raw.split(';') {
        let Some((key, value)) = part.split_once('=') else {
            acc.deviate(
                codes::RRULE_INVALID_FORMAT,
                format!("rule part {part:?} is not KEY=VALUE"),
            )?;
            continue;
        };

        match key.to_ascii_uppercase().as_str() {
            KW_RRULE_FREQ => {
                if acc.seen_freq {
                    acc.deviate(
                        codes::RRULE_INVALID_FORMAT,
                        "duplicate FREQ part".to_string(),
                    )?;
                }
                match Frequency::from_str(value) {
                    Ok(freq) => {
                        acc.rule.freq = freq;
                        acc.seen_freq = true;
                    }
                    Err(_) => acc.deviate(
                        codes::RRULE_INVALID_FREQ,
                        format!("unknown frequency {value:?}"),
                    )?,
                }
            }
            KW_RRULE_INTERVAL => {
                match parse_int(value).and_then(|v| u32::try_from(v).ok()) {
                    Some(v) if v >= 1 => acc.rule.interval = v,
                    _ => acc.deviate(
                        codes::RRULE_INVALID_INTERVAL,
                        format!("INTERVAL={value} is not a positive integer"),
                    )?,
                }
            }
            KW_RRULE_COUNT => {
                match parse_int(value).and_then(|v| u32::try_from(v).ok()) {
                    Some(v) if v >= 1 => acc.rule.count = Some(v),
                    _ => acc.deviate(
                        codes::RRULE_INVALID_FORMAT,
                        format!("COUNT={value} is not a positive integer"),
                    )?,
                }
            }
            KW_RRULE_UNTIL => {
                if let Ok(date) = parse_date(value) {
                    acc.rule.until = Some(DateTime {
                        date,
                        time: Time { hour: 0, minute: 0, second: 0, utc: false },
                    });
                    acc.rule.until_is_date = true;
                } else if let Ok(dt) = parse_date_time(value) {
                    acc.rule.until = Some(dt);
                    acc.rule.until_is_date = false;
                } else {
                    acc.deviate(
                        codes::RRULE_INVALID_UNTIL,
                        format!("UNTIL={value} is neither a DATE nor a DATE-TIME"),
                    )?;
                }
            }
            KW_RRULE_BYSECOND => {
                acc.rule.by_second = acc.numeric_list(value, &BYSECOND_RANGE)?;
            }
            KW_RRULE_BYMINUTE => {
                acc.rule.by_minute = acc.numeric_list(value, &BYMINUTE_RANGE)?;
            }
            KW_RRULE_BYHOUR => {
                acc.rule.by_hour = acc.numeric_list(value, &BYHOUR_RANGE)?;
            }
            KW_RRULE_BYMONTHDAY => {
                acc.rule.by_month_day = acc.numeric_list(value, &BYMONTHDAY_RANGE)?;
            }
            KW_RRULE_BYYEARDAY => {
                acc.rule.by_year_day = acc.numeric_list(value, &BYYEARDAY_RANGE)?;
            }
            KW_RRULE_BYWEEKNO => {
                acc.rule.by_week_no = acc.numeric_list(value, &BYWEEKNO_RANGE)?;
            }
            KW_RRULE_BYMONTH => {
                acc.rule.by_month = acc.numeric_list(value, &BYMONTH_RANGE)?;
            }
            KW_RRULE_BYSETPOS => {
                acc.rule.by_set_pos = acc.numeric_list(value, &BYSETPOS_RANGE)?;
            }
            KW_RRULE_BYDAY => {
                let mut list = Vec::new();
                for item in value.split(',') {
                    match parse_by_day(item) {
                        Ok(by_day) => {
                            if by_day.ordinal == Some(0) {
                                acc.deviate(
                                    codes::RRULE_INVALID_BYDAY,
                                    format!("BYDAY item {item:?} has a zero ordinal"),
                                )?;
                            }
                            list.push(by_day);
                        }
                        Err(msg) => acc.deviate(codes::RRULE_INVALID_BYDAY, msg)?,
                    }
                }
                acc.rule.by_day = list;
            }
            KW_RRULE_WKST => match Weekday::from_str(value) {
                Ok(day) => acc.rule.wkst = day,
                Err(_) => acc.deviate(
                    codes::RRULE_INVALID_FORMAT,
                    format!("WKST={value} is not a weekday"),
                )?,
            },
            unknown => {
                if strict {
                    return Err(ValueError::new(
                        codes::RRULE_INVALID_FORMAT,
                        format!("unknown rule part {unknown:?}"),
                    ));
                }
                tracing::debug!(part = unknown, "ignoring unknown recurrence rule part");
            }
        }
    }

    if !acc.seen_freq {
        return Err(ValueError::new(
            codes::RRULE_FREQ_REQUIRED,
            "recurrence rule without FREQ",
        ));
    }

    if acc.rule.count.is_some() && acc.rule.until.is_some() {
        let err = ValueError::new(
            codes::RRULE_UNTIL_COUNT_EXCLUSIVE,
            "COUNT and UNTIL are mutually exclusive",
        );
        if strict {
            return Err(err);
        }
        // keep COUNT, drop UNTIL
        acc.rule.until = None;
        acc.rule.until_is_date = false;
        acc.warnings.push(err);
    }

    Ok((acc.rule, acc.warnings))
}

fn parse_by_day(item: &str) -> Result<ByDay, String> {
    if item.len() < 2 {
        return Err(format!("BYDAY item {item:?} is too short"));
    }
    let split = item.len() - 2;
    let (ordinal, day) = item
        .split_at_checked(split)
        .ok_or_else(|| format!("BYDAY item {item:?} splits inside a character"))?;

    let ordinal = if ordinal.is_empty() {
        None
    } else {
        let v = parse_int(ordinal)
            .ok_or_else(|| format!("BYDAY ordinal in {item:?} is not an integer"))?;
        let v = i32::try_from(v).map_err(|_| format!("BYDAY ordinal in {item:?} is too large"))?;
        Some(v)
    };

    let weekday =
        Weekday::from_str(day).map_err(|_| format!("BYDAY item {item:?} has no weekday"))?;

    Ok(ByDay { ordinal, weekday })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn strict(raw: &str) -> Result<RRule, ValueError> {
        raw.parse()
    }

    fn lenient(raw: &str) -> (RRule, Vec<ValueError>) {
        parse_rrule(raw, false).expect("lenient parse")
    }

    #[test]
    fn parses_weekly_rule_and_reproduces_it() {
        let src = "FREQ=WEEKLY;INTERVAL=2;COUNT=10;BYDAY=MO,WE,FR;WKST=SU";
        let rule = strict(src).unwrap();
        assert_eq!(rule.freq, Frequency::Weekly);
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.count, Some(10));
        assert_eq!(
            rule.by_day,
            [
                ByDay { ordinal: None, weekday: Weekday::Monday },
                ByDay { ordinal: None, weekday: Weekday::Wednesday },
                ByDay { ordinal: None, weekday: Weekday::Friday },
            ]
        );
        assert_eq!(rule.wkst, Weekday::Sunday);
        assert_eq!(rule.to_string(), src);
    }

    #[test]
    fn count_and_until_are_exclusive() {
        let src = "FREQ=DAILY;UNTIL=20261231T235959Z;COUNT=10";
        let err = strict(src).unwrap_err();
        assert_eq!(err.code, "ICAL-RRULE-004");

        // lenient keeps COUNT, drops UNTIL, and records the same code
        let (rule, warnings) = lenient(src);
        assert_eq!(rule.count, Some(10));
        assert_eq!(rule.until, None);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "ICAL-RRULE-004");
    }

    #[test]
    fn freq_is_required() {
        let err = strict("INTERVAL=2;COUNT=3").unwrap_err();
        assert_eq!(err.code, "ICAL-RRULE-002");
        // missing FREQ is unrecoverable in lenient mode too
        assert!(parse_rrule("COUNT=3", false).is_err());
    }

    #[test]
    fn until_date_flag_round_trips() {
        let rule = strict("FREQ=DAILY;UNTIL=20261231").unwrap();
        assert!(rule.until_is_date);
        assert_eq!(rule.to_string(), "FREQ=DAILY;UNTIL=20261231");

        let rule = strict("FREQ=DAILY;UNTIL=20261231T235959Z").unwrap();
        assert!(!rule.until_is_date);
        assert!(rule.until.unwrap().time.utc);
        assert_eq!(rule.to_string(), "FREQ=DAILY;UNTIL=20261231T235959Z");
    }

    #[test]
    fn strict_rejects_out_of_range_by_values_lenient_keeps_them() {
        let err = strict("FREQ=DAILY;BYHOUR=24").unwrap_err();
        assert_eq!(err.code, "ICAL-RRULE-006");

        let (rule, warnings) = lenient("FREQ=DAILY;BYHOUR=24");
        assert_eq!(rule.by_hour, [24]);
        assert_eq!(warnings[0].code, "ICAL-RRULE-006");

        assert!(strict("FREQ=MONTHLY;BYMONTHDAY=0").is_err());
        assert!(strict("FREQ=MONTHLY;BYMONTHDAY=-31").is_ok());
        assert!(strict("FREQ=YEARLY;BYYEARDAY=367").is_err());
        assert!(strict("FREQ=YEARLY;BYWEEKNO=-53").is_ok());
        assert!(strict("FREQ=YEARLY;BYMONTH=13").is_err());
        assert!(strict("FREQ=DAILY;BYSECOND=60").is_ok()); // leap second
        assert!(strict("FREQ=DAILY;BYSETPOS=0").is_err());
    }

    #[test]
    fn zero_byday_ordinal_is_rejected_in_strict_mode() {
        let err = strict("FREQ=MONTHLY;BYDAY=0MO").unwrap_err();
        assert_eq!(err.code, "ICAL-RRULE-007");

        let rule = strict("FREQ=MONTHLY;BYDAY=2MO,-1FR").unwrap();
        assert_eq!(
            rule.by_day,
            [
                ByDay { ordinal: Some(2), weekday: Weekday::Monday },
                ByDay { ordinal: Some(-1), weekday: Weekday::Friday },
            ]
        );
        assert_eq!(rule.to_string(), "FREQ=MONTHLY;BYDAY=2MO,-1FR");
    }

    #[test]
    fn unknown_keys_fail_strict_and_are_skipped_lenient() {
        let err = strict("FREQ=DAILY;X-EXTENSION=1").unwrap_err();
        assert_eq!(err.code, "ICAL-RRULE-001");

        let (rule, warnings) = lenient("FREQ=DAILY;X-EXTENSION=1");
        assert_eq!(rule.freq, Frequency::Daily);
        assert!(warnings.is_empty());
    }

    #[test]
    fn interval_must_be_positive() {
        assert_eq!(
            strict("FREQ=DAILY;INTERVAL=0").unwrap_err().code,
            "ICAL-RRULE-005"
        );
        assert_eq!(
            strict("FREQ=DAILY;INTERVAL=-2").unwrap_err().code,
            "ICAL-RRULE-005"
        );
        // lenient keeps the default and records the deviation
        let (rule, warnings) = lenient("FREQ=DAILY;INTERVAL=0");
        assert_eq!(rule.interval, 1);
        assert_eq!(warnings[0].code, "ICAL-RRULE-005");
    }

    #[test]
    fn canonical_strings_round_trip() {
        let sources = [
            "FREQ=DAILY",
            "FREQ=DAILY;COUNT=10",
            "FREQ=SECONDLY;INTERVAL=30",
            "FREQ=MINUTELY;INTERVAL=15;COUNT=6",
            "FREQ=HOURLY;UNTIL=19970902T170000Z",
            "FREQ=WEEKLY;INTERVAL=2;BYDAY=TU,TH;WKST=SU",
            "FREQ=MONTHLY;BYMONTHDAY=-3",
            "FREQ=YEARLY;INTERVAL=4;BYDAY=TU;BYMONTHDAY=2,3,4,5,6,7,8;BYMONTH=11",
            "FREQ=YEARLY;BYDAY=20MO",
            "FREQ=YEARLY;BYDAY=MO;BYWEEKNO=20",
            "FREQ=MONTHLY;BYDAY=SA;BYMONTHDAY=7,8,9,10,11,12,13",
            "FREQ=MONTHLY;INTERVAL=2;BYDAY=TU",
            "FREQ=DAILY;BYSECOND=0,15,30,45",
            "FREQ=MONTHLY;COUNT=10;BYDAY=1FR",
            "FREQ=YEARLY;UNTIL=20000131;BYDAY=SU,MO,TU,WE,TH,FR,SA;BYMONTH=1",
        ];
        for src in sources {
            let rule = strict(src).unwrap_or_else(|e| panic!("{src}: {e}"));
            assert_eq!(rule.to_string(), src);
        }
    }

    #[test]
    fn part_without_equals_is_a_format_error() {
        assert_eq!(strict("FREQ").unwrap_err().code, "ICAL-RRULE-001");
        assert_eq!(
            strict("FREQ=DAILY;COUNT").unwrap_err().code,
            "ICAL-RRULE-001"
        );
    }
}
