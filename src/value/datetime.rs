// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DATE, TIME, DATE-TIME and UTC-OFFSET value types (RFC 5545 §3.3.4, §3.3.12,
//! §3.3.5, §3.3.14).

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::error::{ValueError, codes};
use crate::value::Extra;

/// Date value in the iCalendar `YYYYMMDD` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    /// Year component, 0-9999.
    pub year: i16,
    /// Month component, 1-12.
    pub month: i8,
    /// Day component, 1-31, validated against month/year.
    pub day: i8,
}

impl Date {
    /// Convert to `jiff::civil::Date`.
    ///
    /// # Errors
    ///
    /// Returns the jiff error when the stored fields do not name a real day.
    pub fn to_civil(self) -> Result<jiff::civil::Date, jiff::Error> {
        jiff::civil::Date::new(self.year, self.month, self.day)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Time value in the iCalendar `HHMMSS[Z]` format.
///
/// Second 60 is a positive leap second; it is preserved here and contracted
/// to 59 only when converting to jiff civil time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time {
    /// Hour component, 0-23.
    pub hour: i8,
    /// Minute component, 0-59.
    pub minute: i8,
    /// Second component, 0-60.
    pub second: i8,
    /// Whether a trailing `Z` marked the time as UTC.
    pub utc: bool,
}

impl Time {
    /// Convert to `jiff::civil::Time`, contracting leap second 60 to 59.
    #[must_use]
    pub fn to_civil(self) -> jiff::civil::Time {
        let second = if self.second == 60 { 59 } else { self.second };
        jiff::civil::time(self.hour, self.minute, second, 0)
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let z = if self.utc { "Z" } else { "" };
        write!(f, "{:02}{:02}{:02}{z}", self.hour, self.minute, self.second)
    }
}

/// Combined date and time, `YYYYMMDDTHHMMSS[Z]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime {
    /// Date component.
    pub date: Date,
    /// Time component.
    pub time: Time,
}

impl DateTime {
    /// Convert to `jiff::civil::DateTime`, contracting leap second 60 to 59.
    ///
    /// # Errors
    ///
    /// Returns the jiff error when the date fields do not name a real day.
    pub fn to_civil(self) -> Result<jiff::civil::DateTime, jiff::Error> {
        Ok(self.date.to_civil()?.to_datetime(self.time.to_civil()))
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// UTC offset, `[+-]HHMM(SS)?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset {
    /// Whether the offset is east of UTC.
    pub positive: bool,
    /// Hours, 0-23.
    pub hour: i8,
    /// Minutes, 0-59.
    pub minute: i8,
    /// Seconds, 0-59; absent when the wire form had four digits.
    pub second: Option<i8>,
}

impl Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{sign}{:02}{:02}", self.hour, self.minute)?;
        if let Some(second) = self.second {
            write!(f, "{second:02}")?;
        }
        Ok(())
    }
}

macro_rules! digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(clippy::cast_possible_wrap)]
        fn $fname<'src>() -> impl Parser<'src, &'src str, $ty, Extra<'src>> + Copy {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

digit_select!(d8_0_1 : i8 => { '0', '1' });
digit_select!(d8_0_2 : i8 => { '0', '1', '2' });
digit_select!(d8_0_3 : i8 => { '0', '1', '2', '3' });
digit_select!(d8_0_5 : i8 => { '0', '1', '2', '3', '4', '5' });
digit_select!(d8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
digit_select!(d8_1_2 : i8 => { '1', '2' });
digit_select!(d8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
digit_select!(d16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });

/// ```txt
/// date-value = date-fullyear date-month date-mday
/// ```
pub(crate) fn date<'src>() -> impl Parser<'src, &'src str, Date, Extra<'src>> {
    let year = d16_0_9()
        .then(d16_0_9())
        .then(d16_0_9())
        .then(d16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(d8_1_9()),
        just('1').ignore_then(d8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(d8_1_9()),
        d8_1_2().then(d8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(d8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            if jiff::civil::Date::new(year, month, day).is_err() {
                Err(Rich::custom(span, "no such calendar day"))
            } else {
                Ok(Date { year, month, day })
            }
        })
}

fn time_hour<'src>() -> impl Parser<'src, &'src str, i8, Extra<'src>> + Copy {
    choice((
        d8_0_1().then(d8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(d8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src>() -> impl Parser<'src, &'src str, i8, Extra<'src>> + Copy {
    d8_0_5().then(d8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src>() -> impl Parser<'src, &'src str, i8, Extra<'src>> + Copy {
    // "60" accounts for positive leap seconds
    choice((
        d8_0_5().then(d8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').ignore_then(just('0')).to(60),
    ))
}

/// ```txt
/// time = time-hour time-minute time-second [time-utc]
/// ```
pub(crate) fn time<'src>() -> impl Parser<'src, &'src str, Time, Extra<'src>> {
    time_hour()
        .then(time_minute())
        .then(time_second())
        .then(just('Z').or_not())
        .map(|(((hour, minute), second), utc)| Time {
            hour,
            minute,
            second,
            utc: utc.is_some(),
        })
}

/// ```txt
/// date-time = date "T" time
/// ```
pub(crate) fn date_time<'src>() -> impl Parser<'src, &'src str, DateTime, Extra<'src>> {
    date()
        .then_ignore(just('T'))
        .then(time())
        .map(|(date, time)| DateTime { date, time })
}

/// ```txt
/// utc-offset = ("+" / "-") time-hour time-minute [time-second]
/// ```
///
/// `-0000` has no meaning and is rejected.
pub(crate) fn utc_offset<'src>() -> impl Parser<'src, &'src str, UtcOffset, Extra<'src>> {
    let second = d8_0_5().then(d8_0_9()).map(|(a, b)| 10 * a + b);

    select! { c @ ('+' | '-') => c }
        .then(time_hour())
        .then(time_minute())
        .then(second.or_not())
        .try_map(|(((sign, hour), minute), second), span| {
            let positive = sign != '-';
            if !positive && hour == 0 && minute == 0 && second.unwrap_or(0) == 0 {
                return Err(Rich::custom(span, "-0000 is not a valid offset"));
            }
            Ok(UtcOffset {
                positive,
                hour,
                minute,
                second,
            })
        })
}

fn type_error(code: &'static str, raw: &str, errs: &[Rich<'_, char>]) -> ValueError {
    let detail = errs
        .first()
        .map_or_else(|| "invalid value".to_string(), ToString::to_string);
    ValueError::new(code, format!("{detail} in {raw:?}"))
}

/// Parse a single DATE value.
pub fn parse_date(raw: &str) -> Result<Date, ValueError> {
    date()
        .parse(raw)
        .into_result()
        .map_err(|e| type_error(codes::TYPE_DATE, raw, &e))
}

/// Parse a comma-separated DATE list.
pub fn parse_dates(raw: &str) -> Result<Vec<Date>, ValueError> {
    date()
        .separated_by(just(','))
        .at_least(1)
        .collect()
        .parse(raw)
        .into_result()
        .map_err(|e| type_error(codes::TYPE_DATE, raw, &e))
}

/// Parse a single TIME value.
pub fn parse_time(raw: &str) -> Result<Time, ValueError> {
    time()
        .parse(raw)
        .into_result()
        .map_err(|e| type_error(codes::TYPE_TIME, raw, &e))
}

/// Parse a comma-separated TIME list.
pub fn parse_times(raw: &str) -> Result<Vec<Time>, ValueError> {
    time()
        .separated_by(just(','))
        .at_least(1)
        .collect()
        .parse(raw)
        .into_result()
        .map_err(|e| type_error(codes::TYPE_TIME, raw, &e))
}

/// Parse a single DATE-TIME value.
pub fn parse_date_time(raw: &str) -> Result<DateTime, ValueError> {
    date_time()
        .parse(raw)
        .into_result()
        .map_err(|e| type_error(codes::TYPE_DATE_TIME, raw, &e))
}

/// Parse a comma-separated DATE-TIME list.
pub fn parse_date_times(raw: &str) -> Result<Vec<DateTime>, ValueError> {
    date_time()
        .separated_by(just(','))
        .at_least(1)
        .collect()
        .parse(raw)
        .into_result()
        .map_err(|e| type_error(codes::TYPE_DATE_TIME, raw, &e))
}

/// Parse a UTC-OFFSET value.
pub fn parse_utc_offset(raw: &str) -> Result<UtcOffset, ValueError> {
    utc_offset()
        .parse(raw)
        .into_result()
        .map_err(|e| type_error(codes::TYPE_UTC_OFFSET, raw, &e))
}
