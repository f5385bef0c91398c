// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DURATION value type (RFC 5545 §3.3.6).

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::error::{ValueError, codes};
use crate::value::Extra;

/// Duration of time, either in weeks or in days/hours/minutes/seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    /// `P<n>W` form.
    Weeks {
        /// Whether the duration is positive.
        positive: bool,
        /// Number of weeks.
        weeks: u32,
    },

    /// `P<n>DT<n>H<n>M<n>S` form with any subset of components.
    Calendar {
        /// Whether the duration is positive.
        positive: bool,
        /// Days component.
        days: u32,
        /// Hours component.
        hours: u32,
        /// Minutes component.
        minutes: u32,
        /// Seconds component.
        seconds: u32,
    },
}

impl Duration {
    /// Whether every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match *self {
            Duration::Weeks { weeks, .. } => weeks == 0,
            Duration::Calendar {
                days,
                hours,
                minutes,
                seconds,
                ..
            } => days == 0 && hours == 0 && minutes == 0 && seconds == 0,
        }
    }

    /// Total length in seconds, negative for negative durations.
    #[must_use]
    pub fn as_seconds(&self) -> i64 {
        let (positive, seconds) = match *self {
            Duration::Weeks { positive, weeks } => (positive, i64::from(weeks) * 7 * 86_400),
            Duration::Calendar {
                positive,
                days,
                hours,
                minutes,
                seconds,
            } => (
                positive,
                i64::from(days) * 86_400
                    + i64::from(hours) * 3_600
                    + i64::from(minutes) * 60
                    + i64::from(seconds),
            ),
        };
        if positive { seconds } else { -seconds }
    }
}

impl Display for Duration {
    /// Canonical serialization: zero components are omitted and the zero
    /// duration is `PT0S`, never a bare `P`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Duration::Weeks { positive, weeks } => {
                if !positive {
                    write!(f, "-")?;
                }
                write!(f, "P{weeks}W")
            }
            Duration::Calendar {
                positive,
                days,
                hours,
                minutes,
                seconds,
            } => {
                if !positive {
                    write!(f, "-")?;
                }
                write!(f, "P")?;
                if days > 0 {
                    write!(f, "{days}D")?;
                }
                if hours > 0 || minutes > 0 || seconds > 0 {
                    write!(f, "T")?;
                    if hours > 0 {
                        write!(f, "{hours}H")?;
                    }
                    if minutes > 0 {
                        write!(f, "{minutes}M")?;
                    }
                    if seconds > 0 {
                        write!(f, "{seconds}S")?;
                    }
                } else if days == 0 {
                    write!(f, "T0S")?;
                }
                Ok(())
            }
        }
    }
}

/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
pub(crate) fn duration<'src>() -> impl Parser<'src, &'src str, Duration, Extra<'src>> {
    // u32 max is 10 digits
    let int = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10)
        .collect::<String>()
        .try_map(|digits, span| match lexical::parse_partial::<u32, _>(&digits) {
            Ok((v, n)) if n == digits.len() => Ok(v),
            _ => Err(Rich::custom(span, "duration component out of range")),
        });

    let weeks = int.then_ignore(just('W'));

    let second_val = int.then_ignore(just('S'));
    let minute_val = int.then_ignore(just('M'));
    let hour_val = int.then_ignore(just('H'));

    // dur-second
    let second_only = second_val.map(|s| (0, 0, s));

    // dur-minute [dur-second]
    let minute_chain = minute_val
        .then(second_val.or_not())
        .map(|(m, s)| (0, m, s.unwrap_or(0)));

    // dur-hour [dur-minute [dur-second]]
    let hour_chain = hour_val
        .then(minute_val.then(second_val.or_not()).or_not())
        .map(|(h, tail)| match tail {
            Some((m, s)) => (h, m, s.unwrap_or(0)),
            None => (h, 0, 0),
        });

    let time = just('T').ignore_then(choice((hour_chain, minute_chain, second_only)));

    let date = int.then_ignore(just('D')).then(time.or_not());

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| !matches!(sign, Some('-')));
    let prefix = sign.then_ignore(just('P'));

    choice((
        prefix.then(date).map(|(positive, (days, time))| {
            let (hours, minutes, seconds) = time.unwrap_or((0, 0, 0));
            Duration::Calendar {
                positive,
                days,
                hours,
                minutes,
                seconds,
            }
        }),
        prefix
            .then(time)
            .map(|(positive, (hours, minutes, seconds))| Duration::Calendar {
                positive,
                days: 0,
                hours,
                minutes,
                seconds,
            }),
        prefix
            .then(weeks)
            .map(|(positive, weeks)| Duration::Weeks { positive, weeks }),
    ))
}

/// Parse a single DURATION value.
pub fn parse_duration(raw: &str) -> Result<Duration, ValueError> {
    duration().parse(raw).into_result().map_err(|errs| {
        let detail = errs
            .first()
            .map_or_else(|| "invalid duration".to_string(), ToString::to_string);
        ValueError::new(codes::TYPE_DURATION, format!("{detail} in {raw:?}"))
    })
}

/// Parse a comma-separated DURATION list.
pub fn parse_durations(raw: &str) -> Result<Vec<Duration>, ValueError> {
    duration()
        .separated_by(just(','))
        .at_least(1)
        .collect()
        .parse(raw)
        .into_result()
        .map_err(|errs| {
            let detail = errs
                .first()
                .map_or_else(|| "invalid duration".to_string(), ToString::to_string);
            ValueError::new(codes::TYPE_DURATION, format!("{detail} in {raw:?}"))
        })
}
