// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! PERIOD value type (RFC 5545 §3.3.9).

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::error::{ValueError, codes};
use crate::value::Extra;
use crate::value::datetime::{DateTime, date_time};
use crate::value::duration::{Duration, duration};

/// Period of time: a start plus either an explicit end or a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// `start/end` form.
    Explicit {
        /// Start of the period.
        start: DateTime,
        /// End of the period.
        end: DateTime,
    },

    /// `start/duration` form.
    Start {
        /// Start of the period.
        start: DateTime,
        /// Length of the period.
        duration: Duration,
    },
}

impl Period {
    /// Start of the period.
    #[must_use]
    pub fn start(&self) -> DateTime {
        match *self {
            Period::Explicit { start, .. } | Period::Start { start, .. } => start,
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Explicit { start, end } => write!(f, "{start}/{end}"),
            Period::Start { start, duration } => write!(f, "{start}/{duration}"),
        }
    }
}

/// ```txt
/// period          = period-explicit / period-start
/// period-explicit = date-time "/" date-time
/// period-start    = date-time "/" dur-value
/// ```
pub(crate) fn period<'src>() -> impl Parser<'src, &'src str, Period, Extra<'src>> {
    let tail = choice((
        date_time().map(PeriodTail::End),
        duration().map(PeriodTail::Length),
    ));

    date_time()
        .then_ignore(just('/'))
        .then(tail)
        .map(|(start, tail)| match tail {
            PeriodTail::End(end) => Period::Explicit { start, end },
            PeriodTail::Length(duration) => Period::Start { start, duration },
        })
}

enum PeriodTail {
    End(DateTime),
    Length(Duration),
}

/// Parse a comma-separated PERIOD list.
pub fn parse_periods(raw: &str) -> Result<Vec<Period>, ValueError> {
    period()
        .separated_by(just(','))
        .at_least(1)
        .collect()
        .parse(raw)
        .into_result()
        .map_err(|errs| {
            let detail = errs
                .first()
                .map_or_else(|| "invalid period".to_string(), ToString::to_string);
            ValueError::new(codes::TYPE_PERIOD, format!("{detail} in {raw:?}"))
        })
}
