// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value writers, mirroring the fourteen typed parsers.

use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::keyword::{KW_FALSE, KW_TRUE};
use crate::value::datetime::{DateTime, Time};
use crate::value::text::escape_text;
use crate::value::{Value, ValueData};

/// Write a typed value in its wire form.
///
/// `force_utc` marks a DATE-TIME whose property context pins it to UTC (a
/// TZID alias such as `Etc/UTC`); those values get the `Z` suffix even when
/// the parsed time was naive.
pub(crate) fn write_value<W: Write>(
    f: &mut Formatter<W>,
    value: &Value,
    force_utc: bool,
) -> io::Result<()> {
    match &value.data {
        // Already in wire form from parsing
        ValueData::Binary(s) | ValueData::CalAddress(s) | ValueData::Uri(s) => {
            write!(f, "{s}")
        }
        ValueData::Boolean(b) => write!(f, "{}", if *b { KW_TRUE } else { KW_FALSE }),
        ValueData::Date(dates) => write_joined(f, dates),
        ValueData::DateTime(values) => {
            for (i, dt) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write_date_time(f, dt, force_utc)?;
            }
            Ok(())
        }
        ValueData::Duration(values) => write_joined(f, values),
        ValueData::Float(values) => write_joined(f, values),
        ValueData::Integer(values) => write_joined(f, values),
        ValueData::Period(values) => write_joined(f, values),
        ValueData::Recur(rule) => write!(f, "{rule}"),
        ValueData::Text(values) => {
            for (i, text) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", escape_text(text))?;
            }
            Ok(())
        }
        ValueData::Time(values) => write_joined(f, values),
        ValueData::UtcOffset(offset) => write!(f, "{offset}"),
    }
}

fn write_joined<W: Write, T: std::fmt::Display>(
    f: &mut Formatter<W>,
    values: &[T],
) -> io::Result<()> {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}

/// `YYYYMMDDTHHMMSS`, with `Z` when the value is UTC by flag or by context.
pub(crate) fn write_date_time<W: Write>(
    f: &mut Formatter<W>,
    dt: &DateTime,
    force_utc: bool,
) -> io::Result<()> {
    let time = Time {
        utc: dt.time.utc || force_utc,
        ..dt.time
    };
    write!(f, "{}T{}", dt.date, time)
}
