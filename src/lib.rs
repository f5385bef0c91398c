// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! RFC 5545 iCalendar parser, writer, and recurrence engine.
//!
//! The pipeline runs bytes → normalized/unfolded content lines → shallow
//! tokens → typed properties → a structural component tree, and back out
//! through conflict-resolving serialization with octet folding. Strict mode
//! (the default) fails on the first deviation; lenient mode collects
//! warnings under stable `ICAL-*` codes and produces a best-effort tree.
//!
//! ```
//! use vical::{Parser, Writer};
//!
//! let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\n\
//!            BEGIN:VEVENT\r\nUID:1@example.com\r\nDTSTART:20260206T093000Z\r\n\
//!            SUMMARY:Planning\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//!
//! let mut parser = Parser::new();
//! let calendar = parser.parse(src).unwrap();
//! let out = Writer::new().write(&calendar).unwrap();
//! assert_eq!(out, src);
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod component;
pub mod error;
pub mod formatter;
mod keyword;
pub mod parser;
pub mod recurrence;
pub mod syntax;
mod validate;
pub mod value;

pub use crate::component::{Calendar, Component, ParamValue, Parameter, Property};
pub use crate::error::{ParseError, Severity, ValidationError, WriteError, codes};
pub use crate::formatter::{FormatOptions, Formatter, Writer};
pub use crate::parser::{DEFAULT_MAX_DEPTH, Parser};
pub use crate::recurrence::{Occurrences, RecurrenceSet};
pub use crate::value::{
    ByDay, Date, DateTime, Duration, Frequency, Period, RRule, Time, UtcOffset, Value, ValueData,
    ValueKind, Weekday,
};
