// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property serialization: `NAME(;PARAM=VALUE)*:VALUE` with parameter
//! quoting and RFC 6868 encoding.

use std::io::Write;

use crate::component::{ParamValue, Parameter, Property};
use crate::error::{WriteError, codes};
use crate::formatter::Formatter;
use crate::formatter::value::write_value;
use crate::keyword::{KW_TZID, UTC_TZID_ALIASES};
use crate::syntax::scanner::encode_rfc6868;

/// Write one property line, including the terminating CRLF.
pub(crate) fn write_property<W: Write>(
    f: &mut Formatter<W>,
    property: &Property,
) -> Result<(), WriteError> {
    if !valid_name(&property.name) {
        return Err(WriteError::invalid(
            codes::WRITE_INVALID_PROPERTY_NAME,
            format!("property name {:?} is not a valid token", property.name),
        ));
    }

    write!(f, "{}", property.name)?;
    for parameter in &property.parameters {
        write_parameter(f, parameter)?;
    }
    write!(f, ":")?;
    write_value(f, &property.value, tzid_is_utc(property))?;
    f.writeln()?;
    Ok(())
}

/// A DATE-TIME bound to a UTC alias timezone is written with the `Z` suffix.
fn tzid_is_utc(property: &Property) -> bool {
    property.parameter(KW_TZID).is_some_and(|p| {
        UTC_TZID_ALIASES
            .iter()
            .any(|alias| p.first().eq_ignore_ascii_case(alias))
    })
}

fn write_parameter<W: Write>(
    f: &mut Formatter<W>,
    parameter: &Parameter,
) -> Result<(), WriteError> {
    if !valid_name(&parameter.name) {
        return Err(WriteError::invalid(
            codes::WRITE_INVALID_PARAMETER_NAME,
            format!("parameter name {:?} is not a valid token", parameter.name),
        ));
    }

    write!(f, ";{}=", parameter.name)?;
    for (i, value) in parameter.values.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write_parameter_value(f, value)?;
    }
    Ok(())
}

fn write_parameter_value<W: Write>(
    f: &mut Formatter<W>,
    value: &ParamValue,
) -> Result<(), WriteError> {
    if value.value.contains('\0') {
        return Err(WriteError::invalid(
            codes::WRITE_UNENCODABLE_PARAMETER,
            "parameter value contains NUL",
        ));
    }

    if value.quoted || needs_quoting(&value.value) {
        write!(f, "\"{}\"", encode_rfc6868(&value.value))?;
    } else {
        write!(f, "{}", value.value)?;
    }
    Ok(())
}

/// A parameter value must be quoted when it carries any of
/// `: ; , " SPACE TAB LF CR ^ NUL`.
fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| matches!(c, ':' | ';' | ',' | '"' | ' ' | '\t' | '\n' | '\r' | '^' | '\0'))
}

/// IANA token: letters, digits, hyphen.
fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
