// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component serialization: BEGIN, conflict-resolved properties, children,
//! END, joined with CRLF.

use std::io::Write;

use crate::component::{Component, resolved_properties};
use crate::error::{WriteError, codes};
use crate::formatter::Formatter;
use crate::formatter::property::write_property;
use crate::keyword::{KW_BEGIN, KW_END};

/// Recursively write a component subtree.
pub(crate) fn write_component<W: Write>(
    f: &mut Formatter<W>,
    component: &Component,
) -> Result<(), WriteError> {
    if component.name.is_empty() {
        return Err(WriteError::invalid(
            codes::WRITE_EMPTY_CALENDAR,
            "component has no name",
        ));
    }
    if !valid_component_name(&component.name) {
        return Err(WriteError::invalid(
            codes::WRITE_INVALID_COMPONENT_NAME,
            format!("component name {:?} is not a valid token", component.name),
        ));
    }

    write!(f, "{KW_BEGIN}:{}", component.name)?;
    f.writeln()?;

    // The same RFC 9073 resolution the assembler applies at END time, so a
    // tree modified in memory still serializes consistently.
    for property in resolved_properties(&component.properties) {
        write_property(f, property)?;
    }

    for child in &component.components {
        write_component(f, child)?;
    }

    write!(f, "{KW_END}:{}", component.name)?;
    f.writeln()?;
    Ok(())
}

fn valid_component_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
