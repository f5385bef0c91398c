// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component assembler: builds the VCALENDAR tree from content lines.
//!
//! A stack of partially-built components runs in parallel with per-level
//! property buffers. BEGIN pushes, END pops and resolves property conflicts,
//! and the stack unwinds by structure rather than by END names, so a
//! mismatched END is survivable. Depth is bounded before each push.

use crate::component::{Component, Property, resolve_description_conflict};
use crate::error::{Diagnostics, ParseError, Severity, ValidationError, codes};
use crate::keyword::{
    KW_BEGIN, KW_CALSCALE, KW_COLOR, KW_DAYLIGHT, KW_END, KW_METHOD, KW_PRODID,
    KW_REFRESH_INTERVAL, KW_STANDARD, KW_VALARM, KW_VCALENDAR, KW_VERSION, KW_VEVENT, KW_VFREEBUSY,
    KW_VJOURNAL, KW_VTIMEZONE, KW_VTODO,
};
use crate::syntax::scanner::ContentLine;
use crate::value::{Value, declared_kind};

/// Properties retained at VCALENDAR scope besides `X-` names.
const TOP_LEVEL_WHITELIST: [&str; 6] = [
    KW_VERSION,
    KW_PRODID,
    KW_CALSCALE,
    KW_METHOD,
    KW_REFRESH_INTERVAL,
    KW_COLOR,
];

const KNOWN_COMPONENTS: [&str; 9] = [
    KW_VCALENDAR,
    KW_VEVENT,
    KW_VTODO,
    KW_VJOURNAL,
    KW_VFREEBUSY,
    KW_VTIMEZONE,
    KW_VALARM,
    KW_STANDARD,
    KW_DAYLIGHT,
];

struct Frame {
    component: Component,
    buffer: Vec<Property>,
}

/// Stack-based assembler consuming [`ContentLine`]s.
pub(crate) struct Assembler {
    max_depth: usize,
    frames: Vec<Frame>,
    saw_calendar_begin: bool,
    root_closed: bool,
}

impl Assembler {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            frames: vec![Frame {
                component: Component::new(KW_VCALENDAR),
                buffer: Vec::new(),
            }],
            saw_calendar_begin: false,
            root_closed: false,
        }
    }

    fn current_component_name(&self) -> String {
        self.frames
            .last()
            .map_or_else(|| KW_VCALENDAR.to_string(), |f| f.component.name.clone())
    }

    /// Feed one content line into the tree.
    pub fn feed(&mut self, line: ContentLine, diags: &mut Diagnostics) -> Result<(), ParseError> {
        if line.name.eq_ignore_ascii_case(KW_BEGIN) {
            self.begin(&line, diags)
        } else if line.name.eq_ignore_ascii_case(KW_END) {
            self.end(&line, diags)
        } else {
            self.property(line, diags)
        }
    }

    fn begin(&mut self, line: &ContentLine, diags: &mut Diagnostics) -> Result<(), ParseError> {
        let name = line.value.trim().to_ascii_uppercase();
        if name.is_empty() {
            return diags.report(
                ValidationError::new(
                    codes::PARSE_INVALID_PROPERTY_NAME,
                    "BEGIN without a component name",
                    Severity::Error,
                )
                .in_component(self.current_component_name())
                .at_line(line.raw.clone(), line.line_number),
            );
        }

        // First BEGIN:VCALENDAR reuses the implicit root.
        if name == KW_VCALENDAR && !self.saw_calendar_begin && self.frames.len() == 1 {
            self.saw_calendar_begin = true;
            return Ok(());
        }

        if !known_component(&name) {
            let err = ValidationError::new(
                codes::COMP_UNKNOWN,
                format!("unknown component {name}"),
                Severity::Error,
            )
            .in_component(self.current_component_name())
            .at_line(line.raw.clone(), line.line_number);
            // Lenient mode keeps it as a generic component.
            diags.report(err)?;
        }

        if self.frames.len() + 1 > self.max_depth {
            return Err(ParseError::from(
                ValidationError::new(
                    codes::SEC_DEPTH_EXCEEDED,
                    format!("component nesting exceeds the depth limit of {}", self.max_depth),
                    Severity::Fatal,
                )
                .at_line(line.raw.clone(), line.line_number),
            ));
        }

        self.frames.push(Frame {
            component: Component::new(name),
            buffer: Vec::new(),
        });
        Ok(())
    }

    fn end(&mut self, line: &ContentLine, diags: &mut Diagnostics) -> Result<(), ParseError> {
        let name = line.value.trim().to_ascii_uppercase();

        if self.frames.len() == 1 {
            // Only the (implicit or explicit) root is open.
            if self.saw_calendar_begin && !self.root_closed && name == KW_VCALENDAR {
                self.root_closed = true;
                return Ok(());
            }
            return diags.report(
                ValidationError::new(
                    codes::PARSE_UNMATCHED_END,
                    format!("END:{name} without a matching BEGIN"),
                    Severity::Error,
                )
                .in_component(KW_VCALENDAR)
                .at_line(line.raw.clone(), line.line_number),
            );
        }

        // The stack unwinds by structure: a mismatched name is recorded but
        // the top frame closes regardless.
        let matches_top = self
            .frames
            .last()
            .is_some_and(|f| f.component.name.eq_ignore_ascii_case(&name));
        if !matches_top {
            diags.report(
                ValidationError::new(
                    codes::PARSE_MISMATCHED_END,
                    format!(
                        "END:{name} does not match open component {}",
                        self.current_component_name(),
                    ),
                    Severity::Warning,
                )
                .in_component(self.current_component_name())
                .at_line(line.raw.clone(), line.line_number),
            )?;
        }

        self.close_top();
        Ok(())
    }

    /// Pop the top frame: run conflict resolution over its buffer, attach the
    /// surviving properties, and insert the component into its parent.
    fn close_top(&mut self) {
        let Some(mut frame) = self.frames.pop() else {
            return;
        };
        resolve_description_conflict(&mut frame.buffer);
        frame.component.properties.extend(frame.buffer);
        if let Some(parent) = self.frames.last_mut() {
            parent.component.components.push(frame.component);
        }
    }

    fn property(&mut self, line: ContentLine, diags: &mut Diagnostics) -> Result<(), ParseError> {
        let at_root = self.frames.len() == 1;

        if at_root && (!self.saw_calendar_begin || self.root_closed) {
            return diags.report(
                ValidationError::new(
                    codes::PARSE_PROPERTY_OUTSIDE_COMPONENT,
                    format!("property {} outside any component", line.name),
                    Severity::Error,
                )
                .on_property(line.name.clone())
                .at_line(line.raw, line.line_number),
            );
        }

        // Top-level filtering: VCALENDAR keeps only the whitelist and X- names.
        if at_root && !top_level_allowed(&line.name) {
            return diags.report(
                ValidationError::new(
                    codes::COMP_TOP_LEVEL_DROPPED,
                    format!("top-level property {} dropped", line.name),
                    Severity::Warning,
                )
                .in_component(KW_VCALENDAR)
                .on_property(line.name.clone())
                .at_line(line.raw, line.line_number),
            );
        }

        let component_name = self.current_component_name();

        let (kind, kind_note) = match declared_kind(&line.name, &line.parameters, diags.strict) {
            Ok(v) => v,
            Err(value_err) => {
                return self.value_failure(&line, value_err, diags);
            }
        };
        if let Some(note) = kind_note {
            diags.report(
                ValidationError::new(note.code, note.message, Severity::Warning)
                    .in_component(component_name.clone())
                    .on_property(line.name.clone())
                    .at_line(line.raw.clone(), line.line_number),
            )?;
        }

        match Value::parse(kind, &line.value, diags.strict) {
            Ok((value, notes)) => {
                diags.report_all(notes.into_iter().map(|n| {
                    ValidationError::new(n.code, n.message, Severity::Warning)
                        .in_component(component_name.clone())
                        .on_property(line.name.clone())
                        .at_line(line.raw.clone(), line.line_number)
                }))?;

                let mut property = Property::new(line.name, line.parameters, value);
                property.line_number = Some(line.line_number);
                if let Some(frame) = self.frames.last_mut() {
                    frame.buffer.push(property);
                }
                Ok(())
            }
            Err(value_err) => self.value_failure(&line, value_err, diags),
        }
    }

    /// A value parser rejected the property. Strict mode re-wraps the failure
    /// under the structural code with the type error chained; lenient mode
    /// records the type code and omits the property.
    fn value_failure(
        &mut self,
        line: &ContentLine,
        value_err: crate::error::ValueError,
        diags: &mut Diagnostics,
    ) -> Result<(), ParseError> {
        if diags.strict {
            let mut err = ParseError::new(
                codes::PARSE_VALUE,
                format!("value of {} rejected: {}", line.name, value_err.message),
            );
            err.line = Some(line.raw.clone());
            err.line_number = Some(line.line_number);
            return Err(err.with_source(value_err));
        }

        diags.report(
            ValidationError::new(value_err.code, value_err.message, Severity::Error)
                .in_component(self.current_component_name())
                .on_property(line.name.clone())
                .at_line(line.raw.clone(), line.line_number),
        )
    }

    /// Finish the run: unwind unclosed frames onto the root and hand the
    /// root component back.
    pub fn finish(mut self, diags: &mut Diagnostics) -> Result<Component, ParseError> {
        while self.frames.len() > 1 {
            let name = self.current_component_name();
            diags.report(
                ValidationError::new(
                    codes::PARSE_UNTERMINATED_COMPONENT,
                    format!("component {name} is missing its END line"),
                    Severity::Warning,
                )
                .in_component(name.clone()),
            )?;
            self.close_top();
        }

        if !self.saw_calendar_begin {
            let root = self.frames.first().map_or(true, |f| {
                f.component.components.is_empty() && f.buffer.is_empty()
            });
            if root {
                return Err(ParseError::from(ValidationError::new(
                    codes::PARSE_MISSING_CALENDAR,
                    "input contains no iCalendar data",
                    Severity::Fatal,
                )));
            }
            diags.report(
                ValidationError::new(
                    codes::PARSE_MISSING_CALENDAR,
                    "content without a surrounding BEGIN:VCALENDAR",
                    Severity::Error,
                )
                .in_component(KW_VCALENDAR),
            )?;
        } else if !self.root_closed {
            diags.report(
                ValidationError::new(
                    codes::PARSE_UNTERMINATED_COMPONENT,
                    "VCALENDAR is missing its END line",
                    Severity::Warning,
                )
                .in_component(KW_VCALENDAR),
            )?;
        }

        let Some(mut frame) = self.frames.pop() else {
            return Err(ParseError::new(
                codes::PARSE_MISSING_CALENDAR,
                "input contains no iCalendar data",
            ));
        };
        resolve_description_conflict(&mut frame.buffer);
        frame.component.properties.extend(frame.buffer);
        Ok(frame.component)
    }
}

fn known_component(name: &str) -> bool {
    KNOWN_COMPONENTS.iter().any(|k| name.eq_ignore_ascii_case(k))
        || name.to_ascii_uppercase().starts_with("X-")
}

fn top_level_allowed(name: &str) -> bool {
    TOP_LEVEL_WHITELIST
        .iter()
        .any(|k| name.eq_ignore_ascii_case(k))
        || name.to_ascii_uppercase().starts_with("X-")
}
