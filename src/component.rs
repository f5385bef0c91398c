// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Structural calendar model: components, properties, parameters.
//!
//! The tree is purely structural: a component's kind is just its `name` tag,
//! and typed accessors are thin helpers over the generic property list.
//! Parent links are not stored; parenthood is positional in the tree.

use serde_json::json;

use crate::keyword::{
    KW_DERIVED, KW_DESCRIPTION, KW_PRODID, KW_STYLED_DESCRIPTION, KW_TRUE, KW_VCALENDAR, KW_VERSION,
    KW_VEVENT, KW_VFREEBUSY, KW_VJOURNAL, KW_VTIMEZONE, KW_VTODO,
};
use crate::value::Value;

/// A single parameter value, with its original quoting preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamValue {
    /// The decoded value (RFC 6868 escapes resolved).
    pub value: String,
    /// Whether the value was double-quoted on the wire.
    pub quoted: bool,
}

impl ParamValue {
    /// An unquoted parameter value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }
}

/// A property parameter: uppercase name plus one or more values.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name, canonicalized to uppercase at parse time.
    pub name: String,
    /// Parameter values in wire order (comma-separated on the wire).
    pub values: Vec<ParamValue>,
}

impl Parameter {
    /// A single-valued parameter with an uppercased name.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![ParamValue::new(value)],
        }
    }

    /// All values re-joined with `,`, the storage form for multi-values.
    #[must_use]
    pub fn joined(&self) -> String {
        let mut out = String::new();
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&v.value);
        }
        out
    }

    /// The first value, or the empty string for a value-less pair.
    #[must_use]
    pub fn first(&self) -> &str {
        self.values.first().map_or("", |v| v.value.as_str())
    }
}

/// A named attribute on a component: parameters plus a typed value.
#[derive(Debug, Clone)]
pub struct Property {
    /// Property name as it appeared on the wire (compared uppercase).
    pub name: String,
    /// Parameters in wire order.
    pub parameters: Vec<Parameter>,
    /// The typed value, with its raw wire form cached.
    pub value: Value,
    /// 1-based physical line number of the property's first line.
    pub line_number: Option<usize>,
}

impl Property {
    /// Build a property from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>, value: Value) -> Self {
        Self {
            name: name.into(),
            parameters,
            value,
            line_number: None,
        }
    }

    /// Look up a parameter by name, case-insensitively.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Whether a parameter is present with the given value (both
    /// case-insensitive).
    #[must_use]
    pub fn has_parameter(&self, name: &str, value: &str) -> bool {
        self.parameter(name)
            .is_some_and(|p| p.values.iter().any(|v| v.value.eq_ignore_ascii_case(value)))
    }

    /// RFC 9073: whether this property carries `DERIVED=TRUE`.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.has_parameter(KW_DERIVED, KW_TRUE)
    }

    /// Whether this property's name matches, case-insensitively.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A structured node in the calendar tree.
///
/// Property iteration order is stable insertion order throughout parse,
/// conflict resolution, and write; sub-component order likewise.
#[derive(Debug, Clone, Default)]
pub struct Component {
    /// Component name (e.g. `VCALENDAR`, `VEVENT`).
    pub name: String,
    /// Properties in insertion order.
    pub properties: Vec<Property>,
    /// Sub-components in insertion order.
    pub components: Vec<Component>,
}

impl Component {
    /// An empty component with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    /// First property with the given name (case-insensitive).
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.is_named(name))
    }

    /// All properties with the given name, in order.
    pub fn properties_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> {
        self.properties.iter().filter(move |p| p.is_named(name))
    }

    /// All sub-components with the given name, in order.
    pub fn components_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Component> {
        self.components
            .iter()
            .filter(move |c| c.name.eq_ignore_ascii_case(name))
    }

    /// Whether this component's name matches, case-insensitively.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Project the component to the language-neutral three-tuple form
    /// `[lowercase_name, [[prop, params, type, raw], …], [sub, …]]`.
    #[must_use]
    pub fn to_tuple(&self) -> serde_json::Value {
        let props: Vec<serde_json::Value> = self
            .properties
            .iter()
            .map(|p| {
                let mut params = serde_json::Map::new();
                for param in &p.parameters {
                    params.insert(param.name.to_ascii_lowercase(), json!(param.joined()));
                }
                json!([
                    p.name.to_ascii_lowercase(),
                    params,
                    p.value.kind.as_str().to_ascii_lowercase(),
                    p.value.raw.clone(),
                ])
            })
            .collect();

        let subs: Vec<serde_json::Value> = self.components.iter().map(Component::to_tuple).collect();

        json!([self.name.to_ascii_lowercase(), props, subs])
    }
}

/// RFC 9073 conflict resolution: when any STYLED-DESCRIPTION is present,
/// every DESCRIPTION not marked `DERIVED=TRUE` is removed. Order of the kept
/// properties is preserved. Applying this twice is a no-op.
pub fn resolve_description_conflict(properties: &mut Vec<Property>) {
    let has_styled = properties
        .iter()
        .any(|p| p.is_named(KW_STYLED_DESCRIPTION));
    if !has_styled {
        return;
    }
    properties.retain(|p| !p.is_named(KW_DESCRIPTION) || p.is_derived());
}

/// Non-mutating form of [`resolve_description_conflict`], used on the writer
/// path so serialization applies the same rule the assembler does.
#[must_use]
pub fn resolved_properties(properties: &[Property]) -> Vec<&Property> {
    let has_styled = properties
        .iter()
        .any(|p| p.is_named(KW_STYLED_DESCRIPTION));
    properties
        .iter()
        .filter(|p| !has_styled || !p.is_named(KW_DESCRIPTION) || p.is_derived())
        .collect()
}

/// The root of a parsed iCalendar stream.
///
/// A thin wrapper over the root `VCALENDAR` [`Component`] with typed getters
/// for the common calendar-level properties and component kinds.
#[derive(Debug, Clone)]
pub struct Calendar {
    /// The root `VCALENDAR` component.
    pub root: Component,
}

impl Calendar {
    /// Wrap a root component.
    #[must_use]
    pub fn new(root: Component) -> Self {
        Self { root }
    }

    /// An empty `VCALENDAR`.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Component::new(KW_VCALENDAR))
    }

    /// The VERSION property value, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.property(KW_VERSION).map(|p| p.value.raw.as_str())
    }

    /// The PRODID property value, if present.
    #[must_use]
    pub fn prod_id(&self) -> Option<&str> {
        self.root.property(KW_PRODID).map(|p| p.value.raw.as_str())
    }

    /// All VEVENT components.
    pub fn events(&self) -> impl Iterator<Item = &Component> {
        self.root.components_named(KW_VEVENT)
    }

    /// All VTODO components.
    pub fn todos(&self) -> impl Iterator<Item = &Component> {
        self.root.components_named(KW_VTODO)
    }

    /// All VJOURNAL components.
    pub fn journals(&self) -> impl Iterator<Item = &Component> {
        self.root.components_named(KW_VJOURNAL)
    }

    /// All VFREEBUSY components.
    pub fn free_busies(&self) -> impl Iterator<Item = &Component> {
        self.root.components_named(KW_VFREEBUSY)
    }

    /// All VTIMEZONE components.
    pub fn timezones(&self) -> impl Iterator<Item = &Component> {
        self.root.components_named(KW_VTIMEZONE)
    }
}
