// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Post-assembly component validation.
//!
//! Structural checks per component kind, recorded as warnings in both modes:
//! a calendar with a half-formed VEVENT is still a calendar.

use crate::component::Component;
use crate::error::{Severity, ValidationError, codes};
use crate::keyword::{
    KW_ACTION, KW_ACTION_AUDIO, KW_ACTION_DISPLAY, KW_ACTION_EMAIL, KW_ACTION_PROCEDURE,
    KW_DAYLIGHT, KW_DTEND, KW_DTSTART, KW_DURATION, KW_PRODID, KW_REPEAT, KW_STANDARD, KW_STATUS,
    KW_STATUS_CANCELLED, KW_STATUS_CONFIRMED, KW_STATUS_TENTATIVE, KW_TRIGGER, KW_TZID, KW_UID,
    KW_VALARM, KW_VERSION, KW_VEVENT, KW_VTIMEZONE,
};
use crate::value::ValueData;

/// Validate a parsed tree, appending warnings to `out`.
pub fn validate(root: &Component, out: &mut Vec<ValidationError>) {
    validate_calendar(root, out);
    walk(root, out);
}

fn walk(component: &Component, out: &mut Vec<ValidationError>) {
    for child in &component.components {
        if child.is_named(KW_VEVENT) {
            validate_event(child, out);
        } else if child.is_named(KW_VTIMEZONE) {
            validate_timezone(child, out);
        } else if child.is_named(KW_VALARM) {
            validate_alarm(child, out);
        }
        walk(child, out);
    }
}

fn warn(out: &mut Vec<ValidationError>, code: &'static str, component: &str, message: String) {
    out.push(ValidationError::new(code, message, Severity::Warning).in_component(component));
}

fn validate_calendar(root: &Component, out: &mut Vec<ValidationError>) {
    if root.property(KW_VERSION).is_none() {
        warn(
            out,
            codes::COMP_MISSING_VERSION,
            &root.name,
            "calendar has no VERSION property".to_string(),
        );
    }
    if root.property(KW_PRODID).is_none() {
        warn(
            out,
            codes::COMP_MISSING_PRODID,
            &root.name,
            "calendar has no PRODID property".to_string(),
        );
    }
    if root.components.is_empty() {
        warn(
            out,
            codes::COMP_EMPTY_CALENDAR,
            &root.name,
            "calendar contains no components".to_string(),
        );
    }
}

fn validate_event(event: &Component, out: &mut Vec<ValidationError>) {
    if event.property(KW_UID).is_none() {
        warn(
            out,
            codes::VEVENT_MISSING_UID,
            &event.name,
            "VEVENT has no UID".to_string(),
        );
    }
    if event.property(KW_DTSTART).is_none() {
        warn(
            out,
            codes::VEVENT_MISSING_DTSTART,
            &event.name,
            "VEVENT has no DTSTART".to_string(),
        );
    }

    let dtend = event.property(KW_DTEND);
    if dtend.is_some() && event.property(KW_DURATION).is_some() {
        warn(
            out,
            codes::VEVENT_END_DURATION_CONFLICT,
            &event.name,
            "VEVENT carries both DTEND and DURATION".to_string(),
        );
    }

    // Comparable only when both sides parsed to single date-times.
    if let (Some(start), Some(end)) = (event.property(KW_DTSTART), dtend)
        && let (ValueData::DateTime(starts), ValueData::DateTime(ends)) =
            (&start.value.data, &end.value.data)
        && let (Some(start), Some(end)) = (starts.first(), ends.first())
        && end < start
    {
        warn(
            out,
            codes::VEVENT_END_BEFORE_START,
            &event.name,
            format!("DTEND {end} is before DTSTART {start}"),
        );
    }

    if let Some(status) = event.property(KW_STATUS) {
        let value = status.value.raw.trim();
        let valid = [KW_STATUS_TENTATIVE, KW_STATUS_CONFIRMED, KW_STATUS_CANCELLED]
            .iter()
            .any(|v| value.eq_ignore_ascii_case(v));
        if !valid {
            warn(
                out,
                codes::VEVENT_INVALID_STATUS,
                &event.name,
                format!("STATUS {value:?} is not valid for VEVENT"),
            );
        }
    }
}

fn validate_timezone(tz: &Component, out: &mut Vec<ValidationError>) {
    if tz.property(KW_TZID).is_none() {
        warn(
            out,
            codes::TZ_MISSING_TZID,
            &tz.name,
            "VTIMEZONE has no TZID".to_string(),
        );
    }
    let has_observance = tz
        .components
        .iter()
        .any(|c| c.is_named(KW_STANDARD) || c.is_named(KW_DAYLIGHT));
    if !has_observance {
        warn(
            out,
            codes::TZ_NO_OBSERVANCES,
            &tz.name,
            "VTIMEZONE has neither STANDARD nor DAYLIGHT observances".to_string(),
        );
    }
}

fn validate_alarm(alarm: &Component, out: &mut Vec<ValidationError>) {
    match alarm.property(KW_ACTION) {
        None => warn(
            out,
            codes::ALARM_MISSING_ACTION,
            &alarm.name,
            "VALARM has no ACTION".to_string(),
        ),
        Some(action) => {
            let value = action.value.raw.trim();
            let known = [
                KW_ACTION_AUDIO,
                KW_ACTION_DISPLAY,
                KW_ACTION_EMAIL,
                KW_ACTION_PROCEDURE,
            ]
            .iter()
            .any(|v| value.eq_ignore_ascii_case(v));
            if !known && !value.to_ascii_uppercase().starts_with("X-") {
                warn(
                    out,
                    codes::ALARM_INVALID_ACTION,
                    &alarm.name,
                    format!("unknown alarm ACTION {value:?}"),
                );
            }
        }
    }

    if alarm.property(KW_TRIGGER).is_none() {
        warn(
            out,
            codes::ALARM_MISSING_TRIGGER,
            &alarm.name,
            "VALARM has no TRIGGER".to_string(),
        );
    }

    // DURATION and REPEAT only make sense as a pair.
    let has_duration = alarm.property(KW_DURATION).is_some();
    let has_repeat = alarm.property(KW_REPEAT).is_some();
    if has_duration != has_repeat {
        warn(
            out,
            codes::ALARM_DURATION_WITHOUT_REPEAT,
            &alarm.name,
            "VALARM DURATION and REPEAT must occur together".to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::component::Property;
    use crate::value::{Value, ValueKind};

    use super::*;

    fn prop(name: &str, kind: ValueKind, raw: &str) -> Property {
        let (value, _) = Value::parse(kind, raw, true).expect(raw);
        Property::new(name, Vec::new(), value)
    }

    fn calendar_with(child: Component) -> Component {
        let mut root = Component::new("VCALENDAR");
        root.properties.push(prop("VERSION", ValueKind::Text, "2.0"));
        root.properties
            .push(prop("PRODID", ValueKind::Text, "-//Example//EN"));
        root.components.push(child);
        root
    }

    fn codes_of(root: &Component) -> Vec<&'static str> {
        let mut out = Vec::new();
        validate(root, &mut out);
        out.iter().map(|e| e.code).collect()
    }

    #[test]
    fn flags_missing_event_essentials() {
        let event = Component::new("VEVENT");
        let codes = codes_of(&calendar_with(event));
        assert!(codes.contains(&"ICAL-VEVENT-001"));
        assert!(codes.contains(&"ICAL-VEVENT-002"));
    }

    #[test]
    fn flags_end_before_start() {
        let mut event = Component::new("VEVENT");
        event.properties.push(prop("UID", ValueKind::Text, "1@x"));
        event
            .properties
            .push(prop("DTSTART", ValueKind::DateTime, "20260206T100000Z"));
        event
            .properties
            .push(prop("DTEND", ValueKind::DateTime, "20260206T090000Z"));
        let codes = codes_of(&calendar_with(event));
        assert!(codes.contains(&"ICAL-VEVENT-VAL-001"));
    }

    #[test]
    fn flags_dtend_duration_conflict_and_bad_status() {
        let mut event = Component::new("VEVENT");
        event.properties.push(prop("UID", ValueKind::Text, "1@x"));
        event
            .properties
            .push(prop("DTSTART", ValueKind::DateTime, "20260206T100000Z"));
        event
            .properties
            .push(prop("DTEND", ValueKind::DateTime, "20260206T110000Z"));
        event
            .properties
            .push(prop("DURATION", ValueKind::Duration, "PT1H"));
        event
            .properties
            .push(prop("STATUS", ValueKind::Text, "NEEDS-ACTION"));
        let codes = codes_of(&calendar_with(event));
        assert!(codes.contains(&"ICAL-VEVENT-VAL-002"));
        assert!(codes.contains(&"ICAL-VEVENT-VAL-003"));
    }

    #[test]
    fn flags_empty_timezone() {
        let tz = Component::new("VTIMEZONE");
        let codes = codes_of(&calendar_with(tz));
        assert!(codes.contains(&"ICAL-TZ-001"));
        assert!(codes.contains(&"ICAL-TZ-002"));
    }

    #[test]
    fn flags_alarm_without_action_or_trigger() {
        let mut event = Component::new("VEVENT");
        event.properties.push(prop("UID", ValueKind::Text, "1@x"));
        event
            .properties
            .push(prop("DTSTART", ValueKind::DateTime, "20260206T100000Z"));
        event.components.push(Component::new("VALARM"));
        let codes = codes_of(&calendar_with(event));
        assert!(codes.contains(&"ICAL-ALARM-001"));
        assert!(codes.contains(&"ICAL-ALARM-002"));
    }

    #[test]
    fn flags_duration_without_repeat() {
        let mut alarm = Component::new("VALARM");
        alarm
            .properties
            .push(prop("ACTION", ValueKind::Text, "DISPLAY"));
        alarm
            .properties
            .push(prop("TRIGGER", ValueKind::Duration, "-PT15M"));
        alarm
            .properties
            .push(prop("DURATION", ValueKind::Duration, "PT5M"));
        let mut event = Component::new("VEVENT");
        event.properties.push(prop("UID", ValueKind::Text, "1@x"));
        event
            .properties
            .push(prop("DTSTART", ValueKind::DateTime, "20260206T100000Z"));
        event.components.push(alarm);
        let codes = codes_of(&calendar_with(event));
        assert!(codes.contains(&"ICAL-ALARM-003"));
        assert!(!codes.contains(&"ICAL-ALARM-001"));
    }

    #[test]
    fn clean_calendar_has_no_warnings() {
        let mut event = Component::new("VEVENT");
        event.properties.push(prop("UID", ValueKind::Text, "1@x"));
        event
            .properties
            .push(prop("DTSTART", ValueKind::DateTime, "20260206T100000Z"));
        let codes = codes_of(&calendar_with(event));
        assert!(codes.is_empty(), "{codes:?}");
    }

    #[test]
    fn flags_missing_calendar_properties() {
        let root = Component::new("VCALENDAR");
        let codes = codes_of(&root);
        assert!(codes.contains(&"ICAL-COMP-002"));
        assert!(codes.contains(&"ICAL-COMP-003"));
        assert!(codes.contains(&"ICAL-COMP-004"));
    }
}
