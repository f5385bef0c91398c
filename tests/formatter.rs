// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Writer-path integration: folding, UTC handling, duration canonical forms,
//! and parameter encoding on the way out.

use pretty_assertions::assert_eq;
use vical::{Parser, Writer};

fn write(src: &str) -> String {
    let calendar = Parser::new().parse(src).unwrap_or_else(|e| panic!("{e}"));
    Writer::new().write(&calendar).unwrap()
}

#[test]
fn utc_alias_timezones_gain_z_others_stay_naive() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
               DTSTART;TZID=UTC:20260206T093045\r\nDTEND;TZID=America/New_York:20260206T093045\r\n\
               END:VEVENT\r\nEND:VCALENDAR\r\n";
    let written = write(src);
    assert!(written.contains("DTSTART;TZID=UTC:20260206T093045Z\r\n"));
    assert!(written.contains("DTEND;TZID=America/New_York:20260206T093045\r\n"));
}

#[test]
fn zero_duration_writes_as_pt0s() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
               DTSTART:20260206T093000Z\r\nDURATION:P0D\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let written = write(src);
    assert!(written.contains("DURATION:PT0S\r\n"), "{written}");
}

#[test]
fn duration_components_serialize_without_zero_parts() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
               DTSTART:20260206T093000Z\r\nDURATION:P1DT2H3M4S\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let written = write(src);
    assert!(written.contains("DURATION:P1DT2H3M4S\r\n"));
}

#[test]
fn long_property_folds_to_75_octet_segments_with_space_lead() {
    // A 150-octet content line folds into a 75-octet first line and a
    // continuation led by a single space.
    let value = "x".repeat(142);
    let src = format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
         DTSTART:20260206T093000Z\r\nSUMMARY:{value}\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
    );
    let written = write(&src);

    let lines: Vec<&str> = written.split("\r\n").collect();
    let first = lines
        .iter()
        .position(|l| l.starts_with("SUMMARY:"))
        .expect("summary line");
    assert_eq!(lines[first].len(), 75);
    assert!(lines[first + 1].starts_with(' '));
    assert!(!lines[first + 1][1..].starts_with(' '));
    assert!(lines[first + 1].len() <= 76);

    // Unfolding restores the logical line.
    let logical = format!("{}{}", lines[first], &lines[first + 1][1..]);
    assert_eq!(logical, format!("SUMMARY:{value}"));
}

#[test]
fn quoted_parameters_encode_on_the_way_out() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
               DTSTART:20260206T093000Z\r\n\
               ATTENDEE;CN=\"complex^n value\":mailto:a@example.com\r\n\
               END:VEVENT\r\nEND:VCALENDAR\r\n";
    let calendar = Parser::new().parse(src).unwrap();
    let event = calendar.events().next().unwrap();
    let cn = event
        .property("ATTENDEE")
        .unwrap()
        .parameter("CN")
        .unwrap();
    assert_eq!(cn.first(), "complex\n value");

    let written = Writer::new().write(&calendar).unwrap();
    assert!(
        written.contains("ATTENDEE;CN=\"complex^n value\":mailto:a@example.com\r\n"),
        "{written}"
    );
}

#[test]
fn custom_fold_width_is_respected() {
    let value = "y".repeat(100);
    let src = format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
         DTSTART:20260206T093000Z\r\nSUMMARY:{value}\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
    );
    let calendar = Parser::new().parse(&src).unwrap();

    let mut writer = Writer::new();
    writer.set_line_folding(true, 40);
    let written = writer.write(&calendar).unwrap();
    for line in written.split("\r\n") {
        assert!(line.len() <= 41, "line over width: {line:?}");
    }

    // And the folded form still parses back to the same value.
    let reparsed = Parser::new().parse(&written).unwrap();
    let event = reparsed.events().next().unwrap();
    assert_eq!(event.property("SUMMARY").unwrap().value.raw, value);
}

#[test]
fn write_to_file_round_trips() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
               DTSTART:20260206T093000Z\r\nSUMMARY:File trip\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let calendar = Parser::new().parse(src).unwrap();

    let path = std::env::temp_dir().join("vical-formatter-test.ics");
    Writer::new().write_to_file(&calendar, &path).unwrap();
    let reparsed = Parser::new().parse_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(calendar.root.to_tuple(), reparsed.root.to_tuple());
}

#[test]
fn boolean_and_offset_values_write_canonically() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VTIMEZONE\r\n\
               TZID:Test\r\nBEGIN:STANDARD\r\nDTSTART:20071104T020000\r\n\
               TZOFFSETFROM:+0530\r\nTZOFFSETTO:-0400\r\nEND:STANDARD\r\nEND:VTIMEZONE\r\n\
               BEGIN:VEVENT\r\nUID:1@x\r\nDTSTART:20260206T093000Z\r\n\
               X-CONFIRMED;VALUE=BOOLEAN:true\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let written = write(src);
    assert!(written.contains("TZOFFSETFROM:+0530\r\n"));
    assert!(written.contains("TZOFFSETTO:-0400\r\n"));
    // Booleans canonicalize to uppercase.
    assert!(written.contains("X-CONFIRMED;VALUE=BOOLEAN:TRUE\r\n"));
}
