// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the parse path: unfolding, scanning, assembly, and
//! the strict/lenient policy.

use pretty_assertions::assert_eq;
use vical::{Parser, Severity, ValueKind};

fn lenient() -> Parser {
    let mut parser = Parser::new();
    parser.set_strict(false);
    parser
}

#[test]
fn parses_property_with_parameters_and_type() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\n\
               BEGIN:VEVENT\r\nUID:1@example.com\r\nDTSTART:20260206T093000Z\r\n\
               SUMMARY;LANGUAGE=en:Meeting\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let calendar = Parser::new().parse(src).unwrap();
    let event = calendar.events().next().unwrap();
    let summary = event.property("SUMMARY").unwrap();

    assert_eq!(summary.name, "SUMMARY");
    assert_eq!(summary.parameters.len(), 1);
    assert_eq!(summary.parameters[0].name, "LANGUAGE");
    assert_eq!(summary.parameters[0].first(), "en");
    assert_eq!(summary.value.raw, "Meeting");
    assert_eq!(summary.value.kind, ValueKind::Text);
}

#[test]
fn unfolds_with_single_space_consumed() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\n\
               UID:1@x\r\nDTSTART:20260206T093000Z\r\nX-FOO:\r\n bar\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let calendar = Parser::new().parse(src).unwrap();
    let event = calendar.events().next().unwrap();
    assert_eq!(event.property("X-FOO").unwrap().value.raw, "bar");
}

#[test]
fn strict_rejections_become_lenient_warnings_with_same_code() {
    // Inputs that fail strict with a recoverable (non-fatal, non-security)
    // code must surface the same code as a lenient-mode diagnostic.
    let cases = [
        (
            // orphan continuation
            " orphan\r\nBEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nEND:VCALENDAR\r\n",
            "ICAL-PARSE-003",
        ),
        (
            // missing colon
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBROKEN LINE\r\nEND:VCALENDAR\r\n",
            "ICAL-PARSE-001",
        ),
        (
            // unclosed quote
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\nDTSTART:20260206T000000Z\r\nX-P;Q=\"unclosed:v\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n",
            "ICAL-PARSE-004",
        ),
        (
            // bad parameter name
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\nDTSTART:20260206T000000Z\r\nX-P;BAD_NAME=v:v\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n",
            "ICAL-PARSE-005",
        ),
        (
            // invalid caret escape
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\nDTSTART:20260206T000000Z\r\nX-P;Q=\"bad^x\":v\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n",
            "ICAL-PARSE-007",
        ),
        (
            // unknown component
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VVENUE\r\nEND:VVENUE\r\nEND:VCALENDAR\r\n",
            "ICAL-COMP-001",
        ),
    ];

    for (src, code) in cases {
        let err = Parser::new().parse(src).unwrap_err();
        assert_eq!(err.code, code, "strict code for {src:?}");

        let mut parser = lenient();
        parser.parse(src).unwrap_or_else(|e| panic!("lenient must recover from {src:?}: {e}"));
        assert!(
            parser.warnings().iter().any(|w| w.code == code),
            "lenient warning {code} missing for {src:?}; got {:?}",
            parser.warnings().iter().map(|w| w.code).collect::<Vec<_>>()
        );
    }
}

#[test]
fn value_failures_report_the_type_family() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
               DTSTART:20260206T093000Z\r\nSEQUENCE:twelve\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

    let err = Parser::new().parse(src).unwrap_err();
    assert_eq!(err.code, "ICAL-PARSE-011");
    let cause = std::error::Error::source(&err).expect("cause chain");
    assert!(cause.to_string().contains("ICAL-TYPE-008"));

    let mut parser = lenient();
    let calendar = parser.parse(src).unwrap();
    let event = calendar.events().next().unwrap();
    assert!(event.property("SEQUENCE").is_none());
    let warning = parser
        .warnings()
        .iter()
        .find(|w| w.code == "ICAL-TYPE-008")
        .expect("integer warning");
    assert_eq!(warning.severity, Severity::Error);
    assert_eq!(warning.property.as_deref(), Some("SEQUENCE"));
}

#[test]
fn depth_limit_rejects_without_building_the_subtree() {
    let mut src = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\n");
    for _ in 0..80 {
        src.push_str("BEGIN:X-DEEP\r\n");
    }
    for _ in 0..80 {
        src.push_str("END:X-DEEP\r\n");
    }
    src.push_str("END:VCALENDAR\r\n");

    for strict in [true, false] {
        let mut parser = Parser::new();
        parser.set_strict(strict);
        parser.set_max_depth(16);
        let err = parser.parse(&src).unwrap_err();
        assert_eq!(err.code, "ICAL-SEC-001", "strict={strict}");
    }

    // A deeper limit admits the same input.
    let mut parser = Parser::new();
    parser.set_max_depth(100);
    assert!(parser.parse(&src).is_ok());
}

#[test]
fn top_level_filtering_keeps_whitelist_and_x_names() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nCALSCALE:GREGORIAN\r\n\
               METHOD:PUBLISH\r\nREFRESH-INTERVAL;VALUE=DURATION:P1W\r\nCOLOR:turquoise\r\n\
               X-WR-CALNAME:Team\r\nGEO:37.386013;-122.082932\r\n\
               BEGIN:VEVENT\r\nUID:1@x\r\nDTSTART:20260206T093000Z\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let mut parser = lenient();
    let calendar = parser.parse(src).unwrap();

    for kept in ["VERSION", "PRODID", "CALSCALE", "METHOD", "REFRESH-INTERVAL", "COLOR", "X-WR-CALNAME"] {
        assert!(calendar.root.property(kept).is_some(), "{kept} should be kept");
    }
    assert!(calendar.root.property("GEO").is_none());
    assert!(parser.warnings().iter().any(|w| w.code == "ICAL-COMP-005"));
}

#[test]
fn mismatched_end_is_recorded_but_tree_still_builds() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
               DTSTART:20260206T093000Z\r\nEND:VTODO\r\nEND:VCALENDAR\r\n";
    let mut parser = Parser::new();
    let calendar = parser.parse(src).unwrap();
    assert_eq!(calendar.events().count(), 1);
    assert!(parser.warnings().iter().any(|w| w.code == "ICAL-PARSE-006"));
}

#[test]
fn streaming_file_parse_matches_in_memory_parse() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\n\
               BEGIN:VEVENT\r\nUID:1@example.com\r\nDTSTART:20260206T093000Z\r\n\
               SUMMARY:Long summary that folds across physical lines to prove the\r\n \
               streaming reader unfolds exactly like the in-memory path\r\n\
               END:VEVENT\r\nEND:VCALENDAR\r\n";

    let dir = std::env::temp_dir();
    let path = dir.join("vical-syntax-test.ics");
    std::fs::write(&path, src).unwrap();

    let from_memory = Parser::new().parse(src).unwrap();
    let from_file = Parser::new().parse_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(from_memory.root.to_tuple(), from_file.root.to_tuple());
}

#[test]
fn tuple_export_has_the_three_tuple_shape() {
    let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nBEGIN:VEVENT\r\nUID:1@x\r\n\
               DTSTART:20260206T093000Z\r\nSUMMARY;LANGUAGE=en:Hi\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let calendar = Parser::new().parse(src).unwrap();
    let tuple = calendar.root.to_tuple();

    assert_eq!(tuple[0], "vcalendar");
    assert_eq!(tuple[1][0][0], "version");
    let event = &tuple[2][0];
    assert_eq!(event[0], "vevent");
    let summary = event[1]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p[0] == "summary")
        .unwrap();
    assert_eq!(summary[1]["language"], "en");
    assert_eq!(summary[2], "text");
    assert_eq!(summary[3], "Hi");
}
