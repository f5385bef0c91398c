// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar RFC 5545 / RFC 6868 / RFC 9073.

#![allow(missing_docs)]

// 3.4.  iCalendar Object
pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

// 3.6.  Calendar Components
pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";
pub const KW_VTODO: &str = "VTODO";
pub const KW_VJOURNAL: &str = "VJOURNAL";
pub const KW_VFREEBUSY: &str = "VFREEBUSY";
pub const KW_VTIMEZONE: &str = "VTIMEZONE";
pub const KW_VALARM: &str = "VALARM";

// 3.6.5.  Time Zone Component observance names
pub const KW_STANDARD: &str = "STANDARD";
pub const KW_DAYLIGHT: &str = "DAYLIGHT";

// 3.7.  Calendar Properties
pub const KW_CALSCALE: &str = "CALSCALE";
pub const KW_METHOD: &str = "METHOD";
pub const KW_PRODID: &str = "PRODID";
pub const KW_VERSION: &str = "VERSION";
// RFC 7986 calendar extension properties kept at the top level
pub const KW_REFRESH_INTERVAL: &str = "REFRESH-INTERVAL";
pub const KW_COLOR: &str = "COLOR";

// 3.8.  Component Properties
pub const KW_ACTION: &str = "ACTION";
pub const KW_ATTACH: &str = "ATTACH";
pub const KW_ATTENDEE: &str = "ATTENDEE";
pub const KW_COMPLETED: &str = "COMPLETED";
pub const KW_CREATED: &str = "CREATED";
pub const KW_DESCRIPTION: &str = "DESCRIPTION";
pub const KW_DTEND: &str = "DTEND";
pub const KW_DTSTAMP: &str = "DTSTAMP";
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DUE: &str = "DUE";
pub const KW_DURATION: &str = "DURATION";
pub const KW_EXDATE: &str = "EXDATE";
pub const KW_EXRULE: &str = "EXRULE";
pub const KW_FREEBUSY: &str = "FREEBUSY";
pub const KW_LAST_MODIFIED: &str = "LAST-MODIFIED";
pub const KW_ORGANIZER: &str = "ORGANIZER";
pub const KW_PERCENT_COMPLETE: &str = "PERCENT-COMPLETE";
pub const KW_PRIORITY: &str = "PRIORITY";
pub const KW_RDATE: &str = "RDATE";
pub const KW_RECURRENCE_ID: &str = "RECURRENCE-ID";
pub const KW_REPEAT: &str = "REPEAT";
pub const KW_RRULE: &str = "RRULE";
pub const KW_SEQUENCE: &str = "SEQUENCE";
pub const KW_STATUS: &str = "STATUS";
pub const KW_TRIGGER: &str = "TRIGGER";
pub const KW_TZOFFSETFROM: &str = "TZOFFSETFROM";
pub const KW_TZOFFSETTO: &str = "TZOFFSETTO";
pub const KW_TZURL: &str = "TZURL";
pub const KW_UID: &str = "UID";
pub const KW_URL: &str = "URL";

// RFC 9073 styled descriptions
pub const KW_STYLED_DESCRIPTION: &str = "STYLED-DESCRIPTION";

// 3.2.  Property Parameters
pub const KW_ENCODING: &str = "ENCODING";
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";
// RFC 9073 derived-description marker
pub const KW_DERIVED: &str = "DERIVED";

// 3.2.7.  Inline Encoding
pub const KW_ENCODING_BASE64: &str = "BASE64";

// 3.3.2.  Boolean
pub const KW_TRUE: &str = "TRUE";
pub const KW_FALSE: &str = "FALSE";

// 3.3.10.  Recurrence Rule parts
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYSECOND: &str = "BYSECOND";
pub const KW_RRULE_BYMINUTE: &str = "BYMINUTE";
pub const KW_RRULE_BYHOUR: &str = "BYHOUR";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYMONTHDAY: &str = "BYMONTHDAY";
pub const KW_RRULE_BYYEARDAY: &str = "BYYEARDAY";
pub const KW_RRULE_BYWEEKNO: &str = "BYWEEKNO";
pub const KW_RRULE_BYMONTH: &str = "BYMONTH";
pub const KW_RRULE_BYSETPOS: &str = "BYSETPOS";
pub const KW_RRULE_WKST: &str = "WKST";

// 3.8.6.  Alarm ACTION values
pub const KW_ACTION_AUDIO: &str = "AUDIO";
pub const KW_ACTION_DISPLAY: &str = "DISPLAY";
pub const KW_ACTION_EMAIL: &str = "EMAIL";
pub const KW_ACTION_PROCEDURE: &str = "PROCEDURE";

// 3.8.1.11.  Event STATUS values
pub const KW_STATUS_TENTATIVE: &str = "TENTATIVE";
pub const KW_STATUS_CONFIRMED: &str = "CONFIRMED";
pub const KW_STATUS_CANCELLED: &str = "CANCELLED";

/// TZID values that denote plain UTC; a DATE-TIME carrying one of these is
/// written with the `Z` suffix.
pub const UTC_TZID_ALIASES: [&str; 5] = ["UTC", "Z", "GMT", "Etc/UTC", "+00:00"];
