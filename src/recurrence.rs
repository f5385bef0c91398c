// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lazy recurrence expansion.
//!
//! [`RecurrenceSet`] pairs an [`RRule`] with its DTSTART and the EXDATE/RDATE
//! sidecar lists; [`RecurrenceSet::occurrences`] yields a pull-based,
//! strictly ascending sequence of occurrences, bounded by COUNT, UNTIL, and
//! an optional range end. DTSTART is always the first occurrence; pattern
//! candidates and RDATEs merge in order, EXDATEs are filtered out.
//!
//! Frequency stepping honors INTERVAL for all seven frequencies, BYDAY for
//! WEEKLY, BYMONTHDAY for MONTHLY, and BYMONTH for YEARLY. The deeper BY*
//! combination space is intentionally outside this iterator's guarantee.

use std::collections::VecDeque;

use jiff::Span;
use jiff::civil::{Date, DateTime, Time, Weekday as JiffWeekday};

use crate::component::Component;
use crate::keyword::{KW_DTSTART, KW_EXDATE, KW_RDATE, KW_RRULE};
use crate::value::{Frequency, RRule, ValueData, Weekday};

/// A recurrence rule anchored at a start instant, with exception and
/// addition lists.
#[derive(Debug, Clone)]
pub struct RecurrenceSet {
    rule: RRule,
    dtstart: DateTime,
    rdates: Vec<DateTime>,
    exdates: Vec<DateTime>,
}

impl RecurrenceSet {
    /// Anchor a rule at its DTSTART.
    #[must_use]
    pub fn new(rule: RRule, dtstart: DateTime) -> Self {
        Self {
            rule,
            dtstart,
            rdates: Vec::new(),
            exdates: Vec::new(),
        }
    }

    /// Add an RDATE occurrence.
    pub fn add_rdate(&mut self, dt: DateTime) {
        self.rdates.push(dt);
    }

    /// Add an EXDATE exception.
    pub fn add_exdate(&mut self, dt: DateTime) {
        self.exdates.push(dt);
    }

    /// Build a set from a component's DTSTART, RRULE, EXDATE and RDATE
    /// properties. `None` when either DTSTART or RRULE is missing or not of
    /// the expected type.
    #[must_use]
    pub fn from_component(component: &Component) -> Option<Self> {
        let dtstart = match &component.property(KW_DTSTART)?.value.data {
            ValueData::DateTime(values) => values.first()?.to_civil().ok()?,
            ValueData::Date(values) => values.first()?.to_civil().ok()?.at(0, 0, 0, 0),
            _ => return None,
        };
        let rule = match &component.property(KW_RRULE)?.value.data {
            ValueData::Recur(rule) => rule.clone(),
            _ => return None,
        };

        let mut set = Self::new(rule, dtstart);
        for prop in component.properties_named(KW_EXDATE) {
            collect_datetimes(&prop.value.data, &mut set.exdates);
        }
        for prop in component.properties_named(KW_RDATE) {
            collect_datetimes(&prop.value.data, &mut set.rdates);
        }
        Some(set)
    }

    /// Lazily expand the set, halting at `range_end` (inclusive) when given.
    #[must_use]
    pub fn occurrences(&self, range_end: Option<DateTime>) -> Occurrences<'_> {
        let mut rdates: Vec<DateTime> = self.rdates.clone();
        rdates.sort_unstable();

        let until = self.rule.until.as_ref().and_then(|u| {
            if self.rule.until_is_date {
                // A DATE bound covers the whole final day.
                u.date.to_civil().ok().map(|d| d.at(23, 59, 59, 0))
            } else {
                u.to_civil().ok()
            }
        });

        Occurrences {
            set: self,
            pattern: Pattern::new(&self.rule, self.dtstart),
            pending: VecDeque::new(),
            pattern_done: false,
            rdates,
            rdate_idx: 0,
            emitted: 0,
            last: None,
            until,
            range_end,
            first: true,
            done: false,
        }
    }
}

fn collect_datetimes(data: &ValueData, out: &mut Vec<DateTime>) {
    match data {
        ValueData::DateTime(values) => {
            out.extend(values.iter().filter_map(|v| v.to_civil().ok()));
        }
        ValueData::Date(values) => {
            out.extend(
                values
                    .iter()
                    .filter_map(|v| v.to_civil().ok().map(|d| d.at(0, 0, 0, 0))),
            );
        }
        ValueData::Period(values) => {
            out.extend(values.iter().filter_map(|p| p.start().to_civil().ok()));
        }
        _ => {}
    }
}

/// Lazy occurrence iterator; see [`RecurrenceSet::occurrences`].
#[derive(Debug)]
pub struct Occurrences<'a> {
    set: &'a RecurrenceSet,
    pattern: Pattern,
    pending: VecDeque<DateTime>,
    pattern_done: bool,
    rdates: Vec<DateTime>,
    rdate_idx: usize,
    emitted: u32,
    last: Option<DateTime>,
    until: Option<DateTime>,
    range_end: Option<DateTime>,
    first: bool,
    done: bool,
}

impl Occurrences<'_> {
    /// Next pattern candidate strictly after DTSTART.
    fn next_pattern(&mut self) -> Option<DateTime> {
        loop {
            if let Some(candidate) = self.pending.pop_front() {
                if candidate > self.set.dtstart {
                    return Some(candidate);
                }
                continue;
            }
            if self.pattern_done {
                return None;
            }
            match self.pattern.next_batch() {
                Some(batch) => self.pending.extend(batch),
                None => self.pattern_done = true,
            }
        }
    }

    fn peek_rdate(&self) -> Option<DateTime> {
        self.rdates.get(self.rdate_idx).copied()
    }
}

impl Iterator for Occurrences<'_> {
    type Item = DateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let mut held_pattern: Option<DateTime> = None;

        loop {
            if self.done {
                return None;
            }
            if let Some(count) = self.set.rule.count
                && self.emitted >= count
            {
                self.done = true;
                return None;
            }

            // Merge DTSTART, the rule pattern, and RDATEs in order.
            let candidate = if self.first {
                self.first = false;
                self.set.dtstart
            } else {
                let pattern = held_pattern.take().or_else(|| self.next_pattern());
                let rdate = self.peek_rdate();
                match (pattern, rdate) {
                    (None, None) => {
                        self.done = true;
                        return None;
                    }
                    (Some(p), None) => p,
                    (None, Some(r)) => {
                        self.rdate_idx += 1;
                        r
                    }
                    (Some(p), Some(r)) => {
                        if r < p {
                            self.rdate_idx += 1;
                            held_pattern = Some(p);
                            r
                        } else if r == p {
                            self.rdate_idx += 1;
                            p
                        } else {
                            p
                        }
                    }
                }
            };

            if let Some(until) = self.until
                && candidate > until
            {
                self.done = true;
                return None;
            }
            if let Some(end) = self.range_end
                && candidate > end
            {
                self.done = true;
                return None;
            }

            if self.last == Some(candidate) {
                continue;
            }
            if self.set.exdates.contains(&candidate) {
                self.last = Some(candidate);
                continue;
            }

            self.last = Some(candidate);
            self.emitted = self.emitted.saturating_add(1);
            return Some(candidate);
        }
    }
}

/// Period-by-period candidate generator.
#[derive(Debug)]
struct Pattern {
    freq: Frequency,
    interval: i64,
    by_day: Vec<Weekday>,
    by_month_day: Vec<i8>,
    by_month: Vec<i8>,
    wkst: Weekday,
    time: Time,
    anchor_day: i8,
    anchor_month: i8,
    linear: Option<DateTime>,
    year: i64,
    month: i64,
}

impl Pattern {
    fn new(rule: &RRule, dtstart: DateTime) -> Self {
        Self {
            freq: rule.freq,
            interval: i64::from(rule.interval.max(1)),
            by_day: rule.by_day.iter().map(|d| d.weekday).collect(),
            by_month_day: rule.by_month_day.clone(),
            by_month: rule
                .by_month
                .iter()
                .filter_map(|&m| i8::try_from(m).ok())
                .collect(),
            wkst: rule.wkst,
            time: dtstart.time(),
            anchor_day: dtstart.date().day(),
            anchor_month: dtstart.date().month(),
            linear: Some(dtstart),
            year: i64::from(dtstart.date().year()),
            month: i64::from(dtstart.date().month()),
        }
    }

    /// Candidates for the current period, advancing the cursor. `None` once
    /// the calendar is exhausted.
    fn next_batch(&mut self) -> Option<Vec<DateTime>> {
        match self.freq {
            Frequency::Secondly => self.step_linear(Span::new().try_seconds(self.interval)),
            Frequency::Minutely => self.step_linear(Span::new().try_minutes(self.interval)),
            Frequency::Hourly => self.step_linear(Span::new().try_hours(self.interval)),
            Frequency::Daily => self.step_linear(Span::new().try_days(self.interval)),
            Frequency::Weekly => self.step_weekly(),
            Frequency::Monthly => self.step_monthly(),
            Frequency::Yearly => self.step_yearly(),
        }
    }

    fn step_linear(
        &mut self,
        span: Result<Span, jiff::Error>,
    ) -> Option<Vec<DateTime>> {
        let cursor = self.linear?;
        let span = span.ok()?;
        self.linear = cursor.checked_add(span).ok();
        Some(vec![cursor])
    }

    fn step_weekly(&mut self) -> Option<Vec<DateTime>> {
        let cursor = self.linear?;

        let batch = if self.by_day.is_empty() {
            vec![cursor]
        } else {
            let back = i64::from(days_from_week_start(cursor.date().weekday(), self.wkst));
            let week_start = cursor.date().checked_add(Span::new().try_days(-back).ok()?).ok()?;
            let mut days = Vec::new();
            for offset in 0..7_i64 {
                let Ok(day) = week_start.checked_add(Span::new().try_days(offset).ok()?) else {
                    continue;
                };
                if self
                    .by_day
                    .iter()
                    .any(|wd| wd.to_jiff() == day.weekday())
                {
                    days.push(day.to_datetime(self.time));
                }
            }
            days
        };

        self.linear = cursor
            .checked_add(Span::new().try_weeks(self.interval).ok()?)
            .ok();
        Some(batch)
    }

    fn step_monthly(&mut self) -> Option<Vec<DateTime>> {
        if self.year > 9999 {
            return None;
        }
        let year = i16::try_from(self.year).ok()?;
        let month = i8::try_from(self.month).ok()?;

        let mut batch = Vec::new();
        if self.by_month_day.is_empty() {
            if let Ok(date) = Date::new(year, month, self.anchor_day) {
                batch.push(date.to_datetime(self.time));
            }
        } else {
            for &md in &self.by_month_day {
                if let Some(date) = resolve_month_day(year, month, md) {
                    batch.push(date.to_datetime(self.time));
                }
            }
            batch.sort_unstable();
        }

        self.month += self.interval;
        self.year += (self.month - 1).div_euclid(12);
        self.month = (self.month - 1).rem_euclid(12) + 1;
        Some(batch)
    }

    fn step_yearly(&mut self) -> Option<Vec<DateTime>> {
        if self.year > 9999 {
            return None;
        }
        let year = i16::try_from(self.year).ok()?;

        let mut batch = Vec::new();
        if self.by_month.is_empty() {
            if let Ok(date) = Date::new(year, self.anchor_month, self.anchor_day) {
                batch.push(date.to_datetime(self.time));
            }
        } else {
            for &month in &self.by_month {
                if let Ok(date) = Date::new(year, month, self.anchor_day) {
                    batch.push(date.to_datetime(self.time));
                }
            }
            batch.sort_unstable();
        }

        self.year += self.interval;
        Some(batch)
    }
}

/// Resolve a (possibly negative, counted from the end) month day.
fn resolve_month_day(year: i16, month: i8, month_day: i8) -> Option<Date> {
    let days_in_month = Date::new(year, month, 1).ok()?.days_in_month();
    let day = if month_day > 0 {
        month_day
    } else {
        days_in_month + 1 + month_day
    };
    Date::new(year, month, day).ok()
}

/// Days since the configured week start, 0-6.
fn days_from_week_start(day: JiffWeekday, wkst: Weekday) -> i8 {
    let number = |d: JiffWeekday| -> i8 {
        match d {
            JiffWeekday::Sunday => 0,
            JiffWeekday::Monday => 1,
            JiffWeekday::Tuesday => 2,
            JiffWeekday::Wednesday => 3,
            JiffWeekday::Thursday => 4,
            JiffWeekday::Friday => 5,
            JiffWeekday::Saturday => 6,
        }
    };
    (7 + number(day) - number(wkst.to_jiff())).rem_euclid(7)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use pretty_assertions::assert_eq;

    use super::*;

    fn rule(src: &str) -> RRule {
        src.parse().expect(src)
    }

    fn expand(src: &str, dtstart: DateTime, limit: usize) -> Vec<DateTime> {
        RecurrenceSet::new(rule(src), dtstart)
            .occurrences(None)
            .take(limit)
            .collect()
    }

    #[test]
    fn daily_count_emits_dtstart_first() {
        let start = date(2026, 2, 6).at(9, 30, 0, 0);
        let got = expand("FREQ=DAILY;COUNT=3", start, 10);
        assert_eq!(
            got,
            [
                date(2026, 2, 6).at(9, 30, 0, 0),
                date(2026, 2, 7).at(9, 30, 0, 0),
                date(2026, 2, 8).at(9, 30, 0, 0),
            ]
        );
    }

    #[test]
    fn interval_skips_periods() {
        let start = date(2026, 1, 1).at(8, 0, 0, 0);
        let got = expand("FREQ=DAILY;INTERVAL=3;COUNT=3", start, 10);
        assert_eq!(
            got,
            [
                date(2026, 1, 1).at(8, 0, 0, 0),
                date(2026, 1, 4).at(8, 0, 0, 0),
                date(2026, 1, 7).at(8, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn hourly_and_minutely_step_time() {
        let start = date(2026, 1, 1).at(22, 0, 0, 0);
        let got = expand("FREQ=HOURLY;COUNT=3", start, 10);
        assert_eq!(got[2], date(2026, 1, 2).at(0, 0, 0, 0));

        let got = expand("FREQ=MINUTELY;INTERVAL=30;COUNT=3", start, 10);
        assert_eq!(got[2], date(2026, 1, 1).at(23, 0, 0, 0));
    }

    #[test]
    fn weekly_by_day_expands_within_weeks() {
        // 2026-02-02 is a Monday.
        let start = date(2026, 2, 2).at(10, 0, 0, 0);
        let got = expand("FREQ=WEEKLY;COUNT=5;BYDAY=MO,WE,FR", start, 10);
        assert_eq!(
            got,
            [
                date(2026, 2, 2).at(10, 0, 0, 0),  // Mon (DTSTART)
                date(2026, 2, 4).at(10, 0, 0, 0),  // Wed
                date(2026, 2, 6).at(10, 0, 0, 0),  // Fri
                date(2026, 2, 9).at(10, 0, 0, 0),  // Mon
                date(2026, 2, 11).at(10, 0, 0, 0), // Wed
            ]
        );
    }

    #[test]
    fn until_bounds_the_series_inclusively() {
        let start = date(2026, 2, 6).at(12, 0, 0, 0);
        let got = expand("FREQ=DAILY;UNTIL=20260208T120000Z", start, 100);
        assert_eq!(got.len(), 3);
        assert_eq!(got[2], date(2026, 2, 8).at(12, 0, 0, 0));

        // DATE-valued UNTIL covers its whole day
        let got = expand("FREQ=DAILY;UNTIL=20260208", start, 100);
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn monthly_negative_month_day_counts_from_the_end() {
        let start = date(2026, 1, 31).at(9, 0, 0, 0);
        let got = expand("FREQ=MONTHLY;COUNT=4;BYMONTHDAY=-1", start, 10);
        assert_eq!(
            got,
            [
                date(2026, 1, 31).at(9, 0, 0, 0),
                date(2026, 2, 28).at(9, 0, 0, 0),
                date(2026, 3, 31).at(9, 0, 0, 0),
                date(2026, 4, 30).at(9, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn monthly_without_byparts_skips_short_months() {
        let start = date(2026, 1, 31).at(9, 0, 0, 0);
        let got = expand("FREQ=MONTHLY;COUNT=3", start, 10);
        assert_eq!(
            got,
            [
                date(2026, 1, 31).at(9, 0, 0, 0),
                date(2026, 3, 31).at(9, 0, 0, 0),
                date(2026, 5, 31).at(9, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn yearly_by_month_repeats_the_anchor_day() {
        let start = date(2026, 1, 10).at(7, 0, 0, 0);
        let got = expand("FREQ=YEARLY;COUNT=4;BYMONTH=1,7", start, 10);
        assert_eq!(
            got,
            [
                date(2026, 1, 10).at(7, 0, 0, 0),
                date(2026, 7, 10).at(7, 0, 0, 0),
                date(2027, 1, 10).at(7, 0, 0, 0),
                date(2027, 7, 10).at(7, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn exdate_removes_and_rdate_adds() {
        let start = date(2026, 2, 6).at(9, 0, 0, 0);
        let mut set = RecurrenceSet::new(rule("FREQ=DAILY;COUNT=3"), start);
        set.add_exdate(date(2026, 2, 7).at(9, 0, 0, 0));
        set.add_rdate(date(2026, 2, 6).at(15, 0, 0, 0));

        let got: Vec<DateTime> = set.occurrences(None).collect();
        assert_eq!(
            got,
            [
                date(2026, 2, 6).at(9, 0, 0, 0),
                date(2026, 2, 6).at(15, 0, 0, 0),
                date(2026, 2, 8).at(9, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn range_end_caps_unbounded_rules() {
        let start = date(2026, 2, 6).at(9, 0, 0, 0);
        let set = RecurrenceSet::new(rule("FREQ=DAILY"), start);
        let got: Vec<DateTime> = set
            .occurrences(Some(date(2026, 2, 9).at(23, 59, 59, 0)))
            .collect();
        assert_eq!(got.len(), 4);
    }

    #[test]
    fn duplicate_rdate_on_pattern_point_is_deduplicated() {
        let start = date(2026, 2, 6).at(9, 0, 0, 0);
        let mut set = RecurrenceSet::new(rule("FREQ=DAILY;COUNT=2"), start);
        set.add_rdate(date(2026, 2, 7).at(9, 0, 0, 0));

        let got: Vec<DateTime> = set.occurrences(None).collect();
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn builds_from_component() {
        use crate::Parser;

        let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\n\
                   BEGIN:VEVENT\r\nUID:1@example.com\r\nDTSTART:20260206T090000Z\r\n\
                   RRULE:FREQ=DAILY;COUNT=3\r\nEXDATE:20260207T090000Z\r\n\
                   END:VEVENT\r\nEND:VCALENDAR\r\n";
        let calendar = Parser::new().parse(src).unwrap();
        let event = calendar.events().next().unwrap();
        let set = RecurrenceSet::from_component(event).unwrap();
        let got: Vec<DateTime> = set.occurrences(None).collect();
        assert_eq!(
            got,
            [
                date(2026, 2, 6).at(9, 0, 0, 0),
                date(2026, 2, 8).at(9, 0, 0, 0),
            ]
        );
    }
}
