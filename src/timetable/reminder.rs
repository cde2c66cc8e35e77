use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};

use super::clock::parse_time_of_day;
use super::grouping::WeeklySchedule;
use crate::types::{NormalizedClass, Weekday};

/// Classes on `now`'s weekday starting in `[now, now + window)`.
///
/// The window is clamped to the end of the day rather than wrapping into
/// tomorrow. Classes without a parseable start are skipped.
pub fn upcoming_classes(
    schedule: &WeeklySchedule,
    now: NaiveDateTime,
    window: Duration,
) -> Vec<&NormalizedClass> {
    let from = now.time();
    let (until, wrapped) = from.overflowing_add_signed(window);
    let until = if wrapped != 0 || until < from {
        None
    } else {
        Some(until)
    };

    schedule
        .day(Weekday::from(now.weekday()))
        .iter()
        .filter(|class| {
            class
                .start
                .as_deref()
                .and_then(parse_time_of_day)
                .is_some_and(|start| starts_within(start, from, until))
        })
        .collect()
}

fn starts_within(start: NaiveTime, from: NaiveTime, until: Option<NaiveTime>) -> bool {
    start >= from && until.map_or(true, |until| start < until)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::grouping::group_by_day;
    use chrono::NaiveDate;

    fn class(day: &str, start: &str, title: &str) -> NormalizedClass {
        NormalizedClass {
            id: None,
            day: Some(day.into()),
            start: Some(start.into()),
            end: None,
            venue: Some("Room 5".into()),
            lecturer: "Dr. X".into(),
            class_title: title.into(),
        }
    }

    // 2024-09-02 is a Monday
    fn monday_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_picks_classes_within_the_hour() {
        let schedule = group_by_day(&[
            class("MONDAY", "08:59", "too early"),
            class("MONDAY", "09:00", "now"),
            class("MONDAY", "09:45", "soon"),
            class("MONDAY", "10:00", "too late"),
            class("TUESDAY", "09:30", "wrong day"),
        ]);
        let titles: Vec<&str> = upcoming_classes(&schedule, monday_at(9, 0), Duration::hours(1))
            .into_iter()
            .map(|c| c.class_title.as_str())
            .collect();
        assert_eq!(titles, vec!["now", "soon"]);
    }

    #[test]
    fn test_window_does_not_wrap_past_midnight() {
        let schedule = group_by_day(&[
            class("MONDAY", "23:50", "late lab"),
            class("MONDAY", "00:10", "early"),
        ]);
        let titles: Vec<&str> = upcoming_classes(&schedule, monday_at(23, 30), Duration::hours(1))
            .into_iter()
            .map(|c| c.class_title.as_str())
            .collect();
        assert_eq!(titles, vec!["late lab"]);
    }

    #[test]
    fn test_offset_start_uses_its_written_time() {
        // 09:15 local is 03:45 UTC, which must not fall outside the window
        let schedule = group_by_day(&[class("MONDAY", "2024-09-02T09:15:00+05:30", "offset")]);
        let titles: Vec<&str> = upcoming_classes(&schedule, monday_at(9, 0), Duration::hours(1))
            .into_iter()
            .map(|c| c.class_title.as_str())
            .collect();
        assert_eq!(titles, vec!["offset"]);
    }

    #[test]
    fn test_unparseable_start_is_never_upcoming() {
        let schedule = group_by_day(&[class("MONDAY", "after lunch", "mystery")]);
        assert!(upcoming_classes(&schedule, monday_at(0, 0), Duration::hours(24)).is_empty());
    }
}
