use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M %p"];

/// Date used to anchor bare `HH:MM` values so they compare with full timestamps
fn anchor_date() -> NaiveDate {
    NaiveDate::default()
}

/// Parse a start/end value. Tries RFC 3339, then ISO date-times, then
/// bare times of day. Offsets are normalized to UTC so that mixed-offset
/// values order correctly.
pub fn parse_start(value: &str) -> Option<NaiveDateTime> {
    parse_with(value, |dt| dt.naive_utc())
}

/// Like [`parse_start`], but keeps the wall-clock time written in the value
/// and drops any offset.
pub fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    parse_with(value, |dt| dt.naive_local())
}

fn parse_with(
    value: &str,
    from_rfc3339: impl FnOnce(DateTime<FixedOffset>) -> NaiveDateTime,
) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(from_rfc3339(dt));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
                .map(|time| anchor_date().and_time(time))
        })
}

/// Time of day of a start value as printed on the timetable
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    parse_wall_clock(value).map(|dt| dt.time())
}

/// Ordering key: parseable values ascending, unparseable ones after them
pub fn start_sort_key(value: Option<&str>) -> (bool, Option<NaiveDateTime>) {
    let parsed = value.and_then(parse_start);
    (parsed.is_none(), parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_times() {
        let nine = parse_start("09:00").unwrap();
        assert_eq!(nine.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(
            parse_start("14:30:15").unwrap().time(),
            NaiveTime::from_hms_opt(14, 30, 15).unwrap()
        );
        assert_eq!(
            parse_start("2:05 PM").unwrap().time(),
            NaiveTime::from_hms_opt(14, 5, 0).unwrap()
        );
    }

    #[test]
    fn test_parses_full_timestamps() {
        assert!(parse_start("2024-09-02T09:00:00Z").is_some());
        assert!(parse_start("2024-09-02T09:00:00+05:30").is_some());
        assert!(parse_start("2024-09-02T09:00").is_some());
        assert!(parse_start("2024-09-02 09:00:00").is_some());
    }

    #[test]
    fn test_wall_clock_keeps_written_time() {
        let written = "2024-09-02T09:15:00+05:30";
        assert_eq!(
            parse_wall_clock(written).unwrap().time(),
            NaiveTime::from_hms_opt(9, 15, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day(written),
            NaiveTime::from_hms_opt(9, 15, 0)
        );
        assert_eq!(
            parse_start(written).unwrap().time(),
            NaiveTime::from_hms_opt(3, 45, 0).unwrap()
        );
        assert_eq!(parse_wall_clock("09:15"), parse_start("09:15"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_start(""), None);
        assert_eq!(parse_start("morning"), None);
        assert_eq!(parse_start("25:00"), None);
    }

    #[test]
    fn test_unparseable_sorts_last() {
        assert!(start_sort_key(Some("23:59")) < start_sort_key(Some("soon")));
        assert!(start_sort_key(Some("08:00")) < start_sort_key(None));
        assert!(start_sort_key(Some("08:00")) < start_sort_key(Some("08:01")));
    }
}
