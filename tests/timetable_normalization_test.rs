use serde_json::json;
use std::collections::HashSet;
use std::io::Write;
use tempfile::NamedTempFile;

use timetable_sync::types::EntryId;
use timetable_sync::{normalize, RawScheduleEntry, ScheduleStats, Weekday};

fn rows(value: serde_json::Value) -> Vec<RawScheduleEntry> {
    serde_json::from_value(value).expect("fixture rows should deserialize")
}

/// A week as the extraction service typically returns it: mapping rows mixed
/// in with class rows, in no particular order.
fn sample_week() -> Vec<RawScheduleEntry> {
    rows(json!([
        { "id": "c4", "day": "WEDNESDAY", "start": "14:00", "end": "16:00", "venue": "Lab 2", "lecturer": "Ms. P", "classTitle": "CS32102(P)" },
        { "id": "m1", "lecturer": null, "classTitle": "CS32102 = Object Oriented Programming" },
        { "id": "c1", "day": "MONDAY", "start": "11:00", "end": "12:00", "venue": "Room 5", "lecturer": "Dr. X", "classTitle": "CS32102(L)" },
        { "id": "c2", "day": "MONDAY", "start": "09:00", "end": "10:00", "venue": "Room 7", "lecturer": "Dr. Y", "classTitle": "MA201 (T)" },
        { "id": "m2", "lecturer": null, "classTitle": "MA201 = Linear Algebra" },
        { "id": "m3", "lecturer": null, "classTitle": "garbage row from the extractor" },
        { "id": "c3", "day": "Tuesday", "start": "09:00", "end": "10:00", "venue": "Room 1", "lecturer": "Dr. Z", "classTitle": "HS101" },
        { "id": "c5", "day": "FRIDAY", "start": "10:00", "end": "11:00", "venue": "Hall", "lecturer": "Dr. Q", "classTitle": "XY999(L)" },
        { "id": "c6", "day": "SATURDAY", "start": "10:00", "end": "11:00", "venue": "Hall", "lecturer": "Dr. Q", "classTitle": "Sports" }
    ]))
}

#[test]
fn test_scenario_single_lecture_on_monday() {
    let result = normalize(&rows(json!([
        { "lecturer": null, "classTitle": "CS32102 = Object Oriented Programming" },
        { "id": 1, "day": "MONDAY", "start": "09:00", "end": "10:00", "venue": "Room 5", "lecturer": "Dr. X", "classTitle": "CS32102(L)" }
    ])));

    let monday = result.weekly_schedule.day(Weekday::Monday);
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0].id, Some(EntryId::Number(1)));
    assert_eq!(monday[0].class_title, "Object Oriented Programming (L)");
    assert_eq!(monday[0].start.as_deref(), Some("09:00"));
    assert_eq!(monday[0].end.as_deref(), Some("10:00"));
    assert_eq!(monday[0].venue.as_deref(), Some("Room 5"));
    assert_eq!(monday[0].lecturer, "Dr. X");

    for day in Weekday::ALL.into_iter().filter(|d| *d != Weekday::Monday) {
        assert!(result.weekly_schedule.day(day).is_empty(), "{day} should be empty");
    }
    assert_eq!(result.stats.lecture, 1);
    assert_eq!(result.stats.tutorial, 0);
    assert_eq!(result.stats.practical, 0);
    assert_eq!(result.stats.generic, 0);
    assert_eq!(
        serde_json::to_value(result.stats).unwrap(),
        json!({ "total": 1, "Lecture": 1, "Tutorial": 0, "Practical": 0, "Generic": 0 })
    );
}

#[test]
fn test_mapping_resolution_and_passthrough() {
    let result = normalize(&sample_week());

    let titles: Vec<&str> = result
        .weekly_schedule
        .iter()
        .flat_map(|(_, classes)| classes.iter().map(|c| c.class_title.as_str()))
        .collect();

    assert_eq!(
        titles,
        vec![
            "Linear Algebra (T)",
            "Object Oriented Programming (L)",
            "Object Oriented Programming (P)",
            "XY999(L)",
            "Sports",
        ]
    );
    assert_eq!(result.subject_map.len(), 2);
    assert_eq!(result.subject_map["MA201"], "Linear Algebra");
}

#[test]
fn test_grouping_covers_exactly_the_canonical_day_rows() {
    let input = sample_week();
    let result = normalize(&input);

    let json = serde_json::to_value(&result.weekly_schedule).unwrap();
    let keys: HashSet<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    let expected: HashSet<&str> = Weekday::ALL.iter().map(|d| d.token()).collect();
    assert_eq!(keys, expected);

    let grouped: HashSet<EntryId> = result
        .weekly_schedule
        .iter()
        .flat_map(|(_, classes)| classes.iter().filter_map(|c| c.id.clone()))
        .collect();
    let canonical: HashSet<EntryId> = input
        .iter()
        .filter(|r| r.lecturer.is_some())
        .filter(|r| r.day.as_deref().and_then(Weekday::from_token).is_some())
        .filter_map(|r| r.id.clone())
        .collect();
    assert_eq!(grouped, canonical);
}

#[test]
fn test_same_start_keeps_input_order() {
    let result = normalize(&rows(json!([
        { "id": "b", "day": "THURSDAY", "start": "10:00", "lecturer": "L", "classTitle": "B(T)" },
        { "id": "a", "day": "THURSDAY", "start": "10:00", "lecturer": "L", "classTitle": "A(T)" },
        { "id": "z", "day": "THURSDAY", "start": "08:00", "lecturer": "L", "classTitle": "Z(T)" },
        { "id": "c", "day": "THURSDAY", "start": "10:00", "lecturer": "L", "classTitle": "C(T)" }
    ])));

    let ids: Vec<String> = result
        .weekly_schedule
        .day(Weekday::Thursday)
        .iter()
        .filter_map(|c| c.id.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(ids, vec!["z", "b", "a", "c"]);
}

#[test]
fn test_normalize_is_idempotent() {
    let input = sample_week();
    let first = serde_json::to_string(&normalize(&input)).unwrap();
    let second = serde_json::to_string(&normalize(&input)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_classification_is_exhaustive() {
    let result = normalize(&sample_week());
    let ScheduleStats {
        total,
        lecture,
        tutorial,
        practical,
        generic,
    } = result.stats;

    // Every class row, including the one with a non-canonical day
    assert_eq!(total, 6);
    assert_eq!(lecture + tutorial + practical + generic, total);
    assert_eq!((lecture, tutorial, practical, generic), (2, 1, 1, 2));
}

#[test]
fn test_normalizes_rows_read_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        json!([
            { "lecturer": null, "classTitle": "PH100 = Physics" },
            { "id": 3, "day": "SUNDAY", "start": "2024-09-08T18:00:00Z", "lecturer": "Dr. R", "classTitle": "PH100" }
        ])
    )
    .unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    let entries: Vec<RawScheduleEntry> = serde_json::from_str(&content).unwrap();
    let result = normalize(&entries);

    assert_eq!(result.weekly_schedule.day(Weekday::Sunday)[0].class_title, "Physics");
    assert_eq!(result.stats.generic, 1);
}
