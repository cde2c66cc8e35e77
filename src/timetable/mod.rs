//! Timetable normalization.
//!
//! Raw rows go through four stages, each producing a fresh value:
//! subject codes are resolved from mapping rows, class titles are rewritten
//! with the resolved names, classes are grouped into weekday buckets, and
//! session types are counted. Nothing here fails; malformed input degrades
//! to "leave unchanged" or "exclude".

pub mod classify;
pub mod clock;
pub mod grouping;
pub mod reminder;
pub mod repair;
pub mod resolver;
pub mod title;

use serde::Serialize;
use tracing::debug;

use crate::types::{ClassRecord, MappingRecord, RawScheduleEntry, ScheduleRecord};

pub use classify::{classify, classify_title, ScheduleStats};
pub use grouping::{group_by_day, WeeklySchedule};
pub use reminder::upcoming_classes;
pub use resolver::{build_subject_map, SubjectMap};
pub use title::{extract_code, extract_session_suffix, normalize_titles};

/// Result of one normalization pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTimetable {
    pub subject_map: SubjectMap,
    pub weekly_schedule: WeeklySchedule,
    pub stats: ScheduleStats,
}

/// Tag raw rows as mapping or class records
pub fn partition_records(
    entries: &[RawScheduleEntry],
) -> (Vec<MappingRecord>, Vec<ClassRecord>) {
    let mut mappings = Vec::new();
    let mut classes = Vec::new();
    for entry in entries {
        match ScheduleRecord::from(entry.clone()) {
            ScheduleRecord::Mapping(m) => mappings.push(m),
            ScheduleRecord::Class(c) => classes.push(c),
        }
    }
    (mappings, classes)
}

/// Normalize a full raw schedule. Pure; the same input always yields the
/// same output.
pub fn normalize(entries: &[RawScheduleEntry]) -> NormalizedTimetable {
    let (mappings, classes) = partition_records(entries);
    let subject_map = build_subject_map(&mappings);
    let normalized = normalize_titles(&classes, &subject_map);
    let weekly_schedule = group_by_day(&normalized);
    let stats = ScheduleStats::from_classes(&normalized);

    debug!(
        "Normalized {} rows: {} subjects, {} classes, {} grouped",
        entries.len(),
        subject_map.len(),
        stats.total,
        weekly_schedule.total_classes()
    );

    NormalizedTimetable {
        subject_map,
        weekly_schedule,
        stats,
    }
}
