use std::fmt::{self, Write};

use crate::timetable::{NormalizedTimetable, ScheduleStats};
use crate::types::NormalizedClass;

/// Human readable weekly listing of a normalized timetable
pub fn render_text(timetable: &NormalizedTimetable) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_timetable(&mut out, timetable);
    out
}

fn write_timetable(out: &mut String, timetable: &NormalizedTimetable) -> fmt::Result {
    for (day, classes) in timetable.weekly_schedule.iter() {
        writeln!(out, "{day}")?;
        if classes.is_empty() {
            writeln!(out, "  (no classes)")?;
        }
        for class in classes {
            writeln!(out, "  {}", class_line(class))?;
        }
    }
    writeln!(out)?;
    writeln!(out, "{}", stats_line(&timetable.stats))
}

pub fn class_line(class: &NormalizedClass) -> String {
    let start = class.start.as_deref().unwrap_or("?");
    let end = class.end.as_deref().unwrap_or("?");
    let mut line = format!("{start}-{end}  {}", class.class_title);
    if let Some(venue) = class.venue.as_deref().filter(|v| !v.is_empty()) {
        let _ = write!(line, "  @ {venue}");
    }
    if !class.lecturer.is_empty() {
        let _ = write!(line, "  ({})", class.lecturer);
    }
    line
}

pub fn stats_line(stats: &ScheduleStats) -> String {
    format!(
        "Total: {}  Lecture: {}  Tutorial: {}  Practical: {}  Other: {}",
        stats.total, stats.lecture, stats.tutorial, stats.practical, stats.generic
    )
}
