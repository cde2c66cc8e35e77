//! Timetable metrics.
//!
//! Thin wrappers over the `metrics` facade. Nothing is exported unless the
//! embedding application installs a recorder; until then every call is a
//! no-op.

use crate::timetable::ScheduleStats;

pub struct TimetableMetrics;

impl TimetableMetrics {
    /// Record a completed normalization pass
    pub fn record_pass(stats: &ScheduleStats, subjects: usize, grouped: usize) {
        ::metrics::counter!("timetable_normalize_passes_total").increment(1);
        ::metrics::gauge!("timetable_subjects").set(subjects as f64);
        ::metrics::gauge!("timetable_classes_grouped").set(grouped as f64);
        ::metrics::gauge!("timetable_classes", "session" => "lecture").set(stats.lecture as f64);
        ::metrics::gauge!("timetable_classes", "session" => "tutorial").set(stats.tutorial as f64);
        ::metrics::gauge!("timetable_classes", "session" => "practical")
            .set(stats.practical as f64);
        ::metrics::gauge!("timetable_classes", "session" => "generic").set(stats.generic as f64);
    }

    /// Record a failed remote call (`operation` is "upload" or "refresh")
    pub fn record_remote_failure(operation: &'static str) {
        ::metrics::counter!("timetable_remote_failures_total", "operation" => operation)
            .increment(1);
    }

    /// Record a call turned away because the same operation was in flight
    pub fn record_rejected(operation: &'static str) {
        ::metrics::counter!("timetable_rejected_total", "operation" => operation).increment(1);
    }
}
