use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::clock::start_sort_key;
use crate::types::{NormalizedClass, Weekday};

/// Classes for each canonical weekday, each bucket ordered by start.
///
/// All seven days are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<Weekday, Vec<NormalizedClass>>,
}

impl WeeklySchedule {
    pub fn empty() -> Self {
        Self {
            days: Weekday::ALL.into_iter().map(|d| (d, Vec::new())).collect(),
        }
    }

    pub fn day(&self, day: Weekday) -> &[NormalizedClass] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days in MONDAY..SUNDAY order with their classes
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[NormalizedClass])> {
        self.days.iter().map(|(d, classes)| (*d, classes.as_slice()))
    }

    pub fn total_classes(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::empty()
    }
}

/// Bucket classes by their day token and order each bucket by start time.
///
/// Classes whose day is not a canonical token are left out. The sort is
/// stable, so classes with equal starts keep their input order.
pub fn group_by_day(classes: &[NormalizedClass]) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::empty();

    for class in classes {
        match class.day.as_deref().and_then(Weekday::from_token) {
            Some(day) => {
                if let Some(bucket) = schedule.days.get_mut(&day) {
                    bucket.push(class.clone());
                }
            }
            None => debug!(
                "Excluding class '{}' with unrecognized day {:?}",
                class.class_title, class.day
            ),
        }
    }

    for bucket in schedule.days.values_mut() {
        // sort_by_key is a stable sort
        bucket.sort_by_key(|class| start_sort_key(class.start.as_deref()));
    }

    schedule
}
