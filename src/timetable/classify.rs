use serde::Serialize;

use crate::types::{NormalizedClass, SessionType};

/// Classify a title by its session marker; `(L)` beats `(T)` beats `(P)`.
pub fn classify_title(title: &str) -> SessionType {
    if title.contains("(L)") {
        SessionType::Lecture
    } else if title.contains("(T)") {
        SessionType::Tutorial
    } else if title.contains("(P)") {
        SessionType::Practical
    } else {
        SessionType::Generic
    }
}

pub fn classify(class: &NormalizedClass) -> SessionType {
    classify_title(&class.class_title)
}

/// Aggregate counts over a normalized set.
///
/// `lecture + tutorial + practical + generic == total` always holds, since
/// every class falls in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleStats {
    pub total: usize,
    #[serde(rename = "Lecture")]
    pub lecture: usize,
    #[serde(rename = "Tutorial")]
    pub tutorial: usize,
    #[serde(rename = "Practical")]
    pub practical: usize,
    #[serde(rename = "Generic")]
    pub generic: usize,
}

impl ScheduleStats {
    pub fn from_classes<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedClass>,
    {
        let mut stats = Self::default();
        for class in classes {
            stats.record(classify(class));
        }
        stats
    }

    pub fn record(&mut self, session: SessionType) {
        self.total += 1;
        match session {
            SessionType::Lecture => self.lecture += 1,
            SessionType::Tutorial => self.tutorial += 1,
            SessionType::Practical => self.practical += 1,
            SessionType::Generic => self.generic += 1,
        }
    }

    pub fn count(&self, session: SessionType) -> usize {
        match session {
            SessionType::Lecture => self.lecture,
            SessionType::Tutorial => self.tutorial,
            SessionType::Practical => self.practical,
            SessionType::Generic => self.generic,
        }
    }
}
