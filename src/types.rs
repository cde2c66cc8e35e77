use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque record identifier as handed out by the schedule service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(n) => write!(f, "{n}"),
            EntryId::Text(s) => f.write_str(s),
        }
    }
}

/// One row as returned by the schedule service, before any interpretation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleEntry {
    #[serde(default)]
    pub id: Option<EntryId>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub lecturer: Option<String>,
    #[serde(default)]
    pub class_title: Option<String>,
}

/// A row declaring `CODE = Full Subject Name`
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRecord {
    pub id: Option<EntryId>,
    pub title: String,
}

/// A row describing an actual scheduled session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub id: Option<EntryId>,
    pub day: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub venue: Option<String>,
    pub lecturer: String,
    pub class_title: String,
}

/// A raw entry after its role has been decided.
///
/// The service marks mapping rows only by leaving `lecturer` empty; that
/// inference happens here and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleRecord {
    Mapping(MappingRecord),
    Class(ClassRecord),
}

impl From<RawScheduleEntry> for ScheduleRecord {
    fn from(raw: RawScheduleEntry) -> Self {
        match raw.lecturer {
            None => ScheduleRecord::Mapping(MappingRecord {
                id: raw.id,
                title: raw.class_title.unwrap_or_default(),
            }),
            Some(lecturer) => ScheduleRecord::Class(ClassRecord {
                id: raw.id,
                day: raw.day,
                start: raw.start,
                end: raw.end,
                venue: raw.venue,
                lecturer,
                class_title: raw.class_title.unwrap_or_default(),
            }),
        }
    }
}

/// A class record whose title has been resolved against the subject map
pub type NormalizedClass = ClassRecord;

/// Canonical weekday tokens, in grouping order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
            Weekday::Sunday => "SUNDAY",
        }
    }

    /// Exact, case-sensitive match against the canonical tokens
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.token() == token)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Kind of session a class title denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    Lecture,
    Tutorial,
    Practical,
    Generic,
}
