pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod report;
pub mod session;
pub mod store;
pub mod timetable;
pub mod types;

pub use error::{Result, TimetableError};
pub use session::TimetableSession;
pub use store::{AuthToken, HttpScheduleStore, InMemoryScheduleStore, ScheduleStore, UploadFile};
pub use timetable::{normalize, NormalizedTimetable, ScheduleStats, SubjectMap, WeeklySchedule};
pub use types::{NormalizedClass, RawScheduleEntry, ScheduleRecord, SessionType, Weekday};
