/// Schedule API paths, relative to the configured base URL
pub const FETCH_SCHEDULE_PATH: &str = "/api/schedule/my";
pub const UPLOAD_SCHEDULE_PATH: &str = "/api/schedule/upload-pdf";

/// Multipart field name the upload endpoint reads the document from
pub const UPLOAD_FORM_FIELD: &str = "file";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

// Environment overrides
pub const API_BASE_URL_ENV: &str = "TIMETABLE_API_BASE_URL";
pub const AUTH_TOKEN_ENV: &str = "TIMETABLE_AUTH_TOKEN";

/// Separator between code and subject name in a mapping record title
pub const MAPPING_SEPARATOR: &str = " = ";

/// Largest document the uploader accepts (10 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Extensions the uploader accepts, with the MIME type sent for each
pub const SUPPORTED_UPLOADS: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
];

pub const DEFAULT_REMINDER_WINDOW_MINUTES: i64 = 60;
/// Reminders never look past the end of the current day
pub const MAX_REMINDER_WINDOW_MINUTES: i64 = 24 * 60;
