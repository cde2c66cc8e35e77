use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request was rejected: missing or expired credentials")]
    Unauthorized,

    #[error("A {0} is already in flight")]
    OperationInFlight(&'static str),

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("No auth token provided (use --token or TIMETABLE_AUTH_TOKEN)")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, TimetableError>;
