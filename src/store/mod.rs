//! Access to the remote schedule service that extracts and persists raw rows.

pub mod http;
pub mod in_memory;

use async_trait::async_trait;
use std::fmt;
use std::path::Path;

use crate::constants::{MAX_UPLOAD_BYTES, SUPPORTED_UPLOADS};
use crate::error::{Result, TimetableError};
use crate::types::RawScheduleEntry;

pub use http::HttpScheduleStore;
pub use in_memory::InMemoryScheduleStore;

/// Bearer token for the schedule service
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// A timetable document ready to be sent for extraction
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Wrap in-memory bytes, checking extension and size
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).ok_or_else(|| {
            TimetableError::UnsupportedFile(format!(
                "'{}' is not a PDF, DOC, DOCX, JPG or PNG file",
                file_name
            ))
        })?;
        if bytes.len() as u64 > MAX_UPLOAD_BYTES {
            return Err(TimetableError::UnsupportedFile(format!(
                "'{}' is {} bytes, the limit is {} bytes",
                file_name,
                bytes.len(),
                MAX_UPLOAD_BYTES
            )));
        }
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                TimetableError::UnsupportedFile(format!("invalid file name: {}", path.display()))
            })?
            .to_string();
        // Reject before reading a huge file into memory
        let size = tokio::fs::metadata(path).await?.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(TimetableError::UnsupportedFile(format!(
                "'{}' is {} bytes, the limit is {} bytes",
                file_name, size, MAX_UPLOAD_BYTES
            )));
        }
        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, bytes)
    }
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    SUPPORTED_UPLOADS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Remote schedule service.
///
/// Both calls return the complete raw row set; rows are never merged with
/// earlier results.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Current raw rows for the token's identity, in no particular order
    async fn fetch_schedule(&self, token: &AuthToken) -> Result<Vec<RawScheduleEntry>>;

    /// Send a document for extraction; the service replaces the stored rows
    /// and returns the newly extracted ones
    async fn upload_schedule(
        &self,
        file: UploadFile,
        token: &AuthToken,
    ) -> Result<Vec<RawScheduleEntry>>;
}
