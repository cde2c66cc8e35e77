use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::{AuthToken, ScheduleStore, UploadFile};
use crate::error::{Result, TimetableError};
use crate::types::RawScheduleEntry;

type Extractor = dyn Fn(&UploadFile) -> Vec<RawScheduleEntry> + Send + Sync;

/// In-memory schedule store for development/testing.
///
/// Uploads run a caller-supplied extractor and replace the stored rows
/// wholesale. Failures can be injected to exercise error paths.
pub struct InMemoryScheduleStore {
    token: AuthToken,
    entries: Arc<Mutex<Vec<RawScheduleEntry>>>,
    extractor: Box<Extractor>,
    fail_fetch: Arc<Mutex<bool>>,
    fail_upload: Arc<Mutex<bool>>,
}

impl InMemoryScheduleStore {
    pub fn new(token: AuthToken, entries: Vec<RawScheduleEntry>) -> Self {
        Self {
            token,
            entries: Arc::new(Mutex::new(entries)),
            extractor: Box::new(|_: &UploadFile| Vec::new()),
            fail_fetch: Arc::new(Mutex::new(false)),
            fail_upload: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_extractor<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&UploadFile) -> Vec<RawScheduleEntry> + Send + Sync + 'static,
    {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_fetch.lock() {
            *flag = fail;
        }
    }

    pub fn set_fail_upload(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_upload.lock() {
            *flag = fail;
        }
    }

    pub fn replace_entries(&self, entries: Vec<RawScheduleEntry>) {
        if let Ok(mut stored) = self.entries.lock() {
            *stored = entries;
        }
    }

    fn authorize(&self, token: &AuthToken) -> Result<()> {
        if *token == self.token {
            Ok(())
        } else {
            Err(TimetableError::Unauthorized)
        }
    }

    fn flag(flag: &Mutex<bool>) -> bool {
        flag.lock().map(|f| *f).unwrap_or(false)
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn fetch_schedule(&self, token: &AuthToken) -> Result<Vec<RawScheduleEntry>> {
        self.authorize(token)?;
        if Self::flag(&self.fail_fetch) {
            return Err(TimetableError::Api {
                status: 503,
                message: "schedule service unavailable".into(),
            });
        }
        let entries = self.entries.lock().map(|e| e.clone()).unwrap_or_default();
        debug!("Fetched {} rows from in-memory store", entries.len());
        Ok(entries)
    }

    async fn upload_schedule(
        &self,
        file: UploadFile,
        token: &AuthToken,
    ) -> Result<Vec<RawScheduleEntry>> {
        self.authorize(token)?;
        if Self::flag(&self.fail_upload) {
            return Err(TimetableError::Api {
                status: 400,
                message: format!("Failed to process {}", file.file_name),
            });
        }
        let extracted = (self.extractor)(&file);
        self.replace_entries(extracted.clone());
        debug!(
            "Stored {} rows extracted from {}",
            extracted.len(),
            file.file_name
        );
        Ok(extracted)
    }
}
