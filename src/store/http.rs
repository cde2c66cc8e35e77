use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use tracing::{info, instrument, warn};

use super::{AuthToken, ScheduleStore, UploadFile};
use crate::constants::{FETCH_SCHEDULE_PATH, UPLOAD_FORM_FIELD, UPLOAD_SCHEDULE_PATH};
use crate::error::{Result, TimetableError};
use crate::types::RawScheduleEntry;

/// Schedule service reached over HTTP
pub struct HttpScheduleStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScheduleStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map error statuses, then decode the body as a list of raw rows
    async fn read_entries(response: Response) -> Result<Vec<RawScheduleEntry>> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TimetableError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TimetableError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ScheduleStore for HttpScheduleStore {
    #[instrument(skip(self, token))]
    async fn fetch_schedule(&self, token: &AuthToken) -> Result<Vec<RawScheduleEntry>> {
        let url = self.endpoint(FETCH_SCHEDULE_PATH);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        match Self::read_entries(response).await {
            Ok(entries) => {
                info!("Fetched {} schedule rows", entries.len());
                Ok(entries)
            }
            Err(e) => {
                warn!("Fetching schedule from {} failed: {}", url, e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self, file, token), fields(file = %file.file_name))]
    async fn upload_schedule(
        &self,
        file: UploadFile,
        token: &AuthToken,
    ) -> Result<Vec<RawScheduleEntry>> {
        let url = self.endpoint(UPLOAD_SCHEDULE_PATH);
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(file.mime_type)?;
        let form = Form::new().part(UPLOAD_FORM_FIELD, part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .multipart(form)
            .send()
            .await?;

        match Self::read_entries(response).await {
            Ok(entries) => {
                info!("Upload extracted {} schedule rows", entries.len());
                Ok(entries)
            }
            Err(e) => {
                warn!("Uploading schedule to {} failed: {}", url, e);
                Err(e)
            }
        }
    }
}
