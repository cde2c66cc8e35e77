use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::{
    API_BASE_URL_ENV, DEFAULT_API_BASE_URL, DEFAULT_CONFIG_PATH, DEFAULT_REMINDER_WINDOW_MINUTES,
    MAX_REMINDER_WINDOW_MINUTES,
};
use crate::error::{Result, TimetableError};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub reminder: ReminderConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NormalizeConfig {
    /// Split `venue, lecturer` values the extractor failed to separate
    #[serde(default)]
    pub split_venue_lecturer: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReminderConfig {
    #[serde(default = "default_window_minutes")]
    pub window_minutes: i64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_window_minutes() -> i64 {
    DEFAULT_REMINDER_WINDOW_MINUTES
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to
    /// defaults when it does not exist, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        let config = if path.exists() {
            Self::load_from(path)?
        } else {
            debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_content = fs::read_to_string(path).map_err(|e| {
            TimetableError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&config_content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        let window = config.reminder.window_minutes;
        if !(1..=MAX_REMINDER_WINDOW_MINUTES).contains(&window) {
            return Err(TimetableError::Config(format!(
                "reminder.window_minutes must be between 1 and {}, got {}",
                MAX_REMINDER_WINDOW_MINUTES, window
            )));
        }
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var(API_BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.api.base_url = base_url;
            }
        }
        self
    }

    pub fn reminder_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.reminder.window_minutes)
    }
}
