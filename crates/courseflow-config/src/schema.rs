//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub advisor: AdvisorConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl Config {
    /// Validate the settings a running daemon depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.base_url.is_empty() {
            return Err(ConfigError::MissingField("canvas.base_url".to_string()));
        }
        if url::Url::parse(&self.canvas.base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "canvas.base_url".to_string(),
                message: "must be an absolute URL".to_string(),
            });
        }
        if self.sync.refresh_interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.refresh_interval_minutes".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Upstream Canvas instance settings. The session cookie is borrowed from
/// an existing browser login; courseflow has no identity model of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default)]
    pub base_url: String,

    /// Cookie header value, e.g. `canvas_session=...`. Usually supplied as
    /// `${CANVAS_SESSION_COOKIE}`.
    #[serde(default)]
    pub session_cookie: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            session_cookie: String::new(),
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    100
}

/// Local API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8765
}

/// Refresh and cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_minutes: u64,

    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: default_refresh_interval(),
            storage_path: default_storage_path(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".courseflow")
}

/// Study-plan advisor settings. Any OpenAI-compatible chat-completions
/// endpoint works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default = "default_advisor_url")]
    pub api_url: String,

    /// Usually supplied as `${COURSEFLOW_ADVISOR_KEY}`.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_advisor_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_url: default_advisor_url(),
            api_key: String::new(),
            model: default_advisor_model(),
            temperature: default_temperature(),
        }
    }
}

fn default_advisor_url() -> String {
    "https://models.github.ai/inference/chat/completions".to_string()
}

fn default_advisor_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

/// Deadline notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub frequency: NotificationFrequency,

    #[serde(default = "default_quiet_start")]
    pub quiet_hours_start: String,

    #[serde(default = "default_quiet_end")]
    pub quiet_hours_end: String,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            frequency: NotificationFrequency::default(),
            quiet_hours_start: default_quiet_start(),
            quiet_hours_end: default_quiet_end(),
        }
    }
}

fn default_quiet_start() -> String {
    "22:00".to_string()
}

fn default_quiet_end() -> String {
    "08:00".to_string()
}

/// How eagerly deadline reminders fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFrequency {
    Minimal,
    #[default]
    Balanced,
    Aggressive,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
