//! User preference storage.
//!
//! Preferences live under independent keys - one small JSON file each - so
//! writing one never risks the others. The marked-done list is the
//! client-side overlay of `courseId:assignmentId` keys; it never touches
//! submission data.

use std::path::PathBuf;

use serde_json::json;
use tokio::fs;
use tracing::{debug, warn};

use courseflow_protocols::{CacheError, Preferences};

const TIME_RANGE_FILE: &str = "time_range.json";
const AUTO_REFRESH_FILE: &str = "auto_refresh.json";
const MARKED_DONE_FILE: &str = "marked_done.json";

/// File-backed preference store.
pub struct FilePrefsStore {
    prefs_dir: PathBuf,
}

impl FilePrefsStore {
    pub async fn new(storage_path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let prefs_dir = storage_path.into().join("prefs");
        fs::create_dir_all(&prefs_dir).await?;
        Ok(Self { prefs_dir })
    }

    /// Load all preference keys, defaulting each one that is missing or
    /// unreadable.
    pub async fn load(&self) -> Preferences {
        let defaults = Preferences::default();

        let (weeks_before, weeks_after) = match self.read_key(TIME_RANGE_FILE).await {
            Some(value) => (
                value["weeksBefore"].as_u64().unwrap_or(defaults.weeks_before as u64) as u32,
                value["weeksAfter"].as_u64().unwrap_or(defaults.weeks_after as u64) as u32,
            ),
            None => (defaults.weeks_before, defaults.weeks_after),
        };

        let auto_refresh = self
            .read_key(AUTO_REFRESH_FILE)
            .await
            .and_then(|value| value.as_bool())
            .unwrap_or(defaults.auto_refresh);

        let marked_done = self
            .read_key(MARKED_DONE_FILE)
            .await
            .and_then(|value| serde_json::from_value::<Vec<String>>(value).ok())
            .unwrap_or_default();

        Preferences {
            weeks_before,
            weeks_after,
            auto_refresh,
            marked_done,
        }
    }

    pub async fn set_time_range(
        &self,
        weeks_before: u32,
        weeks_after: u32,
    ) -> Result<(), CacheError> {
        self.write_key(
            TIME_RANGE_FILE,
            &json!({ "weeksBefore": weeks_before, "weeksAfter": weeks_after }),
        )
        .await
    }

    pub async fn set_auto_refresh(&self, enabled: bool) -> Result<(), CacheError> {
        self.write_key(AUTO_REFRESH_FILE, &json!(enabled)).await
    }

    /// Add an assignment key to the marked-done overlay. Idempotent.
    pub async fn mark_done(&self, key: &str) -> Result<(), CacheError> {
        let mut done = self.load().await.marked_done;
        if !done.iter().any(|k| k == key) {
            done.push(key.to_string());
            self.write_key(MARKED_DONE_FILE, &json!(done)).await?;
        }
        Ok(())
    }

    /// Remove an assignment key from the marked-done overlay.
    pub async fn unmark_done(&self, key: &str) -> Result<(), CacheError> {
        let mut done = self.load().await.marked_done;
        let before = done.len();
        done.retain(|k| k != key);
        if done.len() != before {
            self.write_key(MARKED_DONE_FILE, &json!(done)).await?;
        }
        Ok(())
    }

    async fn read_key(&self, file: &str) -> Option<serde_json::Value> {
        let path = self.prefs_dir.join(file);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key = file, error = %e, "failed to read preference key");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = file, error = %e, "ignoring unreadable preference key");
                None
            }
        }
    }

    async fn write_key(&self, file: &str, value: &serde_json::Value) -> Result<(), CacheError> {
        let path = self.prefs_dir.join(file);
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        fs::write(&path, content).await?;
        debug!(key = file, "preference key written");
        Ok(())
    }
}
