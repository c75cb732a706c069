//! Snapshot storage.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tracing::debug;

use courseflow_protocols::{CacheError, CachedSnapshot, Snapshot};

const SNAPSHOT_FILE: &str = "snapshot.json";

/// Snapshot storage trait. Callers treat failures as non-fatal: a refresh
/// that cannot persist still serves its in-memory result.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist the snapshot, stamping the cache write time.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), CacheError>;

    /// Restore the most recently persisted snapshot, if any.
    async fn load(&self) -> Result<Option<CachedSnapshot>, CacheError>;
}

/// In-memory snapshot store for testing.
pub struct MemorySnapshotStore {
    cached: tokio::sync::RwLock<Option<CachedSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            cached: tokio::sync::RwLock::new(None),
        }
    }
}

impl Default for MemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn save(&self, snapshot: &Snapshot) -> Result<(), CacheError> {
        let mut cached = self.cached.write().await;
        *cached = Some(CachedSnapshot {
            snapshot: snapshot.clone(),
            cache_timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn load(&self) -> Result<Option<CachedSnapshot>, CacheError> {
        let cached = self.cached.read().await;
        Ok(cached.clone())
    }
}

/// File-backed snapshot store: one JSON document under the storage path.
pub struct FileSnapshotStore {
    storage_path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store rooted at `storage_path`, creating the directory if
    /// needed.
    pub async fn new(storage_path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let storage_path = storage_path.into();
        fs::create_dir_all(&storage_path).await?;
        debug!("FileSnapshotStore initialized at {:?}", storage_path);
        Ok(Self { storage_path })
    }

    fn snapshot_path(&self) -> PathBuf {
        self.storage_path.join(SNAPSHOT_FILE)
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, snapshot: &Snapshot) -> Result<(), CacheError> {
        let cached = CachedSnapshot {
            snapshot: snapshot.clone(),
            cache_timestamp: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&cached)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;

        let path = self.snapshot_path();
        fs::write(&path, content).await?;
        debug!("Saved snapshot to {:?}", path);
        Ok(())
    }

    async fn load(&self) -> Result<Option<CachedSnapshot>, CacheError> {
        let path = self.snapshot_path();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let cached: CachedSnapshot = serde_json::from_str(&content)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        Ok(Some(cached))
    }
}
