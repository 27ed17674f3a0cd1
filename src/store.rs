use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Everything the trie page keeps between sessions.
///
/// Serializes as `{"map": {...}, "trieWords": [...]}`, the same shape the
/// page exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub map: IndexMap<String, String>,
    #[serde(default)]
    pub trie_words: Vec<String>,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{}", .0)]
    Io(#[from] std::io::Error),

    #[error("snapshot is not valid JSON: {}", .0)]
    Json(#[from] serde_json::Error),
}

/// Wholesale load and save of a [`Snapshot`].
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the stored snapshot. A store that was never written yields an
    /// empty snapshot.
    async fn load(&self) -> Result<Snapshot, StoreError>;

    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Forgets whatever was stored.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Keeps the snapshot as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist, starting empty", self.path.display());
                return Ok(Snapshot::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process store. Clones share the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Arc<Mutex<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
        }
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.snapshot.lock().await = snapshot.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        std::mem::take(&mut *self.snapshot.lock().await);
        Ok(())
    }
}
