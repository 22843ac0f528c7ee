use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use pcaudit_common::types::InstanceId;

#[derive(Debug, Error)]
pub enum CheckpointWriteError {
    #[error("failed to persist checkpoint to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Durable single-value watermark persistence, scoped per instance.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Read the persisted watermark.
    ///
    /// Absence and corruption are indistinguishable: both return `None`
    /// and trigger the cold-start history fallback.
    async fn read(&self, id: &InstanceId) -> Option<i64>;

    /// Durably overwrite the watermark. Failures must be surfaced: a
    /// silently dropped write causes unbounded re-delivery next cycle.
    async fn write(&self, id: &InstanceId, watermark: i64) -> Result<(), CheckpointWriteError>;
}

/// One decimal-string file per instance under a checkpoint directory.
pub struct FileCheckpointStore {
    dir: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &InstanceId) -> PathBuf {
        self.dir.join(id.file_stem())
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn read(&self, id: &InstanceId) -> Option<i64> {
        let raw = std::fs::read_to_string(self.path_for(id)).ok()?;
        raw.trim().parse().ok()
    }

    async fn write(&self, id: &InstanceId, watermark: i64) -> Result<(), CheckpointWriteError> {
        let path = self.path_for(id);
        let tmp = path.with_extension("tmp");
        // Write-then-rename: a crash mid-write never leaves the stored
        // watermark ahead of what was actually emitted.
        std::fs::write(&tmp, watermark.to_string())
            .and_then(|()| std::fs::rename(&tmp, &path))
            .map_err(|source| CheckpointWriteError::Io { path, source })
    }
}
