//! Local snapshot backend: one JSON document on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use cabinet_core::error::{AppError, ErrorKind};
use cabinet_core::result::AppResult;
use cabinet_core::traits::backend::SnapshotBackend;
use cabinet_entity::snapshot::Snapshot;

/// Snapshot backend persisting to a single JSON file on local disk.
///
/// Saves never overwrite in place: the new document is written to a
/// sibling temp file, fsynced, and renamed over the old one, so a crash
/// mid-save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct LocalSnapshotBackend {
    /// Path of the snapshot document.
    path: PathBuf,
}

impl LocalSnapshotBackend {
    /// Create a backend for the given document path, creating parent
    /// directories as needed.
    pub async fn new(path: &str) -> AppResult<Self> {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Backend,
                        format!("Failed to create data directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }
        Ok(Self { path })
    }

    /// Path of the temp file a save goes through.
    fn temp_path(&self) -> PathBuf {
        let mut os = self.path.clone().into_os_string();
        os.push(".tmp");
        PathBuf::from(os)
    }
}

#[async_trait]
impl SnapshotBackend<Snapshot> for LocalSnapshotBackend {
    fn backend_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.is_dir()),
            _ => Ok(true),
        }
    }

    async fn load(&self) -> AppResult<Snapshot> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!(
                        "Snapshot document at {} is not valid JSON",
                        self.path.display()
                    ),
                    e,
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // First run: seed the document with the empty snapshot.
                let snapshot = Snapshot::empty();
                self.save(&snapshot).await?;
                debug!(path = %self.path.display(), "Initialized empty snapshot document");
                Ok(snapshot)
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Backend,
                format!("Failed to read snapshot document: {}", self.path.display()),
                e,
            )),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.temp_path();

        let mut file = fs::File::create(&tmp).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Backend,
                format!("Failed to create temp file: {}", tmp.display()),
                e,
            )
        })?;
        file.write_all(&json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Backend,
                format!("Failed to write temp file: {}", tmp.display()),
                e,
            )
        })?;
        file.sync_all().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Backend,
                format!("Failed to sync temp file: {}", tmp.display()),
                e,
            )
        })?;
        drop(file);

        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Backend,
                format!("Failed to replace snapshot document: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), bytes = json.len(), "Saved snapshot document");
        Ok(())
    }
}
