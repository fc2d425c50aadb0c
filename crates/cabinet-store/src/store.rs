//! Folder and file operations over whole-snapshot persistence.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use cabinet_core::error::AppError;
use cabinet_core::result::AppResult;
use cabinet_core::traits::backend::SnapshotBackend;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::file::{CreateFile, File};
use cabinet_entity::folder::{CreateFolder, Folder};
use cabinet_entity::order::ReorderItem;
use cabinet_entity::snapshot::Snapshot;

/// The metadata store over a snapshot persistence backend.
///
/// Every operation is a bounded, one-shot unit of work. Reads load a
/// fresh snapshot per call, never a cached copy, trading latency for
/// freshness. Mutations run the load→mutate→save cycle under a store-wide
/// mutex, so two writers can never interleave their read-modify-write
/// cycles and silently drop each other's changes; the substrates
/// themselves offer no transactions or locking. Clones share the lock
/// and the backend.
///
/// A mutation builds the new collection on an owned in-memory value, so
/// a caller cancelled before `save` publishes nothing.
#[derive(Debug, Clone)]
pub struct TreeStore {
    /// The persistence substrate.
    backend: Arc<dyn SnapshotBackend<Snapshot>>,
    /// Serializes all mutations; reads never take it.
    write_lock: Arc<Mutex<()>>,
}

impl TreeStore {
    /// Create a store over the given backend.
    pub fn new(backend: Arc<dyn SnapshotBackend<Snapshot>>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The backend type this store persists to (e.g., "local", "redis").
    pub fn backend_type(&self) -> &str {
        self.backend.backend_type()
    }

    /// Check the persistence substrate.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.backend.health_check().await
    }

    /// List folders under the given parent (None = roots), ordered by
    /// `order`.
    pub async fn list_folders(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        let snapshot = self.backend.load().await?;
        Ok(snapshot.folders_under(parent_id))
    }

    /// List files in the given folder, ordered by `order`.
    pub async fn list_files(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        let snapshot = self.backend.load().await?;
        Ok(snapshot.files_in(folder_id))
    }

    /// Create a folder appended at the end of its sibling group.
    pub async fn create_folder(&self, req: CreateFolder) -> AppResult<Folder> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.backend.load().await?;

        let folder = Folder {
            id: FolderId::new(),
            name: req.name,
            parent_id: req.parent_id,
            order: snapshot.folder_sibling_count(req.parent_id),
        };
        snapshot.folders.push(folder.clone());
        self.backend.save(&snapshot).await?;

        info!(
            folder_id = %folder.id,
            name = %folder.name,
            order = folder.order,
            "Folder created"
        );
        Ok(folder)
    }

    /// Record a file appended at the end of its folder.
    ///
    /// The `location` must already point at stored bytes; this writes
    /// metadata only.
    pub async fn create_file(&self, req: CreateFile) -> AppResult<File> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }

        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.backend.load().await?;

        let file = File {
            id: FileId::new(),
            name: req.name,
            folder_id: req.folder_id,
            remark: req.remark,
            location: req.location,
            uploaded_at: Utc::now(),
            order: snapshot.file_sibling_count(req.folder_id),
        };
        snapshot.files.push(file.clone());
        self.backend.save(&snapshot).await?;

        info!(
            file_id = %file.id,
            folder_id = %file.folder_id,
            order = file.order,
            "File recorded"
        );
        Ok(file)
    }

    /// Delete a folder together with every folder and file underneath it.
    ///
    /// The subtree is collected by a visited-set walk over parent→child
    /// edges, so cyclic or dangling data cannot hang the delete. The
    /// surviving siblings under the deleted folder's former parent are
    /// re-packed to a dense order. Deleting an id that no longer exists
    /// succeeds without touching the snapshot. Byte payloads of removed
    /// files are the caller's cleanup.
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.backend.load().await?;

        let doomed = snapshot.reachable_folders(id);
        let former_parent = snapshot
            .folders
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.parent_id);

        let folders_before = snapshot.folders.len();
        let files_before = snapshot.files.len();
        snapshot.folders.retain(|f| !doomed.contains(&f.id));
        snapshot.files.retain(|f| !doomed.contains(&f.folder_id));

        let folders_removed = folders_before - snapshot.folders.len();
        let files_removed = files_before - snapshot.files.len();
        if folders_removed == 0 && files_removed == 0 {
            // Idempotent delete: nothing to remove, nothing to write.
            return Ok(());
        }

        if let Some(parent_id) = former_parent {
            snapshot.repack_folder_siblings(parent_id);
        }
        self.backend.save(&snapshot).await?;

        info!(
            folder_id = %id,
            folders_removed,
            files_removed,
            "Folder subtree deleted"
        );
        Ok(())
    }

    /// Delete a single file record and re-pack its folder's order.
    ///
    /// Missing ids succeed as a no-op.
    pub async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.backend.load().await?;

        let Some(folder_id) = snapshot
            .files
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.folder_id)
        else {
            return Ok(());
        };

        snapshot.files.retain(|f| f.id != id);
        snapshot.repack_file_siblings(folder_id);
        self.backend.save(&snapshot).await?;

        info!(file_id = %id, "File deleted");
        Ok(())
    }

    /// Apply a batch of folder order assignments.
    ///
    /// Unknown ids are skipped. After the assignments every touched
    /// sibling group is re-packed to a dense 0..N-1 sequence, so gaps or
    /// duplicates in the batch cannot persist.
    pub async fn reorder_folders(&self, items: &[ReorderItem<FolderId>]) -> AppResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.backend.load().await?;

        let mut touched: Vec<Option<FolderId>> = Vec::new();
        for item in items {
            if let Some(folder) = snapshot.folders.iter_mut().find(|f| f.id == item.id) {
                folder.order = item.order;
                if !touched.contains(&folder.parent_id) {
                    touched.push(folder.parent_id);
                }
            }
        }
        if touched.is_empty() {
            return Ok(());
        }

        for parent_id in touched {
            snapshot.repack_folder_siblings(parent_id);
        }
        self.backend.save(&snapshot).await?;

        info!(count = items.len(), "Folders reordered");
        Ok(())
    }

    /// Apply a batch of file order assignments. Same semantics as
    /// [`TreeStore::reorder_folders`].
    pub async fn reorder_files(&self, items: &[ReorderItem<FileId>]) -> AppResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.backend.load().await?;

        let mut touched: Vec<FolderId> = Vec::new();
        for item in items {
            if let Some(file) = snapshot.files.iter_mut().find(|f| f.id == item.id) {
                file.order = item.order;
                if !touched.contains(&file.folder_id) {
                    touched.push(file.folder_id);
                }
            }
        }
        if touched.is_empty() {
            return Ok(());
        }

        for folder_id in touched {
            snapshot.repack_file_siblings(folder_id);
        }
        self.backend.save(&snapshot).await?;

        info!(count = items.len(), "Files reordered");
        Ok(())
    }

    /// Replace the entire snapshot with the empty one.
    pub async fn reset(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.backend.save(&Snapshot::empty()).await?;

        info!("Snapshot reset to empty");
        Ok(())
    }
}
