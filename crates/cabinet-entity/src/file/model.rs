//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cabinet_core::types::{FileId, FolderId};

/// A file record in the metadata tree.
///
/// Only metadata lives here. The byte payload is addressed by `location`,
/// an opaque string the store never interprets; resolving, reading, or
/// deleting the bytes belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// Original filename as supplied by the uploader.
    pub name: String,
    /// The folder containing this file. Every file lives in exactly one
    /// folder; there are no root-level files.
    pub folder_id: FolderId,
    /// Optional free-text annotation.
    pub remark: Option<String>,
    /// Opaque reference to the byte payload (relative path or absolute URL).
    pub location: String,
    /// When the record was created.
    pub uploaded_at: DateTime<Utc>,
    /// Position among the files of the same folder, dense from zero.
    pub order: u32,
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Original filename.
    pub name: String,
    /// The containing folder.
    pub folder_id: FolderId,
    /// Optional annotation.
    pub remark: Option<String>,
    /// Opaque payload reference. Must already point at stored bytes.
    pub location: String,
}
