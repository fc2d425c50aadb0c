//! Folder entity model.

use serde::{Deserialize, Serialize};

use cabinet_core::types::FolderId;

/// A folder in the metadata tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Display name. Not required to be unique among siblings.
    pub name: String,
    /// Parent folder ID (None for root folders; several roots may exist).
    pub parent_id: Option<FolderId>,
    /// Position among the folders sharing the same parent, dense from zero.
    pub order: u32,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Display name.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
}
