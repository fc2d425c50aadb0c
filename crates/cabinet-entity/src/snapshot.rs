//! The whole-collection persistence unit and its in-memory algorithms.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use cabinet_core::types::FolderId;

use crate::file::File;
use crate::folder::Folder;

/// The complete set of folders and files at one instant.
///
/// This is the unit of load/save against a snapshot backend: substrates
/// never read or write anything smaller. Folder `parent_id` references
/// are expected to resolve within `folders`, but partial failures can
/// leave dangling references behind, so they are tolerated everywhere
/// rather than treated as fatal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All folders, in no particular order.
    pub folders: Vec<Folder>,
    /// All files, in no particular order.
    pub files: Vec<File>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of folders sharing the given parent.
    pub fn folder_sibling_count(&self, parent_id: Option<FolderId>) -> u32 {
        self.folders
            .iter()
            .filter(|f| f.parent_id == parent_id)
            .count() as u32
    }

    /// Number of files in the given folder.
    pub fn file_sibling_count(&self, folder_id: FolderId) -> u32 {
        self.files
            .iter()
            .filter(|f| f.folder_id == folder_id)
            .count() as u32
    }

    /// Folders under the given parent (None = roots), sorted ascending by
    /// `order`. The sort is stable, so duplicate orders left behind by
    /// corrupt data still produce a deterministic listing.
    pub fn folders_under(&self, parent_id: Option<FolderId>) -> Vec<Folder> {
        let mut result: Vec<Folder> = self
            .folders
            .iter()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect();
        result.sort_by_key(|f| f.order);
        result
    }

    /// Files in the given folder, sorted ascending by `order` (stable).
    pub fn files_in(&self, folder_id: FolderId) -> Vec<File> {
        let mut result: Vec<File> = self
            .files
            .iter()
            .filter(|f| f.folder_id == folder_id)
            .cloned()
            .collect();
        result.sort_by_key(|f| f.order);
        result
    }

    /// Collect every folder id reachable from `root` over parent→child
    /// edges, including `root` itself.
    ///
    /// The walk only follows edges present in the snapshot and never
    /// revisits a collected id, so cyclic or dangling `parent_id` data
    /// cannot make it loop.
    pub fn reachable_folders(&self, root: FolderId) -> HashSet<FolderId> {
        let mut children: HashMap<FolderId, Vec<FolderId>> = HashMap::new();
        for folder in &self.folders {
            if let Some(parent_id) = folder.parent_id {
                children.entry(parent_id).or_default().push(folder.id);
            }
        }

        let mut collected = HashSet::new();
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            if !collected.insert(id) {
                continue;
            }
            if let Some(kids) = children.get(&id) {
                queue.extend(kids.iter().copied());
            }
        }
        collected
    }

    /// Re-pack the `order` of folders under `parent_id` into a dense
    /// 0..N-1 sequence, preserving the current relative order.
    pub fn repack_folder_siblings(&mut self, parent_id: Option<FolderId>) {
        let mut group: Vec<usize> = self
            .folders
            .iter()
            .enumerate()
            .filter(|(_, f)| f.parent_id == parent_id)
            .map(|(i, _)| i)
            .collect();
        group.sort_by_key(|&i| self.folders[i].order);
        for (rank, idx) in group.into_iter().enumerate() {
            self.folders[idx].order = rank as u32;
        }
    }

    /// Re-pack the `order` of files in `folder_id` into a dense 0..N-1
    /// sequence, preserving the current relative order.
    pub fn repack_file_siblings(&mut self, folder_id: FolderId) {
        let mut group: Vec<usize> = self
            .files
            .iter()
            .enumerate()
            .filter(|(_, f)| f.folder_id == folder_id)
            .map(|(i, _)| i)
            .collect();
        group.sort_by_key(|&i| self.files[i].order);
        for (rank, idx) in group.into_iter().enumerate() {
            self.files[idx].order = rank as u32;
        }
    }
}
