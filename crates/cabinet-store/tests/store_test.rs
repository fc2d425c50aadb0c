//! Integration tests for the tree store over the in-memory and local
//! snapshot backends.

use std::sync::Arc;

use cabinet_core::error::ErrorKind;
use cabinet_core::traits::backend::SnapshotBackend;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::file::CreateFile;
use cabinet_entity::folder::{CreateFolder, Folder};
use cabinet_entity::order::ReorderItem;
use cabinet_entity::snapshot::Snapshot;
use cabinet_persist::{LocalSnapshotBackend, MemorySnapshotBackend};
use cabinet_store::TreeStore;

fn memory_store() -> (TreeStore, Arc<MemorySnapshotBackend>) {
    let backend = Arc::new(MemorySnapshotBackend::new());
    (TreeStore::new(backend.clone()), backend)
}

async fn create_root(store: &TreeStore, name: &str) -> Folder {
    store
        .create_folder(CreateFolder {
            name: name.to_string(),
            parent_id: None,
        })
        .await
        .unwrap()
}

async fn create_child(store: &TreeStore, name: &str, parent_id: FolderId) -> Folder {
    store
        .create_folder(CreateFolder {
            name: name.to_string(),
            parent_id: Some(parent_id),
        })
        .await
        .unwrap()
}

fn file_in(folder_id: FolderId, name: &str) -> CreateFile {
    CreateFile {
        name: name.to_string(),
        folder_id,
        remark: None,
        location: format!("/uploads/{name}"),
    }
}

#[tokio::test]
async fn folder_orders_form_a_dense_sequence() {
    let (store, _) = memory_store();

    for name in ["a", "b", "c", "d"] {
        create_root(&store, name).await;
    }
    let parent = create_root(&store, "parent").await;
    create_child(&store, "nested", parent.id).await;

    let roots = store.list_folders(None).await.unwrap();
    let orders: Vec<u32> = roots.iter().map(|f| f.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4]);

    // The nested group counts from zero on its own.
    let nested = store.list_folders(Some(parent.id)).await.unwrap();
    assert_eq!(nested[0].order, 0);
}

#[tokio::test]
async fn file_orders_form_a_dense_sequence() {
    let (store, _) = memory_store();
    let folder = create_root(&store, "docs").await;

    for name in ["one.pdf", "two.pdf", "three.pdf"] {
        store.create_file(file_in(folder.id, name)).await.unwrap();
    }

    let files = store.list_files(folder.id).await.unwrap();
    let orders: Vec<u32> = files.iter().map(|f| f.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(files[0].name, "one.pdf");
}

#[tokio::test]
async fn empty_names_are_rejected() {
    let (store, _) = memory_store();
    let folder = create_root(&store, "docs").await;

    let err = store
        .create_folder(CreateFolder {
            name: "   ".to_string(),
            parent_id: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = store
        .create_file(file_in(folder.id, ""))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    assert_eq!(store.list_folders(None).await.unwrap().len(), 1);
    assert!(store.list_files(folder.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn cascade_delete_removes_the_whole_subtree() {
    let (store, backend) = memory_store();

    let root = create_root(&store, "root").await;
    let child = create_child(&store, "child", root.id).await;
    let grandchild = create_child(&store, "grandchild", child.id).await;
    let bystander = create_root(&store, "bystander").await;

    store.create_file(file_in(root.id, "r.txt")).await.unwrap();
    store
        .create_file(file_in(grandchild.id, "g.txt"))
        .await
        .unwrap();
    let kept = store
        .create_file(file_in(bystander.id, "kept.txt"))
        .await
        .unwrap();

    store.delete_folder(root.id).await.unwrap();

    let roots = store.list_folders(None).await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].id, bystander.id);

    assert!(store.list_files(root.id).await.unwrap().is_empty());
    assert!(store.list_files(grandchild.id).await.unwrap().is_empty());
    assert_eq!(store.list_files(bystander.id).await.unwrap()[0].id, kept.id);

    // Nothing from the subtree survives in the raw snapshot either.
    let raw = backend.load().await.unwrap();
    assert_eq!(raw.folders.len(), 1);
    assert_eq!(raw.files.len(), 1);
}

#[tokio::test]
async fn create_two_roots_upload_then_delete_first() {
    let (store, _) = memory_store();

    let a = create_root(&store, "A").await;
    let b = create_root(&store, "B").await;
    assert_eq!(a.order, 0);
    assert_eq!(b.order, 1);

    store.create_file(file_in(a.id, "doc1")).await.unwrap();
    store.delete_folder(a.id).await.unwrap();

    let roots = store.list_folders(None).await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].id, b.id);
    // The survivor moved up into the vacated slot.
    assert_eq!(roots[0].order, 0);

    assert!(store.list_files(a.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_folder_terminates_on_cyclic_parents() {
    let (store, backend) = memory_store();

    let healthy = create_root(&store, "healthy").await;

    // Inject a malformed snapshot where a and b are each other's parent.
    let mut raw = backend.load().await.unwrap();
    let a_id = FolderId::new();
    let b_id = FolderId::new();
    raw.folders.push(Folder {
        id: a_id,
        name: "a".to_string(),
        parent_id: Some(b_id),
        order: 0,
    });
    raw.folders.push(Folder {
        id: b_id,
        name: "b".to_string(),
        parent_id: Some(a_id),
        order: 0,
    });
    backend.save(&raw).await.unwrap();

    store.delete_folder(a_id).await.unwrap();

    let remaining = backend.load().await.unwrap();
    assert_eq!(remaining.folders.len(), 1);
    assert_eq!(remaining.folders[0].id, healthy.id);
}

#[tokio::test]
async fn deleting_missing_ids_is_a_noop() {
    let (store, backend) = memory_store();
    let folder = create_root(&store, "docs").await;
    store.create_file(file_in(folder.id, "a.txt")).await.unwrap();

    let before = backend.load().await.unwrap();
    store.delete_folder(FolderId::new()).await.unwrap();
    store.delete_file(FileId::new()).await.unwrap();
    let after = backend.load().await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn delete_file_repacks_the_remaining_orders() {
    let (store, _) = memory_store();
    let folder = create_root(&store, "docs").await;

    store.create_file(file_in(folder.id, "a")).await.unwrap();
    let middle = store.create_file(file_in(folder.id, "b")).await.unwrap();
    store.create_file(file_in(folder.id, "c")).await.unwrap();

    store.delete_file(middle.id).await.unwrap();

    let files = store.list_files(folder.id).await.unwrap();
    assert_eq!(
        files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["a", "c"]
    );
    assert_eq!(files.iter().map(|f| f.order).collect::<Vec<_>>(), vec![0, 1]);
}

#[tokio::test]
async fn delete_folder_repacks_the_former_siblings() {
    let (store, _) = memory_store();

    create_root(&store, "a").await;
    let b = create_root(&store, "b").await;
    create_root(&store, "c").await;

    store.delete_folder(b.id).await.unwrap();

    let roots = store.list_folders(None).await.unwrap();
    assert_eq!(
        roots.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["a", "c"]
    );
    assert_eq!(roots.iter().map(|f| f.order).collect::<Vec<_>>(), vec![0, 1]);
}

#[tokio::test]
async fn reorder_folders_swaps_the_listing() {
    let (store, _) = memory_store();

    let a = create_root(&store, "a").await;
    let b = create_root(&store, "b").await;

    store
        .reorder_folders(&[
            ReorderItem { id: a.id, order: 1 },
            ReorderItem { id: b.id, order: 0 },
        ])
        .await
        .unwrap();

    let roots = store.list_folders(None).await.unwrap();
    assert_eq!(
        roots.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["b", "a"]
    );
    assert_eq!(roots.iter().map(|f| f.order).collect::<Vec<_>>(), vec![0, 1]);
}

#[tokio::test]
async fn reorder_normalizes_gaps_and_duplicates() {
    let (store, _) = memory_store();

    let a = create_root(&store, "a").await;
    let b = create_root(&store, "b").await;
    create_root(&store, "c").await;

    // Sparse and colliding targets still settle into a dense sequence.
    store
        .reorder_folders(&[
            ReorderItem { id: a.id, order: 17 },
            ReorderItem { id: b.id, order: 5 },
        ])
        .await
        .unwrap();

    let roots = store.list_folders(None).await.unwrap();
    assert_eq!(
        roots.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["c", "b", "a"]
    );
    assert_eq!(
        roots.iter().map(|f| f.order).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[tokio::test]
async fn reorder_ignores_unknown_ids() {
    let (store, _) = memory_store();

    let a = create_root(&store, "a").await;
    let b = create_root(&store, "b").await;

    store
        .reorder_folders(&[
            ReorderItem {
                id: FolderId::new(),
                order: 9,
            },
            ReorderItem { id: a.id, order: 1 },
            ReorderItem { id: b.id, order: 0 },
        ])
        .await
        .unwrap();

    let roots = store.list_folders(None).await.unwrap();
    assert_eq!(
        roots.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["b", "a"]
    );
}

#[tokio::test]
async fn reorder_files_swaps_the_listing() {
    let (store, _) = memory_store();
    let folder = create_root(&store, "docs").await;

    let first = store.create_file(file_in(folder.id, "first")).await.unwrap();
    let second = store
        .create_file(file_in(folder.id, "second"))
        .await
        .unwrap();

    store
        .reorder_files(&[
            ReorderItem {
                id: first.id,
                order: 1,
            },
            ReorderItem {
                id: second.id,
                order: 0,
            },
        ])
        .await
        .unwrap();

    let files = store.list_files(folder.id).await.unwrap();
    assert_eq!(
        files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["second", "first"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_file_creates_get_distinct_orders() {
    let (store, _) = memory_store();
    let folder = create_root(&store, "shared").await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        let folder_id = folder.id;
        handles.push(tokio::spawn(async move {
            store
                .create_file(file_in(folder_id, &format!("upload-{i}")))
                .await
                .unwrap()
        }));
    }

    let mut orders = Vec::new();
    for handle in handles {
        orders.push(handle.await.unwrap().order);
    }
    orders.sort_unstable();

    // No lost updates: every caller got its own slot.
    assert_eq!(orders, (0..8).collect::<Vec<u32>>());
    assert_eq!(store.list_files(folder.id).await.unwrap().len(), 8);
}

#[tokio::test]
async fn reset_clears_everything() {
    let (store, backend) = memory_store();
    let folder = create_root(&store, "docs").await;
    store.create_file(file_in(folder.id, "a.txt")).await.unwrap();

    store.reset().await.unwrap();

    assert!(store.list_folders(None).await.unwrap().is_empty());
    assert_eq!(backend.load().await.unwrap(), Snapshot::empty());
}

#[tokio::test]
async fn saving_a_loaded_snapshot_changes_nothing_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let backend = Arc::new(
        LocalSnapshotBackend::new(path.to_str().unwrap())
            .await
            .unwrap(),
    );
    let store = TreeStore::new(backend.clone());

    let folder = create_root(&store, "docs").await;
    store.create_file(file_in(folder.id, "a.txt")).await.unwrap();

    let before = tokio::fs::read(&path).await.unwrap();
    let snapshot = backend.load().await.unwrap();
    backend.save(&snapshot).await.unwrap();
    let after = tokio::fs::read(&path).await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn local_backend_persists_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let folder = {
        let backend = Arc::new(
            LocalSnapshotBackend::new(path.to_str().unwrap())
                .await
                .unwrap(),
        );
        let store = TreeStore::new(backend);
        let folder = create_root(&store, "durable").await;
        store
            .create_file(file_in(folder.id, "kept.txt"))
            .await
            .unwrap();
        folder
    };

    let backend = Arc::new(
        LocalSnapshotBackend::new(path.to_str().unwrap())
            .await
            .unwrap(),
    );
    let store = TreeStore::new(backend);

    let roots = store.list_folders(None).await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].name, "durable");
    assert_eq!(store.list_files(folder.id).await.unwrap()[0].name, "kept.txt");
}
