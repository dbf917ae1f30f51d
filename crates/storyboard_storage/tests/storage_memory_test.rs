//! Tests for the in-memory snapshot store.

use storyboard_core::{Scene, ScenePatch};
use storyboard_interface::{SnapshotKey, SnapshotStore};
use storyboard_storage::InMemorySnapshotStore;

#[tokio::test]
async fn test_load_returns_independent_copy() {
    let store = InMemorySnapshotStore::new();
    let mut scenes = vec![Scene::new("First"), Scene::new("Second")];
    store.save(SnapshotKey::PostScript, &scenes).await.unwrap();

    // Editing the saved collection afterwards does not leak into the snapshot
    scenes[0].apply(&ScenePatch::default().text("Edited"));

    let loaded = store.load(SnapshotKey::PostScript).await.unwrap().unwrap();
    assert_eq!(loaded[0].text(), "First");
    assert_eq!(loaded[0].id(), scenes[0].id());
}

#[tokio::test]
async fn test_save_replaces_previous_snapshot() {
    let store = InMemorySnapshotStore::new();
    store
        .save(SnapshotKey::PostAudio, &[Scene::new("old")])
        .await
        .unwrap();
    store
        .save(SnapshotKey::PostAudio, &[Scene::new("new"), Scene::new("newer")])
        .await
        .unwrap();

    let loaded = store.load(SnapshotKey::PostAudio).await.unwrap().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_clones_share_storage() {
    let store = InMemorySnapshotStore::new();
    let other = store.clone();
    store
        .save(SnapshotKey::PostVideo, &[Scene::new("shared")])
        .await
        .unwrap();

    assert!(other.load(SnapshotKey::PostVideo).await.unwrap().is_some());

    other.delete(SnapshotKey::PostVideo).await.unwrap();
    assert!(store.is_empty().await);
}
