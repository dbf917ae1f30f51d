//! In-memory snapshot store.

use crate::codec;
use std::collections::HashMap;
use std::sync::Arc;
use storyboard_core::{FinalVideo, Scene};
use storyboard_error::StoryboardResult;
use storyboard_interface::{SnapshotKey, SnapshotStore};
use tokio::sync::RwLock;

/// Snapshot store that lives as long as the process.
///
/// Snapshots are kept in serialized form, so a load never aliases the scenes
/// that were saved. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshots: Arc<RwLock<HashMap<SnapshotKey, String>>>,
}

impl InMemorySnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    /// Whether nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    #[tracing::instrument(skip(self, scenes), fields(key = %key, scenes = scenes.len()))]
    async fn save(&self, key: SnapshotKey, scenes: &[Scene]) -> StoryboardResult<()> {
        let raw = codec::encode(scenes)?;
        self.snapshots.write().await.insert(key, raw);
        tracing::debug!("Saved snapshot");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn load(&self, key: SnapshotKey) -> StoryboardResult<Option<Vec<Scene>>> {
        let snapshots = self.snapshots.read().await;
        match snapshots.get(&key) {
            Some(raw) => codec::decode_scenes(key, raw).map(Some),
            None => {
                tracing::debug!("No snapshot stored");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip(self, video), fields(title = %video.title()))]
    async fn save_final(&self, video: &FinalVideo) -> StoryboardResult<()> {
        let raw = codec::encode(video)?;
        self.snapshots
            .write()
            .await
            .insert(SnapshotKey::FinalVideo, raw);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn load_final(&self) -> StoryboardResult<Option<FinalVideo>> {
        let snapshots = self.snapshots.read().await;
        snapshots
            .get(&SnapshotKey::FinalVideo)
            .map(|raw| codec::decode(SnapshotKey::FinalVideo, raw))
            .transpose()
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn delete(&self, key: SnapshotKey) -> StoryboardResult<()> {
        self.snapshots.write().await.remove(&key);
        Ok(())
    }
}
