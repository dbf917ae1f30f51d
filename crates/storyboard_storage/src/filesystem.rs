//! Filesystem-backed snapshot store.

use crate::codec;
use std::path::{Path, PathBuf};
use storyboard_core::{FinalVideo, Scene};
use storyboard_error::{PersistenceError, PersistenceErrorKind, StoryboardResult};
use storyboard_interface::{SnapshotKey, SnapshotStore};

/// Snapshot store writing one JSON file per key.
///
/// # Example Structure
///
/// ```text
/// ~/.local/state/storyboard/
/// ├── post-script.json
/// ├── post-audio.json
/// ├── post-video.json
/// └── final-video.json
/// ```
///
/// Writes go to a `.tmp` sibling first and are renamed into place, so a
/// reader never observes a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileSystemSnapshotStore {
    base_path: PathBuf,
}

impl FileSystemSnapshotStore {
    /// Create a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StoryboardResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created snapshot directory");
        Ok(Self { base_path })
    }

    /// Directory snapshots are written to.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: SnapshotKey) -> PathBuf {
        self.base_path.join(format!("{}.json", key.as_str()))
    }

    async fn write(&self, key: SnapshotKey, contents: String) -> StoryboardResult<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        tokio::fs::write(&temp_path, contents).await.map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Write(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Write(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), "Wrote snapshot file");
        Ok(())
    }

    async fn read(&self, key: SnapshotKey) -> StoryboardResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No snapshot file");
                Ok(None)
            }
            Err(e) => Err(PersistenceError::new(PersistenceErrorKind::Read(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}

#[async_trait::async_trait]
impl SnapshotStore for FileSystemSnapshotStore {
    #[tracing::instrument(skip(self, scenes), fields(key = %key, scenes = scenes.len()))]
    async fn save(&self, key: SnapshotKey, scenes: &[Scene]) -> StoryboardResult<()> {
        let raw = codec::encode(scenes)?;
        self.write(key, raw).await
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn load(&self, key: SnapshotKey) -> StoryboardResult<Option<Vec<Scene>>> {
        match self.read(key).await? {
            Some(raw) => codec::decode_scenes(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, video), fields(title = %video.title()))]
    async fn save_final(&self, video: &FinalVideo) -> StoryboardResult<()> {
        let raw = codec::encode(video)?;
        self.write(SnapshotKey::FinalVideo, raw).await
    }

    #[tracing::instrument(skip(self))]
    async fn load_final(&self) -> StoryboardResult<Option<FinalVideo>> {
        match self.read(SnapshotKey::FinalVideo).await? {
            Some(raw) => codec::decode(SnapshotKey::FinalVideo, &raw).map(Some),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn delete(&self, key: SnapshotKey) -> StoryboardResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted snapshot file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::new(PersistenceErrorKind::Delete(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}
