//! Trait definitions for the collaborators the pipeline drives.

use async_trait::async_trait;
use storyboard_core::{
    Album, AssetKind, FinalVideo, GenerationParams, LibraryImage, Scene, SceneId, VideoSettings,
};
use storyboard_error::StoryboardResult;

use crate::SnapshotKey;

/// Produces one asset for one scene.
///
/// Implementations never see the scene collection, only a copy of the scene
/// the asset is for. Errors are reported per call and never affect sibling
/// scenes.
#[async_trait]
pub trait AssetGenerator: Send + Sync {
    /// Generate an asset of `kind` for `scene` and return its reference.
    async fn generate(
        &self,
        scene: &Scene,
        kind: AssetKind,
        params: &GenerationParams,
    ) -> StoryboardResult<String>;

    /// Generator name for logging (e.g., "mock", "elevenlabs").
    fn name(&self) -> &str;
}

/// Drafts scene texts from free-form source content.
#[async_trait]
pub trait ScriptDrafter: Send + Sync {
    /// Split or summarize `content` into one text per scene.
    async fn draft(&self, content: &str) -> StoryboardResult<Vec<String>>;
}

/// Joins finished scenes into the final video.
#[async_trait]
pub trait VideoAssembler: Send + Sync {
    /// Assemble the clips of `scenes`, in order, and return the video reference.
    async fn assemble(&self, scenes: &[Scene], settings: &VideoSettings)
    -> StoryboardResult<String>;
}

/// Persists stage handoff snapshots.
///
/// A missing snapshot is `Ok(None)`, not an error.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Save the scenes under `key`, replacing any previous snapshot.
    async fn save(&self, key: SnapshotKey, scenes: &[Scene]) -> StoryboardResult<()>;

    /// Load the scenes saved under `key`.
    async fn load(&self, key: SnapshotKey) -> StoryboardResult<Option<Vec<Scene>>>;

    /// Save the final video under [`SnapshotKey::FinalVideo`].
    async fn save_final(&self, video: &FinalVideo) -> StoryboardResult<()>;

    /// Load the final video, if one was saved.
    async fn load_final(&self) -> StoryboardResult<Option<FinalVideo>>;

    /// Remove the snapshot under `key`. Removing a missing key succeeds.
    async fn delete(&self, key: SnapshotKey) -> StoryboardResult<()>;
}

/// Album library used for cover image selection.
#[async_trait]
pub trait ImageLibrary: Send + Sync {
    /// All albums, in display order.
    async fn list_albums(&self) -> StoryboardResult<Vec<Album>>;

    /// Images of one album.
    async fn list_images(&self, album_id: &str) -> StoryboardResult<Vec<LibraryImage>>;

    /// Create an empty album whose id is derived from `name`.
    async fn create_album(&self, name: &str) -> StoryboardResult<Album>;

    /// Change an album's display name. The id stays the same.
    async fn rename_album(&self, album_id: &str, name: &str) -> StoryboardResult<Album>;

    /// Delete an album and its images.
    async fn delete_album(&self, album_id: &str) -> StoryboardResult<()>;

    /// Add an already persisted image to an album.
    async fn add_image(&self, album_id: &str, url: &str) -> StoryboardResult<LibraryImage>;

    /// Remove an image from an album.
    async fn remove_image(&self, album_id: &str, image_id: &str) -> StoryboardResult<()>;
}

/// The media element the playback coordinator drives.
pub trait MediaPlayer: Send + Sync {
    /// Begin playing `url` for a scene.
    fn start(&self, scene: SceneId, kind: AssetKind, url: &str) -> StoryboardResult<()>;

    /// Stop playing a scene's media.
    fn stop(&self, scene: SceneId, kind: AssetKind);
}
