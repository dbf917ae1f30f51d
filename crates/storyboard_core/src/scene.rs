//! Scene entity and partial updates.

use crate::{AssetKind, AssetSlot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, immutable scene identifier.
///
/// Backed by a random UUID so an id is never handed out twice, even after the
/// scene that carried it was removed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct SceneId(Uuid);

impl SceneId {
    /// Allocate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for SceneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid scene id '{}': {}", s, e))
    }
}

/// One unit of the storyboard: narration text plus its audio, image and
/// video slots.
///
/// # Examples
///
/// ```
/// use storyboard_core::{AssetKind, Scene};
///
/// let scene = Scene::new("Introduction to the topic.");
/// assert_eq!(scene.text(), "Introduction to the topic.");
/// assert!(!scene.has_asset(AssetKind::Audio));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    id: SceneId,
    #[serde(default)]
    text: String,
    #[serde(default)]
    audio: AssetSlot,
    #[serde(default)]
    image: AssetSlot,
    #[serde(default)]
    video: AssetSlot,
}

impl Scene {
    /// Create a scene with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: SceneId::new(),
            text: text.into(),
            audio: AssetSlot::default(),
            image: AssetSlot::default(),
            video: AssetSlot::default(),
        }
    }

    /// Identifier of this scene.
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Narration or transcript text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the narration text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether the text has any non-whitespace content.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Slot for the given asset kind.
    pub fn slot(&self, kind: AssetKind) -> &AssetSlot {
        match kind {
            AssetKind::Audio => &self.audio,
            AssetKind::Image => &self.image,
            AssetKind::Video => &self.video,
        }
    }

    /// Mutable slot for the given asset kind.
    pub fn slot_mut(&mut self, kind: AssetKind) -> &mut AssetSlot {
        match kind {
            AssetKind::Audio => &mut self.audio,
            AssetKind::Image => &mut self.image,
            AssetKind::Video => &mut self.video,
        }
    }

    /// Whether a non-empty asset of `kind` is present.
    pub fn has_asset(&self, kind: AssetKind) -> bool {
        self.slot(kind).has_asset()
    }

    /// Narration asset reference.
    pub fn audio_url(&self) -> Option<&str> {
        self.audio.url()
    }

    /// Cover image reference.
    pub fn image_url(&self) -> Option<&str> {
        self.image.url()
    }

    /// Rendered clip reference.
    pub fn video_url(&self) -> Option<&str> {
        self.video.url()
    }

    /// Merge a partial update into this scene.
    ///
    /// Asset references in the patch count as manual assignments and
    /// supersede any in-flight generation of that kind.
    pub fn apply(&mut self, patch: &ScenePatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(url) = &patch.audio_url {
            self.audio.assign(url.clone());
        }
        if let Some(url) = &patch.image_url {
            self.image.assign(url.clone());
        }
        if let Some(url) = &patch.video_url {
            self.video.assign(url.clone());
        }
    }

    /// Normalize all slots after reading the scene back from a snapshot.
    pub fn restore(&mut self) {
        self.audio.restore();
        self.image.restore();
        self.video.restore();
    }
}

/// Partial field set merged into a scene by `update`.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Scene, ScenePatch};
///
/// let mut scene = Scene::new("");
/// scene.apply(&ScenePatch::default().text("Hello").image_url("/cover.png"));
/// assert_eq!(scene.text(), "Hello");
/// assert_eq!(scene.image_url(), Some("/cover.png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_setters::Setters)]
#[setters(strip_option, into)]
pub struct ScenePatch {
    /// New narration text
    #[serde(default)]
    pub text: Option<String>,
    /// Uploaded narration reference
    #[serde(default)]
    pub audio_url: Option<String>,
    /// Selected cover image reference
    #[serde(default)]
    pub image_url: Option<String>,
    /// Uploaded clip reference
    #[serde(default)]
    pub video_url: Option<String>,
}

impl ScenePatch {
    /// Patch that assigns a single asset kind.
    pub fn asset(kind: AssetKind, url: impl Into<String>) -> Self {
        let url = url.into();
        match kind {
            AssetKind::Audio => Self::default().audio_url(url),
            AssetKind::Image => Self::default().image_url(url),
            AssetKind::Video => Self::default().video_url(url),
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.audio_url.is_none()
            && self.image_url.is_none()
            && self.video_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = Scene::new("a");
        let b = Scene::new("a");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn scene_id_round_trips_through_display() {
        let id = SceneId::new();
        let parsed: SceneId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn whitespace_text_is_not_text() {
        let scene = Scene::new("   ");
        assert!(!scene.has_text());
    }

    #[test]
    fn patch_asset_targets_one_kind() {
        let mut scene = Scene::new("x");
        scene.apply(&ScenePatch::asset(AssetKind::Video, "clip.mp4"));
        assert_eq!(scene.video_url(), Some("clip.mp4"));
        assert_eq!(scene.audio_url(), None);
        assert_eq!(scene.text(), "x");
    }
}
