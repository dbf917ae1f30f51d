//! Exclusive media playback across a collection.

use std::sync::Arc;
use storyboard_core::{AssetKind, Scene, SceneId};
use storyboard_error::{PlaybackError, PlaybackErrorKind, StoryboardResult};
use storyboard_interface::MediaPlayer;
use tracing::{debug, instrument};

/// Media player that plays nothing, for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl MediaPlayer for SilentPlayer {
    fn start(&self, scene: SceneId, kind: AssetKind, url: &str) -> StoryboardResult<()> {
        debug!(scene_id = %scene, kind = %kind, url, "Silent playback");
        Ok(())
    }

    fn stop(&self, _scene: SceneId, _kind: AssetKind) {}
}

/// Keeps at most one audio or video element playing.
///
/// Starting a second element stops the first before the second starts.
pub struct PlaybackCoordinator {
    player: Arc<dyn MediaPlayer>,
    playing: Option<(SceneId, AssetKind)>,
}

impl std::fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("playing", &self.playing)
            .finish()
    }
}

impl PlaybackCoordinator {
    /// Coordinate playback on `player`.
    pub fn new(player: Arc<dyn MediaPlayer>) -> Self {
        Self {
            player,
            playing: None,
        }
    }

    /// Scene and kind currently playing.
    pub fn playing(&self) -> Option<(SceneId, AssetKind)> {
        self.playing
    }

    /// Whether `scene` is currently playing `kind`.
    pub fn is_playing(&self, scene: SceneId, kind: AssetKind) -> bool {
        self.playing == Some((scene, kind))
    }

    /// Toggle playback of a scene's asset.
    ///
    /// Toggling the element that is playing stops it. Any other element is
    /// stopped first, then the requested one starts. Returns whether the
    /// requested element is now playing.
    #[instrument(skip(self, scene), fields(scene_id = %scene.id(), kind = %kind))]
    pub fn toggle(&mut self, scene: &Scene, kind: AssetKind) -> StoryboardResult<bool> {
        if self.is_playing(scene.id(), kind) {
            self.stop();
            return Ok(false);
        }
        self.play(scene, kind)?;
        Ok(true)
    }

    /// Start playing a scene's asset, stopping whatever plays now.
    #[instrument(skip(self, scene), fields(scene_id = %scene.id(), kind = %kind))]
    pub fn play(&mut self, scene: &Scene, kind: AssetKind) -> StoryboardResult<()> {
        if !kind.is_playable() {
            return Err(PlaybackError::new(PlaybackErrorKind::NotPlayable(kind.to_string())).into());
        }
        let url = scene.slot(kind).url().ok_or_else(|| {
            PlaybackError::new(PlaybackErrorKind::NoMedia {
                scene: scene.id().to_string(),
                kind: kind.to_string(),
            })
        })?;

        if self.is_playing(scene.id(), kind) {
            return Ok(());
        }
        self.stop();

        self.player.start(scene.id(), kind, url)?;
        self.playing = Some((scene.id(), kind));
        debug!("Playback started");
        Ok(())
    }

    /// Stop whatever is playing.
    pub fn stop(&mut self) {
        if let Some((scene, kind)) = self.playing.take() {
            self.player.stop(scene, kind);
            debug!(scene_id = %scene, kind = %kind, "Playback stopped");
        }
    }

    /// The media element for `scene` finished on its own.
    pub fn media_ended(&mut self, scene: SceneId, kind: AssetKind) {
        if self.is_playing(scene, kind) {
            self.playing = None;
            debug!(scene_id = %scene, kind = %kind, "Playback ended");
        }
    }

    /// A scene left the collection; stop it if it was playing.
    pub fn scene_removed(&mut self, scene: SceneId) {
        if matches!(self.playing, Some((playing, _)) if playing == scene) {
            self.stop();
        }
    }
}
