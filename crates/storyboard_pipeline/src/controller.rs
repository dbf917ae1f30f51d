//! Stage workflow over one scene collection.
//!
//! The [`WorkflowController`] is the single owner of the collection. Every
//! mutation goes through it, generation tasks report back through its
//! [`GenerationQueue`], and stage changes hand the collection over by value
//! through a [`SnapshotStore`].

use crate::{
    BatchSummary, DefaultsConfig, GenerationQueue, MockAssetGenerator, MockScriptDrafter,
    MockVideoAssembler, PipelineConfig, PlaybackCoordinator, SceneCollection, SeedConfig,
    SilentPlayer, StageReport, StageValidator, merge_outcome,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use storyboard_core::{
    AssetKind, EntryPoint, FinalVideo, FinalVideoBuilder, GenerationParams, ImageSettings, Scene,
    SceneId, ScenePatch, Stage, VideoSettings, VoiceSettings,
};
use storyboard_error::{
    CollectionError, CollectionErrorKind, ConfigError, StoryboardResult, ValidationError,
    ValidationErrorKind, WorkflowError, WorkflowErrorKind,
};
use storyboard_interface::{
    AssetGenerator, MediaPlayer, ScriptDrafter, SnapshotKey, SnapshotStore, VideoAssembler,
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Assembles a [`WorkflowController`] from its collaborators.
///
/// Only the snapshot store is required. The generator, assembler and drafter
/// default to the mock collaborators described by the configuration, and the
/// media player defaults to [`SilentPlayer`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use storyboard_core::{EntryPoint, Stage};
/// use storyboard_pipeline::{PipelineConfig, WorkflowController};
/// use storyboard_storage::InMemorySnapshotStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PipelineConfig::bundled()?;
/// let controller = WorkflowController::builder(config, Arc::new(InMemorySnapshotStore::new()))
///     .start(EntryPoint::Script)
///     .await?;
/// assert_eq!(controller.stage(), Stage::Script);
/// assert_eq!(controller.scenes().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct WorkflowControllerBuilder {
    config: PipelineConfig,
    store: Arc<dyn SnapshotStore>,
    generator: Option<Arc<dyn AssetGenerator>>,
    assembler: Option<Arc<dyn VideoAssembler>>,
    drafter: Option<Arc<dyn ScriptDrafter>>,
    player: Option<Arc<dyn MediaPlayer>>,
}

impl WorkflowControllerBuilder {
    /// Use `generator` for audio, image and video generation.
    pub fn with_generator(mut self, generator: Arc<dyn AssetGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Use `assembler` to produce the final video.
    pub fn with_assembler(mut self, assembler: Arc<dyn VideoAssembler>) -> Self {
        self.assembler = Some(assembler);
        self
    }

    /// Use `drafter` to turn content into scene texts.
    pub fn with_drafter(mut self, drafter: Arc<dyn ScriptDrafter>) -> Self {
        self.drafter = Some(drafter);
        self
    }

    /// Drive playback through `player`.
    pub fn with_player(mut self, player: Arc<dyn MediaPlayer>) -> Self {
        self.player = Some(player);
        self
    }

    /// Start a fresh run at the stage `entry` selects.
    ///
    /// Snapshots left over from an earlier run are deleted first so the new
    /// run never hydrates someone else's scenes.
    #[instrument(skip(self), fields(entry = %entry))]
    pub async fn start(self, entry: EntryPoint) -> StoryboardResult<WorkflowController> {
        let mut controller = self.build(entry)?;
        for key in SnapshotKey::iter() {
            controller.store.delete(key).await?;
        }
        info!(stage = %controller.stage, "Pipeline started");
        Ok(controller)
    }

    /// Resume a run at `stage` from the snapshots already in the store.
    ///
    /// `stage` may not precede the stage `entry` starts at.
    #[instrument(skip(self), fields(entry = %entry, stage = %stage))]
    pub async fn resume(
        self,
        entry: EntryPoint,
        stage: Stage,
    ) -> StoryboardResult<WorkflowController> {
        if stage < entry.entry_stage() {
            return Err(WorkflowError::new(WorkflowErrorKind::BeforeEntry(
                entry.entry_stage().to_string(),
            ))
            .into());
        }

        let mut controller = self.build(entry)?;
        controller.stage = stage;
        controller.final_video = controller.store.load_final().await?;
        if stage != Stage::Preview {
            controller.hydrate(SnapshotKey::on_entry(stage)).await?;
        } else {
            controller.hydrate(SnapshotKey::on_entry(Stage::Finalize)).await?;
        }
        info!(scenes = controller.scenes.len(), "Pipeline resumed");
        Ok(controller)
    }

    fn build(self, entry: EntryPoint) -> StoryboardResult<WorkflowController> {
        let config = self.config;
        let generator = self
            .generator
            .unwrap_or_else(|| Arc::new(MockAssetGenerator::new(config.mock().clone())));
        let assembler = self
            .assembler
            .unwrap_or_else(|| Arc::new(MockVideoAssembler::new(config.mock().clone())));
        let drafter = self.drafter.unwrap_or_else(|| {
            Arc::new(MockScriptDrafter::new(
                config.mock().clone(),
                config.seeds().clone(),
            ))
        });
        let player = self.player.unwrap_or_else(|| Arc::new(SilentPlayer));

        let defaults = config.defaults().clone();
        let voice = defaults.voice_settings()?;
        let aspect_ratio = *defaults.aspect_ratio();

        Ok(WorkflowController {
            entry,
            stage: entry.entry_stage(),
            scenes: SceneCollection::new(),
            store: self.store,
            assembler,
            drafter,
            queue: GenerationQueue::new(generator, config.generation().clone()),
            playback: PlaybackCoordinator::new(player),
            voice,
            video: VideoSettings::default().with_aspect_ratio(aspect_ratio),
            image: ImageSettings::default().with_aspect_ratio(aspect_ratio),
            cover_image: None,
            final_video: None,
            defaults,
            seeds: config.seeds().clone(),
        })
    }
}

/// Drives one scene collection through the pipeline stages.
///
/// Stages only move forward through a passing gate. Moving back is allowed
/// down to the stage the run was entered at. Every stage change hands the
/// collection over through the snapshot store, so the next stage works on a
/// fresh copy.
pub struct WorkflowController {
    entry: EntryPoint,
    stage: Stage,
    scenes: SceneCollection,
    store: Arc<dyn SnapshotStore>,
    assembler: Arc<dyn VideoAssembler>,
    drafter: Arc<dyn ScriptDrafter>,
    queue: GenerationQueue,
    playback: PlaybackCoordinator,
    voice: VoiceSettings,
    video: VideoSettings,
    image: ImageSettings,
    cover_image: Option<String>,
    final_video: Option<FinalVideo>,
    defaults: DefaultsConfig,
    seeds: SeedConfig,
}

impl std::fmt::Debug for WorkflowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowController")
            .field("entry", &self.entry)
            .field("stage", &self.stage)
            .field("scenes", &self.scenes.len())
            .field("queue", &self.queue)
            .field("playback", &self.playback)
            .field("final_video", &self.final_video)
            .finish()
    }
}

impl WorkflowController {
    /// Begin assembling a controller that snapshots into `store`.
    pub fn builder(config: PipelineConfig, store: Arc<dyn SnapshotStore>) -> WorkflowControllerBuilder {
        WorkflowControllerBuilder {
            config,
            store,
            generator: None,
            assembler: None,
            drafter: None,
            player: None,
        }
    }

    /// Entry point recorded at start.
    pub fn entry(&self) -> EntryPoint {
        self.entry
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Current collection.
    pub fn scenes(&self) -> &SceneCollection {
        &self.scenes
    }

    /// Scene by id.
    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Final video, once produced.
    pub fn final_video(&self) -> Option<&FinalVideo> {
        self.final_video.as_ref()
    }

    /// Narration settings used for audio generation.
    pub fn voice_settings(&self) -> &VoiceSettings {
        &self.voice
    }

    /// Clip settings used for video generation and assembly.
    pub fn video_settings(&self) -> &VideoSettings {
        &self.video
    }

    /// Cover image settings used for image generation.
    pub fn image_settings(&self) -> &ImageSettings {
        &self.image
    }

    /// Cover chosen for the final video.
    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    /// Scene and kind currently playing.
    pub fn playing(&self) -> Option<(SceneId, AssetKind)> {
        self.playback.playing()
    }

    /// Gate report for leaving the current stage.
    pub fn report(&self) -> StageReport {
        StageValidator::check(self.stage, &self.scenes)
    }

    /// Whether any generation is still outstanding.
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty() || StageValidator::pending(&self.scenes).is_some()
    }

    /// Whether [`WorkflowController::advance`] would pass its checks now.
    pub fn can_advance(&self) -> bool {
        self.stage != Stage::Preview
            && StageValidator::pending(&self.scenes).is_none()
            && self.report().is_satisfied()
    }

    // Scene editing

    /// Insert an empty scene after `after`, or at the end.
    pub fn insert_scene(&mut self, after: Option<SceneId>) -> SceneId {
        self.scenes.insert(after).id()
    }

    /// Remove a scene, stopping its playback. Missing ids are ignored.
    ///
    /// A generation still running for the scene is left to finish; its
    /// result is discarded when merged.
    pub fn remove_scene(&mut self, id: SceneId) -> Option<Scene> {
        let removed = self.scenes.remove(id)?;
        self.playback.scene_removed(id);
        Some(removed)
    }

    /// Move a scene to `new_index`, clamped to the collection.
    pub fn reorder_scene(&mut self, id: SceneId, new_index: usize) -> bool {
        self.scenes.reorder(id, new_index)
    }

    /// Merge a partial update into a scene.
    ///
    /// Asset references in the patch must belong to the current stage.
    pub fn update_scene(&mut self, id: SceneId, patch: &ScenePatch) -> StoryboardResult<()> {
        for kind in AssetKind::iter() {
            let assigned = match kind {
                AssetKind::Audio => patch.audio_url.is_some(),
                AssetKind::Image => patch.image_url.is_some(),
                AssetKind::Video => patch.video_url.is_some(),
            };
            if assigned {
                self.require_asset_stage(kind, "assign")?;
                self.stop_if_playing(id, kind);
            }
        }
        self.scenes.update(id, patch)?;
        Ok(())
    }

    /// Pick an asset by hand: an uploaded narration or clip, or a library
    /// image.
    ///
    /// Supersedes any generation in flight for the same scene and kind.
    #[instrument(skip(self, url), fields(scene_id = %id, kind = %kind))]
    pub fn select_asset(
        &mut self,
        id: SceneId,
        kind: AssetKind,
        url: impl Into<String>,
    ) -> StoryboardResult<()> {
        self.require_asset_stage(kind, "select")?;
        self.stop_if_playing(id, kind);
        self.scenes.update(id, &ScenePatch::asset(kind, url))?;
        debug!("Asset selected");
        Ok(())
    }

    /// Replace the collection with scenes drafted from `content`.
    ///
    /// Only available at the script stage. Returns the number of scenes.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn draft_script(&mut self, content: &str) -> StoryboardResult<usize> {
        self.require_stage(Stage::Script, "draft a script")?;
        let texts = self.drafter.draft(content).await?;
        self.queue.abandon();
        self.playback.stop();
        self.scenes = if texts.is_empty() {
            SceneCollection::new()
        } else {
            SceneCollection::with_texts(texts)
        };
        info!(scenes = self.scenes.len(), "Script drafted");
        Ok(self.scenes.len())
    }

    // Generation

    /// Start generating `kind` for one scene.
    ///
    /// Returns `false` when the scene is already generating that kind.
    #[instrument(skip(self), fields(scene_id = %id, kind = %kind))]
    pub fn generate(&mut self, id: SceneId, kind: AssetKind) -> StoryboardResult<bool> {
        self.require_asset_stage(kind, "generate")?;
        let params = self.params_for(kind);

        let (Some(index), Some(scene)) = (self.scenes.position(id), self.scenes.get_mut(id)) else {
            let err = CollectionError::new(CollectionErrorKind::SceneNotFound(id.to_string()));
            warn!(error = %err, "Cannot generate for missing scene");
            return Err(err.into());
        };

        if scene.slot(kind).is_generating() {
            debug!("Already generating");
            return Ok(false);
        }

        let missing = match kind {
            AssetKind::Audio if !scene.has_text() => Some("has no text"),
            AssetKind::Video if !scene.has_asset(AssetKind::Image) => Some("has no image"),
            _ => None,
        };
        if let Some(missing) = missing {
            return Err(ValidationError::new(ValidationErrorKind::BatchBlocked {
                kind: kind.to_string(),
                unmet: vec![format!("scene {} {}", index + 1, missing)],
            })
            .into());
        }

        let Some(epoch) = scene.slot_mut(kind).begin() else {
            debug!("Already generating");
            return Ok(false);
        };
        let snapshot = scene.clone();
        self.queue.spawn(snapshot, kind, epoch, params);
        Ok(true)
    }

    /// Start generating `kind` for every scene not already generating it.
    ///
    /// Returns the number of tasks started.
    #[instrument(skip(self), fields(kind = %kind, scenes = self.scenes.len()))]
    pub fn generate_all(&mut self, kind: AssetKind) -> StoryboardResult<usize> {
        self.require_asset_stage(kind, "generate")?;
        StageValidator::check_batch(kind, &self.scenes)?;
        let params = self.params_for(kind);

        let mut started = 0;
        for scene in self.scenes.iter_mut() {
            if let Some(epoch) = scene.slot_mut(kind).begin() {
                self.queue.spawn(scene.clone(), kind, epoch, params.clone());
                started += 1;
            }
        }
        debug!(started, "Batch generation started");
        Ok(started)
    }

    /// Set generation parameters for `kind` from an option map.
    ///
    /// Unrecognized options are ignored.
    pub fn configure(&mut self, kind: AssetKind, options: &Map<String, Value>) -> StoryboardResult<()> {
        match GenerationParams::from_options(&self.params_for(kind), options)? {
            GenerationParams::Audio(voice) => self.voice = voice,
            GenerationParams::Image(image) => self.image = image,
            GenerationParams::Video(video) => self.video = video,
        }
        Ok(())
    }

    /// Merge every finished task without waiting.
    pub fn poll(&mut self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        while let Some(outcome) = self.queue.try_next() {
            summary.record(merge_outcome(&mut self.scenes, outcome));
        }
        summary
    }

    /// Wait until no scene is generating `kind`, merging results as they come.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn settle(&mut self, kind: AssetKind) -> BatchSummary {
        let mut summary = self.poll();
        while self.scenes.iter().any(|scene| scene.slot(kind).is_generating()) {
            let Some(outcome) = self.queue.next().await else {
                break;
            };
            summary.record(merge_outcome(&mut self.scenes, outcome));
        }
        debug!(?summary, "Generation settled");
        summary
    }

    /// Wait for every outstanding task.
    #[instrument(skip(self))]
    pub async fn settle_all(&mut self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        while let Some(outcome) = self.queue.next().await {
            summary.record(merge_outcome(&mut self.scenes, outcome));
        }
        debug!(?summary, "All generation settled");
        summary
    }

    // Settings

    /// Replace the narration settings.
    pub fn set_voice_settings(&mut self, voice: VoiceSettings) -> StoryboardResult<()> {
        voice.validate()?;
        self.voice = voice;
        Ok(())
    }

    /// Replace the clip settings.
    pub fn set_video_settings(&mut self, video: VideoSettings) {
        self.video = video;
    }

    /// Replace the cover image settings.
    pub fn set_image_settings(&mut self, image: ImageSettings) {
        self.image = image;
    }

    /// Choose the cover for the final video, or fall back to the default.
    pub fn set_cover_image(&mut self, cover: Option<String>) {
        self.cover_image = cover.filter(|cover| !cover.trim().is_empty());
    }

    // Playback

    /// Toggle playback of a scene's audio or video.
    ///
    /// Returns whether that element is now playing.
    pub fn toggle_playback(&mut self, id: SceneId, kind: AssetKind) -> StoryboardResult<bool> {
        let Some(scene) = self.scenes.get(id) else {
            return Err(CollectionError::new(CollectionErrorKind::SceneNotFound(id.to_string())).into());
        };
        self.playback.toggle(scene, kind)
    }

    /// The player reports that an element finished on its own.
    pub fn media_ended(&mut self, id: SceneId, kind: AssetKind) {
        self.playback.media_ended(id, kind);
    }

    /// Stop whatever is playing.
    pub fn stop_playback(&mut self) {
        self.playback.stop();
    }

    // Navigation

    /// Move to the next stage.
    ///
    /// Rejected while a generation is in flight or while the current gate
    /// fails. Leaving the finalize stage assembles and stores the final video.
    #[instrument(skip(self), fields(stage = %self.stage))]
    pub async fn advance(&mut self) -> StoryboardResult<Stage> {
        let Some(next) = self.stage.next() else {
            return Err(WorkflowError::new(WorkflowErrorKind::AlreadyComplete).into());
        };

        self.poll();
        if let Some((index, kind)) = StageValidator::pending(&self.scenes) {
            return Err(ValidationError::new(ValidationErrorKind::GenerationPending {
                index,
                kind: kind.to_string(),
            })
            .into());
        }
        self.report().into_result()?;

        if let Some(key) = SnapshotKey::on_exit(self.stage) {
            self.store.save(key, self.scenes.scenes()).await?;
        }
        if self.stage == Stage::Finalize {
            self.finalize().await?;
        }

        self.queue.abandon();
        self.playback.stop();
        let previous = self.stage;
        self.stage = next;
        if next != Stage::Preview {
            self.hydrate(SnapshotKey::on_entry(next)).await?;
        }
        info!(from = %previous, to = %next, scenes = self.scenes.len(), "Stage advanced");
        Ok(next)
    }

    /// Move to the previous stage, discarding unsaved edits of this one.
    ///
    /// The previous stage gets back the scenes it handed over when it was
    /// left. Going back past the entry stage is rejected.
    #[instrument(skip(self), fields(stage = %self.stage))]
    pub async fn back(&mut self) -> StoryboardResult<Stage> {
        let previous = match self.stage.previous() {
            Some(previous) if self.stage != self.entry.entry_stage() => previous,
            _ => {
                return Err(WorkflowError::new(WorkflowErrorKind::BeforeEntry(
                    self.stage.to_string(),
                ))
                .into());
            }
        };

        self.queue.abandon();
        self.playback.stop();
        let from = self.stage;
        self.stage = previous;
        let key = SnapshotKey::on_exit(previous).or(SnapshotKey::on_entry(previous));
        self.hydrate(key).await?;
        info!(from = %from, to = %previous, scenes = self.scenes.len(), "Stage went back");
        Ok(previous)
    }

    /// Rename the final video and store the new title.
    #[instrument(skip(self, title))]
    pub async fn rename_final_video(&mut self, title: &str) -> StoryboardResult<&FinalVideo> {
        let title = title.trim();
        if title.is_empty() {
            return Err(WorkflowError::new(WorkflowErrorKind::EmptyTitle).into());
        }
        let Some(video) = self.final_video.as_mut() else {
            return Err(WorkflowError::new(WorkflowErrorKind::NotFinalized).into());
        };
        video.rename(title);
        self.store.save_final(video).await?;
        debug!(title, "Final video renamed");
        Ok(video)
    }

    async fn finalize(&mut self) -> StoryboardResult<()> {
        let url = self
            .assembler
            .assemble(self.scenes.scenes(), &self.video)
            .await?;
        let created_at = chrono::Utc::now();
        let cover = self
            .cover_image
            .clone()
            .unwrap_or_else(|| self.defaults.cover_image().clone());
        let video = FinalVideoBuilder::default()
            .title(FinalVideo::default_title(created_at))
            .url(url)
            .cover_image(cover)
            .created_at(created_at)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build final video: {}", e)))?;
        self.store.save_final(&video).await?;
        info!(url = %video.url(), "Final video assembled");
        self.final_video = Some(video);
        Ok(())
    }

    async fn hydrate(&mut self, key: Option<SnapshotKey>) -> StoryboardResult<()> {
        let stored = match key {
            Some(key) => self.store.load(key).await?,
            None => None,
        };
        self.scenes = match stored {
            Some(scenes) => SceneCollection::from_scenes(scenes),
            None => {
                debug!(stage = %self.stage, "No snapshot, seeding default scenes");
                self.seed(self.stage)
            }
        };
        Ok(())
    }

    fn seed(&self, stage: Stage) -> SceneCollection {
        if stage == Stage::Script || self.seeds.script().is_empty() {
            return SceneCollection::new();
        }
        let mut scenes = SceneCollection::with_texts(self.seeds.script().iter().cloned());
        if stage >= Stage::Video {
            if let Some(url) = self.seeds.audio_url() {
                for scene in scenes.iter_mut() {
                    scene.apply(&ScenePatch::asset(AssetKind::Audio, url.clone()));
                }
            }
        }
        scenes
    }

    fn params_for(&self, kind: AssetKind) -> GenerationParams {
        match kind {
            AssetKind::Audio => self.voice.clone().into(),
            AssetKind::Image => self.image.into(),
            AssetKind::Video => self.video.into(),
        }
    }

    fn stop_if_playing(&mut self, id: SceneId, kind: AssetKind) {
        if self.playback.is_playing(id, kind) {
            self.playback.stop();
        }
    }

    fn require_stage(&self, stage: Stage, action: &str) -> StoryboardResult<()> {
        if self.stage != stage {
            return Err(WorkflowError::new(WorkflowErrorKind::WrongStage {
                action: action.to_string(),
                stage: self.stage.to_string(),
            })
            .into());
        }
        Ok(())
    }

    fn require_asset_stage(&self, kind: AssetKind, verb: &str) -> StoryboardResult<()> {
        let stage = match kind {
            AssetKind::Audio => Stage::Audio,
            AssetKind::Image | AssetKind::Video => Stage::Video,
        };
        self.require_stage(stage, &format!("{} {}", verb, kind))
    }
}
