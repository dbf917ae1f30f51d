//! Pipeline run command handler.

use std::path::PathBuf;
use std::sync::Arc;
use storyboard::{
    AspectRatio, AssetKind, ConfigError, EntryPoint, FileSystemSnapshotStore, FinalVideo,
    ImageLibrary, InMemorySnapshotStore, PipelineConfig, ScenePatch, SnapshotStore, Stage,
    StoryboardResult, VoiceSettingsBuilder, WorkflowController, WorkflowError, WorkflowErrorKind,
    paragraphs,
};
use tracing::{info, instrument, warn};

/// Album the run picks cover images from.
const COVER_ALBUM: &str = "default";

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Where the run starts
    pub entry: EntryPoint,
    /// Script text; blank content drafts the sample script
    pub content: String,
    /// Directory for file snapshots, in memory when absent
    pub state_dir: Option<PathBuf>,
    /// Clip and cover aspect ratio override
    pub aspect_ratio: Option<AspectRatio>,
    /// Voice model override
    pub voice: Option<String>,
    /// Final video title override
    pub title: Option<String>,
}

/// Drive a whole run from entry to preview and return the final video.
#[instrument(skip_all, fields(entry = %options.entry))]
pub async fn run_pipeline(
    config: PipelineConfig,
    library: &dyn ImageLibrary,
    options: &RunOptions,
) -> StoryboardResult<FinalVideo> {
    let store: Arc<dyn SnapshotStore> = match &options.state_dir {
        Some(dir) => Arc::new(FileSystemSnapshotStore::new(dir)?),
        None => Arc::new(InMemorySnapshotStore::new()),
    };
    let fallback_script = config.seeds().script().clone();
    let uploaded_audio = config.mock().audio_url().clone();

    if let Some(voice) = options
        .voice
        .as_deref()
        .filter(|voice| config.voice(voice).is_none())
    {
        return Err(ConfigError::new(format!("Unknown voice '{}'", voice)).into());
    }

    let mut controller = WorkflowController::builder(config, store)
        .start(options.entry)
        .await?;
    apply_settings(&mut controller, options)?;

    let mut texts = paragraphs(&options.content);
    if texts.is_empty() && options.entry != EntryPoint::Blank {
        warn!("No script given, using the sample script");
        texts = fallback_script;
    }

    if controller.stage() == Stage::Script {
        if options.entry == EntryPoint::Blank {
            controller.draft_script(&options.content).await?;
        } else {
            fill_scenes(&mut controller, &texts)?;
        }
        controller.advance().await?;
    }

    if options.entry == EntryPoint::Audio {
        fill_scenes(&mut controller, &texts)?;
        for id in controller.scenes().ids() {
            controller.select_asset(id, AssetKind::Audio, uploaded_audio.clone())?;
        }
    } else {
        controller.generate_all(AssetKind::Audio)?;
        let summary = controller.settle(AssetKind::Audio).await;
        info!(completed = summary.completed(), failed = summary.failed(), "Narration ready");
    }
    controller.advance().await?;

    pick_covers(&mut controller, library).await?;
    controller.generate_all(AssetKind::Video)?;
    let summary = controller.settle(AssetKind::Video).await;
    info!(completed = summary.completed(), failed = summary.failed(), "Clips ready");
    controller.advance().await?;
    controller.advance().await?;

    if let Some(title) = &options.title {
        controller.rename_final_video(title).await?;
    }
    controller
        .final_video()
        .cloned()
        .ok_or_else(|| WorkflowError::new(WorkflowErrorKind::NotFinalized).into())
}

fn apply_settings(controller: &mut WorkflowController, options: &RunOptions) -> StoryboardResult<()> {
    if let Some(aspect_ratio) = options.aspect_ratio {
        controller.set_video_settings(controller.video_settings().with_aspect_ratio(aspect_ratio));
        controller.set_image_settings(controller.image_settings().with_aspect_ratio(aspect_ratio));
    }
    if let Some(voice) = &options.voice {
        let current = controller.voice_settings();
        let settings = VoiceSettingsBuilder::default()
            .voice(voice.clone())
            .stability(*current.stability())
            .clarity(*current.clarity())
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid voice settings: {}", e)))?;
        controller.set_voice_settings(settings)?;
    }
    Ok(())
}

/// Write `texts` into the collection, one scene each.
fn fill_scenes(controller: &mut WorkflowController, texts: &[String]) -> StoryboardResult<()> {
    let mut previous = None;
    for (index, text) in texts.iter().enumerate() {
        let id = match controller.scenes().ids().get(index) {
            Some(id) => *id,
            None => controller.insert_scene(previous),
        };
        controller.update_scene(id, &ScenePatch::default().text(text.clone()))?;
        previous = Some(id);
    }
    Ok(())
}

/// Assign album images to scenes in turn, generating covers when the album is empty.
async fn pick_covers(
    controller: &mut WorkflowController,
    library: &dyn ImageLibrary,
) -> StoryboardResult<()> {
    let images = library.list_images(COVER_ALBUM).await?;
    if images.is_empty() {
        controller.generate_all(AssetKind::Image)?;
        controller.settle(AssetKind::Image).await;
        return Ok(());
    }
    for (index, id) in controller.scenes().ids().into_iter().enumerate() {
        let image = &images[index % images.len()];
        controller.select_asset(id, AssetKind::Image, image.url().clone())?;
    }
    if let Some(first) = images.first() {
        controller.set_cover_image(Some(first.url().clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard::InMemoryImageLibrary;

    fn config() -> PipelineConfig {
        let config = PipelineConfig::bundled().unwrap();
        let mock = config.mock().clone().instant();
        config.with_mock(mock)
    }

    fn options(entry: EntryPoint) -> RunOptions {
        RunOptions {
            entry,
            content: "First scene.\n\nSecond scene.".to_string(),
            state_dir: None,
            aspect_ratio: Some(AspectRatio::Landscape),
            voice: Some("voice2".to_string()),
            title: None,
        }
    }

    #[tokio::test]
    async fn every_entry_reaches_a_final_video() {
        let library = InMemoryImageLibrary::seeded();
        for entry in [EntryPoint::Blank, EntryPoint::Script, EntryPoint::Audio] {
            let video = run_pipeline(config(), &library, &options(entry)).await.unwrap();
            assert_eq!(video.url(), config().mock().final_url());
        }
    }

    #[tokio::test]
    async fn title_and_state_dir_are_honored() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut options = options(EntryPoint::Script);
        options.state_dir = Some(dir.path().to_path_buf());
        options.title = Some("Harbor".to_string());

        let video = run_pipeline(config(), &InMemoryImageLibrary::seeded(), &options)
            .await
            .unwrap();
        assert_eq!(video.title(), "Harbor");
        assert!(dir.path().join("final-video.json").exists());
    }

    #[tokio::test]
    async fn unknown_voice_is_rejected() {
        let mut options = options(EntryPoint::Blank);
        options.voice = Some("voice99".to_string());
        assert!(
            run_pipeline(config(), &InMemoryImageLibrary::seeded(), &options)
                .await
                .is_err()
        );
    }
}
