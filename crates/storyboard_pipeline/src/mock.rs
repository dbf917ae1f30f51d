//! Mock collaborators with fixed delays and canned references.
//!
//! Stand-ins for real drafting, narration, image and video services. Every
//! call sleeps for the configured delay and returns the configured reference.

use crate::{MockConfig, SeedConfig};
use async_trait::async_trait;
use std::time::Duration;
use storyboard_core::{AssetKind, GenerationParams, Scene, VideoSettings};
use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardResult};
use storyboard_interface::{AssetGenerator, ScriptDrafter, VideoAssembler};
use tracing::{debug, instrument};

async fn pause(delay_ms: u64) {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

/// Asset generator returning one canned reference per kind.
#[derive(Debug, Clone)]
pub struct MockAssetGenerator {
    config: MockConfig,
}

impl MockAssetGenerator {
    /// Create a mock generator.
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AssetGenerator for MockAssetGenerator {
    #[instrument(skip(self, scene, params), fields(scene_id = %scene.id(), kind = %kind))]
    async fn generate(
        &self,
        scene: &Scene,
        kind: AssetKind,
        params: &GenerationParams,
    ) -> StoryboardResult<String> {
        if params.kind() != kind {
            return Err(GenerationError::new(GenerationErrorKind::UnsupportedKind(format!(
                "{} parameters for a {} request",
                params.kind(),
                kind
            )))
            .into());
        }

        let (delay_ms, url) = match kind {
            AssetKind::Audio => {
                if !scene.has_text() {
                    return Err(GenerationError::new(GenerationErrorKind::EmptyText(
                        scene.id().to_string(),
                    ))
                    .into());
                }
                (*self.config.audio_delay_ms(), self.config.audio_url())
            }
            AssetKind::Image => (*self.config.image_delay_ms(), self.config.image_url()),
            AssetKind::Video => {
                if !scene.has_asset(AssetKind::Image) {
                    return Err(GenerationError::new(GenerationErrorKind::MissingImage(
                        scene.id().to_string(),
                    ))
                    .into());
                }
                (*self.config.video_delay_ms(), self.config.video_url())
            }
        };

        pause(delay_ms).await;
        debug!(?params, "Mock asset generated");
        Ok(url.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Assembler returning the canned final video reference.
#[derive(Debug, Clone)]
pub struct MockVideoAssembler {
    config: MockConfig,
}

impl MockVideoAssembler {
    /// Create a mock assembler.
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl VideoAssembler for MockVideoAssembler {
    #[instrument(skip(self, scenes), fields(scenes = scenes.len(), aspect_ratio = %settings.aspect_ratio()))]
    async fn assemble(
        &self,
        scenes: &[Scene],
        settings: &VideoSettings,
    ) -> StoryboardResult<String> {
        if let Some(scene) = scenes.iter().find(|scene| !scene.has_asset(AssetKind::Video)) {
            return Err(GenerationError::new(GenerationErrorKind::Assembly(format!(
                "scene {} has no video",
                scene.id()
            )))
            .into());
        }
        pause(*self.config.assemble_delay_ms()).await;
        Ok(self.config.final_url().clone())
    }
}

/// Drafter splitting content into paragraphs.
///
/// Blank content yields the seeded sample script.
#[derive(Debug, Clone)]
pub struct MockScriptDrafter {
    config: MockConfig,
    seeds: SeedConfig,
}

impl MockScriptDrafter {
    /// Create a mock drafter.
    pub fn new(config: MockConfig, seeds: SeedConfig) -> Self {
        Self { config, seeds }
    }
}

/// Split text into paragraphs separated by blank lines.
///
/// Lines within a paragraph are joined with single spaces.
///
/// ```
/// use storyboard_pipeline::paragraphs;
///
/// let text = "First line\ncontinued.\n\n\nSecond paragraph.";
/// assert_eq!(paragraphs(text), vec!["First line continued.", "Second paragraph."]);
/// ```
pub fn paragraphs(content: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in content.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

#[async_trait]
impl ScriptDrafter for MockScriptDrafter {
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    async fn draft(&self, content: &str) -> StoryboardResult<Vec<String>> {
        pause(*self.config.draft_delay_ms()).await;
        let drafted = paragraphs(content);
        if drafted.is_empty() {
            debug!("No content given, drafting sample script");
            return Ok(self.seeds.script().clone());
        }
        Ok(drafted)
    }
}
