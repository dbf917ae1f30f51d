//! Pipeline configuration.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from storyboard.toml)
//! - User overrides (./storyboard.toml or ~/.config/storyboard/storyboard.toml)
//! - Automatic merging with user values taking precedence

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storyboard_core::{AspectRatio, VoiceOption, VoiceSettings, VoiceSettingsBuilder};
use storyboard_error::{ConfigError, StoryboardError, StoryboardResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

/// Automatic retry policy for generation tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerationConfig {
    /// Retries after the first failed attempt (0 = no automatic retry)
    #[serde(default)]
    max_retries: usize,
    /// Initial backoff between attempts
    #[serde(default = "default_backoff_ms")]
    retry_backoff_ms: u64,
    /// Upper bound on a single backoff
    #[serde(default = "default_max_delay_secs")]
    max_retry_delay_secs: u64,
}

fn default_backoff_ms() -> u64 {
    500
}

fn default_max_delay_secs() -> u64 {
    10
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_backoff_ms: default_backoff_ms(),
            max_retry_delay_secs: default_max_delay_secs(),
        }
    }
}

impl GenerationConfig {
    /// Policy with `max_retries` automatic retries and the default backoff.
    pub fn with_retries(max_retries: usize) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Upper bound on a single backoff.
    pub fn max_retry_delay(&self) -> Duration {
        Duration::from_secs(self.max_retry_delay_secs)
    }
}

/// Delays and canned references used by the mock collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MockConfig {
    /// Delay before a draft is returned
    #[serde(default)]
    draft_delay_ms: u64,
    /// Delay before a narration is returned
    #[serde(default)]
    audio_delay_ms: u64,
    /// Delay before a cover image is returned
    #[serde(default)]
    image_delay_ms: u64,
    /// Delay before a clip is returned
    #[serde(default)]
    video_delay_ms: u64,
    /// Delay before the final video is returned
    #[serde(default)]
    assemble_delay_ms: u64,
    /// Narration reference returned for every scene
    audio_url: String,
    /// Cover image reference returned for every scene
    image_url: String,
    /// Clip reference returned for every scene
    video_url: String,
    /// Reference of the assembled video
    final_url: String,
}

impl MockConfig {
    /// Same canned references with every delay set to zero.
    pub fn instant(mut self) -> Self {
        self.draft_delay_ms = 0;
        self.audio_delay_ms = 0;
        self.image_delay_ms = 0;
        self.video_delay_ms = 0;
        self.assemble_delay_ms = 0;
        self
    }
}

/// Initial generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct DefaultsConfig {
    /// Voice model id
    voice: String,
    /// Voice stability (0.0-1.0)
    stability: f64,
    /// Voice clarity (0.0-1.0)
    clarity: f64,
    /// Clip aspect ratio
    #[serde(default)]
    aspect_ratio: AspectRatio,
    /// Cover used for the final video when none was chosen
    cover_image: String,
}

impl DefaultsConfig {
    /// Voice settings built from these defaults.
    pub fn voice_settings(&self) -> StoryboardResult<VoiceSettings> {
        let settings = VoiceSettingsBuilder::default()
            .voice(self.voice.clone())
            .stability(self.stability)
            .clarity(self.clarity)
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid voice defaults: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Scenes a stage starts from when nothing was handed over.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct SeedConfig {
    /// Texts of the seeded scenes
    #[serde(default)]
    script: Vec<String>,
    /// Narration attached to seeded scenes from the Video stage on
    #[serde(default)]
    audio_url: Option<String>,
}

/// Top-level pipeline configuration.
///
/// # Example
///
/// ```no_run
/// use storyboard_pipeline::PipelineConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PipelineConfig::load()?;
/// println!("Automatic retries: {}", config.generation().max_retries());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct PipelineConfig {
    /// Retry policy
    #[serde(default)]
    generation: GenerationConfig,
    /// Mock collaborator behaviour
    mock: MockConfig,
    /// Initial generation settings
    defaults: DefaultsConfig,
    /// Selectable voice models
    #[serde(default)]
    voices: Vec<VoiceOption>,
    /// Stage fallback scenes
    #[serde(default)]
    seeds: SeedConfig,
}

impl PipelineConfig {
    /// Configuration from the bundled defaults only.
    #[instrument]
    pub fn bundled() -> StoryboardResult<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Bundled defaults overlaid with a TOML document.
    pub fn from_toml(overrides: &str) -> StoryboardResult<Self> {
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from_str(overrides, FileFormat::Toml)),
        )
    }

    /// Bundled defaults overlaid with a configuration file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryboardResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (storyboard.toml shipped with the library)
    /// 2. User config in home directory (~/.config/storyboard/storyboard.toml)
    /// 3. User config in current directory (./storyboard.toml)
    ///
    /// User config files are optional and are skipped if not found.
    #[instrument]
    pub fn load() -> StoryboardResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyboard/storyboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyboard").required(false));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> StoryboardResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.defaults.voice_settings()?;
        Ok(config)
    }

    /// Look up a voice model by id.
    pub fn voice(&self, id: &str) -> Option<&VoiceOption> {
        self.voices.iter().find(|voice| voice.id() == id)
    }

    /// Replace the retry policy.
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Replace the mock collaborator settings.
    pub fn with_mock(mut self, mock: MockConfig) -> Self {
        self.mock = mock;
        self
    }
}
