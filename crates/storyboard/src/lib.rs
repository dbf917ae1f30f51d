//! Storyboard - scene-by-scene video production pipeline
//!
//! Storyboard turns a script into an ordered list of scenes, enriches each
//! scene with narration audio, a cover image and a rendered clip, and
//! assembles the clips into one final video.
//!
//! # Features
//!
//! - **Staged workflow**: script, audio, video, finalize and preview, with gates in between
//! - **Per-scene generation**: independent tasks with regeneration and optional retry
//! - **Stage handoff**: collections travel between stages through snapshot stores
//! - **Album library**: pick cover images from named albums
//! - **Pluggable collaborators**: generators, assemblers, drafters and players are traits
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use storyboard::{AssetKind, EntryPoint, InMemorySnapshotStore, PipelineConfig, WorkflowController};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::bundled()?;
//! let mut controller = WorkflowController::builder(config, Arc::new(InMemorySnapshotStore::new()))
//!     .start(EntryPoint::Blank)
//!     .await?;
//!
//! controller.draft_script("").await?;
//! controller.advance().await?;
//! controller.generate_all(AssetKind::Audio)?;
//! controller.settle(AssetKind::Audio).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Storyboard is organized as a workspace with focused crates:
//!
//! - `storyboard_error` - Error types
//! - `storyboard_core` - Scenes, asset slots, stages and settings
//! - `storyboard_interface` - Collaborator traits and snapshot keys
//! - `storyboard_storage` - Snapshot stores and the album library
//! - `storyboard_pipeline` - Collection, gates, generation and the workflow controller
//!
//! This crate (`storyboard`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use storyboard_error::{
    CollectionError, CollectionErrorKind, ConfigError, GenerationError, GenerationErrorKind,
    JsonError, LibraryError, LibraryErrorKind, PersistenceError, PersistenceErrorKind,
    PlaybackError, PlaybackErrorKind, StoryboardError, StoryboardErrorKind, StoryboardResult,
    ValidationError, ValidationErrorKind, WorkflowError, WorkflowErrorKind,
};

pub use storyboard_core::{
    Album, AspectRatio, AssetKind, AssetSlot, EntryPoint, FinalVideo, FinalVideoBuilder,
    GenerationParams, GenerationState, ImageSettings, LibraryImage, Scene, SceneId, ScenePatch,
    Stage, VideoSettings, VoiceOption, VoiceSettings, VoiceSettingsBuilder,
};

pub use storyboard_interface::{
    AssetGenerator, ImageLibrary, MediaPlayer, ScriptDrafter, SnapshotKey, SnapshotStore,
    VideoAssembler,
};

pub use storyboard_storage::{
    FileSystemSnapshotStore, InMemoryImageLibrary, InMemorySnapshotStore,
};

pub use storyboard_pipeline::{
    BatchSummary, DefaultsConfig, GenerationConfig, GenerationOutcome, GenerationQueue,
    MergeStatus, MockAssetGenerator, MockConfig, MockScriptDrafter, MockVideoAssembler,
    PipelineConfig, PlaybackCoordinator, SceneCollection, SeedConfig, SilentPlayer, StageReport,
    StageValidator, WorkflowController, WorkflowControllerBuilder, merge_outcome, paragraphs,
};
