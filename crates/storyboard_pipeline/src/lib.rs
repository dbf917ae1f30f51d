//! Stage workflow engine for the storyboard production pipeline.
//!
//! This crate moves an ordered collection of scenes through the script,
//! audio, video, finalize and preview stages.
//!
//! # Features
//!
//! - **Scene collection**: insert, remove, reorder and patch scenes by id
//! - **Stage gates**: side-effect free checks naming every unmet condition
//! - **Per-scene generation**: one task per scene and asset kind, merged back by id
//! - **Exclusive playback**: at most one narration or clip plays at a time
//! - **Stage handoff**: collections travel between stages through a snapshot store
//! - **Layered configuration**: bundled defaults with user overrides
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use storyboard_core::{AssetKind, EntryPoint, Stage};
//! use storyboard_pipeline::{PipelineConfig, WorkflowController};
//! use storyboard_storage::InMemorySnapshotStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::bundled()?;
//! let mut controller = WorkflowController::builder(config, Arc::new(InMemorySnapshotStore::new()))
//!     .start(EntryPoint::Blank)
//!     .await?;
//!
//! controller.draft_script("A sunrise over the hills.\n\nThe town wakes up.").await?;
//! controller.advance().await?;
//!
//! controller.generate_all(AssetKind::Audio)?;
//! controller.settle(AssetKind::Audio).await;
//! assert_eq!(controller.advance().await?, Stage::Video);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod controller;
mod generation;
mod mock;
mod playback;
mod validator;

pub use collection::SceneCollection;
pub use config::{DefaultsConfig, GenerationConfig, MockConfig, PipelineConfig, SeedConfig};
pub use controller::{WorkflowController, WorkflowControllerBuilder};
pub use generation::{BatchSummary, GenerationOutcome, GenerationQueue, MergeStatus, merge_outcome};
pub use mock::{MockAssetGenerator, MockScriptDrafter, MockVideoAssembler, paragraphs};
pub use playback::{PlaybackCoordinator, SilentPlayer};
pub use validator::{StageReport, StageValidator};
