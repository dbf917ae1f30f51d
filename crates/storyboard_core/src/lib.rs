//! Core data types for the storyboard production pipeline.
//!
//! This crate provides the plain data shared by every other storyboard crate:
//! scenes and their per-kind asset slots, pipeline stages and entry points,
//! generation parameters, the final video record and album library items.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod final_video;
mod library;
mod params;
mod scene;
mod stage;

pub use asset::{AssetKind, AssetSlot, GenerationState};
pub use final_video::{FinalVideo, FinalVideoBuilder};
pub use library::{Album, LibraryImage};
pub use params::{
    AspectRatio, GenerationParams, ImageSettings, VideoSettings, VoiceOption, VoiceSettings,
    VoiceSettingsBuilder,
};
pub use scene::{Scene, SceneId, ScenePatch};
pub use stage::{EntryPoint, Stage};
