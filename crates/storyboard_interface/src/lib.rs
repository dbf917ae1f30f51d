//! Trait definitions for the storyboard production pipeline.
//!
//! The pipeline talks to everything outside its own state through the traits
//! in this crate: the script drafter, asset generators, the final assembler,
//! snapshot stores, the album library and the media player.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod key;
mod traits;

pub use key::SnapshotKey;
pub use traits::{
    AssetGenerator, ImageLibrary, MediaPlayer, ScriptDrafter, SnapshotStore, VideoAssembler,
};
