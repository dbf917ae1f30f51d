//! Snapshot keys.

use serde::{Deserialize, Serialize};
use storyboard_core::Stage;

/// Key a snapshot is stored under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotKey {
    /// Scenes as they left the Script stage
    #[display("post-script")]
    PostScript,
    /// Scenes as they left the Audio stage
    #[display("post-audio")]
    PostAudio,
    /// Scenes as they left the Video stage
    #[display("post-video")]
    PostVideo,
    /// The assembled final video
    #[display("final-video")]
    FinalVideo,
}

impl SnapshotKey {
    /// Key the scenes are saved under when leaving `stage`.
    ///
    /// Finalize and Preview hand off a final video rather than scenes.
    pub fn on_exit(stage: Stage) -> Option<SnapshotKey> {
        match stage {
            Stage::Script => Some(SnapshotKey::PostScript),
            Stage::Audio => Some(SnapshotKey::PostAudio),
            Stage::Video => Some(SnapshotKey::PostVideo),
            Stage::Finalize | Stage::Preview => None,
        }
    }

    /// Key a stage hydrates its scenes from on entry.
    pub fn on_entry(stage: Stage) -> Option<SnapshotKey> {
        stage.previous().and_then(SnapshotKey::on_exit)
    }

    /// Stable string form, usable as a file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKey::PostScript => "post-script",
            SnapshotKey::PostAudio => "post-audio",
            SnapshotKey::PostVideo => "post-video",
            SnapshotKey::FinalVideo => "final-video",
        }
    }
}
