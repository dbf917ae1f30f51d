//! Pipeline stages and entry points.

use serde::{Deserialize, Serialize};

/// Ordered phase of the production pipeline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Authoring scene text
    #[display("script")]
    Script,
    /// Narration per scene
    #[display("audio")]
    Audio,
    /// Cover images and rendered clips per scene
    #[display("video")]
    Video,
    /// Assembly of the final video
    #[display("finalize")]
    Finalize,
    /// Review of the final video
    #[display("preview")]
    Preview,
}

impl Stage {
    /// The stage after this one, if any.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Script => Some(Stage::Audio),
            Stage::Audio => Some(Stage::Video),
            Stage::Video => Some(Stage::Finalize),
            Stage::Finalize => Some(Stage::Preview),
            Stage::Preview => None,
        }
    }

    /// The stage before this one, if any.
    pub fn previous(&self) -> Option<Stage> {
        match self {
            Stage::Script => None,
            Stage::Audio => Some(Stage::Script),
            Stage::Video => Some(Stage::Audio),
            Stage::Finalize => Some(Stage::Video),
            Stage::Preview => Some(Stage::Finalize),
        }
    }

    /// 1-based step number shown in progress indicators.
    pub fn step(&self) -> usize {
        *self as usize + 1
    }
}

/// How the user entered the pipeline.
///
/// Recorded once at pipeline start so back navigation never routes to a
/// stage the user did not visit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    /// Scenes drafted from source content, starting at Script
    #[default]
    #[display("blank")]
    Blank,
    /// Hand-written script, starting at Script
    #[display("script")]
    Script,
    /// Uploaded narration with transcripts, starting at Audio
    #[display("audio")]
    Audio,
}

impl EntryPoint {
    /// Stage the pipeline starts at.
    pub fn entry_stage(&self) -> Stage {
        match self {
            EntryPoint::Blank | EntryPoint::Script => Stage::Script,
            EntryPoint::Audio => Stage::Audio,
        }
    }
}

impl std::str::FromStr for EntryPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blank" => Ok(EntryPoint::Blank),
            "script" => Ok(EntryPoint::Script),
            "audio" => Ok(EntryPoint::Audio),
            _ => Err(format!("Unknown entry point: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn next_and_previous_are_inverse() {
        for stage in Stage::iter() {
            if let Some(next) = stage.next() {
                assert_eq!(next.previous(), Some(stage));
            }
        }
    }

    #[test]
    fn steps_are_sequential() {
        let steps: Vec<usize> = Stage::iter().map(|s| s.step()).collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn audio_entry_skips_script() {
        assert_eq!(EntryPoint::Audio.entry_stage(), Stage::Audio);
        assert_eq!(EntryPoint::Script.entry_stage(), Stage::Script);
    }
}
