//! The assembled output of a pipeline run.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Final video produced once when the pipeline leaves Finalize.
///
/// Only the title can change after creation.
///
/// # Examples
///
/// ```
/// use storyboard_core::FinalVideoBuilder;
///
/// let mut video = FinalVideoBuilder::default()
///     .title("Generated Video - 2024-05-01")
///     .url("https://cdn.example.com/final.mp4")
///     .cover_image("/abstract-geometric-shapes.png")
///     .build()
///     .unwrap();
/// video.rename("Launch teaser");
/// assert_eq!(video.title(), "Launch teaser");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct FinalVideo {
    /// User-facing title
    title: String,
    /// Reference to the assembled video
    url: String,
    /// Reference to the cover image
    cover_image: String,
    /// When the video was assembled
    #[builder(default = "Utc::now()")]
    created_at: DateTime<Utc>,
}

impl FinalVideo {
    /// Default title for a video assembled at `at`, e.g. `Generated Video - 2024-05-01`.
    pub fn default_title(at: DateTime<Utc>) -> String {
        format!(
            "Generated Video - {}",
            at.with_timezone(&chrono::Local).format("%Y-%m-%d")
        )
    }

    /// Replace the title.
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}
