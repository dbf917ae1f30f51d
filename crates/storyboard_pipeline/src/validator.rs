//! Stage gates.

use crate::SceneCollection;
use derive_getters::Getters;
use storyboard_core::{AssetKind, Scene, Stage};
use storyboard_error::{ValidationError, ValidationErrorKind};
use strum::IntoEnumIterator;

/// Outcome of a gate check.
///
/// Lists every unmet condition, naming scenes by their 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StageReport {
    /// Stage the gate belongs to
    stage: Stage,
    /// Unmet conditions, e.g. "scene 3 has no audio"
    unmet: Vec<String>,
}

impl StageReport {
    /// Whether every condition is met.
    pub fn is_satisfied(&self) -> bool {
        self.unmet.is_empty()
    }

    /// Convert an unsatisfied report into a validation error.
    #[track_caller]
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_satisfied() {
            return Ok(());
        }
        Err(ValidationError::new(ValidationErrorKind::StageIncomplete {
            stage: self.stage.to_string(),
            unmet: self.unmet,
        }))
    }
}

/// Pure gate predicates over a scene collection.
///
/// Every check is side-effect free and may be called at any time, both to
/// enable a "continue" action and to gate a batch generation.
///
/// # Examples
///
/// ```
/// use storyboard_core::{AssetKind, Stage};
/// use storyboard_pipeline::{SceneCollection, StageValidator};
///
/// let scenes = SceneCollection::with_texts(["Intro", "Body", "Outro"]);
/// let report = StageValidator::check(Stage::Audio, &scenes);
/// assert!(!report.is_satisfied());
/// assert_eq!(report.unmet()[2], "scene 3 has no audio");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StageValidator;

impl StageValidator {
    /// Gate for leaving `stage`.
    ///
    /// - Script: at least one scene; empty text is allowed
    /// - Audio: every scene has narration
    /// - Video: every scene has a rendered clip
    /// - Finalize: same as Video
    /// - Preview: terminal, nothing to check
    pub fn check(stage: Stage, scenes: &SceneCollection) -> StageReport {
        let unmet = match stage {
            Stage::Script => non_empty(scenes),
            Stage::Audio => every(scenes, |scene| scene.has_asset(AssetKind::Audio), "has no audio"),
            Stage::Video | Stage::Finalize => {
                every(scenes, |scene| scene.has_asset(AssetKind::Video), "has no video")
            }
            Stage::Preview => Vec::new(),
        };
        StageReport { stage, unmet }
    }

    /// Whether `stage` may be left.
    pub fn is_satisfied(stage: Stage, scenes: &SceneCollection) -> bool {
        Self::check(stage, scenes).is_satisfied()
    }

    /// Prerequisites for generating `kind` for every scene at once.
    ///
    /// - Audio: every scene has non-blank text
    /// - Image: at least one scene
    /// - Video: every scene has a cover image
    pub fn batch_prerequisites(kind: AssetKind, scenes: &SceneCollection) -> Vec<String> {
        match kind {
            AssetKind::Audio => every(scenes, Scene::has_text, "has no text"),
            AssetKind::Image => non_empty(scenes),
            AssetKind::Video => every(scenes, |scene| scene.has_asset(AssetKind::Image), "has no image"),
        }
    }

    /// Batch prerequisites as a result.
    #[track_caller]
    pub fn check_batch(kind: AssetKind, scenes: &SceneCollection) -> Result<(), ValidationError> {
        let unmet = Self::batch_prerequisites(kind, scenes);
        if unmet.is_empty() {
            return Ok(());
        }
        Err(ValidationError::new(ValidationErrorKind::BatchBlocked {
            kind: kind.to_string(),
            unmet,
        }))
    }

    /// First scene with a generation in flight, as (1-based index, kind).
    pub fn pending(scenes: &SceneCollection) -> Option<(usize, AssetKind)> {
        scenes.iter().enumerate().find_map(|(index, scene)| {
            AssetKind::iter()
                .find(|kind| scene.slot(*kind).is_generating())
                .map(|kind| (index + 1, kind))
        })
    }
}

fn non_empty(scenes: &SceneCollection) -> Vec<String> {
    if scenes.is_empty() {
        vec![ValidationErrorKind::EmptyCollection.to_string()]
    } else {
        Vec::new()
    }
}

fn every<F>(scenes: &SceneCollection, predicate: F, missing: &str) -> Vec<String>
where
    F: Fn(&Scene) -> bool,
{
    if scenes.is_empty() {
        return non_empty(scenes);
    }
    scenes
        .iter()
        .enumerate()
        .filter(|(_, scene)| !predicate(*scene))
        .map(|(index, _)| format!("scene {} {}", index + 1, missing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_core::ScenePatch;

    fn with_audio(count: usize, missing: Option<usize>) -> SceneCollection {
        let mut scenes = SceneCollection::with_texts((0..count).map(|i| format!("Scene text {}", i)));
        for (index, id) in scenes.ids().into_iter().enumerate() {
            if Some(index) != missing {
                scenes
                    .update(id, &ScenePatch::asset(AssetKind::Audio, "a.mp3"))
                    .unwrap();
            }
        }
        scenes
    }

    #[test]
    fn empty_collection_fails_every_gate() {
        let scenes = SceneCollection::from_scenes(Vec::new());
        for stage in [Stage::Script, Stage::Audio, Stage::Video, Stage::Finalize] {
            assert!(!StageValidator::is_satisfied(stage, &scenes), "{}", stage);
        }
    }

    #[test]
    fn script_gate_allows_empty_text() {
        assert!(StageValidator::is_satisfied(Stage::Script, &SceneCollection::new()));
    }

    #[test]
    fn audio_gate_names_the_missing_scene() {
        let scenes = with_audio(5, Some(2));
        let report = StageValidator::check(Stage::Audio, &scenes);
        assert_eq!(report.unmet(), &vec!["scene 3 has no audio".to_string()]);

        let err = report.into_result().unwrap_err();
        assert!(err.to_string().contains("scene 3 has no audio"));
    }

    #[test]
    fn video_batch_requires_images() {
        let mut scenes = with_audio(2, None);
        let unmet = StageValidator::batch_prerequisites(AssetKind::Video, &scenes);
        assert_eq!(unmet.len(), 2);

        for id in scenes.ids() {
            scenes
                .update(id, &ScenePatch::asset(AssetKind::Image, "/cover.png"))
                .unwrap();
        }
        assert!(StageValidator::check_batch(AssetKind::Video, &scenes).is_ok());
        assert!(!StageValidator::is_satisfied(Stage::Video, &scenes));
    }

    #[test]
    fn audio_batch_requires_text() {
        let scenes = SceneCollection::with_texts(["ok", "  "]);
        assert_eq!(
            StageValidator::batch_prerequisites(AssetKind::Audio, &scenes),
            vec!["scene 2 has no text".to_string()]
        );
    }

    #[test]
    fn pending_reports_position_and_kind() {
        let mut scenes = SceneCollection::with_texts(["a", "b"]);
        let second = scenes.ids()[1];
        scenes
            .get_mut(second)
            .unwrap()
            .slot_mut(AssetKind::Audio)
            .begin();
        assert_eq!(StageValidator::pending(&scenes), Some((2, AssetKind::Audio)));
    }
}
