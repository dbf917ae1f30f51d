//! Property tests for scene collection edits and the audio gate.

use proptest::prelude::*;
use std::collections::HashSet;
use storyboard_core::{AssetKind, ScenePatch, Stage};
use storyboard_pipeline::{SceneCollection, StageValidator};

fn collection(size: usize) -> SceneCollection {
    SceneCollection::with_texts((0..size).map(|i| format!("Scene {}", i)))
}

proptest! {
    #[test]
    fn reorder_preserves_ids_and_length(
        size in 1usize..12,
        pick in any::<prop::sample::Index>(),
        target in 0usize..20,
    ) {
        let mut scenes = collection(size);
        let before: HashSet<_> = scenes.ids().into_iter().collect();
        let id = scenes.ids()[pick.index(size)];

        prop_assert!(scenes.reorder(id, target));

        let after: HashSet<_> = scenes.ids().into_iter().collect();
        prop_assert_eq!(scenes.len(), size);
        prop_assert_eq!(before, after);
        prop_assert_eq!(scenes.position(id), Some(target.min(size - 1)));
    }

    #[test]
    fn removed_ids_are_never_reused(size in 1usize..8, inserts in 1usize..16) {
        let mut scenes = collection(size);
        let removed = scenes.ids()[0];
        scenes.remove(removed);

        for _ in 0..inserts {
            let id = scenes.insert(None).id();
            prop_assert_ne!(id, removed);
        }
        prop_assert!(scenes.get(removed).is_none());
    }

    #[test]
    fn audio_gate_holds_iff_every_scene_has_audio(
        with_audio in prop::collection::vec(any::<bool>(), 0..10),
    ) {
        let mut scenes = collection(with_audio.len());
        for (id, has_audio) in scenes.ids().into_iter().zip(&with_audio) {
            if *has_audio {
                scenes.update(id, &ScenePatch::asset(AssetKind::Audio, "narration.mp3")).unwrap();
            }
        }

        let expected = !with_audio.is_empty() && with_audio.iter().all(|has| *has);
        prop_assert_eq!(StageValidator::is_satisfied(Stage::Audio, &scenes), expected);

        let report = StageValidator::check(Stage::Audio, &scenes);
        let missing = with_audio.iter().filter(|has| !**has).count();
        if !with_audio.is_empty() {
            prop_assert_eq!(report.unmet().len(), missing);
        }
    }
}
