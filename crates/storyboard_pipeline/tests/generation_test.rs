//! Generation protocol tests driven by scripted generators.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use storyboard_core::{AssetKind, EntryPoint, GenerationParams, GenerationState, Scene, ScenePatch, Stage};
use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardResult};
use storyboard_interface::AssetGenerator;
use storyboard_pipeline::{GenerationConfig, PipelineConfig, WorkflowController};
use storyboard_storage::InMemorySnapshotStore;
use tokio::sync::{Mutex, oneshot};

/// Generator whose calls each wait for a result handed in by the test.
#[derive(Default)]
struct ScriptedGenerator {
    pending: Mutex<VecDeque<oneshot::Receiver<StoryboardResult<String>>>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    /// Queue one call; the returned sender completes it.
    async fn expect_call(&self) -> oneshot::Sender<StoryboardResult<String>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.push_back(rx);
        tx
    }
}

#[async_trait]
impl AssetGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _scene: &Scene,
        _kind: AssetKind,
        _params: &GenerationParams,
    ) -> StoryboardResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.pending.lock().await.pop_front();
        match next {
            Some(rx) => rx.await.unwrap_or_else(|_| {
                Err(GenerationError::new(GenerationErrorKind::Generator("dropped".into())).into())
            }),
            None => Err(GenerationError::new(GenerationErrorKind::Generator("unexpected call".into())).into()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Generator failing a fixed number of times before succeeding.
struct FlakyGenerator {
    failures: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl AssetGenerator for FlakyGenerator {
    async fn generate(
        &self,
        _scene: &Scene,
        _kind: AssetKind,
        _params: &GenerationParams,
    ) -> StoryboardResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(GenerationError::new(GenerationErrorKind::Generator("rate limited".into())).into());
        }
        Ok("retried.mp3".to_string())
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

async fn audio_stage(
    generator: Arc<dyn AssetGenerator>,
    generation: GenerationConfig,
) -> WorkflowController {
    let config = PipelineConfig::bundled().unwrap();
    let mock = config.mock().clone().instant();
    let config = config.with_mock(mock).with_generation(generation);
    let mut controller = WorkflowController::builder(config, Arc::new(InMemorySnapshotStore::new()))
        .with_generator(generator)
        .start(EntryPoint::Audio)
        .await
        .unwrap();
    let first = controller.scenes().ids()[0];
    controller
        .update_scene(first, &ScenePatch::default().text("Opening line."))
        .unwrap();
    for text in ["Second line.", "Closing line."] {
        let last = controller.scenes().ids().last().copied();
        let id = controller.insert_scene(last);
        controller
            .update_scene(id, &ScenePatch::default().text(text))
            .unwrap();
    }
    assert_eq!(controller.stage(), Stage::Audio);
    controller
}

#[tokio::test]
async fn double_start_is_a_single_generation() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    let id = controller.scenes().ids()[0];
    let done = generator.expect_call().await;

    assert!(controller.generate(id, AssetKind::Audio).unwrap());
    assert!(!controller.generate(id, AssetKind::Audio).unwrap());
    let slot = controller.scene(id).unwrap().slot(AssetKind::Audio);
    assert_eq!(slot.state(), GenerationState::Generating);
    assert_eq!(slot.epoch(), 1);

    done.send(Ok("first.mp3".into())).unwrap();
    let summary = controller.settle(AssetKind::Audio).await;
    assert_eq!(*summary.completed(), 1);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.scene(id).unwrap().audio_url(), Some("first.mp3"));
}

#[tokio::test]
async fn regeneration_always_exposes_an_asset() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    let id = controller.scenes().ids()[1];
    controller.select_asset(id, AssetKind::Audio, "a.mp3").unwrap();

    let done = generator.expect_call().await;
    assert!(controller.generate(id, AssetKind::Audio).unwrap());
    for _ in 0..5 {
        tokio::task::yield_now().await;
        controller.poll();
        assert_eq!(controller.scene(id).unwrap().audio_url(), Some("a.mp3"));
    }

    done.send(Ok("b.mp3".into())).unwrap();
    controller.settle(AssetKind::Audio).await;
    assert_eq!(controller.scene(id).unwrap().audio_url(), Some("b.mp3"));
}

#[tokio::test]
async fn failure_keeps_previous_asset() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    let id = controller.scenes().ids()[0];
    controller.select_asset(id, AssetKind::Audio, "a.mp3").unwrap();

    let done = generator.expect_call().await;
    controller.generate(id, AssetKind::Audio).unwrap();
    done.send(Err(GenerationError::new(GenerationErrorKind::Generator("quota".into())).into()))
        .unwrap();
    let summary = controller.settle(AssetKind::Audio).await;

    assert_eq!(*summary.failed(), 1);
    let scene = controller.scene(id).unwrap();
    assert_eq!(scene.audio_url(), Some("a.mp3"));
    assert_eq!(scene.slot(AssetKind::Audio).state(), GenerationState::Failed);
    assert!(scene.slot(AssetKind::Audio).last_error().unwrap().contains("quota"));
}

#[tokio::test]
async fn removing_scene_mid_generation_leaves_collection_unchanged() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    let id = controller.scenes().ids()[1];

    let done = generator.expect_call().await;
    controller.generate(id, AssetKind::Audio).unwrap();
    controller.remove_scene(id);
    let before = controller.scenes().clone();

    done.send(Ok("late.mp3".into())).unwrap();
    let summary = controller.settle_all().await;

    assert_eq!(*summary.discarded(), 1);
    assert_eq!(controller.scenes(), &before);
    assert!(!controller.has_pending());
}

#[tokio::test]
async fn restart_while_generating_ignores_edited_text() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    let id = controller.scenes().ids()[0];
    let done = generator.expect_call().await;

    assert!(controller.generate(id, AssetKind::Audio).unwrap());
    controller
        .update_scene(id, &ScenePatch::default().text(""))
        .unwrap();
    assert!(!controller.generate(id, AssetKind::Audio).unwrap());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

    done.send(Ok("first.mp3".into())).unwrap();
    controller.settle(AssetKind::Audio).await;
    assert_eq!(controller.scene(id).unwrap().audio_url(), Some("first.mp3"));
    assert!(controller.generate(id, AssetKind::Audio).is_err());
}

#[tokio::test]
async fn batch_failure_and_regeneration_leave_siblings_alone() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    let first = generator.expect_call().await;
    let second = generator.expect_call().await;
    let third = generator.expect_call().await;

    assert_eq!(controller.generate_all(AssetKind::Audio).unwrap(), 3);
    first.send(Ok("one.mp3".into())).unwrap();
    second
        .send(Err(GenerationError::new(GenerationErrorKind::Generator("quota".into())).into()))
        .unwrap();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let _ = third.send(Ok("three.mp3".into()));
    });

    let summary = controller.settle(AssetKind::Audio).await;
    assert_eq!(*summary.completed(), 2);
    assert_eq!(*summary.failed(), 1);
    let states: Vec<_> = controller
        .scenes()
        .iter()
        .map(|scene| scene.slot(AssetKind::Audio).state())
        .collect();
    assert!(!states.contains(&GenerationState::Generating));
    assert_eq!(states.iter().filter(|s| **s == GenerationState::Ready).count(), 2);
    assert_eq!(states.iter().filter(|s| **s == GenerationState::Failed).count(), 1);

    let target = controller
        .scenes()
        .iter()
        .find(|scene| scene.slot(AssetKind::Audio).state() == GenerationState::Ready)
        .map(|scene| scene.id())
        .unwrap();
    let siblings = |controller: &WorkflowController| -> Vec<_> {
        controller
            .scenes()
            .iter()
            .filter(|scene| scene.id() != target)
            .map(|scene| scene.slot(AssetKind::Audio).clone())
            .collect()
    };
    let before = siblings(&controller);

    let again = generator.expect_call().await;
    assert!(controller.generate(target, AssetKind::Audio).unwrap());
    assert_eq!(siblings(&controller), before);
    again.send(Ok("again.mp3".into())).unwrap();
    controller.settle(AssetKind::Audio).await;

    assert_eq!(controller.scene(target).unwrap().audio_url(), Some("again.mp3"));
    assert_eq!(siblings(&controller), before);
}

#[tokio::test]
async fn manual_pick_supersedes_generation() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    let id = controller.scenes().ids()[0];

    let done = generator.expect_call().await;
    controller.generate(id, AssetKind::Audio).unwrap();
    controller.select_asset(id, AssetKind::Audio, "upload.mp3").unwrap();

    done.send(Ok("generated.mp3".into())).unwrap();
    let summary = controller.settle_all().await;
    assert_eq!(*summary.discarded(), 1);
    assert_eq!(controller.scene(id).unwrap().audio_url(), Some("upload.mp3"));
}

#[tokio::test]
async fn advance_is_rejected_while_generating() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    for id in controller.scenes().ids() {
        controller.select_asset(id, AssetKind::Audio, "a.mp3").unwrap();
    }
    let id = controller.scenes().ids()[2];
    let done = generator.expect_call().await;
    controller.generate(id, AssetKind::Audio).unwrap();

    let err = controller.advance().await.unwrap_err();
    assert!(err.to_string().contains("scene 3 is still generating audio"));
    assert_eq!(controller.stage(), Stage::Audio);

    done.send(Ok("b.mp3".into())).unwrap();
    controller.settle(AssetKind::Audio).await;
    assert_eq!(controller.advance().await.unwrap(), Stage::Video);
}

#[tokio::test]
async fn transient_failures_are_retried_when_configured() {
    let generator = Arc::new(FlakyGenerator {
        failures: 2,
        calls: AtomicUsize::new(0),
    });
    let policy = PipelineConfig::from_toml(
        r#"
        [generation]
        max_retries = 3
        retry_backoff_ms = 1
        max_retry_delay_secs = 1
        "#,
    )
    .unwrap()
    .generation()
    .clone();
    let mut controller = audio_stage(generator.clone(), policy).await;
    let id = controller.scenes().ids()[0];

    controller.generate(id, AssetKind::Audio).unwrap();
    let summary = controller.settle(AssetKind::Audio).await;

    assert_eq!(*summary.completed(), 1);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
    assert_eq!(controller.scene(id).unwrap().audio_url(), Some("retried.mp3"));
}

#[tokio::test]
async fn no_retry_by_default() {
    let generator = Arc::new(FlakyGenerator {
        failures: 1,
        calls: AtomicUsize::new(0),
    });
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    let id = controller.scenes().ids()[0];

    controller.generate(id, AssetKind::Audio).unwrap();
    let summary = controller.settle(AssetKind::Audio).await;

    assert_eq!(*summary.failed(), 1);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn batch_is_blocked_by_blank_text() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut controller = audio_stage(generator.clone(), GenerationConfig::default()).await;
    let id = controller.scenes().ids()[1];
    controller
        .update_scene(id, &ScenePatch::default().text("   "))
        .unwrap();

    let err = controller.generate_all(AssetKind::Audio).unwrap_err();
    assert!(err.to_string().contains("scene 2 has no text"));
    assert!(!controller.has_pending());
}
