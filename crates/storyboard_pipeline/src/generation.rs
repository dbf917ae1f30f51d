//! Per-scene asset generation tasks.
//!
//! Each (scene, kind) pair runs as its own task on a [`JoinSet`]. Tasks work
//! on a copy of their scene and never touch the collection; their results
//! come back as [`GenerationOutcome`]s that the owner merges by scene id.

use crate::{GenerationConfig, SceneCollection};
use derive_getters::Getters;
use std::collections::HashMap;
use std::sync::Arc;
use storyboard_core::{AssetKind, GenerationParams, Scene, SceneId};
use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardResult};
use storyboard_interface::AssetGenerator;
use tokio::task::{Id, JoinSet};
use tracing::{debug, warn};

/// Result of one generation task.
#[derive(Debug, Getters)]
pub struct GenerationOutcome {
    /// Scene the asset was generated for
    scene_id: SceneId,
    /// Kind of asset
    kind: AssetKind,
    /// Slot epoch the task was started under
    epoch: u64,
    /// Asset reference or the failure
    result: StoryboardResult<String>,
}

/// What merging an outcome did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MergeStatus {
    /// The new asset replaced the old one
    #[display("completed")]
    Completed,
    /// The slot was marked failed; any previous asset is kept
    #[display("failed")]
    Failed,
    /// A newer generation or a manual pick superseded this task
    #[display("stale")]
    Stale,
    /// The scene is no longer in the collection
    #[display("discarded")]
    Discarded,
}

/// Counts of merged outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct BatchSummary {
    /// Assets delivered
    completed: usize,
    /// Generations that failed
    failed: usize,
    /// Results dropped as stale or for removed scenes
    discarded: usize,
}

impl BatchSummary {
    pub(crate) fn record(&mut self, status: MergeStatus) {
        match status {
            MergeStatus::Completed => self.completed += 1,
            MergeStatus::Failed => self.failed += 1,
            MergeStatus::Stale | MergeStatus::Discarded => self.discarded += 1,
        }
    }
}

/// Merge an outcome back into the collection by scene id.
///
/// Tolerates the scene having moved or been edited since the task started.
/// A result for a removed scene is dropped without touching the collection.
pub fn merge_outcome(scenes: &mut SceneCollection, outcome: GenerationOutcome) -> MergeStatus {
    let GenerationOutcome {
        scene_id,
        kind,
        epoch,
        result,
    } = outcome;

    let Some(scene) = scenes.get_mut(scene_id) else {
        debug!(scene_id = %scene_id, kind = %kind, "Discarding result for removed scene");
        return MergeStatus::Discarded;
    };

    let slot = scene.slot_mut(kind);
    match result {
        Ok(url) => {
            if slot.complete(epoch, url) {
                debug!(scene_id = %scene_id, kind = %kind, "Asset ready");
                MergeStatus::Completed
            } else {
                warn!(scene_id = %scene_id, kind = %kind, epoch, "Discarding stale result");
                MergeStatus::Stale
            }
        }
        Err(e) => {
            if slot.fail(epoch, e.to_string()) {
                warn!(scene_id = %scene_id, kind = %kind, error = %e, "Generation failed");
                MergeStatus::Failed
            } else {
                warn!(scene_id = %scene_id, kind = %kind, epoch, "Discarding stale failure");
                MergeStatus::Stale
            }
        }
    }
}

/// In-flight generation tasks.
pub struct GenerationQueue {
    generator: Arc<dyn AssetGenerator>,
    policy: GenerationConfig,
    tasks: JoinSet<GenerationOutcome>,
    in_flight: HashMap<Id, (SceneId, AssetKind, u64)>,
}

impl std::fmt::Debug for GenerationQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationQueue")
            .field("generator", &self.generator.name())
            .field("policy", &self.policy)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}

impl GenerationQueue {
    /// Queue running tasks on `generator` with the given retry policy.
    pub fn new(generator: Arc<dyn AssetGenerator>, policy: GenerationConfig) -> Self {
        Self {
            generator,
            policy,
            tasks: JoinSet::new(),
            in_flight: HashMap::new(),
        }
    }

    /// Number of tasks not yet collected.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is outstanding.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Start a task generating `kind` for a copy of `scene` under `epoch`.
    pub fn spawn(&mut self, scene: Scene, kind: AssetKind, epoch: u64, params: GenerationParams) {
        let scene_id = scene.id();
        let generator = Arc::clone(&self.generator);
        let policy = self.policy.clone();

        let handle = self.tasks.spawn(async move {
            let result = run(generator, &scene, kind, &params, &policy).await;
            GenerationOutcome {
                scene_id,
                kind,
                epoch,
                result,
            }
        });
        self.in_flight.insert(handle.id(), (scene_id, kind, epoch));
        debug!(scene_id = %scene_id, kind = %kind, epoch, "Spawned generation task");
    }

    /// Drop every outstanding task; their results will never be merged.
    pub fn abandon(&mut self) {
        if !self.tasks.is_empty() {
            debug!(tasks = self.tasks.len(), "Abandoning generation tasks");
        }
        // Dropping a JoinSet aborts its tasks
        self.tasks = JoinSet::new();
        self.in_flight.clear();
    }

    /// Wait for the next task to finish.
    ///
    /// A panicked task is reported as a failed outcome for its scene.
    pub async fn next(&mut self) -> Option<GenerationOutcome> {
        let joined = self.tasks.join_next_with_id().await?;
        Some(self.collect(joined))
    }

    /// Collect a finished task without waiting.
    pub fn try_next(&mut self) -> Option<GenerationOutcome> {
        let joined = self.tasks.try_join_next_with_id()?;
        Some(self.collect(joined))
    }

    fn collect(
        &mut self,
        joined: Result<(Id, GenerationOutcome), tokio::task::JoinError>,
    ) -> GenerationOutcome {
        match joined {
            Ok((id, outcome)) => {
                self.in_flight.remove(&id);
                outcome
            }
            Err(e) => {
                let (scene_id, kind, epoch) = self
                    .in_flight
                    .remove(&e.id())
                    .unwrap_or((SceneId::new(), AssetKind::Audio, 0));
                warn!(scene_id = %scene_id, kind = %kind, error = %e, "Generation task aborted");
                GenerationOutcome {
                    scene_id,
                    kind,
                    epoch,
                    result: Err(
                        GenerationError::new(GenerationErrorKind::TaskAborted(e.to_string()))
                            .into(),
                    ),
                }
            }
        }
    }
}

async fn run(
    generator: Arc<dyn AssetGenerator>,
    scene: &Scene,
    kind: AssetKind,
    params: &GenerationParams,
    policy: &GenerationConfig,
) -> StoryboardResult<String> {
    use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};

    if *policy.max_retries() == 0 {
        return generator.generate(scene, kind, params).await;
    }

    let retry_strategy = ExponentialBackoff::from_millis(*policy.retry_backoff_ms())
        .factor(2)
        .max_delay(policy.max_retry_delay())
        .map(jitter)
        .take(*policy.max_retries());

    Retry::spawn(retry_strategy, || {
        let generator = Arc::clone(&generator);
        let scene = scene.clone();
        let params = params.clone();
        async move {
            match generator.generate(&scene, kind, &params).await {
                Ok(url) => Ok(url),
                Err(e) if e.is_retryable() => {
                    warn!(scene_id = %scene.id(), kind = %kind, error = %e, "Generation failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        }
    })
    .await
}
