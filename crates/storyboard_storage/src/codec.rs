//! JSON encoding shared by the snapshot backends.

use serde::{Serialize, de::DeserializeOwned};
use storyboard_core::Scene;
use storyboard_error::{JsonError, PersistenceError, PersistenceErrorKind, StoryboardResult};
use storyboard_interface::SnapshotKey;

pub(crate) fn encode<T: Serialize + ?Sized>(value: &T) -> StoryboardResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(format!("Failed to serialize snapshot: {}", e)).into())
}

pub(crate) fn decode<T: DeserializeOwned>(key: SnapshotKey, raw: &str) -> StoryboardResult<T> {
    serde_json::from_str(raw).map_err(|e| {
        PersistenceError::new(PersistenceErrorKind::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })
        .into()
    })
}

/// Decode a scene list and drop any generation state that cannot survive a
/// handoff.
pub(crate) fn decode_scenes(key: SnapshotKey, raw: &str) -> StoryboardResult<Vec<Scene>> {
    let mut scenes: Vec<Scene> = decode(key, raw)?;
    scenes.iter_mut().for_each(Scene::restore);
    Ok(scenes)
}
