//! Ordered, mutable scene collection.

use serde::{Deserialize, Serialize};
use storyboard_core::{Scene, SceneId, ScenePatch};
use storyboard_error::{CollectionError, CollectionErrorKind};
use tracing::{debug, warn};

/// Ordered list of scenes owned by exactly one stage at a time.
///
/// Ids are unique within the collection and never reused. The collection may
/// become empty through [`SceneCollection::remove`]; no gate is satisfied by
/// an empty collection.
///
/// # Examples
///
/// ```
/// use storyboard_pipeline::SceneCollection;
///
/// let mut scenes = SceneCollection::with_texts(["Intro", "Outro"]);
/// let middle = scenes.insert(scenes.ids().first().copied()).id();
/// assert_eq!(scenes.position(middle), Some(1));
/// assert_eq!(scenes.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneCollection {
    scenes: Vec<Scene>,
}

impl Default for SceneCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCollection {
    /// Fresh collection holding a single empty scene.
    pub fn new() -> Self {
        Self {
            scenes: vec![Scene::new("")],
        }
    }

    /// Collection with one scene per text, in order.
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scenes: texts.into_iter().map(Scene::new).collect(),
        }
    }

    /// Collection hydrated from a snapshot.
    ///
    /// Later duplicates of an id are dropped so ids stay unique.
    pub fn from_scenes(scenes: Vec<Scene>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let scenes = scenes
            .into_iter()
            .filter(|scene| {
                let fresh = seen.insert(scene.id());
                if !fresh {
                    warn!(scene_id = %scene.id(), "Dropping duplicate scene id from snapshot");
                }
                fresh
            })
            .collect();
        Self { scenes }
    }

    /// Scenes in order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Consume the collection, returning its scenes.
    pub fn into_scenes(self) -> Vec<Scene> {
        self.scenes
    }

    /// Iterate scenes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Scene> {
        self.scenes.iter()
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether there are no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Ids in order.
    pub fn ids(&self) -> Vec<SceneId> {
        self.scenes.iter().map(Scene::id).collect()
    }

    /// Index of a scene.
    pub fn position(&self, id: SceneId) -> Option<usize> {
        self.scenes.iter().position(|scene| scene.id() == id)
    }

    /// Scene by id.
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|scene| scene.id() == id)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Scene> {
        self.scenes.iter_mut()
    }

    /// Insert a new empty scene after `after`, or append when `after` is
    /// `None` or not in the collection.
    pub fn insert(&mut self, after: Option<SceneId>) -> &Scene {
        let index = after
            .and_then(|id| self.position(id))
            .map(|index| index + 1)
            .unwrap_or(self.scenes.len());
        let scene = Scene::new("");
        debug!(scene_id = %scene.id(), index, "Inserted scene");
        self.scenes.insert(index, scene);
        &self.scenes[index]
    }

    /// Remove a scene. Removing a missing id is a no-op.
    pub fn remove(&mut self, id: SceneId) -> Option<Scene> {
        let index = self.position(id)?;
        debug!(scene_id = %id, index, "Removed scene");
        Some(self.scenes.remove(index))
    }

    /// Move one scene to `new_index`, clamped to the valid range.
    ///
    /// The relative order of every other scene is preserved. Returns `false`
    /// when the id is not in the collection.
    pub fn reorder(&mut self, id: SceneId, new_index: usize) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let target = new_index.min(self.scenes.len() - 1);
        let scene = self.scenes.remove(index);
        self.scenes.insert(target, scene);
        debug!(scene_id = %id, from = index, to = target, "Reordered scene");
        true
    }

    /// Merge a partial update into a scene.
    ///
    /// An unknown id changes nothing and is reported as a soft error.
    pub fn update(&mut self, id: SceneId, patch: &ScenePatch) -> Result<(), CollectionError> {
        match self.get_mut(id) {
            Some(scene) => {
                scene.apply(patch);
                Ok(())
            }
            None => {
                let err = CollectionError::new(CollectionErrorKind::SceneNotFound(id.to_string()));
                warn!(scene_id = %id, error = %err, "Ignoring update for missing scene");
                Err(err)
            }
        }
    }
}

impl<'a> IntoIterator for &'a SceneCollection {
    type Item = &'a Scene;
    type IntoIter = std::slice::Iter<'a, Scene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_collection_has_one_empty_scene() {
        let scenes = SceneCollection::new();
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes.scenes()[0].text(), "");
    }

    #[test]
    fn insert_after_unknown_id_appends() {
        let mut scenes = SceneCollection::with_texts(["a", "b"]);
        let id = scenes.insert(Some(SceneId::new())).id();
        assert_eq!(scenes.position(id), Some(2));
    }

    #[test]
    fn insert_without_anchor_appends() {
        let mut scenes = SceneCollection::with_texts(["a"]);
        let id = scenes.insert(None).id();
        assert_eq!(scenes.position(id), Some(1));
    }

    #[test]
    fn reorder_clamps_index() {
        let mut scenes = SceneCollection::with_texts(["a", "b", "c"]);
        let first = scenes.ids()[0];
        assert!(scenes.reorder(first, 99));
        let texts: Vec<_> = scenes.iter().map(Scene::text).collect();
        assert_eq!(texts, vec!["b", "c", "a"]);
    }

    #[test]
    fn reorder_is_a_single_element_move() {
        let mut scenes = SceneCollection::with_texts(["a", "b", "c", "d"]);
        let last = scenes.ids()[3];
        scenes.reorder(last, 1);
        let texts: Vec<_> = scenes.iter().map(Scene::text).collect();
        assert_eq!(texts, vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn remove_may_empty_collection() {
        let mut scenes = SceneCollection::new();
        let id = scenes.ids()[0];
        assert!(scenes.remove(id).is_some());
        assert!(scenes.is_empty());
        assert!(scenes.remove(id).is_none());
        assert!(!scenes.reorder(id, 0));
    }

    #[test]
    fn update_unknown_id_is_soft_error() {
        let mut scenes = SceneCollection::with_texts(["a"]);
        let before = scenes.clone();
        let result = scenes.update(SceneId::new(), &ScenePatch::default().text("x"));
        assert!(result.is_err());
        assert_eq!(scenes, before);
    }

    #[test]
    fn from_scenes_drops_duplicate_ids() {
        let scene = Scene::new("a");
        let scenes = SceneCollection::from_scenes(vec![scene.clone(), scene]);
        assert_eq!(scenes.len(), 1);
    }
}
