//! Asset kinds and the per-kind generation slot.

use serde::{Deserialize, Serialize};

/// Kind of asset a scene can own.
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
pub enum AssetKind {
    /// Narration audio
    #[display("audio")]
    Audio,
    /// Cover image
    #[display("image")]
    Image,
    /// Rendered video clip
    #[display("video")]
    Video,
}

impl AssetKind {
    /// Whether the asset can be played back by a media element.
    pub fn is_playable(&self) -> bool {
        matches!(self, AssetKind::Audio | AssetKind::Video)
    }
}

impl std::str::FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(AssetKind::Audio),
            "image" => Ok(AssetKind::Image),
            "video" => Ok(AssetKind::Video),
            _ => Err(format!("Unknown asset kind: {}", s)),
        }
    }
}

/// Generation state of one asset slot.
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
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum GenerationState {
    /// Nothing requested yet
    #[default]
    #[display("idle")]
    Idle,
    /// A generation task is in flight
    #[display("generating")]
    Generating,
    /// An asset is available
    #[display("ready")]
    Ready,
    /// The last generation failed
    #[display("failed")]
    Failed,
}

/// One asset reference plus the state machine that produces it.
///
/// The slot keeps the previous `url` while a regeneration is in flight and
/// swaps it only when [`AssetSlot::complete`] delivers the replacement, so a
/// reader sees either the old asset or the new one.
///
/// `epoch` is bumped every time a new generation begins or the asset is
/// replaced by hand. A completion carrying an older epoch is stale and is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default)]
    state: GenerationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_error: Option<String>,
    #[serde(default)]
    epoch: u64,
}

impl AssetSlot {
    /// Current asset reference, if any. Empty strings count as absent.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Current generation state.
    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Message of the last failed generation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Epoch of the most recent generation or manual assignment.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a non-empty asset reference is present.
    pub fn has_asset(&self) -> bool {
        self.url().is_some()
    }

    /// Whether a generation task is in flight.
    pub fn is_generating(&self) -> bool {
        self.state == GenerationState::Generating
    }

    /// Enter `generating` and return the epoch the new task belongs to.
    ///
    /// Returns `None` when a generation is already in flight; starting twice
    /// is a no-op. The current asset, if any, stays in place.
    pub fn begin(&mut self) -> Option<u64> {
        if self.is_generating() {
            return None;
        }
        self.epoch += 1;
        self.state = GenerationState::Generating;
        self.last_error = None;
        Some(self.epoch)
    }

    /// Deliver the asset produced by generation `epoch`.
    ///
    /// Returns `false` (and changes nothing) for stale completions.
    pub fn complete(&mut self, epoch: u64, url: impl Into<String>) -> bool {
        if !self.accepts(epoch) {
            return false;
        }
        self.url = Some(url.into());
        self.state = GenerationState::Ready;
        true
    }

    /// Record that generation `epoch` failed. The previous asset is kept.
    ///
    /// Returns `false` (and changes nothing) for stale completions.
    pub fn fail(&mut self, epoch: u64, message: impl Into<String>) -> bool {
        if !self.accepts(epoch) {
            return false;
        }
        self.state = GenerationState::Failed;
        self.last_error = Some(message.into());
        true
    }

    /// Replace the asset by hand (upload or library pick).
    ///
    /// Supersedes any in-flight generation: its completion will be stale.
    pub fn assign(&mut self, url: impl Into<String>) {
        self.epoch += 1;
        self.url = Some(url.into());
        self.state = GenerationState::Ready;
        self.last_error = None;
    }

    /// Drop the asset and return to `idle`.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.url = None;
        self.state = GenerationState::Idle;
        self.last_error = None;
    }

    /// Normalize a slot read back from a snapshot.
    ///
    /// No task survives a handoff, so a persisted `generating` state is
    /// resolved to `ready` when an asset exists and `idle` otherwise.
    pub fn restore(&mut self) {
        if self.is_generating() {
            self.state = if self.has_asset() {
                GenerationState::Ready
            } else {
                GenerationState::Idle
            };
        }
    }

    fn accepts(&self, epoch: u64) -> bool {
        self.is_generating() && self.epoch == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_is_idempotent_while_generating() {
        let mut slot = AssetSlot::default();
        let first = slot.begin();
        assert_eq!(first, Some(1));
        assert_eq!(slot.begin(), None);
        assert_eq!(slot.epoch(), 1);
        assert!(slot.is_generating());
    }

    #[test]
    fn regeneration_keeps_previous_asset_until_complete() {
        let mut slot = AssetSlot::default();
        let epoch = slot.begin().unwrap();
        assert!(slot.complete(epoch, "a.mp3"));

        let epoch = slot.begin().unwrap();
        assert_eq!(slot.url(), Some("a.mp3"));
        assert!(slot.complete(epoch, "b.mp3"));
        assert_eq!(slot.url(), Some("b.mp3"));
        assert_eq!(slot.state(), GenerationState::Ready);
    }

    #[test]
    fn failure_retains_asset() {
        let mut slot = AssetSlot::default();
        slot.assign("a.mp3");
        let epoch = slot.begin().unwrap();
        assert!(slot.fail(epoch, "boom"));
        assert_eq!(slot.url(), Some("a.mp3"));
        assert_eq!(slot.state(), GenerationState::Failed);
        assert_eq!(slot.last_error(), Some("boom"));
    }

    #[test]
    fn manual_assignment_makes_in_flight_completion_stale() {
        let mut slot = AssetSlot::default();
        let epoch = slot.begin().unwrap();
        slot.assign("picked.png");
        assert!(!slot.complete(epoch, "generated.png"));
        assert_eq!(slot.url(), Some("picked.png"));
    }

    #[test]
    fn empty_url_is_not_an_asset() {
        let mut slot = AssetSlot::default();
        slot.assign("");
        assert!(!slot.has_asset());
    }

    #[test]
    fn restore_resolves_generating() {
        let mut slot = AssetSlot::default();
        slot.begin();
        slot.restore();
        assert_eq!(slot.state(), GenerationState::Idle);

        slot.assign("x.mp4");
        slot.begin();
        slot.restore();
        assert_eq!(slot.state(), GenerationState::Ready);
    }
}
