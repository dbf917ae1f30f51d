//! Playback error types.

/// Kinds of playback errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PlaybackErrorKind {
    /// The asset kind has no playable media
    #[display("{} assets are not playable", _0)]
    NotPlayable(String),
    /// The scene has no asset of the requested kind yet
    #[display("Scene {} has no {} to play", scene, kind)]
    NoMedia {
        /// Scene id
        scene: String,
        /// Asset kind
        kind: String,
    },
    /// The media backend refused to start or stop
    #[display("Media player error: {}", _0)]
    Player(String),
}

/// Playback error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Playback Error: {} at line {} in {}", kind, line, file)]
pub struct PlaybackError {
    /// The kind of error that occurred
    pub kind: PlaybackErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlaybackError {
    /// Create a new playback error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlaybackErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
