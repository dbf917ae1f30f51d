//! Asset generation error types.

/// Failures of a single (scene, asset kind) generation task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The external generator reported a failure
    #[display("Generator failed: {}", _0)]
    Generator(String),
    /// The generator cannot produce this asset kind
    #[display("Unsupported asset kind: {}", _0)]
    UnsupportedKind(String),
    /// Narration cannot be generated from empty text
    #[display("Scene {} has no text to narrate", _0)]
    EmptyText(String),
    /// Video cannot be rendered without a cover image
    #[display("Scene {} has no image to animate", _0)]
    MissingImage(String),
    /// The generation task panicked or was aborted
    #[display("Generation task aborted: {}", _0)]
    TaskAborted(String),
    /// Final assembly failed
    #[display("Assembly failed: {}", _0)]
    Assembly(String),
}

impl GenerationErrorKind {
    /// Whether a retry of the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Generator(_) | Self::Assembly(_))
    }
}

/// Asset generation error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Generator("quota".to_string()));
/// assert!(err.kind.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
