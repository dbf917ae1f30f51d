//! Top-level error wrapper types.

use crate::{
    CollectionError, ConfigError, GenerationError, JsonError, LibraryError, PersistenceError,
    PlaybackError, ValidationError, WorkflowError,
};

/// Every error condition the storyboard workspace can report.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardError, WorkflowError, WorkflowErrorKind};
///
/// let err: StoryboardError = WorkflowError::new(WorkflowErrorKind::AlreadyComplete).into();
/// assert!(format!("{}", err).contains("Workflow Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryboardErrorKind {
    /// Stage gate unmet
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Asset generation failed
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Mutation referenced a missing scene
    #[from(CollectionError)]
    Collection(CollectionError),
    /// Snapshot store failure
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Playback failure
    #[from(PlaybackError)]
    Playback(PlaybackError),
    /// Navigation misuse
    #[from(WorkflowError)]
    Workflow(WorkflowError),
    /// Album library failure
    #[from(LibraryError)]
    Library(LibraryError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Storyboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ConfigError, StoryboardResult};
///
/// fn might_fail() -> StoryboardResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {}", _0)]
pub struct StoryboardError(Box<StoryboardErrorKind>);

impl StoryboardError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryboardErrorKind {
        &self.0
    }

    /// Whether this error is a stage gate rejection.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), StoryboardErrorKind::Validation(_))
    }

    /// Whether repeating the failed operation could succeed.
    pub fn is_retryable(&self) -> bool {
        match self.kind() {
            StoryboardErrorKind::Generation(e) => e.kind.is_retryable(),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to StoryboardErrorKind
impl<T> From<T> for StoryboardError
where
    T: Into<StoryboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for storyboard operations.
pub type StoryboardResult<T> = std::result::Result<T, StoryboardError>;
