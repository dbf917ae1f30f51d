//! Stage gate error types.

/// Conditions under which a stage gate rejects a transition or a batch action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// The collection holds no scenes at all
    #[display("storyboard has no scenes")]
    EmptyCollection,
    /// One or more scenes fail the gate for a stage
    #[display("{} stage is incomplete: {}", stage, unmet.join("; "))]
    StageIncomplete {
        /// Stage whose gate failed
        stage: String,
        /// Human-readable unmet conditions, e.g. "scene 3 has no audio"
        unmet: Vec<String>,
    },
    /// A batch action cannot start because scenes lack a prerequisite
    #[display("cannot generate {}: {}", kind, unmet.join("; "))]
    BatchBlocked {
        /// Asset kind the batch would produce
        kind: String,
        /// Unmet prerequisites
        unmet: Vec<String>,
    },
    /// A scene is still generating an asset
    #[display("scene {} is still generating {}", index, kind)]
    GenerationPending {
        /// 1-based position of the scene
        index: usize,
        /// Asset kind in flight
        kind: String,
    },
    /// A generation parameter is outside its accepted range
    #[display("invalid parameter '{}': {}", name, reason)]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Gate validation error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::StageIncomplete {
///     stage: "audio".to_string(),
///     unmet: vec!["scene 3 has no audio".to_string()],
/// });
/// assert!(format!("{}", err).contains("scene 3 has no audio"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
