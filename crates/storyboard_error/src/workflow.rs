//! Workflow navigation error types.

/// Kinds of workflow navigation errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum WorkflowErrorKind {
    /// Back navigation would leave the stage the pipeline was entered at
    #[display("Cannot go back from {}: pipeline was entered at this stage", _0)]
    BeforeEntry(String),
    /// The pipeline is already at its last stage
    #[display("Pipeline is already complete")]
    AlreadyComplete,
    /// The final video was requested before finalization
    #[display("No final video has been produced yet")]
    NotFinalized,
    /// A final video title must not be blank
    #[display("Final video title cannot be empty")]
    EmptyTitle,
    /// The action belongs to a different stage
    #[display("Cannot {} during the {} stage", action, stage)]
    WrongStage {
        /// Requested action
        action: String,
        /// Current stage
        stage: String,
    },
}

/// Workflow error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Workflow Error: {} at line {} in {}", kind, line, file)]
pub struct WorkflowError {
    /// The kind of error that occurred
    pub kind: WorkflowErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl WorkflowError {
    /// Create a new workflow error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkflowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
