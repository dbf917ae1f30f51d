//! Scene collection error types.

/// Soft failures of collection mutations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CollectionErrorKind {
    /// Mutation referenced an id that is no longer in the collection
    #[display("Scene not found: {}", _0)]
    SceneNotFound(String),
}

/// Collection error with location tracking.
///
/// Callers treat these as benign no-ops: they are logged, not raised.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Collection Error: {} at line {} in {}", kind, line, file)]
pub struct CollectionError {
    /// The kind of error that occurred
    pub kind: CollectionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CollectionError {
    /// Create a new collection error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CollectionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
