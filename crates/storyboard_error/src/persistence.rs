//! Snapshot persistence error types.

/// Kinds of persistence errors.
///
/// A missing snapshot is not an error; stores return `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// Failed to create the state directory
    #[display("Failed to create state directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a snapshot
    #[display("Failed to write snapshot: {}", _0)]
    Write(String),
    /// Failed to read a snapshot
    #[display("Failed to read snapshot: {}", _0)]
    Read(String),
    /// Failed to delete a snapshot
    #[display("Failed to delete snapshot: {}", _0)]
    Delete(String),
    /// Snapshot content could not be encoded or decoded
    #[display("Corrupt snapshot '{}': {}", key, message)]
    Corrupt {
        /// Snapshot key
        key: String,
        /// Decoder message
        message: String,
    },
}

/// Persistence error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{PersistenceError, PersistenceErrorKind};
///
/// let err = PersistenceError::new(PersistenceErrorKind::Read("post-script".to_string()));
/// assert!(format!("{}", err).contains("post-script"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    /// The kind of error that occurred
    pub kind: PersistenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PersistenceError {
    /// Create a new persistence error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
