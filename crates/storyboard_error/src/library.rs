//! Image library error types.

/// Kinds of album library errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum LibraryErrorKind {
    /// Album does not exist
    #[display("Album not found: {}", _0)]
    AlbumNotFound(String),
    /// Album name is blank
    #[display("Album name cannot be empty")]
    EmptyAlbumName,
    /// An album with the derived id already exists
    #[display("Album already exists: {}", _0)]
    AlbumExists(String),
    /// The album cannot be deleted
    #[display("Album {} is protected and cannot be deleted", _0)]
    ProtectedAlbum(String),
    /// No image with this id in the album
    #[display("Image {} not found in album {}", image, album)]
    ImageNotFound {
        /// Album searched
        album: String,
        /// Missing image id
        image: String,
    },
}

/// Image library error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Library Error: {} at line {} in {}", kind, line, file)]
pub struct LibraryError {
    /// The kind of error that occurred
    pub kind: LibraryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LibraryError {
    /// Create a new library error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LibraryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
