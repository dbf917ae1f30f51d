//! Error types for the storyboard production pipeline.
//!
//! This crate provides the foundation error types used throughout the storyboard workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! None of these errors are fatal. Gate failures, generation failures and
//! missing scenes are all local conditions a user can recover from.
//!
//! # Examples
//!
//! ```
//! use storyboard_error::{StoryboardResult, ValidationError, ValidationErrorKind};
//!
//! fn check() -> StoryboardResult<()> {
//!     Err(ValidationError::new(ValidationErrorKind::EmptyCollection))?
//! }
//!
//! match check() {
//!     Ok(()) => println!("ready"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod error;
mod generation;
mod json;
mod library;
mod persistence;
mod playback;
mod validation;
mod workflow;

pub use collection::{CollectionError, CollectionErrorKind};
pub use config::ConfigError;
pub use error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use library::{LibraryError, LibraryErrorKind};
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use playback::{PlaybackError, PlaybackErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
pub use workflow::{WorkflowError, WorkflowErrorKind};
