//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyboard binary.

mod commands;
mod listing;
mod run;

pub use commands::{Cli, Commands};
pub use listing::{list_albums, list_voices};
pub use run::{RunOptions, run_pipeline};
