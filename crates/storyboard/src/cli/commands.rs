//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storyboard::{AspectRatio, EntryPoint};

/// Storyboard - turn a script into a narrated, illustrated final video
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Turn a script into a narrated, illustrated final video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the whole pipeline and print the final video as JSON
    Run {
        /// Where the run starts
        #[arg(long, value_enum, default_value = "blank")]
        entry: EntryArg,

        /// Read the script from a file
        #[arg(long, conflicts_with = "text")]
        script: Option<PathBuf>,

        /// Script text given inline
        #[arg(long)]
        text: Option<String>,

        /// Keep stage snapshots as JSON files in this directory
        #[arg(long)]
        state_dir: Option<PathBuf>,

        /// Clip aspect ratio (16:9, 9:16 or 1:1)
        #[arg(long)]
        aspect_ratio: Option<AspectRatio>,

        /// Voice model id, see `storyboard voices`
        #[arg(long)]
        voice: Option<String>,

        /// Title of the final video
        #[arg(long)]
        title: Option<String>,
    },

    /// List the selectable voice models
    Voices,

    /// List the image albums
    Albums,
}

/// Entry point choices
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum EntryArg {
    /// Draft scenes from the given content
    Blank,
    /// Use the given script as written
    Script,
    /// Start with uploaded narration for each scene
    Audio,
}

impl From<EntryArg> for EntryPoint {
    fn from(arg: EntryArg) -> Self {
        match arg {
            EntryArg::Blank => EntryPoint::Blank,
            EntryArg::Script => EntryPoint::Script,
            EntryArg::Audio => EntryPoint::Audio,
        }
    }
}
