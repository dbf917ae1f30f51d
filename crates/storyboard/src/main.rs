//! Storyboard CLI binary.
//!
//! This binary drives the production pipeline from the command line:
//! - Run a script through every stage and print the final video
//! - List voice models and image albums

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, RunOptions, list_albums, list_voices, run_pipeline};
    use storyboard::{InMemoryImageLibrary, PipelineConfig};

    // Load environment variables from .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if cli.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::load()?,
    };
    let library = InMemoryImageLibrary::seeded();

    match cli.command {
        Commands::Run {
            entry,
            script,
            text,
            state_dir,
            aspect_ratio,
            voice,
            title,
        } => {
            let content = match (script, text) {
                (Some(path), _) => std::fs::read_to_string(&path)?,
                (None, Some(text)) => text,
                (None, None) => String::new(),
            };
            let options = RunOptions {
                entry: entry.into(),
                content,
                state_dir,
                aspect_ratio,
                voice,
                title,
            };
            let video = run_pipeline(config, &library, &options).await?;
            println!("{}", serde_json::to_string_pretty(&video)?);
        }

        Commands::Voices => list_voices(&config),

        Commands::Albums => list_albums(&library).await?,
    }

    Ok(())
}
