//! Voice and album listing handlers.

use storyboard::{ImageLibrary, PipelineConfig, StoryboardResult};

/// Print the selectable voice models.
pub fn list_voices(config: &PipelineConfig) {
    let default = config.defaults().voice();
    for voice in config.voices() {
        let marker = if voice.id() == default { "*" } else { " " };
        println!("{} {:<10} {}", marker, voice.id(), voice.name());
    }
}

/// Print every album with its image count.
pub async fn list_albums(library: &dyn ImageLibrary) -> StoryboardResult<()> {
    for album in library.list_albums().await? {
        println!("{:<12} {:<16} {} images", album.id(), album.name(), album.images().len());
    }
    Ok(())
}
