//! Album library items.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One image available for cover selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct LibraryImage {
    /// Identifier within the album
    id: String,
    /// Image reference
    url: String,
}

impl LibraryImage {
    /// Create a library image.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// A named group of library images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Album {
    /// Slug identifier, e.g. `summer-trip`
    id: String,
    /// Display name
    name: String,
    /// Images in display order
    #[serde(default)]
    images: Vec<LibraryImage>,
}

impl Album {
    /// Create an album.
    pub fn new(id: impl Into<String>, name: impl Into<String>, images: Vec<LibraryImage>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            images,
        }
    }

    /// Derive an album id from a display name.
    ///
    /// Lowercases the name and replaces each run of whitespace with `-`.
    ///
    /// ```
    /// use storyboard_core::Album;
    ///
    /// assert_eq!(Album::slug("Summer  Trip 2024"), "summer-trip-2024");
    /// ```
    pub fn slug(name: &str) -> String {
        name.split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Add an image to the end of the album.
    pub fn push(&mut self, image: LibraryImage) {
        self.images.push(image);
    }

    /// Remove an image by id, returning it if it was present.
    pub fn remove(&mut self, image_id: &str) -> Option<LibraryImage> {
        let index = self.images.iter().position(|image| image.id == image_id)?;
        Some(self.images.remove(index))
    }

    /// Change the display name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
