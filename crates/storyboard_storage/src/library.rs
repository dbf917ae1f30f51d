//! In-memory album library.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use storyboard_core::{Album, LibraryImage};
use storyboard_error::{LibraryError, LibraryErrorKind, StoryboardResult};
use storyboard_interface::ImageLibrary;
use tokio::sync::RwLock;

const DEFAULT_ALBUM: &str = "default";

/// Album library held in memory.
///
/// The `default` album always exists and cannot be deleted.
#[derive(Debug, Clone)]
pub struct InMemoryImageLibrary {
    albums: Arc<RwLock<Vec<Album>>>,
    next_image_id: Arc<AtomicU64>,
}

impl InMemoryImageLibrary {
    /// Create a library holding `albums`.
    ///
    /// An empty `default` album is added in front when none is given.
    pub fn new(mut albums: Vec<Album>) -> Self {
        if !albums.iter().any(|album| album.id() == DEFAULT_ALBUM) {
            albums.insert(0, Album::new(DEFAULT_ALBUM, "Default", Vec::new()));
        }
        let next_image_id = albums
            .iter()
            .flat_map(|album| album.images())
            .filter_map(|image| image.id().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            albums: Arc::new(RwLock::new(albums)),
            next_image_id: Arc::new(AtomicU64::new(next_image_id)),
        }
    }

    /// Library seeded with the sample `default`, `travel` and `products` albums.
    pub fn seeded() -> Self {
        let placeholder =
            |query: &str| format!("/placeholder.svg?height=300&width=300&query={}", query);
        let images = |entries: Vec<(&str, String)>| {
            entries
                .into_iter()
                .map(|(id, url)| LibraryImage::new(id, url))
                .collect::<Vec<_>>()
        };

        Self::new(vec![
            Album::new(
                DEFAULT_ALBUM,
                "Default",
                images(vec![
                    ("1", "/mountain-valley-vista.png".to_string()),
                    ("2", "/vibrant-cityscape.png".to_string()),
                    ("3", "/thoughtful-gaze.png".to_string()),
                    ("4", "/vibrant-pasta-dish.png".to_string()),
                    ("5", "/chromatic-whirlwind.png".to_string()),
                    ("6", "/modern-tech-essentials.png".to_string()),
                ]),
            ),
            Album::new(
                "travel",
                "Travel",
                images(vec![
                    ("7", "/tropical-getaway.png".to_string()),
                    ("8", "/alpine-vista-hike.png".to_string()),
                    ("9", placeholder("urban exploration")),
                    ("10", placeholder("tropical island")),
                ]),
            ),
            Album::new(
                "products",
                "Products",
                images(vec![
                    ("11", placeholder("product photography")),
                    ("12", placeholder("electronics gadgets")),
                    ("13", placeholder("fashion accessories")),
                    ("14", placeholder("cosmetics makeup")),
                ]),
            ),
        ])
    }
}

impl Default for InMemoryImageLibrary {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[track_caller]
fn not_found(album_id: &str) -> LibraryError {
    LibraryError::new(LibraryErrorKind::AlbumNotFound(album_id.to_string()))
}

#[async_trait::async_trait]
impl ImageLibrary for InMemoryImageLibrary {
    async fn list_albums(&self) -> StoryboardResult<Vec<Album>> {
        Ok(self.albums.read().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn list_images(&self, album_id: &str) -> StoryboardResult<Vec<LibraryImage>> {
        let albums = self.albums.read().await;
        albums
            .iter()
            .find(|album| album.id() == album_id)
            .map(|album| album.images().clone())
            .ok_or_else(|| not_found(album_id).into())
    }

    #[tracing::instrument(skip(self))]
    async fn create_album(&self, name: &str) -> StoryboardResult<Album> {
        let id = Album::slug(name);
        if id.is_empty() {
            return Err(LibraryError::new(LibraryErrorKind::EmptyAlbumName).into());
        }

        let mut albums = self.albums.write().await;
        if albums.iter().any(|album| album.id() == &id) {
            return Err(LibraryError::new(LibraryErrorKind::AlbumExists(id)).into());
        }

        let album = Album::new(id, name.trim(), Vec::new());
        albums.push(album.clone());
        tracing::info!(album_id = %album.id(), "Created album");
        Ok(album)
    }

    #[tracing::instrument(skip(self))]
    async fn rename_album(&self, album_id: &str, name: &str) -> StoryboardResult<Album> {
        if name.trim().is_empty() {
            return Err(LibraryError::new(LibraryErrorKind::EmptyAlbumName).into());
        }
        let mut albums = self.albums.write().await;
        let album = albums
            .iter_mut()
            .find(|album| album.id() == album_id)
            .ok_or_else(|| not_found(album_id))?;
        album.rename(name.trim());
        Ok(album.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_album(&self, album_id: &str) -> StoryboardResult<()> {
        if album_id == DEFAULT_ALBUM {
            return Err(
                LibraryError::new(LibraryErrorKind::ProtectedAlbum(album_id.to_string())).into(),
            );
        }
        let mut albums = self.albums.write().await;
        let index = albums
            .iter()
            .position(|album| album.id() == album_id)
            .ok_or_else(|| not_found(album_id))?;
        albums.remove(index);
        tracing::info!("Deleted album");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn add_image(&self, album_id: &str, url: &str) -> StoryboardResult<LibraryImage> {
        let mut albums = self.albums.write().await;
        let album = albums
            .iter_mut()
            .find(|album| album.id() == album_id)
            .ok_or_else(|| not_found(album_id))?;
        let id = self.next_image_id.fetch_add(1, Ordering::Relaxed);
        let image = LibraryImage::new(id.to_string(), url);
        album.push(image.clone());
        Ok(image)
    }

    #[tracing::instrument(skip(self))]
    async fn remove_image(&self, album_id: &str, image_id: &str) -> StoryboardResult<()> {
        let mut albums = self.albums.write().await;
        let album = albums
            .iter_mut()
            .find(|album| album.id() == album_id)
            .ok_or_else(|| not_found(album_id))?;
        album.remove(image_id).map(|_| ()).ok_or_else(|| {
            LibraryError::new(LibraryErrorKind::ImageNotFound {
                album: album_id.to_string(),
                image: image_id.to_string(),
            })
            .into()
        })
    }
}
