//! Tests for the in-memory album library.

use storyboard_interface::ImageLibrary;
use storyboard_storage::InMemoryImageLibrary;

#[tokio::test]
async fn test_seeded_albums() {
    let library = InMemoryImageLibrary::seeded();
    let albums = library.list_albums().await.unwrap();

    let ids: Vec<_> = albums.iter().map(|album| album.id().as_str()).collect();
    assert_eq!(ids, vec!["default", "travel", "products"]);

    let images = library.list_images("default").await.unwrap();
    assert_eq!(images.len(), 6);
    assert_eq!(images[0].url(), "/mountain-valley-vista.png");
}

#[tokio::test]
async fn test_create_album_derives_slug() {
    let library = InMemoryImageLibrary::default();
    let album = library.create_album("Summer   Trip").await.unwrap();

    assert_eq!(album.id(), "summer-trip");
    assert_eq!(album.name(), "Summer   Trip");
    assert!(library.list_images("summer-trip").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_album_rejects_blank_and_duplicate_names() {
    let library = InMemoryImageLibrary::default();

    assert!(library.create_album("   ").await.is_err());

    library.create_album("Travel").await.unwrap();
    let err = library.create_album("travel").await.unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[tokio::test]
async fn test_default_album_cannot_be_deleted() {
    let library = InMemoryImageLibrary::seeded();

    assert!(library.delete_album("default").await.is_err());
    library.delete_album("travel").await.unwrap();
    assert!(library.list_images("travel").await.is_err());
}

#[tokio::test]
async fn test_add_and_remove_image() {
    let library = InMemoryImageLibrary::seeded();

    let image = library
        .add_image("products", "/uploads/cover.png")
        .await
        .unwrap();
    assert_eq!(image.id(), "15");

    library.remove_image("products", "15").await.unwrap();
    assert!(library.remove_image("products", "15").await.is_err());
}

#[tokio::test]
async fn test_rename_keeps_id() {
    let library = InMemoryImageLibrary::seeded();
    let album = library.rename_album("travel", "Trips").await.unwrap();

    assert_eq!(album.id(), "travel");
    assert_eq!(album.name(), "Trips");
}
