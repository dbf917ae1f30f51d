//! Snapshot stores and album library backends for the storyboard pipeline.
//!
//! Stage handoff is by value: a store keeps the serialized form of a scene
//! list, and every load deserializes a fresh copy. Two backends are provided:
//!
//! - [`InMemorySnapshotStore`] keeps snapshots for the lifetime of the process
//! - [`FileSystemSnapshotStore`] writes one pretty-printed JSON file per key
//!
//! # Example
//!
//! ```rust
//! use storyboard_core::Scene;
//! use storyboard_interface::{SnapshotKey, SnapshotStore};
//! use storyboard_storage::InMemorySnapshotStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemorySnapshotStore::new();
//! let scenes = vec![Scene::new("Introduction to the topic.")];
//! store.save(SnapshotKey::PostScript, &scenes).await?;
//!
//! let restored = store.load(SnapshotKey::PostScript).await?.unwrap_or_default();
//! assert_eq!(restored, scenes);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod filesystem;
mod library;
mod memory;

pub use filesystem::FileSystemSnapshotStore;
pub use library::InMemoryImageLibrary;
pub use memory::InMemorySnapshotStore;
