//! Repository Traits
//!
//! Interfaces for gallery persistence. Soft-deleted rows are never returned.

use kernel::id::{GalleryId, UserId};

use crate::domain::entity::gallery::Gallery;
use crate::error::GalleryResult;

/// Gallery persistence gateway
#[trait_variant::make(GalleryRepository: Send)]
pub trait LocalGalleryRepository {
    /// Find gallery by primary key
    async fn by_id(&self, id: GalleryId) -> GalleryResult<Gallery>;

    /// All galleries owned by `user_id`, oldest first
    async fn by_user_id(&self, user_id: UserId) -> GalleryResult<Vec<Gallery>>;

    /// Insert; backfills id and timestamps on `gallery`
    async fn create(&self, gallery: &mut Gallery) -> GalleryResult<()>;

    /// Save every persisted column of `gallery`
    async fn update(&self, gallery: &mut Gallery) -> GalleryResult<()>;

    /// Soft-delete by id
    async fn delete(&self, id: GalleryId) -> GalleryResult<()>;
}
