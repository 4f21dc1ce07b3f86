//! Gallery Service
//!
//! Galleries live in the database, their images on disk. This service is the
//! one place that joins the two.

use std::sync::Arc;

use kernel::id::{GalleryId, UserId};
use tokio::io::AsyncRead;

use crate::application::config::GalleryConfig;
use crate::domain::entity::gallery::Gallery;
use crate::domain::entity::image::Image;
use crate::domain::repository::GalleryRepository;
use crate::domain::validation::GalleryValidator;
use crate::error::GalleryResult;
use crate::infra::image_store::ImageStore;

pub struct GalleryService<R>
where
    R: GalleryRepository,
{
    validator: GalleryValidator<R>,
    images: ImageStore,
}

impl<R> GalleryService<R>
where
    R: GalleryRepository + Sync,
{
    pub fn new(repo: Arc<R>, config: &GalleryConfig) -> Self {
        Self {
            validator: GalleryValidator::new(repo),
            images: ImageStore::new(&config.images_dir),
        }
    }

    /// Load a gallery with its images attached.
    ///
    /// A failure to list the images is logged and yields an empty list; the
    /// gallery itself is still returned.
    pub async fn by_id(&self, id: GalleryId) -> GalleryResult<Gallery> {
        let mut gallery = self.validator.by_id(id).await?;
        match self.images.by_gallery_id(id).await {
            Ok(images) => gallery.images = images,
            Err(e) => {
                tracing::warn!(gallery_id = %id, error = %e, "Could not list gallery images");
            }
        }
        Ok(gallery)
    }

    /// Galleries owned by `user_id`, without images
    pub async fn by_user_id(&self, user_id: UserId) -> GalleryResult<Vec<Gallery>> {
        self.validator.by_user_id(user_id).await
    }

    pub async fn create(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        self.validator.create(gallery).await?;
        tracing::info!(gallery_id = %gallery.id(), user_id = %gallery.user_id, "Gallery created");
        Ok(())
    }

    pub async fn update(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        self.validator.update(gallery).await
    }

    /// Soft-delete the row. Image files are left on disk.
    pub async fn delete(&self, id: GalleryId) -> GalleryResult<()> {
        self.validator.delete(id).await?;
        tracing::info!(gallery_id = %id, "Gallery deleted");
        Ok(())
    }

    /// Stream one uploaded file into the gallery's directory
    pub async fn upload_image<Rd>(
        &self,
        gallery: &Gallery,
        filename: &str,
        reader: &mut Rd,
    ) -> GalleryResult<Image>
    where
        Rd: AsyncRead + Unpin + ?Sized,
    {
        self.images.create(gallery.id(), filename, reader).await
    }

    pub async fn delete_image(&self, gallery: &Gallery, filename: &str) -> GalleryResult<()> {
        self.images
            .delete(&Image::new(gallery.id(), filename))
            .await
    }
}
