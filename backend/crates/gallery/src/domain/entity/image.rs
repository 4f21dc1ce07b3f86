//! Image
//!
//! Images are not stored in the database. An image belongs to a gallery by
//! living in `galleries/<gallery id>/` under the images directory.

use kernel::id::GalleryId;

/// URL prefix the images directory is served under
pub const IMAGES_URL_PREFIX: &str = "/images";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Image {
    pub gallery_id: GalleryId,
    pub filename: String,
}

impl Image {
    pub fn new(gallery_id: GalleryId, filename: impl Into<String>) -> Self {
        Self {
            gallery_id,
            filename: filename.into(),
        }
    }

    /// Path relative to the images directory
    pub fn relative_path(&self) -> String {
        format!("galleries/{}/{}", self.gallery_id, self.filename)
    }

    /// URL path with the filename percent-encoded
    pub fn path(&self) -> String {
        format!(
            "{}/galleries/{}/{}",
            IMAGES_URL_PREFIX,
            self.gallery_id,
            urlencoding::encode(&self.filename)
        )
    }
}
