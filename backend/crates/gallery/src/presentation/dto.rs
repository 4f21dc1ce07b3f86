//! Gallery DTOs and views

use kernel::id::{GalleryId, UserId};
use kernel::view::FormView;
use serde::{Deserialize, Serialize};

use crate::domain::entity::gallery::Gallery;
use crate::domain::entity::image::Image;

/// POST /galleries and POST /galleries/{id}/update
#[derive(Deserialize)]
pub struct GalleryForm {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct GalleryView {
    pub id: GalleryId,
    pub user_id: UserId,
    pub title: String,
    pub images: Vec<ImageView>,
}

#[derive(Debug, Serialize)]
pub struct ImageView {
    pub filename: String,
    /// URL the image is served from
    pub path: String,
}

impl From<&Image> for ImageView {
    fn from(image: &Image) -> Self {
        Self {
            filename: image.filename.clone(),
            path: image.path(),
        }
    }
}

impl From<&Gallery> for GalleryView {
    fn from(gallery: &Gallery) -> Self {
        Self {
            id: gallery.id(),
            user_id: gallery.user_id,
            title: gallery.title.clone(),
            images: gallery.images.iter().map(ImageView::from).collect(),
        }
    }
}

/// New gallery page
pub fn new_gallery_view(title: &str) -> FormView {
    FormView::post("/galleries").field("title", "text", "Title", title)
}
