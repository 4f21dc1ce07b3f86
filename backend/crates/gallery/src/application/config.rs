//! Gallery Configuration

use std::path::PathBuf;

/// Directory images are written to when none is configured
pub const DEFAULT_IMAGES_DIR: &str = "images";

#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Root of the image store; served under `/images`
    pub images_dir: PathBuf,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
        }
    }
}

impl GalleryConfig {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }
}
