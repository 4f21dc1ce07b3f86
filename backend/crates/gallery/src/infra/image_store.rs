//! Filesystem Image Store
//!
//! Layout: `<root>/galleries/<gallery id>/<filename>`. Uploads are streamed
//! to disk as they arrive; a copy that fails halfway leaves the partial file.

use std::io;
use std::path::PathBuf;

use kernel::id::GalleryId;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};

use crate::domain::entity::image::Image;
use crate::error::{GalleryError, GalleryResult};

const MAX_FILENAME_LEN: usize = 255;

/// Make a client-supplied filename safe to join onto a directory.
/// Returns None if nothing usable is left.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    // Leading dots would allow hidden files and `..`
    let sanitized = sanitized.trim_matches(|c| c == '.' || c == ' ');
    if sanitized.is_empty() {
        return None;
    }

    let mut end = sanitized.len().min(MAX_FILENAME_LEN);
    while !sanitized.is_char_boundary(end) {
        end -= 1;
    }
    Some(sanitized[..end].to_string())
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn gallery_dir(&self, gallery_id: GalleryId) -> PathBuf {
        self.root.join("galleries").join(gallery_id.to_string())
    }

    /// On-disk location of `image`
    pub fn file_path(&self, image: &Image) -> PathBuf {
        self.gallery_dir(image.gallery_id).join(&image.filename)
    }

    /// Stream `reader` into a new image of the gallery
    pub async fn create<Rd>(
        &self,
        gallery_id: GalleryId,
        filename: &str,
        reader: &mut Rd,
    ) -> GalleryResult<Image>
    where
        Rd: AsyncRead + Unpin + ?Sized,
    {
        let filename = sanitize_filename(filename).ok_or(GalleryError::InvalidFilename)?;
        let image = Image::new(gallery_id, filename);

        let dir = self.gallery_dir(gallery_id);
        fs::create_dir_all(&dir).await?;

        let mut dst = fs::File::create(self.file_path(&image)).await?;
        let written = tokio::io::copy(reader, &mut dst).await?;
        dst.flush().await?;

        tracing::info!(
            gallery_id = %gallery_id,
            filename = %image.filename,
            bytes = written,
            "Image stored"
        );

        Ok(image)
    }

    /// Images of a gallery, sorted by filename. A missing directory means none.
    pub async fn by_gallery_id(&self, gallery_id: GalleryId) -> GalleryResult<Vec<Image>> {
        let mut entries = match fs::read_dir(self.gallery_dir(gallery_id)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut images = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                images.push(Image::new(gallery_id, name));
            }
        }
        images.sort();

        Ok(images)
    }

    /// Remove an image file
    pub async fn delete(&self, image: &Image) -> GalleryResult<()> {
        // Names from the URL must already be in stored form
        if sanitize_filename(&image.filename).as_deref() != Some(image.filename.as_str()) {
            return Err(GalleryError::InvalidFilename);
        }

        fs::remove_file(self.file_path(image)).await?;

        tracing::info!(
            gallery_id = %image.gallery_id,
            filename = %image.filename,
            "Image deleted"
        );

        Ok(())
    }
}
