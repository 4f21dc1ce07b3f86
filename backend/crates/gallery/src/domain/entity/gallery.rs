//! Gallery Entity

use kernel::id::{GalleryId, UserId, markers};
use kernel::model::Record;

use crate::domain::entity::image::Image;

/// A titled container of images owned by one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub record: Record<markers::Gallery>,
    /// Owner
    pub user_id: UserId,
    pub title: String,
    /// Images found on disk; never persisted
    pub images: Vec<Image>,
}

impl Gallery {
    /// A not-yet-stored gallery
    pub fn new(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            record: Record::new(),
            user_id,
            title: title.into(),
            images: Vec::new(),
        }
    }

    /// Rebuild a gallery loaded from storage
    pub fn from_db(record: Record<markers::Gallery>, user_id: UserId, title: String) -> Self {
        Self {
            record,
            user_id,
            title,
            images: Vec::new(),
        }
    }

    /// Placeholder carrying only an id (delete validation)
    pub fn with_id(id: GalleryId) -> Self {
        let mut gallery = Self::new(UserId::default(), "");
        let now = gallery.record.created_at;
        gallery.record.assign(id, now, now);
        gallery
    }

    pub fn id(&self) -> GalleryId {
        self.record.id()
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
