//! In-memory gallery gateway (tests and database-less local runs)

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{GalleryId, UserId};
use tokio::sync::Mutex;

use crate::domain::entity::gallery::Gallery;
use crate::domain::repository::GalleryRepository;
use crate::error::{GalleryError, GalleryResult};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Gallery>,
}

#[derive(Clone, Default)]
pub struct MemoryGalleryRepository {
    table: Arc<Mutex<Table>>,
}

impl MemoryGalleryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Persisted columns only
fn stored(gallery: &Gallery) -> Gallery {
    Gallery::from_db(
        gallery.record.clone(),
        gallery.user_id,
        gallery.title.clone(),
    )
}

impl GalleryRepository for MemoryGalleryRepository {
    async fn by_id(&self, id: GalleryId) -> GalleryResult<Gallery> {
        let table = self.table.lock().await;
        table
            .rows
            .get(&id.value())
            .filter(|g| !g.record.is_deleted())
            .cloned()
            .ok_or(GalleryError::NotFound)
    }

    async fn by_user_id(&self, user_id: UserId) -> GalleryResult<Vec<Gallery>> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .values()
            .filter(|g| !g.record.is_deleted() && g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        let mut table = self.table.lock().await;
        table.next_id += 1;
        let id = GalleryId::new(table.next_id);
        let now = Utc::now();
        gallery.record.assign(id, now, now);
        table.rows.insert(id.value(), stored(gallery));
        Ok(())
    }

    async fn update(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&gallery.id().value()) {
            Some(row) if !row.record.is_deleted() => {
                *row = stored(gallery);
                Ok(())
            }
            _ => Err(GalleryError::NotFound),
        }
    }

    async fn delete(&self, id: GalleryId) -> GalleryResult<()> {
        if let Some(row) = self.table.lock().await.rows.get_mut(&id.value()) {
            row.record.mark_deleted();
        }
        Ok(())
    }
}
