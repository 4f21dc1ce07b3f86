//! Base Record
//!
//! Identity and bookkeeping columns shared by every persisted entity.
//! Entities include a [`Record`] by value instead of repeating these fields.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::id::Id;

/// Identity + timestamps + soft-delete marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct Record<T> {
    id: Id<T>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl<T> Record<T> {
    /// A record that storage has not seen yet
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Id::default(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Rebuild a record loaded from storage
    pub fn from_db(
        id: Id<T>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    pub fn id(&self) -> Id<T> {
        self.id
    }

    /// Backfill the storage-assigned identity after an insert.
    ///
    /// Identity is immutable once assigned; a second call is ignored.
    pub fn assign(&mut self, id: Id<T>, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        if self.id.is_assigned() {
            tracing::warn!(id = %self.id, "Attempt to reassign record identity ignored");
            return;
        }
        self.id = id;
        self.created_at = created_at;
        self.updated_at = updated_at;
    }

    /// Bump `updated_at` before a save
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Mark as soft-deleted
    pub fn mark_deleted(&mut self) {
        self.deleted_at = Some(Utc::now());
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl<T> Default for Record<T> {
    fn default() -> Self {
        Self::new()
    }
}
