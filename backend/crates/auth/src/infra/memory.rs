//! In-memory user gateway (tests and database-less local runs)
//!
//! Mirrors the PostgreSQL gateway: soft-deleted rows are invisible and the
//! unique indexes on email / remember hash are enforced.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::Mutex;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

impl Table {
    fn find(&self, pred: impl Fn(&User) -> bool) -> UserResult<User> {
        self.rows
            .values()
            .find(|u| !u.record.is_deleted() && pred(u))
            .map(User::persisted)
            .ok_or(UserError::NotFound)
    }

    /// Unique-index check, ignoring the row being written
    fn conflicts(&self, user: &User) -> bool {
        self.rows.values().any(|u| {
            u.id() != user.id()
                && !u.record.is_deleted()
                && (u.email == user.email || u.remember_hash == user.remember_hash)
        })
    }
}

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    table: Arc<Mutex<Table>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn by_id(&self, id: UserId) -> UserResult<User> {
        self.table.lock().await.find(|u| u.id() == id)
    }

    async fn by_email(&self, email: &str) -> UserResult<User> {
        self.table.lock().await.find(|u| u.email == email)
    }

    async fn by_remember_hash(&self, remember_hash: &str) -> UserResult<User> {
        self.table
            .lock()
            .await
            .find(|u| u.remember_hash == remember_hash)
    }

    async fn create(&self, user: &mut User) -> UserResult<()> {
        let mut table = self.table.lock().await;
        if table.conflicts(user) {
            return Err(UserError::EmailTaken);
        }

        table.next_id += 1;
        let id = UserId::new(table.next_id);
        let now = Utc::now();
        user.record.assign(id, now, now);
        table.rows.insert(id.value(), user.persisted());
        Ok(())
    }

    async fn update(&self, user: &mut User) -> UserResult<()> {
        let mut table = self.table.lock().await;
        if table.conflicts(user) {
            return Err(UserError::EmailTaken);
        }

        match table.rows.get_mut(&user.id().value()) {
            Some(row) if !row.record.is_deleted() => {
                *row = user.persisted();
                Ok(())
            }
            _ => Err(UserError::NotFound),
        }
    }

    async fn delete(&self, id: UserId) -> UserResult<()> {
        if let Some(row) = self.table.lock().await.rows.get_mut(&id.value()) {
            row.record.mark_deleted();
        }
        Ok(())
    }
}
