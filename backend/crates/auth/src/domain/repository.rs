//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Gateways only ever see rows with `deleted_at IS NULL`; a lookup that
//! matches nothing returns [`UserError::NotFound`](crate::error::UserError::NotFound).

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::error::UserResult;

/// User persistence gateway
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by primary key
    async fn by_id(&self, id: UserId) -> UserResult<User>;

    /// Find user by (already normalized) email
    async fn by_email(&self, email: &str) -> UserResult<User>;

    /// Find user by remember-token hash
    async fn by_remember_hash(&self, remember_hash: &str) -> UserResult<User>;

    /// Insert; backfills id and timestamps on `user`
    async fn create(&self, user: &mut User) -> UserResult<()>;

    /// Save every persisted column of `user`
    async fn update(&self, user: &mut User) -> UserResult<()>;

    /// Soft-delete by id
    async fn delete(&self, id: UserId) -> UserResult<()>;
}
