//! Check Session Use Case
//!
//! Resolves a remember cookie value to its user.

use std::sync::Arc;

use crate::application::user_service::UserService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::UserResult;

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: UserRepository,
{
    users: Arc<UserService<R>>,
}

impl<R> CheckSessionUseCase<R>
where
    R: UserRepository + Sync,
{
    pub fn new(users: Arc<UserService<R>>) -> Self {
        Self { users }
    }

    /// Look up the user owning `remember_token`
    pub async fn execute(&self, remember_token: &str) -> UserResult<User> {
        self.users.by_remember(remember_token).await
    }
}
