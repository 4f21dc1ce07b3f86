//! Sign In Use Case
//!
//! Authenticates a user and hands back a remember token for the cookie.

use std::sync::Arc;

use crate::application::user_service::UserService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::UserResult;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    /// Plaintext token for the remember cookie
    pub remember_token: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    users: Arc<UserService<R>>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository + Sync,
{
    pub fn new(users: Arc<UserService<R>>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, input: SignInInput) -> UserResult<SignInOutput> {
        let mut user = self
            .users
            .authenticate(&input.email, input.password)
            .await?;

        // A loaded user only carries the hash; rotate to a fresh token
        let remember_token = self.users.ensure_remember(&mut user).await?;

        tracing::info!(user_id = %user.id(), "User signed in");

        Ok(SignInOutput {
            user,
            remember_token,
        })
    }
}
