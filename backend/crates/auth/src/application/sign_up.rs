//! Sign Up Use Case
//!
//! Creates a new user account and issues its first remember token.

use std::sync::Arc;

use crate::application::sign_in::SignInOutput;
use crate::application::user_service::UserService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::UserResult;

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    users: Arc<UserService<R>>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository + Sync,
{
    pub fn new(users: Arc<UserService<R>>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, input: SignUpInput) -> UserResult<SignInOutput> {
        let mut user = User::new(input.name, input.email, input.password);

        self.users.create(&mut user).await?;
        let remember_token = self.users.ensure_remember(&mut user).await?;

        tracing::info!(user_id = %user.id(), "User signed up");

        Ok(SignInOutput {
            user,
            remember_token,
        })
    }
}
