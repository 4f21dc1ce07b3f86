//! User Service
//!
//! Entry point for everything that reads or writes users. All operations go
//! through [`UserValidator`]; `authenticate` and `ensure_remember` add the
//! credential checks on top.

use std::sync::Arc;

use kernel::id::UserId;
use platform::crypto;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::validation::UserValidator;
use crate::error::UserResult;

pub struct UserService<R>
where
    R: UserRepository,
{
    validator: UserValidator<R>,
}

impl<R> UserService<R>
where
    R: UserRepository + Sync,
{
    pub fn new(repo: Arc<R>, config: &AuthConfig) -> Self {
        Self {
            validator: UserValidator::new(repo, config.signer(), config.password_pepper.clone()),
        }
    }

    pub async fn by_id(&self, id: UserId) -> UserResult<User> {
        self.validator.by_id(id).await
    }

    pub async fn by_email(&self, email: &str) -> UserResult<User> {
        self.validator.by_email(email).await
    }

    pub async fn by_remember(&self, token: &str) -> UserResult<User> {
        self.validator.by_remember(token).await
    }

    pub async fn create(&self, user: &mut User) -> UserResult<()> {
        self.validator.create(user).await
    }

    pub async fn update(&self, user: &mut User) -> UserResult<()> {
        self.validator.update(user).await
    }

    pub async fn delete(&self, id: UserId) -> UserResult<()> {
        self.validator.delete(id).await
    }

    /// Check an email/password pair
    ///
    /// ## Errors
    /// * `NotFound` - no user with that email
    /// * `PasswordIncorrect` - the password (with pepper) does not match
    pub async fn authenticate(&self, email: &str, password: String) -> UserResult<User> {
        let user = self.validator.by_email(email).await?;

        let hashed = HashedPassword::from_phc_string(user.password_hash.as_str())?;
        hashed.verify(&ClearTextPassword::new(password), self.validator.pepper())?;

        Ok(user)
    }

    /// Give `user` a plaintext remember token, rotating the stored hash if
    /// needed, and return it for the cookie
    pub async fn ensure_remember(&self, user: &mut User) -> UserResult<String> {
        if user.remember.is_empty() {
            user.remember = crypto::remember_token()?;
            self.update(user).await?;
            tracing::debug!(user_id = %user.id(), "Remember token rotated");
        }
        Ok(user.remember.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::infra::memory::MemoryUserRepository;

    fn service() -> UserService<MemoryUserRepository> {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::development()
        };
        UserService::new(Arc::new(MemoryUserRepository::new()), &config)
    }

    async fn signed_up(service: &UserService<MemoryUserRepository>) -> User {
        let mut user = User::new("Bob", "  Bob@Example.com ", "secretpw".to_string());
        service.create(&mut user).await.unwrap();
        user
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = service();
        let user = signed_up(&service).await;

        let found = service
            .authenticate("bob@example.com", "secretpw".to_string())
            .await
            .unwrap();
        assert_eq!(found.id(), user.id());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = service();
        signed_up(&service).await;

        assert!(matches!(
            service
                .authenticate("bob@example.com", "wrongpass".to_string())
                .await,
            Err(UserError::PasswordIncorrect)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_after_password_change() {
        let service = service();
        let user = signed_up(&service).await;

        let mut loaded = service.by_id(user.id()).await.unwrap();
        loaded.password = platform::password::ClearTextPassword::new("changedpw".to_string());
        service.update(&mut loaded).await.unwrap();

        let found = service
            .authenticate("bob@example.com", "changedpw".to_string())
            .await
            .unwrap();
        assert_eq!(found.id(), user.id());
        assert!(matches!(
            service
                .authenticate("bob@example.com", "secretpw".to_string())
                .await,
            Err(UserError::PasswordIncorrect)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let service = service();
        assert!(matches!(
            service
                .authenticate("nobody@example.com", "secretpw".to_string())
                .await,
            Err(UserError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_ensure_remember_rotates_token() {
        let service = service();
        let user = signed_up(&service).await;
        let first_token = user.remember.clone();

        let mut loaded = service.by_id(user.id()).await.unwrap();
        assert!(loaded.remember.is_empty());

        let token = service.ensure_remember(&mut loaded).await.unwrap();
        assert_ne!(token, first_token);

        assert_eq!(service.by_remember(&token).await.unwrap().id(), user.id());
        assert!(matches!(
            service.by_remember(&first_token).await,
            Err(UserError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_ensure_remember_keeps_fresh_token() {
        let service = service();
        let mut user = signed_up(&service).await;
        let token = user.remember.clone();
        assert_eq!(service.ensure_remember(&mut user).await.unwrap(), token);
    }
}
