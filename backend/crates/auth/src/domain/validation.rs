//! User Validation Pipeline
//!
//! Every create/update/delete of a [`User`] runs an ordered list of
//! [`UserStep`]s through one driver. A step either normalizes/derives a
//! field or rejects the record; the first rejection stops the chain.

use std::sync::Arc;

use kernel::id::UserId;
use platform::crypto::{self, REMEMBER_TOKEN_BYTES, TokenSigner};
use platform::password::{ClearTextPassword, MIN_PASSWORD_LENGTH};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email;
use crate::error::{UserError, UserResult};

/// A single check or mutation applied to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStep {
    PasswordRequired,
    PasswordMinLength,
    HashPassword,
    PasswordHashRequired,
    DefaultRemember,
    RememberMinBytes,
    SignRemember,
    RememberHashRequired,
    NormalizeEmail,
    RequireEmail,
    EmailFormat,
    EmailAvailable,
    IdGreaterThanZero,
}

pub const CREATE_STEPS: &[UserStep] = &[
    UserStep::PasswordRequired,
    UserStep::PasswordMinLength,
    UserStep::HashPassword,
    UserStep::PasswordHashRequired,
    UserStep::DefaultRemember,
    UserStep::RememberMinBytes,
    UserStep::SignRemember,
    UserStep::RememberHashRequired,
    UserStep::NormalizeEmail,
    UserStep::RequireEmail,
    UserStep::EmailFormat,
    UserStep::EmailAvailable,
];

pub const UPDATE_STEPS: &[UserStep] = &[
    UserStep::PasswordMinLength,
    UserStep::HashPassword,
    UserStep::PasswordHashRequired,
    UserStep::RememberMinBytes,
    UserStep::SignRemember,
    UserStep::RememberHashRequired,
    UserStep::NormalizeEmail,
    UserStep::RequireEmail,
    UserStep::EmailFormat,
    UserStep::EmailAvailable,
];

pub const DELETE_STEPS: &[UserStep] = &[UserStep::IdGreaterThanZero];

/// Validation layer in front of a [`UserRepository`]
///
/// Lookups by email and by remember token are canonicalized here too
/// (normalize / sign) before reaching the gateway.
pub struct UserValidator<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    signer: TokenSigner,
    pepper: Option<Vec<u8>>,
}

impl<R> UserValidator<R>
where
    R: UserRepository + Sync,
{
    pub fn new(repo: Arc<R>, signer: TokenSigner, pepper: Option<Vec<u8>>) -> Self {
        Self {
            repo,
            signer,
            pepper,
        }
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.pepper.as_deref()
    }

    // ========================================================================
    // Gateway operations
    // ========================================================================

    pub async fn by_id(&self, id: UserId) -> UserResult<User> {
        self.repo.by_id(id).await
    }

    pub async fn by_email(&self, raw: &str) -> UserResult<User> {
        self.repo.by_email(&email::normalize(raw)).await
    }

    /// Look up the owner of a plaintext remember token
    pub async fn by_remember(&self, token: &str) -> UserResult<User> {
        let remember_hash = self.signer.sign(token);
        self.repo.by_remember_hash(&remember_hash).await
    }

    pub async fn create(&self, user: &mut User) -> UserResult<()> {
        self.run(user, CREATE_STEPS).await?;
        self.repo.create(user).await
    }

    pub async fn update(&self, user: &mut User) -> UserResult<()> {
        self.run(user, UPDATE_STEPS).await?;
        user.record.touch();
        self.repo.update(user).await
    }

    pub async fn delete(&self, id: UserId) -> UserResult<()> {
        let mut user = User::with_id(id);
        self.run(&mut user, DELETE_STEPS).await?;
        self.repo.delete(id).await
    }

    // ========================================================================
    // Driver
    // ========================================================================

    /// Apply `steps` in order, stopping at the first error
    pub async fn run(&self, user: &mut User, steps: &[UserStep]) -> UserResult<()> {
        for step in steps {
            self.apply(*step, user).await?;
        }
        Ok(())
    }

    async fn apply(&self, step: UserStep, user: &mut User) -> UserResult<()> {
        match step {
            UserStep::PasswordRequired => {
                if user.password.is_empty() {
                    return Err(UserError::PasswordRequired);
                }
            }
            UserStep::PasswordMinLength => {
                if !user.password.is_empty() && user.password.len() < MIN_PASSWORD_LENGTH {
                    return Err(UserError::PasswordTooShort);
                }
            }
            UserStep::HashPassword => {
                if !user.password.is_empty() {
                    let hashed = user.password.hash(self.pepper())?;
                    user.password_hash = hashed.into_phc_string();
                    // Old plaintext is zeroized on drop
                    user.password = ClearTextPassword::default();
                }
            }
            UserStep::PasswordHashRequired => {
                if user.password_hash.is_empty() {
                    return Err(UserError::PasswordRequired);
                }
            }
            UserStep::DefaultRemember => {
                if user.remember.is_empty() {
                    user.remember = crypto::remember_token()?;
                }
            }
            UserStep::RememberMinBytes => {
                if !user.remember.is_empty()
                    && crypto::decoded_len(&user.remember)? < REMEMBER_TOKEN_BYTES
                {
                    return Err(UserError::RememberTooShort);
                }
            }
            UserStep::SignRemember => {
                if !user.remember.is_empty() {
                    user.remember_hash = self.signer.sign(&user.remember);
                }
            }
            UserStep::RememberHashRequired => {
                if user.remember_hash.is_empty() {
                    return Err(UserError::RememberRequired);
                }
            }
            UserStep::NormalizeEmail => {
                user.email = email::normalize(&user.email);
            }
            UserStep::RequireEmail => {
                if user.email.is_empty() {
                    return Err(UserError::EmailRequired);
                }
            }
            UserStep::EmailFormat => {
                if !user.email.is_empty() && !email::is_valid_format(&user.email) {
                    return Err(UserError::EmailInvalid);
                }
            }
            UserStep::EmailAvailable => match self.repo.by_email(&user.email).await {
                Ok(existing) if existing.id() != user.id() => {
                    return Err(UserError::EmailTaken);
                }
                Ok(_) | Err(UserError::NotFound) => {}
                Err(e) => return Err(e),
            },
            UserStep::IdGreaterThanZero => {
                if !user.id().is_assigned() {
                    return Err(UserError::IdInvalid);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryUserRepository;
    use platform::password::HashedPassword;

    const PEPPER: &[u8] = b"test-pepper";

    fn validator() -> UserValidator<MemoryUserRepository> {
        UserValidator::new(
            Arc::new(MemoryUserRepository::new()),
            TokenSigner::new("test-hmac-key"),
            Some(PEPPER.to_vec()),
        )
    }

    #[tokio::test]
    async fn test_create_normalizes_and_hashes() {
        let v = validator();
        let mut user = User::new("Bob", "  Bob@Example.com ", "secretpw".to_string());
        v.create(&mut user).await.unwrap();

        assert!(user.id().is_assigned());
        assert_eq!(user.email, "bob@example.com");
        assert!(user.password.is_empty());
        assert!(!user.password_hash.is_empty());
        assert!(!user.remember.is_empty());
        assert_eq!(user.remember_hash, v.signer().sign(&user.remember));

        let hashed = HashedPassword::from_phc_string(user.password_hash.clone()).unwrap();
        let plain = ClearTextPassword::new("secretpw".to_string());
        assert!(hashed.verify(&plain, Some(PEPPER)).is_ok());
    }

    #[tokio::test]
    async fn test_create_step_order() {
        let v = validator();

        // Password checks come before email checks
        let mut user = User::new("", "", String::new());
        assert!(matches!(
            v.create(&mut user).await,
            Err(UserError::PasswordRequired)
        ));

        let mut user = User::new("", "not-an-email", "short".to_string());
        assert!(matches!(
            v.create(&mut user).await,
            Err(UserError::PasswordTooShort)
        ));

        let mut user = User::new("", "   ", "secretpw".to_string());
        assert!(matches!(
            v.create(&mut user).await,
            Err(UserError::EmailRequired)
        ));

        let mut user = User::new("", "bob@example", "secretpw".to_string());
        assert!(matches!(
            v.create(&mut user).await,
            Err(UserError::EmailInvalid)
        ));
    }

    #[tokio::test]
    async fn test_password_length_counts_bytes() {
        let v = validator();
        // 4 characters, 8 bytes
        let mut user = User::new("", "u@example.com", "éééé".to_string());
        assert!(v.create(&mut user).await.is_ok());
    }

    #[tokio::test]
    async fn test_email_taken() {
        let v = validator();
        let mut first = User::new("A", "a@example.com", "secretpw".to_string());
        v.create(&mut first).await.unwrap();

        let mut second = User::new("B", " A@EXAMPLE.com", "secretpw".to_string());
        assert!(matches!(
            v.create(&mut second).await,
            Err(UserError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let v = validator();
        let mut user = User::new("A", "a@example.com", "secretpw".to_string());
        v.create(&mut user).await.unwrap();
        let old_hash = user.password_hash.clone();

        let mut loaded = v.by_id(user.id()).await.unwrap();
        loaded.name = "Renamed".to_string();
        v.update(&mut loaded).await.unwrap();

        // No new plaintext: hash untouched
        assert_eq!(loaded.password_hash, old_hash);
        assert_eq!(v.by_id(user.id()).await.unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_rehashes_new_password() {
        let v = validator();
        let mut user = User::new("A", "a@example.com", "secretpw".to_string());
        v.create(&mut user).await.unwrap();
        let old_hash = user.password_hash.clone();

        let mut loaded = v.by_id(user.id()).await.unwrap();
        loaded.password = ClearTextPassword::new("brandnewpw".to_string());
        v.update(&mut loaded).await.unwrap();

        assert!(loaded.password.is_empty());
        assert_ne!(loaded.password_hash, old_hash);

        let stored = v.by_id(user.id()).await.unwrap();
        assert_eq!(stored.password_hash, loaded.password_hash);
        let hashed = HashedPassword::from_phc_string(stored.password_hash).unwrap();
        let plain = ClearTextPassword::new("brandnewpw".to_string());
        assert!(hashed.verify(&plain, Some(PEPPER)).is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_short_password() {
        let v = validator();
        let mut user = User::new("A", "a@example.com", "secretpw".to_string());
        v.create(&mut user).await.unwrap();

        let mut loaded = v.by_id(user.id()).await.unwrap();
        loaded.password = ClearTextPassword::new("short77".to_string());
        assert!(matches!(
            v.update(&mut loaded).await,
            Err(UserError::PasswordTooShort)
        ));
        assert_eq!(
            v.by_id(user.id()).await.unwrap().password_hash,
            user.password_hash
        );
    }

    #[tokio::test]
    async fn test_short_remember_rejected() {
        let v = validator();
        let mut user = User::new("A", "a@example.com", "secretpw".to_string());
        user.remember = crypto::random_string(16).unwrap();
        assert!(matches!(
            v.create(&mut user).await,
            Err(UserError::RememberTooShort)
        ));

        let mut user = User::new("A", "a@example.com", "secretpw".to_string());
        user.remember = "%%% not base64".to_string();
        assert!(matches!(v.create(&mut user).await, Err(UserError::Token(_))));
    }

    #[tokio::test]
    async fn test_lookup_by_email_and_remember() {
        let v = validator();
        let mut user = User::new("A", "a@example.com", "secretpw".to_string());
        v.create(&mut user).await.unwrap();

        let by_email = v.by_email("  A@Example.COM").await.unwrap();
        assert_eq!(by_email.id(), user.id());

        let by_token = v.by_remember(&user.remember).await.unwrap();
        assert_eq!(by_token.id(), user.id());

        assert!(matches!(
            v.by_remember("unknown").await,
            Err(UserError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_requires_positive_id() {
        let v = validator();
        assert!(matches!(
            v.delete(UserId::new(0)).await,
            Err(UserError::IdInvalid)
        ));

        let mut user = User::new("A", "a@example.com", "secretpw".to_string());
        v.create(&mut user).await.unwrap();
        v.delete(user.id()).await.unwrap();
        assert!(matches!(v.by_id(user.id()).await, Err(UserError::NotFound)));
    }
}
