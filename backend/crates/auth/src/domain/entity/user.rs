//! User Entity
//!
//! Account record. Plaintext credentials (`password`, `remember`) are
//! transient: they live only between a form submission and the validation
//! pipeline, and are never written to storage.

use std::fmt;

use kernel::id::{UserId, markers};
use kernel::model::Record;
use platform::password::ClearTextPassword;

/// User entity
pub struct User {
    /// Identity and timestamps
    pub record: Record<markers::User>,
    /// Display name
    pub name: String,
    /// Normalized (trimmed, lower-case) email; unique
    pub email: String,
    /// Transient plaintext password, zeroized once hashed
    pub password: ClearTextPassword,
    /// Argon2id PHC string
    pub password_hash: String,
    /// Transient plaintext remember token
    pub remember: String,
    /// HMAC of the remember token; unique
    pub remember_hash: String,
}

impl User {
    /// A not-yet-stored user built from signup input
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: String) -> Self {
        Self {
            record: Record::new(),
            name: name.into(),
            email: email.into(),
            password: ClearTextPassword::new(password),
            password_hash: String::new(),
            remember: String::new(),
            remember_hash: String::new(),
        }
    }

    /// Rebuild a user loaded from storage (no transient fields)
    pub fn from_db(
        record: Record<markers::User>,
        name: String,
        email: String,
        password_hash: String,
        remember_hash: String,
    ) -> Self {
        Self {
            record,
            name,
            email,
            password: ClearTextPassword::default(),
            password_hash,
            remember: String::new(),
            remember_hash,
        }
    }

    /// Placeholder carrying only an id (delete validation)
    pub fn with_id(id: UserId) -> Self {
        let mut user = Self::new("", "", String::new());
        let now = user.record.created_at;
        user.record.assign(id, now, now);
        user
    }

    pub fn id(&self) -> UserId {
        self.record.id()
    }

    /// Copy of the persisted columns only
    pub fn persisted(&self) -> Self {
        Self::from_db(
            self.record.clone(),
            self.name.clone(),
            self.email.clone(),
            self.password_hash.clone(),
            self.remember_hash.clone(),
        )
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id())
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("remember", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_drops_transients() {
        let mut user = User::new("Bob", "bob@example.com", "secretpw".to_string());
        user.remember = "token".to_string();
        user.password_hash = "hash".to_string();

        let stored = user.persisted();
        assert!(stored.password.is_empty());
        assert!(stored.remember.is_empty());
        assert_eq!(stored.password_hash, "hash");
        assert_eq!(stored.email, "bob@example.com");
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let mut user = User::new("Bob", "bob@example.com", "secretpw".to_string());
        user.remember = "plain-token".to_string();
        let out = format!("{:?}", user);
        assert!(!out.contains("secretpw"));
        assert!(!out.contains("plain-token"));
    }

    #[test]
    fn test_with_id() {
        assert_eq!(User::with_id(UserId::new(4)).id(), UserId::new(4));
        assert!(!User::with_id(UserId::new(0)).id().is_assigned());
    }
}
