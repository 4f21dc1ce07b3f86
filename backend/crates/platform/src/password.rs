//! Password Hashing and Verification
//!
//! Credential hashing with:
//! - Argon2id hashing (memory-hard, fixed default parameters)
//! - Application-wide pepper appended to the plaintext before hashing
//! - Zeroization of plaintext buffers
//!
//! Verification distinguishes a wrong password ([`PasswordHashError::Mismatch`])
//! from a broken stored hash or library failure.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Minimum password length (bytes)
pub const MIN_PASSWORD_LENGTH: usize = 8;

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Password does not match the stored hash (expected, user-facing)
    #[error("Password does not match")]
    Mismatch,

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Plaintext
// ============================================================================

/// A submitted password. Wiped from memory on drop, never `Clone`, and
/// redacted in `Debug`.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a plaintext password. Policy checks live in the validation pipeline.
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Password bytes with the pepper appended; zeroized when dropped
    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut combined = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            combined.extend_from_slice(p);
        }
        combined
    }

    /// Argon2id hash of `password || pepper` with a fresh random salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
            .to_string();

        Ok(HashedPassword { hash: phc })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Stored hash
// ============================================================================

/// Argon2 hash in PHC string form, as stored in `users.password_hash`
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, PasswordHashError};
///
/// let password = ClearTextPassword::new("secretpw".to_string());
/// let hashed = password.hash(Some(b"pepper")).unwrap();
///
/// assert!(hashed.verify(&password, Some(b"pepper")).is_ok());
/// assert!(matches!(
///     hashed.verify(&password, None),
///     Err(PasswordHashError::Mismatch)
/// ));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a stored hash, rejecting anything that is not PHC
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = phc.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    pub fn into_phc_string(self) -> String {
        self.hash
    }

    /// Check `password || pepper` against this hash
    ///
    /// ## Errors
    /// * `Mismatch` - wrong password (or wrong pepper)
    /// * `InvalidHashFormat` - the stored hash cannot be parsed
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        pepper: Option<&[u8]>,
    ) -> Result<(), PasswordHashError> {
        let parsed =
            PasswordHash::new(&self.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => PasswordHashError::Mismatch,
                other => PasswordHashError::HashingFailed(other.to_string()),
            })
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
