//! Cryptographic Utilities
//!
//! - Secure random bytes / URL-safe tokens (remember tokens)
//! - HMAC-SHA256 token signing (the value stored server-side)

use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use thiserror::Error;

/// Raw byte length of a remember token
pub const REMEMBER_TOKEN_BYTES: usize = 32;

/// Token generation / decoding errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// The OS random source failed; never fall back to a weaker source
    #[error("Secure random source failed: {0}")]
    RandomSource(#[from] rand::Error),

    /// Token is not URL-safe base64
    #[error("Token is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}

/// Generate `len` cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Result<Vec<u8>, TokenError> {
    let mut bytes = vec![0u8; len];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// URL-safe (padded) base64 encoding of `n_bytes` random bytes
pub fn random_string(n_bytes: usize) -> Result<String, TokenError> {
    let bytes = random_bytes(n_bytes)?;
    Ok(URL_SAFE.encode(bytes))
}

/// Fresh remember token for the `remember_token` cookie
pub fn remember_token() -> Result<String, TokenError> {
    random_string(REMEMBER_TOKEN_BYTES)
}

/// Number of raw bytes encoded in a URL-safe base64 token
pub fn decoded_len(token: &str) -> Result<usize, TokenError> {
    Ok(URL_SAFE.decode(token)?.len())
}

/// Keyed, deterministic token digest (HMAC-SHA256, URL-safe base64 output)
///
/// The plaintext token only ever lives in the client cookie; the database
/// stores `sign(token)`, which cannot be forged without the server secret.
#[derive(Clone)]
pub struct TokenSigner {
    mac: Hmac<Sha256>,
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mac = Hmac::<Sha256>::new_from_slice(secret.as_ref())
            .expect("HMAC can take key of any size");
        Self { mac }
    }

    /// Sign `input` with the server secret
    pub fn sign(&self, input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(input.as_bytes());
        URL_SAFE.encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32).unwrap();
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));

        assert!(random_bytes(0).unwrap().is_empty());
    }

    #[test]
    fn test_remember_token_length() {
        let token = remember_token().unwrap();
        // 32 bytes -> 44 base64 chars with padding
        assert_eq!(token.len(), 44);
        assert_eq!(decoded_len(&token).unwrap(), REMEMBER_TOKEN_BYTES);
        assert!(!token.contains('+') && !token.contains('/'));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(remember_token().unwrap(), remember_token().unwrap());
    }

    #[test]
    fn test_decoded_len_short_and_invalid() {
        let short = random_string(16).unwrap();
        assert_eq!(decoded_len(&short).unwrap(), 16);
        assert!(matches!(
            decoded_len("not base64!!"),
            Err(TokenError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let signer = TokenSigner::new("secret-hmac-key");
        let token = remember_token().unwrap();
        assert_eq!(signer.sign(&token), signer.sign(&token));
        assert_ne!(signer.sign(&token), signer.sign("other"));
    }

    #[test]
    fn test_sign_depends_on_key() {
        let a = TokenSigner::new("key-a");
        let b = TokenSigner::new("key-b");
        assert_ne!(a.sign("token"), b.sign("token"));
    }

    #[test]
    fn test_sign_known_value() {
        // RFC 4231 test case 2, re-encoded as URL-safe base64
        let signer = TokenSigner::new("Jefe");
        let expected = URL_SAFE.encode(
            hex::decode("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
                .unwrap(),
        );
        assert_eq!(signer.sign("what do ya want for nothing?"), expected);
    }

    #[test]
    fn test_debug_redaction() {
        let signer = TokenSigner::new("super-secret");
        assert!(!format!("{:?}", signer).contains("super-secret"));
    }
}
