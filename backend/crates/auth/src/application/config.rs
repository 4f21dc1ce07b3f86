//! Application Configuration
//!
//! Configuration for the user/session application layer.

use platform::cookie::{CookieConfig, REMEMBER_COOKIE};
use platform::crypto::TokenSigner;


/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Remember-token cookie name
    pub cookie_name: String,
    /// HMAC key for remember-token hashes
    pub hmac_key: Vec<u8>,
    /// Whether to set the Secure cookie attribute (production)
    pub cookie_secure: bool,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: REMEMBER_COOKIE.to_string(),
            hmac_key: Vec::new(),
            cookie_secure: true,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random HMAC key (for development)
    ///
    /// Remember cookies do not survive a restart with a random key.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            hmac_key: secret.to_vec(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Signer keyed with `hmac_key`
    pub fn signer(&self) -> TokenSigner {
        TokenSigner::new(&self.hmac_key)
    }

    /// Attributes of the remember cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            ..CookieConfig::remember(self.cookie_secure)
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("hmac_key", &"[REDACTED]")
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_cookie_is_not_secure() {
        let config = AuthConfig::development();
        let cookie = config.cookie().build_set_cookie("t");
        assert!(cookie.starts_with("remember_token=t"));
        assert!(!cookie.contains("Secure"));
        assert_eq!(config.hmac_key.len(), 32);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            hmac_key: b"hmac-secret".to_vec(),
            password_pepper: Some(b"pepper-secret".to_vec()),
            ..Default::default()
        };
        let out = format!("{:?}", config);
        assert!(!out.contains("hmac-secret"));
        assert!(!out.contains("pepper-secret"));
    }
}
