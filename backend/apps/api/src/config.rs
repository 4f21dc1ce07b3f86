//! Process Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::path::PathBuf;

use anyhow::{Context, bail};
use auth::AuthConfig;
use gallery::GalleryConfig;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Used when `HMAC_KEY` is unset outside production
const DEV_HMAC_KEY: &str = "secret-hmac-key";

pub struct ApiConfig {
    pub database_url: String,
    pub hmac_key: String,
    pub password_pepper: Option<String>,
    /// `APP_ENV=prod`
    pub production: bool,
    pub port: u16,
    pub images_dir: PathBuf,
    /// Drop and recreate all tables on boot
    pub database_reset: bool,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let production = var("APP_ENV").is_some_and(|v| v == "prod");

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let hmac_key = match var("HMAC_KEY") {
            Some(key) => key,
            None if production => bail!("HMAC_KEY must be set in production"),
            None => {
                tracing::warn!("HMAC_KEY not set, using the development key");
                DEV_HMAC_KEY.to_string()
            }
        };

        let password_pepper = var("PASSWORD_PEPPER");
        if production && password_pepper.is_none() {
            bail!("PASSWORD_PEPPER must be set in production");
        }

        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?,
            None => DEFAULT_PORT,
        };

        let images_dir = var("IMAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR));

        let database_reset = var("DATABASE_RESET").is_some_and(|v| matches!(v.as_str(), "1" | "true"));

        Ok(Self {
            database_url,
            hmac_key,
            password_pepper,
            production,
            port,
            images_dir,
            database_reset,
        })
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig {
            hmac_key: self.hmac_key.as_bytes().to_vec(),
            cookie_secure: self.production,
            password_pepper: self.password_pepper.as_ref().map(|p| p.as_bytes().to_vec()),
            ..AuthConfig::default()
        }
    }

    pub fn gallery(&self) -> GalleryConfig {
        GalleryConfig::new(&self.images_dir)
    }
}
