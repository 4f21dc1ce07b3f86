//! Schema bootstrap and state wiring

use auth::PgUserRepository;
use auth::presentation::AuthAppState;
use gallery::{GalleryAppState, PgGalleryRepository};
use sqlx::PgPool;

use crate::config::ApiConfig;

pub struct Services {
    pub auth: AuthAppState<PgUserRepository>,
    pub gallery: GalleryAppState<PgGalleryRepository>,
}

impl Services {
    /// Create (or with `DATABASE_RESET`, recreate) the tables, then build
    /// the handler states
    pub async fn setup(pool: PgPool, config: &ApiConfig) -> anyhow::Result<Self> {
        let users = PgUserRepository::new(pool.clone());
        let galleries = PgGalleryRepository::new(pool);

        if config.database_reset {
            tracing::warn!("DATABASE_RESET set, dropping all tables");
            users.destructive_reset().await?;
            galleries.destructive_reset().await?;
        } else {
            users.auto_migrate().await?;
            galleries.auto_migrate().await?;
        }

        Ok(Self {
            auth: AuthAppState::new(users, config.auth()),
            gallery: GalleryAppState::new(galleries, &config.gallery()),
        })
    }
}
