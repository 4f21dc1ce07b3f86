//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{GalleryId, UserId};
use kernel::model::Record;
use sqlx::PgPool;

use crate::domain::entity::gallery::Gallery;
use crate::domain::repository::GalleryRepository;
use crate::error::{GalleryError, GalleryResult};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS galleries (
        id          BIGSERIAL PRIMARY KEY,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        deleted_at  TIMESTAMPTZ,
        user_id     BIGINT NOT NULL,
        title       TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS galleries_user_id_idx ON galleries (user_id)",
    "CREATE INDEX IF NOT EXISTS galleries_deleted_at_idx ON galleries (deleted_at)",
];

/// PostgreSQL-backed gallery repository
#[derive(Clone)]
pub struct PgGalleryRepository {
    pool: PgPool,
}

impl PgGalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `galleries` table and its indexes if absent
    pub async fn auto_migrate(&self) -> GalleryResult<()> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        tracing::info!("galleries table ready");
        Ok(())
    }

    /// Drop and re-create the `galleries` table
    pub async fn destructive_reset(&self) -> GalleryResult<()> {
        sqlx::query("DROP TABLE IF EXISTS galleries")
            .execute(&self.pool)
            .await?;
        tracing::warn!("galleries table dropped");
        self.auto_migrate().await
    }
}

impl GalleryRepository for PgGalleryRepository {
    async fn by_id(&self, id: GalleryId) -> GalleryResult<Gallery> {
        let row = sqlx::query_as::<_, GalleryRow>(
            r#"
            SELECT id, created_at, updated_at, deleted_at, user_id, title
            FROM galleries
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.value())
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(row) => Ok(row.into_gallery()),
            Err(sqlx::Error::RowNotFound) => Err(GalleryError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn by_user_id(&self, user_id: UserId) -> GalleryResult<Vec<Gallery>> {
        let rows = sqlx::query_as::<_, GalleryRow>(
            r#"
            SELECT id, created_at, updated_at, deleted_at, user_id, title
            FROM galleries
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GalleryRow::into_gallery).collect())
    }

    async fn create(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        let (id, created_at, updated_at) =
            sqlx::query_as::<_, (i64, DateTime<Utc>, DateTime<Utc>)>(
                r#"
                INSERT INTO galleries (user_id, title)
                VALUES ($1, $2)
                RETURNING id, created_at, updated_at
                "#,
            )
            .bind(gallery.user_id.value())
            .bind(&gallery.title)
            .fetch_one(&self.pool)
            .await?;

        gallery
            .record
            .assign(GalleryId::new(id), created_at, updated_at);

        Ok(())
    }

    async fn update(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE galleries SET
                user_id = $2,
                title = $3,
                updated_at = $4
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(gallery.id().value())
        .bind(gallery.user_id.value())
        .bind(&gallery.title)
        .bind(gallery.record.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: GalleryId) -> GalleryResult<()> {
        sqlx::query(
            "UPDATE galleries SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.value())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct GalleryRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    user_id: i64,
    title: String,
}

impl GalleryRow {
    fn into_gallery(self) -> Gallery {
        Gallery::from_db(
            Record::from_db(
                GalleryId::new(self.id),
                self.created_at,
                self.updated_at,
                self.deleted_at,
            ),
            UserId::new(self.user_id),
            self.title,
        )
    }
}
