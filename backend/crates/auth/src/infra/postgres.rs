//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::model::Record;
use sqlx::PgPool;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

const EMAIL_UNIQUE_INDEX: &str = "users_email_key";

/// Table and index definitions, applied one statement at a time
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id              BIGSERIAL PRIMARY KEY,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
        deleted_at      TIMESTAMPTZ,
        name            TEXT NOT NULL DEFAULT '',
        email           TEXT NOT NULL,
        password_hash   TEXT NOT NULL,
        remember_hash   TEXT NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (email) WHERE deleted_at IS NULL",
    "CREATE UNIQUE INDEX IF NOT EXISTS users_remember_hash_key ON users (remember_hash) WHERE deleted_at IS NULL",
    "CREATE INDEX IF NOT EXISTS users_deleted_at_idx ON users (deleted_at)",
];

const SELECT_USER: &str = r#"
    SELECT
        id,
        created_at,
        updated_at,
        deleted_at,
        name,
        email,
        password_hash,
        remember_hash
    FROM users
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `users` table and its indexes if absent
    pub async fn auto_migrate(&self) -> UserResult<()> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        tracing::info!("users table ready");
        Ok(())
    }

    /// Drop and re-create the `users` table
    pub async fn destructive_reset(&self) -> UserResult<()> {
        sqlx::query("DROP TABLE IF EXISTS users")
            .execute(&self.pool)
            .await?;
        tracing::warn!("users table dropped");
        self.auto_migrate().await
    }

    async fn fetch_one_where(&self, clause: &str, bind: QueryArg<'_>) -> UserResult<User> {
        let sql = format!("{SELECT_USER} WHERE {clause} AND deleted_at IS NULL");
        let query = sqlx::query_as::<_, UserRow>(&sql);
        let query = match bind {
            QueryArg::Id(id) => query.bind(id),
            QueryArg::Text(text) => query.bind(text),
        };

        match query.fetch_one(&self.pool).await {
            Ok(row) => Ok(row.into_user()),
            Err(sqlx::Error::RowNotFound) => Err(UserError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}

enum QueryArg<'a> {
    Id(i64),
    Text(&'a str),
}

fn is_email_constraint(constraint: Option<&str>) -> bool {
    constraint == Some(EMAIL_UNIQUE_INDEX)
}

/// The email index lost the check-then-insert race. Other violations stay
/// database errors.
fn unique_violation_to_taken(err: sqlx::Error) -> UserError {
    match &err {
        sqlx::Error::Database(db)
            if db.is_unique_violation() && is_email_constraint(db.constraint()) =>
        {
            UserError::EmailTaken
        }
        _ => UserError::Database(err),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn by_id(&self, id: UserId) -> UserResult<User> {
        self.fetch_one_where("id = $1", QueryArg::Id(id.value()))
            .await
    }

    async fn by_email(&self, email: &str) -> UserResult<User> {
        self.fetch_one_where("email = $1", QueryArg::Text(email))
            .await
    }

    async fn by_remember_hash(&self, remember_hash: &str) -> UserResult<User> {
        self.fetch_one_where("remember_hash = $1", QueryArg::Text(remember_hash))
            .await
    }

    async fn create(&self, user: &mut User) -> UserResult<()> {
        let (id, created_at, updated_at) =
            sqlx::query_as::<_, (i64, DateTime<Utc>, DateTime<Utc>)>(
                r#"
                INSERT INTO users (
                    name,
                    email,
                    password_hash,
                    remember_hash
                ) VALUES ($1, $2, $3, $4)
                RETURNING id, created_at, updated_at
                "#,
            )
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.remember_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(unique_violation_to_taken)?;

        user.record.assign(UserId::new(id), created_at, updated_at);

        tracing::debug!(user_id = id, "User row inserted");

        Ok(())
    }

    async fn update(&self, user: &mut User) -> UserResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                remember_hash = $5,
                updated_at = $6
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user.id().value())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.remember_hash)
        .bind(user.record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(unique_violation_to_taken)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: UserId) -> UserResult<()> {
        sqlx::query("UPDATE users SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    name: String,
    email: String,
    password_hash: String,
    remember_hash: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User::from_db(
            Record::from_db(
                UserId::new(self.id),
                self.created_at,
                self.updated_at,
                self.deleted_at,
            ),
            self.name,
            self.email,
            self.password_hash,
            self.remember_hash,
        )
    }
}
