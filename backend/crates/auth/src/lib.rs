//! Auth (Users and Sessions) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, gateway trait, validation pipeline
//! - `application/` - Use cases and the user service
//! - `infra/` - PostgreSQL and in-memory gateways
//! - `presentation/` - HTTP handlers, form DTOs, session middleware, router
//!
//! ## Features
//! - Signup / login with email + password
//! - Remember-me sessions: a random token lives in the `remember_token`
//!   cookie, only its HMAC is stored
//!
//! ## Security Model
//! - Passwords hashed with Argon2id plus an application pepper
//! - Plaintext passwords zeroized once hashed
//! - Remember-token hashes keyed by a server secret

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::user_service::UserService;
pub use domain::entity::user::User;
pub use error::{UserError, UserResult};
pub use infra::{memory::MemoryUserRepository, postgres::PgUserRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::AppError,
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
