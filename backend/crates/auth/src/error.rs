//! User Error Types
//!
//! This module provides user-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Validation failures are split in two groups:
//! - public: their message is safe to show on a form
//! - private: shown with the generic message, details only in logs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::crypto::TokenError;
use platform::password::PasswordHashError;
use thiserror::Error;

/// User-specific result type alias
pub type UserResult<T> = Result<T, UserError>;

/// User-specific error variants
#[derive(Debug, Error)]
pub enum UserError {
    /// No (non-deleted) row matched the lookup
    #[error("Resource not found")]
    NotFound,

    /// Id must be greater than zero
    #[error("ID provided was invalid")]
    IdInvalid,

    /// Password did not match the stored hash
    #[error("Incorrect password provided")]
    PasswordIncorrect,

    #[error("Email address is required")]
    EmailRequired,

    #[error("Email address is not valid")]
    EmailInvalid,

    #[error("Email address is already taken")]
    EmailTaken,

    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("Password is required")]
    PasswordRequired,

    /// Remember token decodes to fewer than 32 bytes
    #[error("Remember token must be at least 32 bytes")]
    RememberTooShort,

    #[error("Remember token is required")]
    RememberRequired,

    /// Token generation or decoding failed
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Hashing library failure (not a mismatch)
    #[error("Password hashing error: {0}")]
    Hash(PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound => ErrorKind::NotFound,
            UserError::PasswordIncorrect => ErrorKind::Unauthorized,
            UserError::EmailTaken => ErrorKind::Conflict,
            UserError::IdInvalid
            | UserError::EmailRequired
            | UserError::EmailInvalid
            | UserError::PasswordTooShort
            | UserError::PasswordRequired
            | UserError::RememberTooShort
            | UserError::RememberRequired => ErrorKind::BadRequest,
            UserError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            UserError::Database(sqlx::Error::Database(db))
                if db.code().as_deref() == Some("23505") =>
            {
                ErrorKind::Conflict
            }
            UserError::Token(_)
            | UserError::Hash(_)
            | UserError::Database(_)
            | UserError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether the message may be shown to the user as-is
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            UserError::NotFound
                | UserError::PasswordIncorrect
                | UserError::EmailRequired
                | UserError::EmailInvalid
                | UserError::EmailTaken
                | UserError::PasswordTooShort
                | UserError::PasswordRequired
        )
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        if self.is_public() {
            AppError::new(self.kind(), self.to_string())
        } else {
            AppError::private(self.kind())
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            UserError::Database(e) => {
                tracing::error!(error = %e, "User database error");
            }
            UserError::Token(e) => {
                tracing::error!(error = %e, "Remember token error");
            }
            UserError::Hash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            UserError::Internal(msg) => {
                tracing::error!(message = %msg, "User internal error");
            }
            UserError::PasswordIncorrect => {
                tracing::warn!("Invalid login attempt");
            }
            UserError::IdInvalid | UserError::RememberTooShort | UserError::RememberRequired => {
                tracing::warn!(error = %self, "Private validation error");
            }
            _ => {
                tracing::debug!(error = %self, "User error");
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<PasswordHashError> for UserError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::Mismatch => UserError::PasswordIncorrect,
            other => UserError::Hash(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::app_error::GENERIC_MESSAGE;

    #[test]
    fn test_public_messages() {
        let err = UserError::EmailTaken.to_app_error();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "Email address is already taken");

        let err = UserError::PasswordIncorrect.to_app_error();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "Incorrect password provided");
    }

    #[test]
    fn test_private_errors_use_generic_message() {
        for err in [
            UserError::IdInvalid,
            UserError::RememberTooShort,
            UserError::RememberRequired,
            UserError::Internal("boom".to_string()),
        ] {
            assert_eq!(err.to_app_error().message(), GENERIC_MESSAGE);
        }
    }

    #[test]
    fn test_row_not_found_is_internal_here() {
        // Gateways map RowNotFound to NotFound before it reaches this type
        let err = UserError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert_eq!(UserError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_mismatch_maps_to_password_incorrect() {
        assert!(matches!(
            UserError::from(PasswordHashError::Mismatch),
            UserError::PasswordIncorrect
        ));
        assert!(matches!(
            UserError::from(PasswordHashError::InvalidHashFormat),
            UserError::Hash(_)
        ));
    }
}
