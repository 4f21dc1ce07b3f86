//! Gallery Error Types
//!
//! Gallery-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Gallery-specific result type alias
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Gallery-specific error variants
#[derive(Debug, Error)]
pub enum GalleryError {
    /// No such gallery, or it belongs to someone else
    #[error("Gallery not found")]
    NotFound,

    /// Path segment is not a number
    #[error("Invalid gallery id")]
    InvalidId,

    /// Id must be greater than zero
    #[error("ID provided was invalid")]
    IdInvalid,

    /// Owning user id missing
    #[error("User ID is required")]
    UserIdRequired,

    #[error("Title is required")]
    TitleRequired,

    /// Uploaded or requested image name is unusable
    #[error("Invalid image filename")]
    InvalidFilename,

    /// Malformed multipart body
    #[error("Upload failed: {0}")]
    Upload(#[from] MultipartError),

    /// Filesystem error in the image store
    #[error("Image storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GalleryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GalleryError::NotFound | GalleryError::InvalidId => ErrorKind::NotFound,
            GalleryError::IdInvalid
            | GalleryError::UserIdRequired
            | GalleryError::TitleRequired
            | GalleryError::InvalidFilename
            | GalleryError::Upload(_) => ErrorKind::BadRequest,
            GalleryError::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorKind::NotFound,
                _ => ErrorKind::InternalServerError,
            },
            GalleryError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            GalleryError::Database(_) | GalleryError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether the message may be shown to the user as-is
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            GalleryError::NotFound
                | GalleryError::InvalidId
                | GalleryError::TitleRequired
                | GalleryError::InvalidFilename
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
            GalleryError::Database(e) => {
                tracing::error!(error = %e, "Gallery database error");
            }
            GalleryError::Io(e) => {
                tracing::error!(error = %e, "Image storage error");
            }
            GalleryError::Internal(msg) => {
                tracing::error!(message = %msg, "Gallery internal error");
            }
            GalleryError::Upload(e) => {
                tracing::warn!(error = %e, "Rejected upload");
            }
            _ => {
                tracing::debug!(error = %self, "Gallery error");
            }
        }
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
