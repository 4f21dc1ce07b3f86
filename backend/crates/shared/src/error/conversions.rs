//! Error rendering
//!
//! Behind the `axum` feature, [`AppError`] renders as an alert-only view.

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        use crate::view::{Alert, ViewData};

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body: ViewData<()> = ViewData::with_alert(Alert::error(self.message()));

        (status, Json(body)).into_response()
    }
}
