//! User Router

use axum::{Router, routing::get};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Signup and login pages
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/signup",
            get(handlers::signup_form).post(handlers::sign_up::<R>),
        )
        .route(
            "/login",
            get(handlers::login_form).post(handlers::log_in::<R>),
        )
        .with_state(state)
}
