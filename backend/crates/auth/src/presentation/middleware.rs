//! Session Middleware
//!
//! Two stages:
//! - [`identify_user`] runs on every request, resolves the remember cookie
//!   to a user and stores it as [`CurrentUser`] in the request extensions.
//!   It never fails the request.
//! - [`require_user`] guards routes that need a signed-in user and
//!   redirects to `/login` otherwise.

use std::ops::Deref;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderValue, StatusCode, header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::cookie::extract_cookie;

use crate::application::CheckSessionUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::AuthAppState;

/// Login page that unauthenticated requests are sent to
pub const LOGIN_PATH: &str = "/login";

/// Path prefixes served without a user lookup
const STATIC_PREFIXES: &[&str] = &["/assets/", "/images/"];

/// The signed-in user, stored in request extensions by [`identify_user`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Arc<User>);

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(login_redirect)
    }
}

/// 302 to the login page
pub fn login_redirect() -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, HeaderValue::from_static(LOGIN_PATH))],
    )
        .into_response()
}

/// Stage 1: attach the user owning the remember cookie, if any
pub async fn identify_user<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
{
    let path = req.uri().path();
    if STATIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return next.run(req).await;
    }

    let Some(token) = extract_cookie(req.headers(), &state.config.cookie_name) else {
        return next.run(req).await;
    };

    let use_case = CheckSessionUseCase::new(state.users.clone());
    match use_case.execute(&token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id(), "Request identified");
            req.extensions_mut().insert(CurrentUser(Arc::new(user)));
        }
        Err(e) => {
            tracing::debug!(error = %e, "Remember cookie did not resolve to a user");
        }
    }

    next.run(req).await
}

/// Stage 2: redirect to `/login` unless a user was attached
pub async fn require_user(req: Request, next: Next) -> Response {
    if req.extensions().get::<CurrentUser>().is_none() {
        return login_redirect();
    }
    next.run(req).await
}
