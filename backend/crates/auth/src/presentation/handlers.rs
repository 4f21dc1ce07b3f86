//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::view::{FormView, ViewData};
use platform::cookie::set_cookie_header;

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInOutput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::application::user_service::UserService;
use crate::domain::repository::UserRepository;
use crate::error::UserError;
use crate::presentation::dto::{LoginForm, SignupForm, login_view, signup_view};

/// Where a freshly signed-in user lands
pub const AFTER_LOGIN_PATH: &str = "/galleries";

/// Shared state for user handlers and the session middleware
pub struct AuthAppState<R>
where
    R: UserRepository,
{
    pub users: Arc<UserService<R>>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Sync,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let users = UserService::new(Arc::new(repo), &config);
        Self {
            users: Arc::new(users),
            config: Arc::new(config),
        }
    }
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            config: self.config.clone(),
        }
    }
}

/// Re-render a form with the error as an alert
fn form_error(err: UserError, form: FormView) -> Response {
    err.log();
    let mut view = ViewData::new(form);
    view.set_alert(&err.to_app_error());
    (err.status_code(), Json(view)).into_response()
}

/// Set the remember cookie and redirect to the galleries page
fn signed_in(config: &AuthConfig, output: SignInOutput) -> Response {
    let Some(cookie) = set_cookie_header(&config.cookie(), &output.remember_token) else {
        return UserError::Internal("remember token is not a valid header value".to_string())
            .into_response();
    };

    (
        StatusCode::FOUND,
        [
            (header::SET_COOKIE, cookie),
            (header::LOCATION, HeaderValue::from_static(AFTER_LOGIN_PATH)),
        ],
    )
        .into_response()
}

// ============================================================================
// Sign Up
// ============================================================================

/// GET /signup
pub async fn signup_form() -> Json<ViewData<FormView>> {
    Json(ViewData::new(signup_view("", "")))
}

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<SignupForm>,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
{
    let echo = signup_view(&form.name, &form.email);

    let use_case = SignUpUseCase::new(state.users.clone());
    let input = SignUpInput {
        name: form.name,
        email: form.email,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(output) => signed_in(&state.config, output),
        Err(e) => form_error(e, echo),
    }
}

// ============================================================================
// Log In
// ============================================================================

/// GET /login
pub async fn login_form() -> Json<ViewData<FormView>> {
    Json(ViewData::new(login_view("")))
}

/// POST /login
pub async fn log_in<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<LoginForm>,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
{
    let echo = login_view(&form.email);

    let use_case = SignInUseCase::new(state.users.clone());
    let input = SignInInput {
        email: form.email,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(output) => signed_in(&state.config, output),
        Err(e) => form_error(e, echo),
    }
}
