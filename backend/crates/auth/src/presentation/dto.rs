//! Form DTOs and form views

use kernel::view::FormView;
use serde::Deserialize;

/// POST /signup
#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup page, echoing back what was submitted
pub fn signup_view(name: &str, email: &str) -> FormView {
    FormView::post("/signup")
        .field("name", "text", "Name", name)
        .field("email", "email", "Email Address", email)
        .field("password", "password", "Password", "")
}

pub fn login_view(email: &str) -> FormView {
    FormView::post("/login")
        .field("email", "email", "Email Address", email)
        .field("password", "password", "Password", "")
}
