//! Email normalization and format check
//!
//! Emails are compared and stored in one canonical form: surrounding
//! whitespace removed, lower-cased.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,16}$").expect("email regex is valid")
});

/// Canonical form of an email address. Idempotent.
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether a normalized email has an acceptable shape
pub fn is_valid_format(email: &str) -> bool {
    EMAIL_FORMAT.is_match(email)
}
