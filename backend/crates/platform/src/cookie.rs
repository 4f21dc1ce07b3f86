//! Cookie Handling
//!
//! Builds and reads the session cookie. The remember cookie is a session
//! cookie (no `Max-Age`), readable only over HTTP, scoped to the whole site.

use axum::http::{HeaderMap, HeaderValue, header};

/// Name of the cookie carrying the plaintext remember token
pub const REMEMBER_COOKIE: &str = "remember_token";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self::remember(false)
    }
}

impl CookieConfig {
    /// Remember-token cookie; `secure` is enabled in production only
    pub fn remember(secure: bool) -> Self {
        Self {
            name: REMEMBER_COOKIE.to_string(),
            secure,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }

    /// `Set-Cookie` value for `value`. No expiry is ever set.
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut attrs = vec![format!("{}={}", self.name, value)];
        if self.http_only {
            attrs.push("HttpOnly".to_string());
        }
        if self.secure {
            attrs.push("Secure".to_string());
        }
        attrs.push(format!("SameSite={}", self.same_site.as_str()));
        attrs.push(format!("Path={}", self.path));
        attrs.join("; ")
    }
}

/// Extract a cookie value from request headers
///
/// Looks through every `Cookie` header, so clients that split cookies across
/// several headers are handled too.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

/// Create a Set-Cookie header value
///
/// Returns `None` if the value contains bytes not allowed in a header.
pub fn set_cookie_header(config: &CookieConfig, value: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&config.build_set_cookie(value)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_cookie_attributes() {
        let cookie = CookieConfig::remember(false).build_set_cookie("tok=");
        assert_eq!(cookie, "remember_token=tok=; HttpOnly; SameSite=Lax; Path=/");
        assert!(!cookie.contains("Max-Age"));
    }

    #[test]
    fn test_secure_in_production() {
        let cookie = CookieConfig::remember(true).build_set_cookie("abc");
        assert!(cookie.contains("; Secure"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; remember_token=abc123==; other=xyz"),
        );

        // Base64 padding must survive the split on the first '='
        assert_eq!(
            extract_cookie(&headers, REMEMBER_COOKIE),
            Some("abc123==".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("remember_token=zz"));
        assert_eq!(
            extract_cookie(&headers, REMEMBER_COOKIE),
            Some("zz".to_string())
        );
    }

    #[test]
    fn test_set_cookie_header_rejects_invalid_bytes() {
        assert!(set_cookie_header(&CookieConfig::default(), "bad\nvalue").is_none());
        assert!(set_cookie_header(&CookieConfig::default(), "good").is_some());
    }
}
