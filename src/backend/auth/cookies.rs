//! Session cookie
//!
//! The session token travels in an HttpOnly cookie named `token`. It is
//! `SameSite=None` so a frontend on another origin can send it with
//! credentialed requests, and `Secure` in production.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::backend::auth::sessions::SESSION_TTL_SECS;
use crate::backend::error::BackendError;

pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    secure: bool,
}

impl SessionCookie {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn render(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=None",
            SESSION_COOKIE, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value carrying `token`.
    pub fn issue(&self, token: &str) -> Result<HeaderValue, BackendError> {
        HeaderValue::from_str(&self.render(token, SESSION_TTL_SECS))
            .map_err(|e| BackendError::internal(format!("invalid cookie value: {}", e)))
    }

    /// `Set-Cookie` value that expires the session cookie immediately.
    pub fn clear(&self) -> HeaderValue {
        // Only constant ASCII goes in, so this cannot fail.
        HeaderValue::from_str(&self.render("", 0))
            .unwrap_or_else(|_| HeaderValue::from_static("token=; Path=/; Max-Age=0"))
    }
}

/// Session token from the `token` cookie, else from `Authorization: Bearer`.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    })
}
