//! HTTP Basic authentication
//!
//! A single credential pair, configured at startup and checked with
//! constant-time equality.

use axum::http::header;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use subtle::ConstantTimeEq;

use super::errors::{ApiError, ApiResult};

/// The username/password pair every request must present.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Constant-time check of a supplied pair
    fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok: bool = self
            .username
            .as_bytes()
            .ct_eq(username.as_bytes())
            .into();
        let pass_ok: bool = self
            .password
            .as_bytes()
            .ct_eq(password.as_bytes())
            .into();
        user_ok && pass_ok
    }
}

/// Check the `Authorization` header against the configured credentials.
///
/// Anything short of a well-formed, matching `Basic` header is the same
/// `Unauthorized` answer; the caller turns that into a 401 with a challenge.
pub fn authorize(headers: &HeaderMap, credentials: &Credentials) -> ApiResult<()> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let encoded = header
        .strip_prefix("Basic ")
        .ok_or(ApiError::Unauthorized)?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| ApiError::Unauthorized)?;
    let decoded = String::from_utf8(decoded).map_err(|_| ApiError::Unauthorized)?;

    let (username, password) = decoded.split_once(':').ok_or(ApiError::Unauthorized)?;

    if credentials.matches(username, password) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}
