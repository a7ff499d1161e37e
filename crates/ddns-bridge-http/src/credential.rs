//! Credential extraction
//!
//! Routers typically let the DDNS password field carry the API token, so an
//! `Authorization: Basic base64(user:token)` header is checked first. The
//! username is ignored. The `token` query parameter is the fallback.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use ddns_bridge_core::Credential;

/// Extract the caller's credential
///
/// A well-formed Basic-Auth header with a non-empty password wins over the
/// query parameter. Empty values count as absent.
pub fn extract(headers: &HeaderMap, token_param: Option<&str>) -> Option<Credential> {
    if let Some(password) = basic_auth_password(headers) {
        return Credential::new(password).ok();
    }

    token_param.and_then(|token| Credential::new(token).ok())
}

/// Password field of a Basic `Authorization` header
fn basic_auth_password(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (_username, password) = decoded.split_once(':')?;

    if password.is_empty() {
        return None;
    }
    Some(password.to_string())
}
