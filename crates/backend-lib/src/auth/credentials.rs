// ============================
// authd-backend-lib/src/auth/credentials.rs
// ============================
//! Credential extraction from request headers.
//!
//! Every failure mode here (missing header, bad prefix, malformed Base64,
//! non-UTF8 bytes, missing separator) collapses into `None`. The caller
//! only ever distinguishes "credentials present" from "credentials absent";
//! decode errors never surface to the HTTP client.
use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Literal scheme prefix for Basic authentication, single space included.
const BASIC_PREFIX: &str = "Basic ";

/// The raw `Authorization` header value, if present and valid UTF-8.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION)?.to_str().ok()
}

/// The Base64 payload of a Basic authorization header.
///
/// The prefix check is case-sensitive; `basic ` or `Basic:` do not match.
pub fn extract_base64_payload(authorization: &str) -> Option<&str> {
    authorization.strip_prefix(BASIC_PREFIX)
}

/// Decode a standard-Base64 payload into UTF-8 text.
pub fn decode_base64(payload: &str) -> Option<String> {
    let bytes = STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}

/// Split decoded credentials into `(email, password)` on the FIRST colon.
/// The password may itself contain colons.
pub fn split_credentials(decoded: &str) -> Option<(String, String)> {
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

/// The session cookie value, read under the configured cookie name.
///
/// An unconfigured name is an absent credential, not a default-name lookup.
pub fn session_cookie(headers: &HeaderMap, session_name: Option<&str>) -> Option<String> {
    let name = session_name?;
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
}
