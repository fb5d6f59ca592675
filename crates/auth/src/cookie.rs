//! Session cookie handling

use axum::http::HeaderValue;

/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "elevea_sess";

/// Session lifetime advertised in Set-Cookie Max-Age: 12 hours
pub const SESSION_TTL_SECS: u64 = 43_200;

/// Extract a cookie value by name from a `Cookie` header.
///
/// Token values are base64url plus a dot, so no percent-decoding is
/// needed.
pub fn extract_cookie_value(header: &HeaderValue, name: &str) -> Option<String> {
    let raw = header.to_str().ok()?;

    for pair in raw.split(';') {
        let Some((key, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if key.trim() != name {
            continue;
        }
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        return Some(value.to_string());
    }
    None
}

/// Build the `Set-Cookie` header value for a new session.
pub fn set_cookie_header(name: &str, token: &str, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!(
        "{name}={token}; HttpOnly{secure_flag}; SameSite=Lax; Path=/; Max-Age={SESSION_TTL_SECS}"
    )
}

/// Build the `Set-Cookie` header value that clears the session cookie.
pub fn clear_cookie_header(name: &str) -> String {
    format!("{name}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}
