//! Session token codec
//!
//! Wire format: `base64url(JSON(claims)) + "." + base64url(HMAC-SHA256(secret, payload))`,
//! both parts unpadded.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::claims::SessionClaims;
use crate::compare::constant_time_eq;
use crate::error::AuthError;
use crate::signature::sign_payload;

/// Serialize and sign `claims` into a cookie-ready token string.
pub fn encode_token(claims: &SessionClaims, secret: &[u8]) -> Result<String, AuthError> {
    let json = serde_json::to_vec(claims).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize session claims");
        AuthError::Serialization
    })?;

    let payload = URL_SAFE_NO_PAD.encode(json);
    let signature = sign_payload(&payload, secret)?;

    Ok(format!("{payload}.{signature}"))
}

/// Parse and verify a presented token.
///
/// Every token failure collapses into `AuthError::InvalidSession` so
/// callers cannot distinguish a bad signature from a malformed payload
/// or an expired session. A missing secret surfaces separately as
/// `AuthError::MissingSecret`.
pub fn decode_token(raw: &str, secret: &[u8], now_ms: i64) -> Result<SessionClaims, AuthError> {
    // Split at the first delimiter. The payload is base64 and cannot
    // contain '.', so a single split is exact.
    let (payload, presented) = raw.split_once('.').ok_or(AuthError::InvalidSession)?;
    if payload.is_empty() || presented.is_empty() {
        return Err(AuthError::InvalidSession);
    }

    let expected = sign_payload(payload, secret)?;
    if !constant_time_eq(&expected, presented) {
        tracing::debug!("Session signature mismatch");
        return Err(AuthError::InvalidSession);
    }

    let json = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::InvalidSession)?;
    let claims: SessionClaims =
        serde_json::from_slice(&json).map_err(|_| AuthError::InvalidSession)?;

    if claims.exp <= now_ms {
        return Err(AuthError::InvalidSession);
    }

    Ok(claims)
}
