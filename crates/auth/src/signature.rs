//! Keyed signature over token payloads

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Compute the HMAC-SHA256 signature of `payload`, encoded URL-safe
/// base64 without padding.
///
/// The algorithm is fixed by the wire format: changing it would
/// invalidate every cookie already issued. An empty secret is a
/// configuration error and the caller must fail closed.
pub(crate) fn sign_payload(payload: &str, secret: &[u8]) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| AuthError::MissingSecret)?;
    mac.update(payload.as_bytes());

    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}
