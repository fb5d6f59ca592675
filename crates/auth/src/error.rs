//! Session authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Session authentication error
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// The shared secret is absent; the gate refuses to operate
    MissingSecret,
    /// Missing, malformed, tampered, or expired session token.
    /// Deliberately a single variant: callers never learn why a token
    /// failed validation.
    InvalidSession,
    /// Valid session, insufficient role
    Forbidden,
    /// Claims could not be serialized when issuing a token
    Serialization,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingSecret => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MISSING_SESSION_SECRET",
                "Session secret is not configured",
            ),
            AuthError::InvalidSession => (
                StatusCode::UNAUTHORIZED,
                "INVALID_SESSION",
                "Missing or invalid session",
            ),
            AuthError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Insufficient role for this resource",
            ),
            AuthError::Serialization => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERIALIZATION_ERROR",
                "Failed to serialize session claims",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
